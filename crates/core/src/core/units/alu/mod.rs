//! Arithmetic Logic Unit.
//!
//! Implements every integer operation of RV64I and the M extension,
//! including the 32-bit word (`...W`) variants, which operate on the low
//! 32 bits and sign-extend the result to 64 bits. Operations are grouped
//! into submodules by category:
//! - [`arithmetic`]: add, sub, multiply, divide, remainder
//! - [`logic`]:      or, and, xor, set-less-than
//! - [`shifts`]:     sll, srl, sra

/// Addition, subtraction, and the multiply/divide family.
pub mod arithmetic;
/// Bitwise and comparison operations.
pub mod logic;
/// Shift operations.
pub mod shifts;

use crate::core::pipeline::signals::AluOp;

/// The integer ALU.
pub struct Alu;

impl Alu {
    /// Executes one ALU operation.
    ///
    /// Returns `(result, overflow)`. The overflow flag is meaningful for
    /// addition and subtraction (signed overflow) and false for every other
    /// operation. `AluOp::None` produces 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvcycle_core::core::units::alu::Alu;
    /// use rvcycle_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 40, 2).0, 42);
    /// assert_eq!(Alu::execute(AluOp::Slt, (-5i64) as u64, 3).0, 1);
    /// // DIVW by zero: quotient is all ones, sign-extended.
    /// assert_eq!(Alu::execute(AluOp::DivW, 7, 0).0, u64::MAX);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64) -> (u64, bool) {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::AddW
            | AluOp::SubW
            | AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::MulW
            | AluOp::Div
            | AluOp::Divu
            | AluOp::DivW
            | AluOp::DivuW
            | AluOp::Rem
            | AluOp::Remu
            | AluOp::RemW
            | AluOp::RemuW => arithmetic::execute(op, a, b),

            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                (logic::execute(op, a, b), false)
            }

            AluOp::Sll
            | AluOp::Srl
            | AluOp::Sra
            | AluOp::SllW
            | AluOp::SrlW
            | AluOp::SraW => (shifts::execute(op, a, b), false),

            AluOp::None => (0, false),
        }
    }
}
