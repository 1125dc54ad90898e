//! ALU arithmetic operations.
//!
//! Addition, subtraction, and the full M-extension multiply/divide family,
//! in both 64-bit and 32-bit word forms. Word results are sign-extended from
//! bit 31. Division by zero follows the base ISA: the quotient is all ones
//! and the remainder is the dividend.

use crate::core::pipeline::signals::AluOp;

/// Sign-extends a 32-bit value to the 64-bit register width.
fn sext_w(val: i32) -> u64 {
    val as i64 as u64
}

/// Executes an arithmetic operation; returns `(result, overflow)`.
///
/// Overflow is signed add/sub overflow; multiply, divide, and remainder
/// always report false. Non-arithmetic opcodes produce `(0, false)`.
pub fn execute(op: AluOp, a: u64, b: u64) -> (u64, bool) {
    match op {
        AluOp::Add => (
            a.wrapping_add(b),
            (a as i64).checked_add(b as i64).is_none(),
        ),
        AluOp::Sub => (
            a.wrapping_sub(b),
            (a as i64).checked_sub(b as i64).is_none(),
        ),
        AluOp::AddW => (
            sext_w((a as i32).wrapping_add(b as i32)),
            (a as i32).checked_add(b as i32).is_none(),
        ),
        AluOp::SubW => (
            sext_w((a as i32).wrapping_sub(b as i32)),
            (a as i32).checked_sub(b as i32).is_none(),
        ),

        AluOp::Mul => (a.wrapping_mul(b), false),
        AluOp::MulW => (sext_w((a as i32).wrapping_mul(b as i32)), false),
        // High multiplies widen through i128/u128; the sign of each operand
        // decides the extension (RISC-V spec section 7.1).
        AluOp::Mulh => ((((a as i64 as i128) * (b as i64 as i128)) >> 64) as u64, false),
        AluOp::Mulhsu => (
            (((a as i64 as i128) * (b as u128 as i128)) >> 64) as u64,
            false,
        ),
        AluOp::Mulhu => ((((a as u128) * (b as u128)) >> 64) as u64, false),

        AluOp::Div => {
            let q = if b == 0 {
                -1i64 as u64
            } else {
                (a as i64).wrapping_div(b as i64) as u64
            };
            (q, false)
        }
        AluOp::Divu => {
            let q = if b == 0 { u64::MAX } else { a / b };
            (q, false)
        }
        AluOp::DivW => {
            let q = if (b as i32) == 0 {
                -1i64 as u64
            } else {
                sext_w((a as i32).wrapping_div(b as i32))
            };
            (q, false)
        }
        AluOp::DivuW => {
            let q = if (b as u32) == 0 {
                u64::MAX
            } else {
                sext_w(((a as u32) / (b as u32)) as i32)
            };
            (q, false)
        }

        AluOp::Rem => {
            let r = if b == 0 {
                a
            } else {
                (a as i64).wrapping_rem(b as i64) as u64
            };
            (r, false)
        }
        AluOp::Remu => {
            let r = if b == 0 { a } else { a % b };
            (r, false)
        }
        AluOp::RemW => {
            // Div-by-zero returns the low 32 bits of the dividend, sign-extended.
            let r = if (b as i32) == 0 {
                sext_w(a as i32)
            } else {
                sext_w((a as i32).wrapping_rem(b as i32))
            };
            (r, false)
        }
        AluOp::RemuW => {
            let r = if (b as u32) == 0 {
                sext_w(a as u32 as i32)
            } else {
                sext_w(((a as u32) % (b as u32)) as i32)
            };
            (r, false)
        }

        _ => (0, false),
    }
}
