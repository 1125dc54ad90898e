//! ALU bitwise and comparison operations.

use crate::core::pipeline::signals::AluOp;

/// Executes a bitwise or set-less-than operation.
///
/// `Slt` compares as signed 64-bit, `Sltu` as unsigned; both produce 0 or 1.
/// Non-logic opcodes produce 0.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => ((a as i64) < (b as i64)) as u64,
        AluOp::Sltu => (a < b) as u64,
        _ => 0,
    }
}
