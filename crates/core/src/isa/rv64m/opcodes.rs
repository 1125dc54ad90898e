//! RV64M opcode-level selector.
//!
//! The M extension shares `OP_REG` / `OP_REG_32` with the base integer set
//! and is selected by funct7 == 1.

/// M-extension marker value of the funct7 field.
pub const M_EXTENSION: u32 = 0b0000001;
