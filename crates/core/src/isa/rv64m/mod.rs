//! RV64M multiply/divide extension constants.

/// funct3 function codes.
pub mod funct3;
/// Opcode-level selector.
pub mod opcodes;
