//! RV64I base integer instruction set constants.

/// funct3 function codes.
pub mod funct3;
/// funct7 function codes.
pub mod funct7;
/// Major opcodes.
pub mod opcodes;
