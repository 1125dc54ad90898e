//! RV64I funct7 codes (bits 31-25).

/// Base encoding (ADD, SRL, SLL, ...).
pub const BASE: u32 = 0b0000000;
/// Alternate encoding: SUB instead of ADD, SRA instead of SRL.
pub const ALT: u32 = 0b0100000;
