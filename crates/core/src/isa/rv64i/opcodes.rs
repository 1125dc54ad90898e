//! RV64I major opcodes (bits 6-0).

/// Load instructions (LB, LH, LW, LD and unsigned variants).
pub const OP_LOAD: u32 = 0b0000011;
/// Immediate arithmetic (ADDI, SLTI, ANDI, shifts, ...).
pub const OP_IMM: u32 = 0b0010011;
/// Add Upper Immediate to PC.
pub const OP_AUIPC: u32 = 0b0010111;
/// 32-bit immediate arithmetic (ADDIW, SLLIW, SRLIW, SRAIW).
pub const OP_IMM_32: u32 = 0b0011011;
/// Store instructions (SB, SH, SW, SD).
pub const OP_STORE: u32 = 0b0100011;
/// Register-register arithmetic (ADD, SUB, logic, shifts, M extension).
pub const OP_REG: u32 = 0b0110011;
/// Load Upper Immediate.
pub const OP_LUI: u32 = 0b0110111;
/// 32-bit register-register arithmetic (ADDW, SUBW, shifts, M word ops).
pub const OP_REG_32: u32 = 0b0111011;
/// Conditional branches (BEQ, BNE, BLT, BGE, BLTU, BGEU).
pub const OP_BRANCH: u32 = 0b1100011;
/// Jump and Link Register.
pub const OP_JALR: u32 = 0b1100111;
/// Jump and Link.
pub const OP_JAL: u32 = 0b1101111;
/// System instructions (ECALL, CSR accesses).
pub const OP_SYSTEM: u32 = 0b1110011;

/// Floating-point family opcodes (LOAD-FP, STORE-FP, OP-FP, FMADD, FMSUB,
/// FNMSUB, FNMADD). Recognized only to reject them with a diagnostic.
pub const FP_FAMILY: [u32; 7] = [
    0b0000111, 0b0100111, 0b1010011, 0b1000011, 0b1000111, 0b1001011, 0b1001111,
];
