//! Instruction decoding.
//!
//! Splits a 32-bit encoding into its fields and produces the sign-extended
//! immediate for the instruction's format. U-format immediates come out
//! already shifted left by 12, and J-format immediates are full signed byte
//! offsets, so downstream stages consume `imm` uniformly.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv64i::opcodes;

/// Decodes an instruction word into its component fields.
///
/// The immediate is selected by the opcode's format class; opcodes without an
/// immediate (R-type, SYSTEM) decode to `imm == 0`.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_IMM_32 | opcodes::OP_LOAD | opcodes::OP_JALR => i_imm(inst),
        opcodes::OP_STORE => s_imm(inst),
        opcodes::OP_BRANCH => b_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => u_imm(inst),
        opcodes::OP_JAL => j_imm(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm,
    }
}

/// I-format: `imm[11:0] | rs1 | funct3 | rd | opcode`.
fn i_imm(inst: u32) -> i64 {
    ((inst as i32) >> 20) as i64
}

/// S-format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
fn s_imm(inst: u32) -> i64 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    sign_extend((high << 5) | low, 12)
}

/// B-format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
///
/// The immediate is an even byte offset; bit 0 is implicit zero.
fn b_imm(inst: u32) -> i64 {
    let bit_11 = (inst >> 7) & 0x1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 0x1;
    sign_extend(
        (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1),
        13,
    )
}

/// U-format: `imm[31:12] | rd | opcode`. Produced already shifted left by 12.
fn u_imm(inst: u32) -> i64 {
    ((inst & 0xFFFF_F000) as i32) as i64
}

/// J-format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
///
/// The immediate is an even byte offset; bit 0 is implicit zero.
fn j_imm(inst: u32) -> i64 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 0x1;
    sign_extend(
        (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1),
        21,
    )
}

/// Sign-extends the low `bits` bits of `val` to 64 bits.
fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = 32 - bits;
    ((val as i32) << shift >> shift) as i64
}
