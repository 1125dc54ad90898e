//! Instruction field and immediate extraction tests.

use crate::common::builder::{self, InstructionBuilder};
use rvcycle_core::isa::rv64i::opcodes;
use rvcycle_core::isa::{decode, InstructionBits};

#[test]
fn field_extraction() {
    let inst = builder::add(5, 10, 15);
    assert_eq!(inst.opcode(), opcodes::OP_REG);
    assert_eq!(inst.rd(), 5);
    assert_eq!(inst.rs1(), 10);
    assert_eq!(inst.rs2(), 15);
    assert_eq!(inst.funct3(), 0);
    assert_eq!(inst.funct7(), 0);
}

#[test]
fn i_type_immediate_sign_extends() {
    let d = decode(builder::addi(1, 2, -1));
    assert_eq!(d.imm, -1);
    let d = decode(builder::addi(1, 2, 2047));
    assert_eq!(d.imm, 2047);
    let d = decode(builder::addi(1, 2, -2048));
    assert_eq!(d.imm, -2048);
}

#[test]
fn s_type_immediate_reassembles() {
    let d = decode(builder::sw(2, 3, -8));
    assert_eq!(d.imm, -8);
    let d = decode(builder::sd(2, 3, 1023));
    assert_eq!(d.imm, 1023);
}

#[test]
fn b_type_immediate_is_even_offset() {
    let d = decode(builder::beq(1, 2, 8));
    assert_eq!(d.imm, 8);
    let d = decode(builder::bne(1, 2, -4096));
    assert_eq!(d.imm, -4096);
    let d = decode(builder::blt(1, 2, 4094));
    assert_eq!(d.imm, 4094);
}

#[test]
fn u_type_immediate_comes_preshifted() {
    let d = decode(builder::lui(1, 0x12345));
    assert_eq!(d.imm, 0x12345 << 12);
    // Upper-immediate with the sign bit set is negative.
    let d = decode(builder::lui(1, 0xFFFFFu32 as i32));
    assert_eq!(d.imm, -4096);
}

#[test]
fn j_type_immediate_reassembles() {
    let d = decode(builder::jal(1, 8));
    assert_eq!(d.imm, 8);
    let d = decode(builder::jal(1, -8));
    assert_eq!(d.imm, -8);
    let d = decode(builder::jal(0, 0xFF000));
    assert_eq!(d.imm, 0xFF000);
}

#[test]
fn r_type_has_no_immediate() {
    let d = decode(builder::add(1, 2, 3));
    assert_eq!(d.imm, 0);
}

#[test]
fn builder_and_decoder_agree_on_registers() {
    let inst = InstructionBuilder::new()
        .opcode(opcodes::OP_LOAD)
        .rd(7)
        .rs1(27)
        .funct3(0b011)
        .imm(16)
        .encode();
    let d = decode(inst);
    assert_eq!(d.rd, 7);
    assert_eq!(d.rs1, 27);
    assert_eq!(d.imm, 16);
    assert_eq!(d.funct3, 0b011);
}
