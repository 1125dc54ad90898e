//! Control unit.
//!
//! Turns a raw instruction word into the [`ControlSignals`] record consumed
//! by every downstream stage. The mapping is exhaustive over the RV64I+M
//! opcode space, tie-broken on funct3 and then funct7. Anything the unit
//! cannot place (unknown opcodes, malformed funct combinations,
//! floating-point-family opcodes) is demoted to a NOP so the pipeline keeps
//! flowing; with tracing enabled each demotion is reported on stderr.

use crate::config::Config;
use crate::core::pipeline::signals::{
    AluASrc, AluOp, BranchOp, ControlSignals, MemReadOp, MemWriteOp, WbSrc,
};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv64i::{funct3, funct7, opcodes};
use crate::isa::rv64m::{funct3 as m_funct3, opcodes as m_opcodes};

use serde::{Deserialize, Serialize};

/// Canonical NOP encoding: `addi x0, x0, 0`.
pub const INST_NOP_ADDI: u32 = 0x0000_0013;
/// Alternate NOP encoding: `add x0, x0, x0`.
pub const INST_NOP_ADD: u32 = 0x0000_0033;

/// Instruction decoder and control-signal generator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControlUnit {
    m_enabled: bool,
    f_enabled: bool,
    d_enabled: bool,
    trace: bool,
}

impl ControlUnit {
    /// Builds a control unit honoring the configured extension set.
    pub fn new(config: &Config) -> Self {
        Self {
            m_enabled: config.m_extension_enabled,
            f_enabled: config.f_extension_enabled,
            d_enabled: config.d_extension_enabled,
            trace: config.trace_instructions,
        }
    }

    /// A signal record that does nothing anywhere in the pipeline.
    fn nop() -> ControlSignals {
        ControlSignals {
            is_nop: true,
            ..ControlSignals::default()
        }
    }

    /// Decodes `inst` into control signals.
    ///
    /// Decode anomalies never fail: they report a diagnostic (when tracing)
    /// and return a NOP record, which retires as a bubble-like sentinel.
    ///
    /// # Arguments
    ///
    /// * `inst` - The 32-bit instruction encoding to decode.
    ///
    /// # Returns
    ///
    /// The control signals driving every downstream stage. For unknown or
    /// rejected encodings the record has `is_nop` set and nothing else.
    pub fn decode(&self, inst: u32) -> ControlSignals {
        // Recognized NOP encodings: the zero word and the two canonical forms.
        if inst == 0 || inst == INST_NOP_ADDI || inst == INST_NOP_ADD {
            let mut signals = Self::nop();
            if inst != 0 {
                signals.alu_op = AluOp::Add;
                signals.alu_src_b = inst == INST_NOP_ADDI;
            }
            return signals;
        }

        let opcode = inst.opcode();

        if opcodes::FP_FAMILY.contains(&opcode) {
            if self.trace {
                if self.f_enabled || self.d_enabled {
                    eprintln!(
                        "ID  inst={:#010x} # floating-point opcode {:#04x} is not executable; substituting a NOP",
                        inst, opcode
                    );
                } else {
                    eprintln!(
                        "ID  inst={:#010x} # floating-point opcode {:#04x} encountered but the F/D extensions are disabled",
                        inst, opcode
                    );
                }
            }
            return Self::nop();
        }

        let funct3 = inst.funct3();
        let funct7 = inst.funct7();

        let mut signals = ControlSignals::default();

        match opcode {
            opcodes::OP_REG => {
                signals.reg_write = true;
                signals.wb_src = WbSrc::Alu;
                signals.alu_op = match self.reg_alu_op(inst, funct3, funct7, false) {
                    Some(op) => op,
                    None => return Self::nop(),
                };
            }
            opcodes::OP_REG_32 => {
                signals.reg_write = true;
                signals.wb_src = WbSrc::Alu;
                signals.alu_op = match self.reg_alu_op(inst, funct3, funct7, true) {
                    Some(op) => op,
                    None => return Self::nop(),
                };
            }
            opcodes::OP_IMM => {
                signals.alu_src_b = true;
                signals.reg_write = true;
                signals.wb_src = WbSrc::Alu;
                signals.alu_op = match self.imm_alu_op(inst, funct3, funct7, false) {
                    Some(op) => op,
                    None => return Self::nop(),
                };
            }
            opcodes::OP_IMM_32 => {
                signals.alu_src_b = true;
                signals.reg_write = true;
                signals.wb_src = WbSrc::Alu;
                signals.alu_op = match self.imm_alu_op(inst, funct3, funct7, true) {
                    Some(op) => op,
                    None => return Self::nop(),
                };
            }
            opcodes::OP_LOAD => {
                signals.alu_src_b = true;
                signals.reg_write = true;
                signals.mem_read = true;
                signals.wb_src = WbSrc::Mem;
                signals.alu_op = AluOp::Add;
                signals.mem_read_op = match funct3 {
                    funct3::LB => MemReadOp::Byte,
                    funct3::LH => MemReadOp::Half,
                    funct3::LW => MemReadOp::Word,
                    funct3::LD => MemReadOp::Double,
                    funct3::LBU => MemReadOp::ByteUnsigned,
                    funct3::LHU => MemReadOp::HalfUnsigned,
                    funct3::LWU => MemReadOp::WordUnsigned,
                    _ => {
                        if self.trace {
                            eprintln!(
                                "ID  inst={:#010x} # malformed load funct3 {:#b}",
                                inst, funct3
                            );
                        }
                        return Self::nop();
                    }
                };
            }
            opcodes::OP_STORE => {
                signals.alu_src_b = true;
                signals.mem_write = true;
                signals.alu_op = AluOp::Add;
                signals.mem_write_op = match funct3 {
                    funct3::SB => MemWriteOp::Byte,
                    funct3::SH => MemWriteOp::Half,
                    funct3::SW => MemWriteOp::Word,
                    funct3::SD => MemWriteOp::Double,
                    _ => {
                        if self.trace {
                            eprintln!(
                                "ID  inst={:#010x} # malformed store funct3 {:#b}",
                                inst, funct3
                            );
                        }
                        return Self::nop();
                    }
                };
            }
            opcodes::OP_BRANCH => {
                signals.branch = true;
                // The ALU op is consulted only when branches resolve in EX.
                let (branch_op, alu_op) = match funct3 {
                    funct3::BEQ => (BranchOp::Beq, AluOp::Sub),
                    funct3::BNE => (BranchOp::Bne, AluOp::Sub),
                    funct3::BLT => (BranchOp::Blt, AluOp::Slt),
                    funct3::BGE => (BranchOp::Bge, AluOp::Slt),
                    funct3::BLTU => (BranchOp::Bltu, AluOp::Sltu),
                    funct3::BGEU => (BranchOp::Bgeu, AluOp::Sltu),
                    _ => {
                        if self.trace {
                            eprintln!(
                                "ID  inst={:#010x} # malformed branch funct3 {:#b}",
                                inst, funct3
                            );
                        }
                        return Self::nop();
                    }
                };
                signals.branch_op = branch_op;
                signals.alu_op = alu_op;
            }
            opcodes::OP_LUI => {
                signals.alu_src_a = AluASrc::Zero;
                signals.alu_src_b = true;
                signals.reg_write = true;
                signals.wb_src = WbSrc::Alu;
                signals.alu_op = AluOp::Add;
            }
            opcodes::OP_AUIPC => {
                signals.alu_src_a = AluASrc::Pc;
                signals.alu_src_b = true;
                signals.reg_write = true;
                signals.wb_src = WbSrc::Alu;
                signals.alu_op = AluOp::Add;
            }
            opcodes::OP_JAL => {
                signals.branch = true;
                signals.branch_op = BranchOp::Jal;
                signals.alu_src_a = AluASrc::Pc;
                signals.alu_src_b = true;
                signals.reg_write = true;
                signals.wb_src = WbSrc::PcInc;
                signals.alu_op = AluOp::Add;
            }
            opcodes::OP_JALR => {
                signals.branch = true;
                signals.branch_op = BranchOp::Jalr;
                signals.alu_src_b = true;
                signals.reg_write = true;
                signals.wb_src = WbSrc::PcInc;
                signals.alu_op = AluOp::Add;
            }
            opcodes::OP_SYSTEM => {
                if funct3 == funct3::PRIV {
                    signals.is_syscall = true;
                } else {
                    signals.is_csr = true;
                }
            }
            _ => {
                if self.trace {
                    eprintln!("ID  inst={:#010x} # unknown opcode {:#04x}", inst, opcode);
                }
                return Self::nop();
            }
        }

        signals
    }

    /// ALU op for R-type instructions, base and word width.
    ///
    /// Returns `None` (reporting the reason when tracing) for malformed
    /// funct combinations and for M-extension encodings when the extension
    /// is disabled.
    fn reg_alu_op(&self, inst: u32, f3: u32, f7: u32, word: bool) -> Option<AluOp> {
        if f7 == m_opcodes::M_EXTENSION {
            if !self.m_enabled {
                if self.trace {
                    eprintln!(
                        "ID  inst={:#010x} # M-extension instruction encountered but the extension is disabled",
                        inst
                    );
                }
                return None;
            }
            let op = match (f3, word) {
                (m_funct3::MUL, false) => AluOp::Mul,
                (m_funct3::MULH, false) => AluOp::Mulh,
                (m_funct3::MULHSU, false) => AluOp::Mulhsu,
                (m_funct3::MULHU, false) => AluOp::Mulhu,
                (m_funct3::DIV, false) => AluOp::Div,
                (m_funct3::DIVU, false) => AluOp::Divu,
                (m_funct3::REM, false) => AluOp::Rem,
                (m_funct3::REMU, false) => AluOp::Remu,
                (m_funct3::MUL, true) => AluOp::MulW,
                (m_funct3::DIV, true) => AluOp::DivW,
                (m_funct3::DIVU, true) => AluOp::DivuW,
                (m_funct3::REM, true) => AluOp::RemW,
                (m_funct3::REMU, true) => AluOp::RemuW,
                _ => {
                    if self.trace {
                        eprintln!(
                            "ID  inst={:#010x} # malformed M-extension funct3 {:#b}",
                            inst, f3
                        );
                    }
                    return None;
                }
            };
            return Some(op);
        }

        let op = match (f3, f7, word) {
            (funct3::ADD_SUB, funct7::BASE, false) => AluOp::Add,
            (funct3::ADD_SUB, funct7::ALT, false) => AluOp::Sub,
            (funct3::SLL, funct7::BASE, false) => AluOp::Sll,
            (funct3::SLT, funct7::BASE, false) => AluOp::Slt,
            (funct3::SLTU, funct7::BASE, false) => AluOp::Sltu,
            (funct3::XOR, funct7::BASE, false) => AluOp::Xor,
            (funct3::SRL_SRA, funct7::BASE, false) => AluOp::Srl,
            (funct3::SRL_SRA, funct7::ALT, false) => AluOp::Sra,
            (funct3::OR, funct7::BASE, false) => AluOp::Or,
            (funct3::AND, funct7::BASE, false) => AluOp::And,
            (funct3::ADD_SUB, funct7::BASE, true) => AluOp::AddW,
            (funct3::ADD_SUB, funct7::ALT, true) => AluOp::SubW,
            (funct3::SLL, funct7::BASE, true) => AluOp::SllW,
            (funct3::SRL_SRA, funct7::BASE, true) => AluOp::SrlW,
            (funct3::SRL_SRA, funct7::ALT, true) => AluOp::SraW,
            _ => {
                if self.trace {
                    eprintln!(
                        "ID  inst={:#010x} # malformed R-type funct3/funct7 {:#b}/{:#b}",
                        inst, f3, f7
                    );
                }
                return None;
            }
        };
        Some(op)
    }

    /// ALU op for I-type arithmetic, base and word width.
    fn imm_alu_op(&self, inst: u32, f3: u32, f7: u32, word: bool) -> Option<AluOp> {
        // Shift-immediate encodings reuse funct7 bit 30 to select arithmetic
        // shifts; for 64-bit shifts bit 25 belongs to the shamt and must be
        // ignored when matching.
        let shift_alt = (f7 & funct7::ALT) != 0;

        let op = match (f3, word) {
            (funct3::ADD_SUB, false) => AluOp::Add,
            (funct3::SLT, false) => AluOp::Slt,
            (funct3::SLTU, false) => AluOp::Sltu,
            (funct3::XOR, false) => AluOp::Xor,
            (funct3::OR, false) => AluOp::Or,
            (funct3::AND, false) => AluOp::And,
            (funct3::SLL, false) => AluOp::Sll,
            (funct3::SRL_SRA, false) => {
                if shift_alt {
                    AluOp::Sra
                } else {
                    AluOp::Srl
                }
            }
            (funct3::ADD_SUB, true) => AluOp::AddW,
            (funct3::SLL, true) => AluOp::SllW,
            (funct3::SRL_SRA, true) => {
                if shift_alt {
                    AluOp::SraW
                } else {
                    AluOp::SrlW
                }
            }
            _ => {
                if self.trace {
                    eprintln!("ID  inst={:#010x} # malformed I-type funct3 {:#b}", inst, f3);
                }
                return None;
            }
        };
        Some(op)
    }
}

