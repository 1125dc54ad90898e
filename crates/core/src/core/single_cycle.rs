//! Single-cycle reference datapath.
//!
//! Executes one instruction per tick with no latches: fetch, decode,
//! register read, ALU, memory access, write-back, and PC update all happen
//! in the same cycle. It shares the control unit, ALU, register file, and
//! memory with the pipelined core and serves as the ground-truth oracle for
//! the pipeline's architectural behavior.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::arch::Gpr;
use crate::core::pipeline::control::ControlUnit;
use crate::core::pipeline::hazards;
use crate::core::pipeline::signals::{AluASrc, BranchOp, MemReadOp, MemWriteOp, WbSrc};
use crate::core::units::alu::Alu;
use crate::isa::decode;
use crate::sim::simulator::VmStatus;
use crate::soc::Memory;
use crate::stats::SimStats;

/// The single-cycle core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SingleCycle {
    /// Per-cycle stderr diagnostics enabled.
    pub(crate) trace: bool,
    /// Base address of the text section; also the reset PC.
    pub(crate) text_start: u64,
    /// Program counter.
    pub pc: u64,
    /// Size of the program text in bytes.
    pub program_size: u64,
    /// Integer register file.
    pub regs: Gpr,
    /// Main memory.
    pub memory: Memory,
    /// Run counters.
    pub stats: SimStats,
    control: ControlUnit,
}

impl SingleCycle {
    /// Builds a single-cycle core from a validated configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            trace: config.trace_instructions,
            text_start: config.text_section_start,
            pc: config.text_section_start,
            program_size: 0,
            regs: Gpr::new(),
            memory: Memory::new(config.memory_size, config.memory_block_size),
            stats: SimStats::default(),
            control: ControlUnit::new(config),
        }
    }

    /// Returns the machine to its power-on state.
    pub fn reset(&mut self) {
        self.pc = self.text_start;
        self.program_size = 0;
        self.regs.reset();
        self.memory.reset();
        self.stats.reset();
    }

    /// Program termination: the PC has passed the last text byte.
    pub fn terminated(&self) -> bool {
        self.pc >= self.text_start.wrapping_add(self.program_size)
    }

    /// Executes one full instruction.
    pub fn tick(&mut self) -> VmStatus {
        if self.terminated() {
            return VmStatus::ProgramEnd;
        }

        let inst = match self.memory.read_word(self.pc) {
            Ok(word) => word,
            Err(e) => {
                if self.trace {
                    eprintln!("IF  pc={:#x} # FAULT: {}", self.pc, e);
                }
                self.pc = self.pc.wrapping_add(4);
                self.stats.cycles += 1;
                self.stats.update_rates();
                return self.step_status();
            }
        };

        let ctrl = self.control.decode(inst);
        let pc_inc = self.pc.wrapping_add(4);

        if ctrl.is_nop || ctrl.is_syscall || ctrl.is_csr {
            self.retire(pc_inc);
            return self.step_status();
        }

        let d = decode(inst);
        let rs1_data = if hazards::needs_rs1(&ctrl) {
            self.regs.read(d.rs1)
        } else {
            0
        };
        let rs2_data = if hazards::needs_rs2(&ctrl) {
            self.regs.read(d.rs2)
        } else {
            0
        };

        let a = match ctrl.alu_src_a {
            AluASrc::Rs1 => rs1_data,
            AluASrc::Zero => 0,
            AluASrc::Pc => self.pc,
        };
        let b = if ctrl.alu_src_b {
            d.imm as u64
        } else {
            rs2_data
        };
        let (alu_result, _overflow) = Alu::execute(ctrl.alu_op, a, b);

        let mut memory_data = 0u64;
        if ctrl.mem_read {
            let loaded = match ctrl.mem_read_op {
                MemReadOp::Byte => self.memory.read_byte(alu_result).map(|v| v as i8 as i64 as u64),
                MemReadOp::Half => self.memory.read_half(alu_result).map(|v| v as i16 as i64 as u64),
                MemReadOp::Word => self.memory.read_word(alu_result).map(|v| v as i32 as i64 as u64),
                MemReadOp::Double => self.memory.read_double(alu_result),
                MemReadOp::ByteUnsigned => self.memory.read_byte(alu_result).map(u64::from),
                MemReadOp::HalfUnsigned => self.memory.read_half(alu_result).map(u64::from),
                MemReadOp::WordUnsigned => self.memory.read_word(alu_result).map(u64::from),
                MemReadOp::None => Ok(0),
            };
            match loaded {
                Ok(v) => memory_data = v,
                Err(e) => {
                    if self.trace {
                        eprintln!("MEM addr={:#x} # FAULT: {}", alu_result, e);
                    }
                    self.pc = pc_inc;
                    self.stats.cycles += 1;
                    self.stats.update_rates();
                    return self.step_status();
                }
            }
        } else if ctrl.mem_write {
            let stored = match ctrl.mem_write_op {
                MemWriteOp::Byte => self.memory.write_byte(alu_result, rs2_data as u8),
                MemWriteOp::Half => self.memory.write_half(alu_result, rs2_data as u16),
                MemWriteOp::Word => self.memory.write_word(alu_result, rs2_data as u32),
                MemWriteOp::Double => self.memory.write_double(alu_result, rs2_data),
                MemWriteOp::None => Ok(()),
            };
            if let Err(e) = stored {
                if self.trace {
                    eprintln!("MEM addr={:#x} # FAULT: {}", alu_result, e);
                }
                self.pc = pc_inc;
                self.stats.cycles += 1;
                self.stats.update_rates();
                return self.step_status();
            }
        }

        if ctrl.reg_write && d.rd != 0 {
            let value = match ctrl.wb_src {
                WbSrc::Alu => Some(alu_result),
                WbSrc::Mem => Some(memory_data),
                WbSrc::PcInc => Some(pc_inc),
                WbSrc::None => {
                    if self.trace {
                        eprintln!("WB  x{} # reg_write set with no write-back source", d.rd);
                    }
                    None
                }
            };
            if let Some(value) = value {
                self.regs.write(d.rd, value);
            }
        }

        // PC update; branches resolve immediately in the same cycle.
        let mut next_pc = pc_inc;
        if ctrl.branch {
            let (taken, target) = match ctrl.branch_op {
                BranchOp::Jal => (true, self.pc.wrapping_add(d.imm as u64)),
                BranchOp::Jalr => (true, rs1_data.wrapping_add(d.imm as u64) & !1),
                op => (
                    op.taken(rs1_data, rs2_data),
                    self.pc.wrapping_add(d.imm as u64),
                ),
            };
            if taken {
                next_pc = target;
            }
        }
        self.pc = next_pc;

        self.stats.instructions_retired += 1;
        self.stats.cycles += 1;
        self.stats.update_rates();
        self.step_status()
    }

    /// Retires a sentinel instruction (NOP, syscall, CSR).
    fn retire(&mut self, pc_inc: u64) {
        self.pc = pc_inc;
        self.stats.instructions_retired += 1;
        self.stats.cycles += 1;
        self.stats.update_rates();
    }

    /// Status after a completed tick.
    fn step_status(&self) -> VmStatus {
        if self.terminated() {
            VmStatus::ProgramEnd
        } else {
            VmStatus::StepCompleted
        }
    }
}
