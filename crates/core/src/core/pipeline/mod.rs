//! Five-stage pipeline.
//!
//! This module implements the pipelined organization of the core:
//! 1. **Latches:** owned inter-stage values, committed once per tick.
//! 2. **Signals:** the control record generated at decode.
//! 3. **Control:** the instruction decoder / control unit.
//! 4. **Hazards & forwarding:** stall queries and operand bypass selection.
//! 5. **Stages:** the five stage functions, dispatched in reverse order so
//!    each stage observes its producer's previous-cycle output.

/// Instruction decoder / control unit.
pub mod control;
/// Operand forwarding network.
pub mod forwarding;
/// Hazard detection queries.
pub mod hazards;
/// Inter-stage latch entries.
pub mod latches;
/// Control signals and operation tags.
pub mod signals;
/// The five stage functions.
pub mod stages;

use serde::{Deserialize, Serialize};

use crate::config::{BranchStage, Config, DataHazardMode};
use crate::core::arch::Gpr;
use crate::core::units::bru::{Btb, Predictor};
use crate::sim::simulator::VmStatus;
use crate::soc::Memory;
use crate::stats::SimStats;

use self::control::ControlUnit;
use self::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};

/// The pipelined core: architectural state, latches, and per-cycle flags.
///
/// All state is owned here; the whole machine serializes through serde, so a
/// snapshot taken at any cycle boundary restores to byte-identical behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pipeline {
    /// Configured data-hazard policy.
    pub(crate) data_hazard_mode: DataHazardMode,
    /// Configured branch-resolution stage.
    pub(crate) branch_stage: BranchStage,
    /// Per-cycle stderr diagnostics enabled.
    pub(crate) trace: bool,
    /// Base address of the text section; also the reset PC.
    pub(crate) text_start: u64,

    /// Program counter.
    pub pc: u64,
    /// Size of the program text in bytes (fetch upper bound).
    pub program_size: u64,
    /// Integer register file.
    pub regs: Gpr,
    /// Main memory.
    pub memory: Memory,
    /// Branch predictor.
    pub predictor: Predictor,
    /// Branch target buffer.
    pub btb: Btb,
    /// Run counters.
    pub stats: SimStats,
    /// Instruction decoder.
    pub(crate) control: ControlUnit,

    /// IF/ID latch.
    pub if_id: Option<IfIdEntry>,
    /// ID/EX latch.
    pub id_ex: Option<IdExEntry>,
    /// EX/MEM latch.
    pub ex_mem: Option<ExMemEntry>,
    /// MEM/WB latch.
    pub mem_wb: Option<MemWbEntry>,

    pub(crate) next_if_id: Option<IfIdEntry>,
    pub(crate) next_id_ex: Option<IdExEntry>,
    pub(crate) next_ex_mem: Option<ExMemEntry>,
    pub(crate) next_mem_wb: Option<MemWbEntry>,

    /// Raised by decode when a hazard requires freezing IF and IF/ID.
    pub(crate) stall_request: bool,
    /// Raised at branch resolution when speculation was wrong.
    pub(crate) flush_pipeline: bool,
}

impl Pipeline {
    /// Builds a pipeline from a validated configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            data_hazard_mode: config.data_hazard_mode,
            branch_stage: config.branch_stage,
            trace: config.trace_instructions,
            text_start: config.text_section_start,
            pc: config.text_section_start,
            program_size: 0,
            regs: Gpr::new(),
            memory: Memory::new(config.memory_size, config.memory_block_size),
            predictor: Predictor::from_kind(config.branch_predictor),
            btb: Btb::new(),
            stats: SimStats::default(),
            control: ControlUnit::new(config),
            if_id: None,
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            next_if_id: None,
            next_id_ex: None,
            next_ex_mem: None,
            next_mem_wb: None,
            stall_request: false,
            flush_pipeline: false,
        }
    }

    /// Returns the machine to its power-on state.
    ///
    /// PC back to the text base, registers and memory zeroed, every latch a
    /// bubble, counters cleared, predictor and BTB emptied. The loaded image
    /// is dropped with the rest of memory.
    pub fn reset(&mut self, config: &Config) {
        self.pc = self.text_start;
        self.program_size = 0;
        self.regs.reset();
        self.memory.reset();
        self.predictor = Predictor::from_kind(config.branch_predictor);
        self.btb.reset();
        self.stats.reset();
        self.if_id = None;
        self.id_ex = None;
        self.ex_mem = None;
        self.mem_wb = None;
        self.next_if_id = None;
        self.next_id_ex = None;
        self.next_ex_mem = None;
        self.next_mem_wb = None;
        self.stall_request = false;
        self.flush_pipeline = false;
    }

    /// Whether operand forwarding is active.
    pub(crate) fn forwarding_enabled(&self) -> bool {
        self.data_hazard_mode == DataHazardMode::Forwarding
    }

    /// Whether the PC has passed the last text byte.
    pub(crate) fn fetch_done(&self) -> bool {
        self.pc >= self.text_start.wrapping_add(self.program_size)
    }

    /// Program termination: everything fetched and every latch a bubble.
    pub fn terminated(&self) -> bool {
        self.fetch_done()
            && self.if_id.is_none()
            && self.id_ex.is_none()
            && self.ex_mem.is_none()
            && self.mem_wb.is_none()
    }

    /// Advances the machine by one clock cycle.
    ///
    /// Stages run WB, MEM, EX, ID, IF: reverse order, so every stage reads
    /// the committed output of its producer from the previous cycle. IF is
    /// skipped under a stall. The commit step then moves `next_*` into the
    /// current latches: all four normally, or all but IF/ID when stalled
    /// (the frozen fetch repeats next cycle while the injected bubble drains
    /// forward).
    ///
    /// # Returns
    ///
    /// [`VmStatus::ProgramEnd`] once every instruction has been fetched and
    /// the pipeline has drained; [`VmStatus::StepCompleted`] otherwise. A
    /// terminated machine returns `ProgramEnd` without mutating anything.
    pub fn tick(&mut self) -> VmStatus {
        if self.terminated() {
            return VmStatus::ProgramEnd;
        }

        self.stall_request = false;
        self.flush_pipeline = false;

        stages::write_back_stage(self);
        stages::mem_stage(self);
        stages::execute_stage(self);
        stages::decode_stage(self);
        if !self.stall_request {
            stages::fetch_stage(self);
        }

        self.stats.cycles += 1;

        if self.stall_request {
            self.id_ex = self.next_id_ex.take();
            self.ex_mem = self.next_ex_mem.take();
            self.mem_wb = self.next_mem_wb.take();
            self.stats.stall_cycles += 1;
        } else {
            self.if_id = self.next_if_id.take();
            self.id_ex = self.next_id_ex.take();
            self.ex_mem = self.next_ex_mem.take();
            self.mem_wb = self.next_mem_wb.take();
        }

        self.stats.update_rates();

        if self.terminated() {
            VmStatus::ProgramEnd
        } else {
            VmStatus::StepCompleted
        }
    }
}
