//! Simulation driver.
//!
//! Owns one core (single-cycle or pipelined) and exposes the host-facing
//! surface:
//! 1. **Run loops:** `run` (free-running), `debug_run` (breakpoints plus a
//!    per-step delay), and `step`. All poll a cooperative stop flag between
//!    ticks so a host thread can cancel cleanly.
//! 2. **Breakpoints:** checked against the PC before each debug step.
//! 3. **Snapshots:** a deterministic per-cycle record of the architectural
//!    and microarchitectural state, serializable as JSON.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::error::VmError;
use crate::config::{Config, VmType};
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::{Pipeline, SingleCycle};
use crate::sim::loader;
use crate::soc::Memory;
use crate::stats::SimStats;

/// Host-visible machine status, reported after every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VmStatus {
    /// A run loop is executing.
    #[serde(rename = "VM_RUNNING")]
    Running,
    /// The last step completed and more work remains.
    #[serde(rename = "VM_STEP_COMPLETED")]
    StepCompleted,
    /// A run loop exited on a stop request.
    #[serde(rename = "VM_STOPPED")]
    Stopped,
    /// A debug run halted at a breakpoint.
    #[serde(rename = "VM_BREAKPOINT_HIT")]
    BreakpointHit,
    /// The PC passed the last text byte and the machine drained.
    #[serde(rename = "VM_PROGRAM_END")]
    ProgramEnd,
}

/// Either core organization behind one driver interface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Core {
    /// Reference single-cycle datapath.
    SingleCycle(SingleCycle),
    /// Five-stage pipeline.
    Pipelined(Box<Pipeline>),
}

/// The simulation driver.
pub struct Simulator {
    config: Config,
    core: Core,
    status: VmStatus,
    breakpoints: HashSet<u64>,
    stop: Arc<AtomicBool>,
}

impl Simulator {
    /// Builds a simulator from a configuration, validating it first.
    pub fn new(config: Config) -> Result<Self, VmError> {
        config.validate()?;
        let core = match config.vm_type {
            VmType::SingleStage => Core::SingleCycle(SingleCycle::new(&config)),
            VmType::MultiStage => Core::Pipelined(Box::new(Pipeline::new(&config))),
        };
        Ok(Self {
            config,
            core,
            status: VmStatus::StepCompleted,
            breakpoints: HashSet::new(),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The core, for state inspection.
    pub fn core(&self) -> &Core {
        &self.core
    }

    /// The core, for direct state manipulation (tests, hosts).
    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// A clonable handle the host can set from another thread to stop a run
    /// loop at the next tick boundary.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Registers a breakpoint at `pc` for debug runs.
    pub fn add_breakpoint(&mut self, pc: u64) {
        self.breakpoints.insert(pc);
    }

    /// Removes a breakpoint.
    pub fn remove_breakpoint(&mut self, pc: u64) {
        self.breakpoints.remove(&pc);
    }

    /// Loads a memory image file and records the program size.
    pub fn load_image(&mut self, path: &Path) -> Result<(), VmError> {
        let image = loader::load_image(path, self.memory_mut())?;
        self.set_program_size(image.program_size);
        Ok(())
    }

    /// Loads a memory image from text content.
    pub fn load_image_str(&mut self, text: &str) -> Result<(), VmError> {
        let image = loader::load_image_str(text, self.memory_mut())?;
        self.set_program_size(image.program_size);
        Ok(())
    }

    /// Returns the machine to its power-on state. The loaded image must be
    /// reloaded afterwards.
    pub fn reset(&mut self) {
        match &mut self.core {
            Core::SingleCycle(core) => core.reset(),
            Core::Pipelined(core) => core.reset(&self.config),
        }
        self.status = VmStatus::StepCompleted;
        self.stop.store(false, Ordering::Relaxed);
    }

    /// Advances the machine by one tick.
    pub fn step(&mut self) -> VmStatus {
        let status = match &mut self.core {
            Core::SingleCycle(core) => core.tick(),
            Core::Pipelined(core) => core.tick(),
        };
        self.status = status;
        status
    }

    /// Runs until program end or a stop request.
    pub fn run(&mut self) -> VmStatus {
        self.stop.store(false, Ordering::Relaxed);
        self.status = VmStatus::Running;
        loop {
            if self.stop.swap(false, Ordering::Relaxed) {
                self.status = VmStatus::Stopped;
                break;
            }
            if self.step() == VmStatus::ProgramEnd {
                break;
            }
        }
        self.status
    }

    /// Runs with breakpoints and the configured per-step delay.
    ///
    /// Halts *before* executing the instruction at a breakpoint PC, so the
    /// host observes the machine state on entry to that instruction.
    pub fn debug_run(&mut self) -> VmStatus {
        self.stop.store(false, Ordering::Relaxed);
        self.status = VmStatus::Running;
        loop {
            if self.stop.swap(false, Ordering::Relaxed) {
                self.status = VmStatus::Stopped;
                break;
            }
            if self.breakpoints.contains(&self.pc()) {
                self.status = VmStatus::BreakpointHit;
                break;
            }
            if self.step() == VmStatus::ProgramEnd {
                break;
            }
            if self.config.run_step_delay > 0 {
                thread::sleep(Duration::from_millis(self.config.run_step_delay));
            }
        }
        self.status
    }

    /// Current program counter.
    pub fn pc(&self) -> u64 {
        match &self.core {
            Core::SingleCycle(core) => core.pc,
            Core::Pipelined(core) => core.pc,
        }
    }

    /// Reads a general-purpose register.
    pub fn read_gpr(&self, idx: usize) -> u64 {
        match &self.core {
            Core::SingleCycle(core) => core.regs.read(idx),
            Core::Pipelined(core) => core.regs.read(idx),
        }
    }

    /// The run counters.
    pub fn stats(&self) -> &SimStats {
        match &self.core {
            Core::SingleCycle(core) => &core.stats,
            Core::Pipelined(core) => &core.stats,
        }
    }

    /// Memory, for loading and inspection.
    pub fn memory(&self) -> &Memory {
        match &self.core {
            Core::SingleCycle(core) => &core.memory,
            Core::Pipelined(core) => &core.memory,
        }
    }

    /// Memory, mutable.
    pub fn memory_mut(&mut self) -> &mut Memory {
        match &mut self.core {
            Core::SingleCycle(core) => &mut core.memory,
            Core::Pipelined(core) => &mut core.memory,
        }
    }

    /// Sets the fetch upper bound (normally done by the image loader).
    pub fn set_program_size(&mut self, size: u64) {
        match &mut self.core {
            Core::SingleCycle(core) => core.program_size = size,
            Core::Pipelined(core) => core.program_size = size,
        }
    }

    /// Builds the deterministic per-cycle state record.
    pub fn snapshot(&self) -> VmSnapshot {
        let stats = self.stats().clone();
        let (if_id, id_ex, ex_mem, mem_wb) = match &self.core {
            Core::SingleCycle(_) => (None, None, None, None),
            Core::Pipelined(core) => (
                core.if_id.clone(),
                core.id_ex.clone(),
                core.ex_mem.clone(),
                core.mem_wb.clone(),
            ),
        };
        VmSnapshot {
            program_counter: self.pc(),
            output_status: self.status,
            cycles: stats.cycles,
            instructions_retired: stats.instructions_retired,
            cpi: stats.cpi,
            ipc: stats.ipc,
            stall_cycles: stats.stall_cycles,
            branch_mispredictions: stats.branch_mispredictions,
            if_id,
            id_ex,
            ex_mem,
            mem_wb,
        }
    }
}

/// Deterministic, stable record of the machine state after a tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VmSnapshot {
    /// Program counter.
    pub program_counter: u64,
    /// Host-visible status.
    pub output_status: VmStatus,
    /// Total cycles.
    pub cycles: u64,
    /// Retired instructions.
    pub instructions_retired: u64,
    /// Cycles per instruction.
    pub cpi: f64,
    /// Instructions per cycle.
    pub ipc: f64,
    /// Stall cycles.
    pub stall_cycles: u64,
    /// Branch mispredictions.
    pub branch_mispredictions: u64,
    /// IF/ID latch payload.
    pub if_id: Option<IfIdEntry>,
    /// ID/EX latch payload.
    pub id_ex: Option<IdExEntry>,
    /// EX/MEM latch payload.
    pub ex_mem: Option<ExMemEntry>,
    /// MEM/WB latch payload.
    pub mem_wb: Option<MemWbEntry>,
}
