//! Simulation statistics collection and reporting.
//!
//! Tracks the per-run counters the simulator reports after every committed
//! tick: cycles, retired instructions, derived CPI/IPC, stall cycles, and
//! branch mispredictions.

use serde::{Deserialize, Serialize};

/// Counters accumulated over one simulation run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SimStats {
    /// Total clock cycles elapsed.
    pub cycles: u64,
    /// Instructions that completed write-back (bubbles excluded).
    pub instructions_retired: u64,
    /// Cycles lost to stalls and flushed slots.
    pub stall_cycles: u64,
    /// Branches whose predicted outcome or target was wrong.
    pub branch_mispredictions: u64,
    /// Cycles per instruction; 0 until the first retirement.
    pub cpi: f64,
    /// Instructions per cycle; 0 until the first retirement.
    pub ipc: f64,
}

impl SimStats {
    /// Recomputes CPI and IPC from the raw counters.
    ///
    /// Both rates are 0 while no instruction has retired.
    pub fn update_rates(&mut self) {
        if self.instructions_retired > 0 {
            self.cpi = self.cycles as f64 / self.instructions_retired as f64;
            self.ipc = self.instructions_retired as f64 / self.cycles as f64;
        } else {
            self.cpi = 0.0;
            self.ipc = 0.0;
        }
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = SimStats::default();
    }

    /// Prints the counters to stdout as a fixed-width table.
    pub fn print(&self) {
        println!("==================================================");
        println!("SIMULATION STATISTICS");
        println!("==================================================");
        println!("cycles                   {}", self.cycles);
        println!("instructions_retired     {}", self.instructions_retired);
        println!("cpi                      {:.4}", self.cpi);
        println!("ipc                      {:.4}", self.ipc);
        println!("stall_cycles             {}", self.stall_cycles);
        println!("branch_mispredictions    {}", self.branch_mispredictions);
        println!("==================================================");
    }
}
