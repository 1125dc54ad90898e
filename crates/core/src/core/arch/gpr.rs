//! General-purpose register file.
//!
//! Thirty-two 64-bit integer registers. Register `x0` is hardwired to zero:
//! reads return 0 and writes are silently discarded.

use serde::{Deserialize, Serialize};

/// Number of general-purpose registers.
pub const GPR_COUNT: usize = 32;

/// The integer register file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Gpr {
    regs: [u64; GPR_COUNT],
}

impl Gpr {
    /// Creates a register file with all registers zeroed.
    pub fn new() -> Self {
        Self {
            regs: [0; GPR_COUNT],
        }
    }

    /// Reads register `idx`. Index 0 always reads 0.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= 32`; register indices come from 5-bit instruction
    /// fields and cannot exceed 31 in practice.
    pub fn read(&self, idx: usize) -> u64 {
        self.regs[idx]
    }

    /// Writes `val` to register `idx`. Writes to index 0 are discarded.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Zeroes every register.
    pub fn reset(&mut self) {
        self.regs = [0; GPR_COUNT];
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}
