//! Branch Target Buffer.
//!
//! Maps a branch PC to its resolved target address so the fetch stage can
//! redirect before the instruction is even decoded. Entries are installed at
//! branch resolution regardless of the branch direction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// PC-to-target cache populated at branch resolution.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Btb {
    table: HashMap<u64, u64>,
}

impl Btb {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored target for `pc`, if any.
    pub fn lookup(&self, pc: u64) -> Option<u64> {
        self.table.get(&pc).copied()
    }

    /// Installs or replaces the target for `pc`.
    pub fn update(&mut self, pc: u64, target: u64) {
        self.table.insert(pc, target);
    }

    /// Empties the buffer.
    pub fn reset(&mut self) {
        self.table.clear();
    }
}
