//! Pipeline latches.
//!
//! One entry type per inter-stage latch of the five-stage pipeline:
//! IF/ID, ID/EX, EX/MEM, MEM/WB. A latch itself is `Option<Entry>`;
//! `None` is the bubble, and downstream stages must treat a bubble as a
//! no-op. Entries are plain owned values, copied from `next_*` into
//! `current_*` exactly once per tick.

use serde::{Deserialize, Serialize};

use crate::core::pipeline::signals::ControlSignals;

/// Entry in the IF/ID latch (Fetch to Decode).
///
/// Contains the raw instruction word fetched from memory together with the
/// branch-speculation record the fetch stage acted on, so resolution can
/// later decide whether the speculation was right.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IfIdEntry {
    /// Raw 32-bit instruction word.
    pub inst: u32,
    /// PC of the instruction.
    pub pc: u64,
    /// PC + 4.
    pub pc_inc: u64,
    /// Direction the fetch stage speculated on.
    pub pred_taken: bool,
    /// Target the fetch stage redirected to (0 when not taken).
    pub pred_target: u64,
}

/// Entry in the ID/EX latch (Decode to Execute).
///
/// Contains the decoded control signals, register indices and values, and
/// the sign-extended immediate. The prediction record rides along for the
/// EX-stage resolution variant.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IdExEntry {
    /// Control signals for all downstream stages.
    pub ctrl: ControlSignals,
    /// PC of the instruction.
    pub pc: u64,
    /// PC + 4.
    pub pc_inc: u64,
    /// Value read from rs1 (0 when the instruction does not use rs1).
    pub rs1_data: u64,
    /// Value read from rs2 (0 when the instruction does not use rs2).
    pub rs2_data: u64,
    /// Sign-extended immediate.
    pub imm: i64,
    /// rs1 register index (0 when unused).
    pub rs1: usize,
    /// rs2 register index (0 when unused).
    pub rs2: usize,
    /// Destination register index.
    pub rd: usize,
    /// Speculated direction, for EX-stage resolution.
    pub pred_taken: bool,
    /// Speculated target, for EX-stage resolution.
    pub pred_target: u64,
}

/// Entry in the EX/MEM latch (Execute to Memory).
///
/// Contains the ALU result (doubling as the effective address for memory
/// operations) and the store data captured after forwarding.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExMemEntry {
    /// Control signals for MEM and WB.
    pub ctrl: ControlSignals,
    /// PC + 4 (link value).
    pub pc_inc: u64,
    /// ALU result; the effective address for loads and stores.
    pub alu_result: u64,
    /// Value to store (rs2 after forwarding).
    pub store_data: u64,
    /// Destination register index.
    pub rd: usize,
}

/// Entry in the MEM/WB latch (Memory to Write-back).
///
/// Contains every value the write-back stage may commit: the ALU result,
/// the loaded memory value, and the link address, selected by `wb_src`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemWbEntry {
    /// Control signals for WB.
    pub ctrl: ControlSignals,
    /// PC + 4 (link value).
    pub pc_inc: u64,
    /// Value loaded from memory (0 for non-loads).
    pub memory_data: u64,
    /// ALU result.
    pub alu_result: u64,
    /// Destination register index.
    pub rd: usize,
}
