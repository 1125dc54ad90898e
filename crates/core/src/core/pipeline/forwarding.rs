//! Operand forwarding.
//!
//! This module implements the bypass network that resolves RAW hazards
//! without stalling. It provides:
//! 1. **Source selection:** where each EX-stage operand comes from (the
//!    register file, the EX/MEM latch, or the MEM/WB latch).
//! 2. **Value extraction:** the register value a latch entry actually
//!    produces, which for jumps is the link address and for loads the
//!    loaded word, not the raw ALU field.

use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::pipeline::signals::WbSrc;

/// Source of a forwarded EX operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSrc {
    /// No in-flight producer; use the latched register value.
    Reg,
    /// Bypass from the EX/MEM latch.
    ExMem,
    /// Bypass from the MEM/WB latch.
    MemWb,
}

/// Picks the forwarding source for one source register.
///
/// The most recent producer wins, so a match in EX/MEM takes priority over
/// a match in MEM/WB. A latch qualifies only when it holds a valid entry
/// that writes the same register; register 0 is never forwarded.
///
/// # Arguments
///
/// * `rs` - Source register index the EX stage is about to consume.
/// * `ex_mem` - The EX/MEM latch (one-cycle-old result).
/// * `mem_wb` - The MEM/WB latch (value about to be written back).
///
/// # Returns
///
/// The [`ForwardSrc`] the EX stage should read the operand from.
///
/// # Examples
///
/// ```ignore
/// // EX/MEM holds `add x1, ...` and MEM/WB holds `addi x1, ...`:
/// // the younger add wins.
/// assert_eq!(forward_src(1, &ex_mem, &mem_wb), ForwardSrc::ExMem);
/// ```
pub fn forward_src(
    rs: usize,
    ex_mem: &Option<ExMemEntry>,
    mem_wb: &Option<MemWbEntry>,
) -> ForwardSrc {
    if rs == 0 {
        return ForwardSrc::Reg;
    }
    if let Some(e) = ex_mem {
        if e.ctrl.reg_write && e.rd == rs {
            return ForwardSrc::ExMem;
        }
    }
    if let Some(e) = mem_wb {
        if e.ctrl.reg_write && e.rd == rs {
            return ForwardSrc::MemWb;
        }
    }
    ForwardSrc::Reg
}

/// The value the MEM/WB entry will actually write back.
///
/// Forwarding from MEM/WB must hand over the final write-back value (the
/// loaded word for loads, the link address for jumps), not the raw ALU field.
///
/// # Arguments
///
/// * `entry` - The MEM/WB entry selected as the forwarding source.
///
/// # Returns
///
/// The 64-bit value the write-back stage will commit for this entry.
pub fn write_back_value(entry: &MemWbEntry) -> u64 {
    match entry.ctrl.wb_src {
        WbSrc::Mem => entry.memory_data,
        WbSrc::PcInc => entry.pc_inc,
        _ => entry.alu_result,
    }
}

/// The register value an EX/MEM entry produces.
///
/// For jumps the ALU field holds the branch target; what reaches the
/// register file is the link address, and that is what must be forwarded.
pub fn ex_mem_value(entry: &ExMemEntry) -> u64 {
    if entry.ctrl.wb_src == WbSrc::PcInc {
        entry.pc_inc
    } else {
        entry.alu_result
    }
}
