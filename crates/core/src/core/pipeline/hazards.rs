//! Hazard detection.
//!
//! This module implements the queries that keep the pipeline consistent when
//! instructions depend on in-flight producers. It provides:
//! 1. **Operand usage:** whether the decoded instruction actually reads rs1
//!    and rs2, shared by register read and every hazard query.
//! 2. **RAW detection:** the stall-only policy's check against the EX and
//!    MEM stages.
//! 3. **Load-use detection:** the forwarding policy's check for the one
//!    dependence bypassing cannot satisfy.
//! 4. **Control detection:** whether an instruction redirects control flow
//!    at all.
//!
//! All queries are pure functions over the current latches and the
//! candidate instruction being decoded; which one the decode stage consults
//! is chosen by the configured data-hazard policy.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::{AluASrc, BranchOp, ControlSignals, WbSrc};

/// Whether the instruction actually reads rs1.
///
/// True for everything whose first ALU operand comes from the register file,
/// plus JALR (the indirect target base).
pub fn needs_rs1(ctrl: &ControlSignals) -> bool {
    ctrl.alu_src_a == AluASrc::Rs1 || ctrl.branch_op == BranchOp::Jalr
}

/// Whether the instruction actually reads rs2.
///
/// True for R-type ALU instructions, stores, and conditional branches.
/// I-type instructions select the immediate instead, and JAL/JALR carry
/// immediate bits where an rs2 field would be.
pub fn needs_rs2(ctrl: &ControlSignals) -> bool {
    let r_type = ctrl.reg_write && !ctrl.alu_src_b && ctrl.wb_src == WbSrc::Alu;
    let cond_branch =
        ctrl.branch && ctrl.branch_op != BranchOp::Jal && ctrl.branch_op != BranchOp::Jalr;
    r_type || ctrl.mem_write || cond_branch
}

/// Checks if a pipeline stall is needed to resolve a RAW hazard without
/// forwarding.
///
/// This is the stall-only policy's query: any instruction ahead in EX or
/// MEM that will write a register this instruction reads forces the decode
/// stage to hold until the producer has written back. Register 0 never
/// participates.
///
/// # Arguments
///
/// * `ctrl` - Control signals of the instruction being decoded.
/// * `rs1` - Its first source register index (0 when unused).
/// * `rs2` - Its second source register index (0 when unused).
/// * `id_ex` - The ID/EX latch holding the instruction now in execute.
/// * `ex_mem` - The EX/MEM latch holding the instruction now in memory.
///
/// # Returns
///
/// `true` if a stall is required, `false` otherwise.
///
/// # Examples
///
/// ```ignore
/// // Example scenario:
/// // ID/EX stage: addi x1, x0, 5   <- writes x1 (in execute)
/// // decoding:    add  x2, x1, x1  <- reads x1
/// //
/// // Without forwarding the value is not architecturally visible until
/// // write-back, so decode must stall.
/// let stall = detect_data_hazard(&ctrl, 1, 1, &id_ex, &ex_mem);
/// if stall {
///     // Freeze IF and IF/ID, inject a bubble into ID/EX.
/// }
/// ```
pub fn detect_data_hazard(
    ctrl: &ControlSignals,
    rs1: usize,
    rs2: usize,
    id_ex: &Option<IdExEntry>,
    ex_mem: &Option<ExMemEntry>,
) -> bool {
    let rs1_read = needs_rs1(ctrl);
    let rs2_read = needs_rs2(ctrl);

    if let Some(e) = id_ex {
        if e.ctrl.reg_write
            && e.rd != 0
            && ((rs1_read && e.rd == rs1) || (rs2_read && e.rd == rs2))
        {
            return true;
        }
    }
    if let Some(e) = ex_mem {
        if e.ctrl.reg_write
            && e.rd != 0
            && ((rs1_read && e.rd == rs1) || (rs2_read && e.rd == rs2))
        {
            return true;
        }
    }
    false
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when an instruction being decoded depends on
/// data that is currently being loaded from memory by the instruction in
/// the Execute stage: the value exists only after MEM, one cycle too late
/// for the forwarding network.
///
/// # Arguments
///
/// * `ctrl` - Control signals of the instruction being decoded.
/// * `rs1` - Its first source register index (0 when unused).
/// * `rs2` - Its second source register index (0 when unused).
/// * `id_ex` - The ID/EX latch holding the instruction now in execute.
///
/// # Returns
///
/// `true` if a one-cycle stall is required, `false` otherwise. An ALU
/// producer at the same distance forwards instead and never stalls.
pub fn detect_load_use_hazard(
    ctrl: &ControlSignals,
    rs1: usize,
    rs2: usize,
    id_ex: &Option<IdExEntry>,
) -> bool {
    let Some(e) = id_ex else {
        return false;
    };
    if !e.ctrl.mem_read || e.rd == 0 {
        return false;
    }
    (needs_rs1(ctrl) && e.rd == rs1) || (needs_rs2(ctrl) && e.rd == rs2)
}

/// Checks whether the instruction is a control-flow instruction at all.
///
/// True for conditional branches, JAL, and JALR; the pipeline uses it to
/// gate branch resolution in whichever stage the configuration selects.
pub fn detect_control_hazard(ctrl: &ControlSignals) -> bool {
    ctrl.branch
}
