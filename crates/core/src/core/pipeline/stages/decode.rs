//! Instruction Decode (ID) stage.
//!
//! This stage does the most per-cycle work of the pipeline:
//! 1. **Decoding:** raw word to control signals through the control unit.
//! 2. **Register read:** rs1/rs2 values, zeroed when the format ignores them.
//! 3. **Hazard checks:** the query matching the configured policy; a hit
//!    freezes IF and injects a bubble into ID/EX.
//! 4. **Early branch resolution:** in the BRANCH_IN_ID organization the
//!    branch outcome is computed here against forwarded operands, the
//!    predictor and BTB are trained, and a misprediction flushes the single
//!    wrong-path slot behind us.

use crate::config::{BranchStage, DataHazardMode};
use crate::core::pipeline::forwarding;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::BranchOp;
use crate::core::pipeline::Pipeline;
use crate::core::units::bru::BranchPredictor;
use crate::isa::decode;

/// Executes the decode stage.
///
/// # Arguments
///
/// * `vm` - Mutable reference to the pipeline state.
///
/// # Behavior
///
/// - A flush or an empty IF/ID latch produces a bubble.
/// - NOP, syscall, and CSR sentinels propagate their signals only.
/// - Source registers are read through the same usage predicates the
///   hazard unit applies, so unused fields never alias real registers.
/// - A hazard hit raises `stall_request` and injects a bubble; the frozen
///   IF/ID latch replays the same instruction next cycle.
/// - With ID-stage resolution, branches are evaluated here against
///   forwarded operands; a misprediction flushes the one slot behind and
///   rewrites the PC.
pub(crate) fn decode_stage(vm: &mut Pipeline) {
    if vm.flush_pipeline {
        // Only an occupied slot counts as lost work.
        if vm.if_id.is_some() {
            vm.stats.stall_cycles += 1;
        }
        vm.next_id_ex = None;
        return;
    }

    let Some(if_id) = vm.if_id.clone() else {
        vm.next_id_ex = None;
        return;
    };

    let ctrl = vm.control.decode(if_id.inst);

    // Sentinels carry their signals through the pipeline and nothing else.
    if ctrl.is_nop || ctrl.is_syscall || ctrl.is_csr {
        vm.next_id_ex = Some(IdExEntry {
            ctrl,
            pc: if_id.pc,
            pc_inc: if_id.pc_inc,
            ..IdExEntry::default()
        });
        return;
    }

    let d = decode(if_id.inst);

    let (rs1, rs1_data) = if hazards::needs_rs1(&ctrl) {
        (d.rs1, vm.regs.read(d.rs1))
    } else {
        (0, 0)
    };
    let (rs2, rs2_data) = if hazards::needs_rs2(&ctrl) {
        (d.rs2, vm.regs.read(d.rs2))
    } else {
        (0, 0)
    };

    let mut data_stall = match vm.data_hazard_mode {
        DataHazardMode::Ideal => false,
        DataHazardMode::Stall => {
            hazards::detect_data_hazard(&ctrl, rs1, rs2, &vm.id_ex, &vm.ex_mem)
        }
        DataHazardMode::Forwarding => {
            hazards::detect_load_use_hazard(&ctrl, rs1, rs2, &vm.id_ex)
        }
    };

    let resolve_in_id = vm.branch_stage == BranchStage::Id;

    if resolve_in_id && vm.forwarding_enabled() && hazards::detect_control_hazard(&ctrl) {
        // ALU-use: an operand of the early comparison is being computed in
        // EX this very cycle; its value cannot reach ID in time.
        if !data_stall {
            if let Some(e) = &vm.id_ex {
                if e.ctrl.reg_write && e.rd != 0 && (e.rd == rs1 || e.rd == rs2) {
                    data_stall = true;
                }
            }
        }
        // Load-use into the comparison: the load completes MEM at the end of
        // this cycle; one more stall and the value is forwardable from
        // MEM/WB. Combined with the ordinary load-use stall this costs two.
        if !data_stall {
            if let Some(e) = &vm.ex_mem {
                if e.ctrl.mem_read && e.rd != 0 && (e.rd == rs1 || e.rd == rs2) {
                    data_stall = true;
                }
            }
        }
    }

    if data_stall {
        vm.stall_request = true;
        vm.next_id_ex = None;
        return;
    }

    let entry = IdExEntry {
        ctrl,
        pc: if_id.pc,
        pc_inc: if_id.pc_inc,
        rs1_data,
        rs2_data,
        imm: d.imm,
        rs1,
        rs2,
        rd: d.rd,
        pred_taken: if_id.pred_taken,
        pred_target: if_id.pred_target,
    };

    if resolve_in_id && hazards::detect_control_hazard(&ctrl) {
        resolve_branch(vm, &if_id, &entry);
    }

    vm.next_id_ex = Some(entry);
}

/// Early (ID-stage) branch resolution.
fn resolve_branch(vm: &mut Pipeline, if_id: &IfIdEntry, entry: &IdExEntry) {
    let val1 = if vm.forwarding_enabled() {
        forwarded_operand(vm, entry.rs1, entry.rs1_data)
    } else {
        entry.rs1_data
    };
    let val2 = if vm.forwarding_enabled() {
        forwarded_operand(vm, entry.rs2, entry.rs2_data)
    } else {
        entry.rs2_data
    };

    let (actual_taken, actual_target) = match entry.ctrl.branch_op {
        BranchOp::Jal => (true, entry.pc.wrapping_add(entry.imm as u64)),
        BranchOp::Jalr => (true, val1.wrapping_add(entry.imm as u64) & !1),
        op => (op.taken(val1, val2), entry.pc.wrapping_add(entry.imm as u64)),
    };

    vm.predictor
        .update(entry.pc, if_id.pred_taken, actual_taken);
    vm.btb.update(entry.pc, actual_target);

    let correct =
        if_id.pred_taken == actual_taken && (!actual_taken || if_id.pred_target == actual_target);

    if !correct {
        vm.stats.branch_mispredictions += 1;
        vm.flush_pipeline = true;
        vm.pc = if actual_taken {
            actual_target
        } else {
            entry.pc_inc
        };
    }
}

/// Forwarded register read for the early comparator.
///
/// The in-ID stall rules guarantee no matching load sits in EX/MEM here, so
/// the EX/MEM value is always a completed ALU or link result.
fn forwarded_operand(vm: &Pipeline, rs: usize, reg_value: u64) -> u64 {
    if rs == 0 {
        return 0;
    }
    if let Some(e) = &vm.ex_mem {
        if e.ctrl.reg_write && e.rd == rs {
            return forwarding::ex_mem_value(e);
        }
    }
    if let Some(e) = &vm.mem_wb {
        if e.ctrl.reg_write && e.rd == rs {
            return forwarding::write_back_value(e);
        }
    }
    reg_value
}
