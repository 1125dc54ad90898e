//! Execute (EX) stage.
//!
//! Applies forwarding to the latched operands, runs the ALU, and (in the
//! BRANCH_IN_EX organization) resolves branches against the prediction
//! carried on the ID/EX latch, flushing the two younger slots on a
//! misprediction.

use crate::config::BranchStage;
use crate::core::pipeline::forwarding::{self, ForwardSrc};
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::{AluASrc, BranchOp};
use crate::core::pipeline::Pipeline;
use crate::core::units::alu::Alu;
use crate::core::units::bru::BranchPredictor;

/// Executes the execute stage.
///
/// # Arguments
///
/// * `vm` - Mutable reference to the pipeline state.
///
/// # Behavior
///
/// - Propagates bubbles and sentinels untouched.
/// - Resolves both operands through the forwarding network when the policy
///   enables it; the forwarded rs2 value also becomes the store data.
/// - Operand A is rs1, zero, or the PC per `alu_src_a`; operand B is the
///   immediate or rs2 per `alu_src_b`.
/// - With EX-stage resolution, compares the branch outcome against the
///   prediction carried on the ID/EX latch and flushes both younger slots
///   on a mismatch.
pub(crate) fn execute_stage(vm: &mut Pipeline) {
    let Some(id_ex) = vm.id_ex.clone() else {
        vm.next_ex_mem = None;
        return;
    };

    let ctrl = id_ex.ctrl;
    if ctrl.is_nop || ctrl.is_syscall || ctrl.is_csr {
        vm.next_ex_mem = Some(ExMemEntry {
            ctrl,
            pc_inc: id_ex.pc_inc,
            ..ExMemEntry::default()
        });
        return;
    }

    let mut data_alu_a = id_ex.rs1_data;
    let mut data_alu_b = id_ex.rs2_data;
    if vm.forwarding_enabled() {
        data_alu_a = forwarded_operand(vm, id_ex.rs1, id_ex.rs1_data);
        data_alu_b = forwarded_operand(vm, id_ex.rs2, id_ex.rs2_data);
    }

    let a = match ctrl.alu_src_a {
        AluASrc::Rs1 => data_alu_a,
        AluASrc::Zero => 0,
        AluASrc::Pc => id_ex.pc,
    };
    let b = if ctrl.alu_src_b {
        id_ex.imm as u64
    } else {
        data_alu_b
    };

    let (alu_result, _overflow) = Alu::execute(ctrl.alu_op, a, b);

    if vm.branch_stage == BranchStage::Ex && hazards::detect_control_hazard(&ctrl) {
        resolve_branch(vm, &id_ex, alu_result);
    }

    vm.next_ex_mem = Some(ExMemEntry {
        ctrl,
        pc_inc: id_ex.pc_inc,
        alu_result,
        store_data: data_alu_b,
        rd: id_ex.rd,
    });
}

/// Late (EX-stage) branch resolution.
///
/// The direction of a conditional branch is read off the ALU result the
/// control unit arranged for it: SUB for equality, SLT/SLTU for the ordered
/// comparisons. Jump targets come straight from the ALU (PC+imm for JAL,
/// rs1+imm for JALR).
fn resolve_branch(vm: &mut Pipeline, id_ex: &IdExEntry, alu_result: u64) {
    let cond_target = id_ex.pc.wrapping_add(id_ex.imm as u64);
    let (actual_taken, actual_target) = match id_ex.ctrl.branch_op {
        BranchOp::Jal => (true, alu_result),
        BranchOp::Jalr => (true, alu_result & !1),
        BranchOp::Beq => (alu_result == 0, cond_target),
        BranchOp::Bne => (alu_result != 0, cond_target),
        BranchOp::Blt | BranchOp::Bltu => (alu_result == 1, cond_target),
        BranchOp::Bge | BranchOp::Bgeu => (alu_result == 0, cond_target),
        BranchOp::None => return,
    };

    vm.predictor
        .update(id_ex.pc, id_ex.pred_taken, actual_taken);
    vm.btb.update(id_ex.pc, actual_target);

    let correct = id_ex.pred_taken == actual_taken
        && (!actual_taken || id_ex.pred_target == actual_target);

    if !correct {
        vm.stats.branch_mispredictions += 1;
        vm.flush_pipeline = true;
        vm.pc = if actual_taken {
            actual_target
        } else {
            id_ex.pc_inc
        };
    }
}

/// Resolves one EX operand through the forwarding network.
fn forwarded_operand(vm: &Pipeline, rs: usize, reg_value: u64) -> u64 {
    match forwarding::forward_src(rs, &vm.ex_mem, &vm.mem_wb) {
        ForwardSrc::ExMem => match &vm.ex_mem {
            Some(e) => forwarding::ex_mem_value(e),
            None => reg_value,
        },
        ForwardSrc::MemWb => match &vm.mem_wb {
            Some(e) => forwarding::write_back_value(e),
            None => reg_value,
        },
        ForwardSrc::Reg => reg_value,
    }
}
