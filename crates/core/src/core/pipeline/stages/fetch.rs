//! Instruction Fetch (IF) stage.
//!
//! Reads the next instruction word at the PC, asks the branch predictor for
//! a direction and the BTB for a target, and advances the PC: to the
//! predicted target when both agree, to PC+4 otherwise. A flush raised by
//! branch resolution earlier in the same tick squashes the slot instead.

use crate::core::pipeline::latches::IfIdEntry;
use crate::core::pipeline::Pipeline;
use crate::core::units::bru::BranchPredictor;

/// Executes the fetch stage.
///
/// Produces the next IF/ID entry, or a bubble when flushed, past the end of
/// text, or on a fetch fault.
///
/// # Arguments
///
/// * `vm` - Mutable reference to the pipeline state.
///
/// # Behavior
///
/// - Squashes the slot (and counts it as lost) when a branch resolution
///   earlier in the same tick raised a flush.
/// - Stops producing entries once the PC passes the last text byte.
/// - Consults the predictor for a direction and the BTB for a target;
///   speculation redirects the PC only when both are available.
/// - Turns an out-of-range fetch into a bubble but still advances the PC by
///   4 so the pipeline drains toward termination.
pub(crate) fn fetch_stage(vm: &mut Pipeline) {
    if vm.flush_pipeline {
        // The slot fetched down the wrong path is squashed.
        vm.stats.stall_cycles += 1;
        vm.next_if_id = None;
        return;
    }

    if vm.fetch_done() {
        vm.next_if_id = None;
        return;
    }

    let inst = match vm.memory.read_word(vm.pc) {
        Ok(word) => word,
        Err(e) => {
            if vm.trace {
                eprintln!("IF  pc={:#x} # FAULT: {}", vm.pc, e);
            }
            vm.next_if_id = None;
            vm.pc = vm.pc.wrapping_add(4);
            return;
        }
    };

    // Speculate only when the predictor says taken AND the BTB knows where
    // to; a direction without a target is useless one stage early.
    let predict_taken = vm.predictor.predict(vm.pc);
    let (pred_taken, pred_target, next_pc) = match vm.btb.lookup(vm.pc) {
        Some(target) if predict_taken => (true, target, target),
        _ => (false, 0, vm.pc.wrapping_add(4)),
    };

    vm.next_if_id = Some(IfIdEntry {
        inst,
        pc: vm.pc,
        pc_inc: vm.pc.wrapping_add(4),
        pred_taken,
        pred_target,
    });
    vm.pc = next_pc;
}
