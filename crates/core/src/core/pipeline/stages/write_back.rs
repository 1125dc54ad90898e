//! Write-back (WB) stage.
//!
//! Retires the instruction in MEM/WB and commits its result to the register
//! file. Every valid entry retires, including program NOPs and the
//! syscall/CSR sentinels; only bubbles do not.

use crate::core::pipeline::signals::WbSrc;
use crate::core::pipeline::Pipeline;

/// Executes the write-back stage.
///
/// # Arguments
///
/// * `vm` - Mutable reference to the pipeline state.
///
/// # Behavior
///
/// - A bubble returns without touching anything.
/// - Every valid entry increments the retired-instruction counter.
/// - Syscall and CSR sentinels retire without a register write.
/// - The write-back value is selected by `wb_src` (ALU result, loaded
///   memory value, or PC + 4); writes to `x0` are discarded.
pub(crate) fn write_back_stage(vm: &mut Pipeline) {
    let Some(wb) = vm.mem_wb.clone() else {
        return;
    };

    vm.stats.instructions_retired += 1;

    let ctrl = wb.ctrl;
    if ctrl.is_syscall || ctrl.is_csr {
        return;
    }

    if ctrl.reg_write && wb.rd != 0 {
        let value = match ctrl.wb_src {
            WbSrc::Alu => wb.alu_result,
            WbSrc::Mem => wb.memory_data,
            WbSrc::PcInc => wb.pc_inc,
            WbSrc::None => {
                if vm.trace {
                    eprintln!("WB  x{} # reg_write set with no write-back source", wb.rd);
                }
                return;
            }
        };
        vm.regs.write(wb.rd, value);
    }
}
