//! Memory access (MEM) stage.
//!
//! Loads read at the ALU-computed address with the width and signedness the
//! control unit selected; stores write the forwarded rs2 value masked to
//! width. An out-of-range access surfaces as a traced fault and a bubble in
//! MEM/WB; counters are untouched.

use crate::core::pipeline::latches::MemWbEntry;
use crate::core::pipeline::signals::{MemReadOp, MemWriteOp};
use crate::core::pipeline::Pipeline;

/// Executes the memory stage.
///
/// # Arguments
///
/// * `vm` - Mutable reference to the pipeline state.
///
/// # Behavior
///
/// - Propagates bubbles and the NOP/syscall/CSR sentinels untouched.
/// - Loads read at the ALU result with the selected width, then sign- or
///   zero-extend to 64 bits.
/// - Stores write the forwarded rs2 value masked to the selected width.
/// - An out-of-range access reports a fault (when tracing) and turns the
///   instruction into a bubble; no counters change.
pub(crate) fn mem_stage(vm: &mut Pipeline) {
    let Some(ex_mem) = vm.ex_mem.clone() else {
        vm.next_mem_wb = None;
        return;
    };

    let ctrl = ex_mem.ctrl;
    if ctrl.is_nop || ctrl.is_syscall || ctrl.is_csr {
        vm.next_mem_wb = Some(MemWbEntry {
            ctrl,
            pc_inc: ex_mem.pc_inc,
            ..MemWbEntry::default()
        });
        return;
    }

    let addr = ex_mem.alu_result;
    let mut memory_data = 0u64;

    if ctrl.mem_read {
        let loaded = match ctrl.mem_read_op {
            MemReadOp::Byte => vm.memory.read_byte(addr).map(|v| v as i8 as i64 as u64),
            MemReadOp::Half => vm.memory.read_half(addr).map(|v| v as i16 as i64 as u64),
            MemReadOp::Word => vm.memory.read_word(addr).map(|v| v as i32 as i64 as u64),
            MemReadOp::Double => vm.memory.read_double(addr),
            MemReadOp::ByteUnsigned => vm.memory.read_byte(addr).map(u64::from),
            MemReadOp::HalfUnsigned => vm.memory.read_half(addr).map(u64::from),
            MemReadOp::WordUnsigned => vm.memory.read_word(addr).map(u64::from),
            MemReadOp::None => {
                if vm.trace {
                    eprintln!("MEM addr={:#x} # load carries no width; reading nothing", addr);
                }
                Ok(0)
            }
        };
        match loaded {
            Ok(v) => memory_data = v,
            Err(e) => {
                if vm.trace {
                    eprintln!("MEM addr={:#x} # FAULT: {}", addr, e);
                }
                vm.next_mem_wb = None;
                return;
            }
        }
    } else if ctrl.mem_write {
        let data = ex_mem.store_data;
        let stored = match ctrl.mem_write_op {
            MemWriteOp::Byte => vm.memory.write_byte(addr, data as u8),
            MemWriteOp::Half => vm.memory.write_half(addr, data as u16),
            MemWriteOp::Word => vm.memory.write_word(addr, data as u32),
            MemWriteOp::Double => vm.memory.write_double(addr, data),
            MemWriteOp::None => {
                if vm.trace {
                    eprintln!("MEM addr={:#x} # store carries no width; writing nothing", addr);
                }
                Ok(())
            }
        };
        if let Err(e) = stored {
            if vm.trace {
                eprintln!("MEM addr={:#x} # FAULT: {}", addr, e);
            }
            vm.next_mem_wb = None;
            return;
        }
    }

    vm.next_mem_wb = Some(MemWbEntry {
        ctrl,
        pc_inc: ex_mem.pc_inc,
        memory_data,
        alu_result: ex_mem.alu_result,
        rd: ex_mem.rd,
    });
}
