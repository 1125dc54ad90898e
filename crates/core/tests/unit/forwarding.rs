//! Forwarding source selection tests.

use rvcycle_core::core::pipeline::forwarding::{self, ForwardSrc};
use rvcycle_core::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use rvcycle_core::core::pipeline::signals::{ControlSignals, WbSrc};

fn ex_mem_writer(rd: usize, alu_result: u64) -> Option<ExMemEntry> {
    Some(ExMemEntry {
        ctrl: ControlSignals {
            reg_write: true,
            wb_src: WbSrc::Alu,
            ..ControlSignals::default()
        },
        rd,
        alu_result,
        ..ExMemEntry::default()
    })
}

fn mem_wb_writer(rd: usize, wb_src: WbSrc) -> Option<MemWbEntry> {
    Some(MemWbEntry {
        ctrl: ControlSignals {
            reg_write: true,
            wb_src,
            ..ControlSignals::default()
        },
        rd,
        alu_result: 0xA,
        memory_data: 0xB,
        pc_inc: 0xC,
        ..MemWbEntry::default()
    })
}

#[test]
fn register_file_when_nothing_matches() {
    assert_eq!(
        forwarding::forward_src(1, &None, &None),
        ForwardSrc::Reg
    );
    assert_eq!(
        forwarding::forward_src(1, &ex_mem_writer(2, 0), &mem_wb_writer(3, WbSrc::Alu)),
        ForwardSrc::Reg
    );
}

#[test]
fn ex_mem_wins_over_mem_wb() {
    // Both latches write x1: the younger (EX/MEM) value must win.
    assert_eq!(
        forwarding::forward_src(1, &ex_mem_writer(1, 0), &mem_wb_writer(1, WbSrc::Alu)),
        ForwardSrc::ExMem
    );
}

#[test]
fn mem_wb_when_only_older_matches() {
    assert_eq!(
        forwarding::forward_src(1, &ex_mem_writer(2, 0), &mem_wb_writer(1, WbSrc::Alu)),
        ForwardSrc::MemWb
    );
}

#[test]
fn register_zero_is_never_forwarded() {
    assert_eq!(
        forwarding::forward_src(0, &ex_mem_writer(0, 7), &mem_wb_writer(0, WbSrc::Alu)),
        ForwardSrc::Reg
    );
}

#[test]
fn non_writing_producers_do_not_forward() {
    let mut entry = ex_mem_writer(1, 0);
    if let Some(e) = entry.as_mut() {
        e.ctrl.reg_write = false;
    }
    assert_eq!(forwarding::forward_src(1, &entry, &None), ForwardSrc::Reg);
}

#[test]
fn write_back_value_tracks_wb_source() {
    let alu = mem_wb_writer(1, WbSrc::Alu).expect("entry");
    assert_eq!(forwarding::write_back_value(&alu), 0xA);
    let mem = mem_wb_writer(1, WbSrc::Mem).expect("entry");
    assert_eq!(forwarding::write_back_value(&mem), 0xB);
    let link = mem_wb_writer(1, WbSrc::PcInc).expect("entry");
    assert_eq!(forwarding::write_back_value(&link), 0xC);
}

#[test]
fn ex_mem_value_is_link_for_jumps() {
    let mut entry = ex_mem_writer(1, 0x2000).expect("entry");
    entry.pc_inc = 0x104;
    assert_eq!(forwarding::ex_mem_value(&entry), 0x2000);
    entry.ctrl.wb_src = WbSrc::PcInc;
    assert_eq!(
        forwarding::ex_mem_value(&entry),
        0x104,
        "jumps forward the link address, not the target in the ALU field"
    );
}
