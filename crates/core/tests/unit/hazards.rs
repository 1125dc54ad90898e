//! Hazard detection tests.

use rvcycle_core::config::Config;
use rvcycle_core::core::pipeline::control::ControlUnit;
use rvcycle_core::core::pipeline::hazards;
use rvcycle_core::core::pipeline::latches::{ExMemEntry, IdExEntry};
use rvcycle_core::core::pipeline::signals::ControlSignals;

use crate::common::builder;

fn signals_of(inst: u32) -> ControlSignals {
    ControlUnit::new(&Config::default()).decode(inst)
}

fn producer_in_ex(rd: usize, load: bool) -> Option<IdExEntry> {
    let ctrl_inst = if load {
        builder::lw(rd as u32, 5, 0)
    } else {
        builder::add(rd as u32, 5, 6)
    };
    Some(IdExEntry {
        ctrl: signals_of(ctrl_inst),
        rd,
        ..IdExEntry::default()
    })
}

fn producer_in_mem(rd: usize) -> Option<ExMemEntry> {
    Some(ExMemEntry {
        ctrl: signals_of(builder::add(rd as u32, 5, 6)),
        rd,
        ..ExMemEntry::default()
    })
}

#[test]
fn raw_against_ex_stage_producer() {
    let consumer = signals_of(builder::add(3, 1, 2));
    assert!(hazards::detect_data_hazard(
        &consumer,
        1,
        2,
        &producer_in_ex(1, false),
        &None
    ));
}

#[test]
fn raw_against_mem_stage_producer() {
    let consumer = signals_of(builder::add(3, 1, 2));
    assert!(hazards::detect_data_hazard(
        &consumer,
        1,
        2,
        &None,
        &producer_in_mem(2)
    ));
}

#[test]
fn no_hazard_on_unrelated_registers() {
    let consumer = signals_of(builder::add(3, 1, 2));
    assert!(!hazards::detect_data_hazard(
        &consumer,
        1,
        2,
        &producer_in_ex(7, false),
        &producer_in_mem(8)
    ));
}

#[test]
fn register_zero_never_hazards() {
    let consumer = signals_of(builder::add(3, 0, 0));
    assert!(!hazards::detect_data_hazard(
        &consumer,
        0,
        0,
        &producer_in_ex(0, false),
        &None
    ));
}

#[test]
fn store_needs_rs2() {
    // sw x2, 0(x1): the stored value is rs2.
    let consumer = signals_of(builder::sw(1, 2, 0));
    assert!(hazards::detect_data_hazard(
        &consumer,
        1,
        2,
        &producer_in_ex(2, false),
        &None
    ));
}

#[test]
fn i_type_does_not_need_rs2() {
    // addi x3, x1, 5 reads only rs1; a producer of the rs2 field's bit
    // pattern must not stall it.
    let consumer = signals_of(builder::addi(3, 1, 5));
    assert!(!hazards::needs_rs2(&consumer));
    assert!(!hazards::detect_data_hazard(
        &consumer,
        1,
        5,
        &producer_in_ex(5, false),
        &None
    ));
}

#[test]
fn jalr_needs_rs1_jal_does_not() {
    let jalr = signals_of(builder::jalr(1, 5, 0));
    assert!(hazards::needs_rs1(&jalr));
    assert!(!hazards::needs_rs2(&jalr));

    let jal = signals_of(builder::jal(1, 8));
    assert!(!hazards::needs_rs1(&jal));
    assert!(!hazards::needs_rs2(&jal));
}

#[test]
fn conditional_branch_needs_both_sources() {
    let beq = signals_of(builder::beq(1, 2, 8));
    assert!(hazards::needs_rs1(&beq));
    assert!(hazards::needs_rs2(&beq));
}

#[test]
fn load_use_fires_only_for_loads() {
    let consumer = signals_of(builder::add(3, 1, 2));
    assert!(hazards::detect_load_use_hazard(
        &consumer,
        1,
        2,
        &producer_in_ex(1, true)
    ));
    // The same distance to an ALU producer forwards instead.
    assert!(!hazards::detect_load_use_hazard(
        &consumer,
        1,
        2,
        &producer_in_ex(1, false)
    ));
    assert!(!hazards::detect_load_use_hazard(&consumer, 1, 2, &None));
}

#[test]
fn load_use_respects_consumed_sources() {
    // addi consumes rs1 only; a load into its rs2 bit pattern is no hazard.
    let consumer = signals_of(builder::addi(3, 1, 5));
    assert!(!hazards::detect_load_use_hazard(
        &consumer,
        1,
        5,
        &producer_in_ex(5, true)
    ));
}

#[test]
fn control_hazard_flags_all_branches() {
    assert!(hazards::detect_control_hazard(&signals_of(builder::beq(1, 2, 8))));
    assert!(hazards::detect_control_hazard(&signals_of(builder::jal(1, 8))));
    assert!(hazards::detect_control_hazard(&signals_of(builder::jalr(0, 1, 0))));
    assert!(!hazards::detect_control_hazard(&signals_of(builder::add(1, 2, 3))));
}
