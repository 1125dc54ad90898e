//! Simulation driver tests: run loops, breakpoints, and cooperative stop.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use crate::common::builder;
use crate::common::harness::TestContext;
use rvcycle_core::config::Config;
use rvcycle_core::VmStatus;

/// Configuration with no debug-run pacing, so tests finish instantly.
fn unpaced() -> Config {
    Config {
        run_step_delay: 0,
        ..Config::default()
    }
}

#[test]
fn run_reaches_program_end() {
    let mut ctx = TestContext::new(unpaced()).load_program(&[
        builder::addi(1, 0, 1),
        builder::addi(2, 0, 2),
    ]);
    assert_eq!(ctx.sim.run(), VmStatus::ProgramEnd);
    assert_eq!(ctx.reg(1), 1);
    assert_eq!(ctx.reg(2), 2);
}

#[test]
fn debug_run_halts_before_a_breakpoint() {
    let mut ctx = TestContext::new(unpaced()).load_program(&[
        builder::addi(1, 0, 1),
        builder::addi(2, 0, 2),
        builder::addi(3, 0, 3),
    ]);
    ctx.sim.add_breakpoint(8);

    assert_eq!(ctx.sim.debug_run(), VmStatus::BreakpointHit);
    assert_eq!(ctx.sim.pc(), 8);
    assert_eq!(ctx.reg(2), 2, "instructions before the breakpoint completed");
    assert_eq!(ctx.reg(3), 0, "the breakpoint instruction has not executed");
}

#[test]
fn debug_run_resumes_after_removing_the_breakpoint() {
    let mut ctx = TestContext::new(unpaced()).load_program(&[
        builder::addi(1, 0, 1),
        builder::addi(2, 0, 2),
        builder::addi(3, 0, 3),
    ]);
    ctx.sim.add_breakpoint(8);
    assert_eq!(ctx.sim.debug_run(), VmStatus::BreakpointHit);

    ctx.sim.remove_breakpoint(8);
    assert_eq!(ctx.sim.debug_run(), VmStatus::ProgramEnd);
    assert_eq!(ctx.reg(3), 3);
}

/// A host thread can stop a free-running simulation between ticks.
#[test]
fn stop_flag_cancels_an_infinite_loop() {
    // beq x0, x0, 0 spins forever at PC 0.
    let mut ctx = TestContext::new(unpaced()).load_program(&[builder::beq(0, 0, 0)]);
    let stop = ctx.sim.stop_handle();

    let setter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        stop.store(true, Ordering::Relaxed);
    });

    assert_eq!(ctx.sim.run(), VmStatus::Stopped);
    setter.join().expect("setter thread joins");
}

#[test]
fn reset_returns_to_power_on_state() {
    let mut ctx = TestContext::new(unpaced()).load_program(&[builder::addi(1, 0, 7)]);
    ctx.run_to_end();
    assert_eq!(ctx.reg(1), 7);

    ctx.sim.reset();
    assert_eq!(ctx.sim.pc(), 0);
    assert_eq!(ctx.reg(1), 0);
    assert_eq!(ctx.stats().cycles, 0);
    // The image is gone with the rest of memory; the machine is terminal.
    assert_eq!(ctx.sim.step(), VmStatus::ProgramEnd);
}
