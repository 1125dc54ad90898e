//! Counter and rate bookkeeping tests.

use rvcycle_core::stats::SimStats;

#[test]
fn rates_are_zero_before_first_retirement() {
    let mut stats = SimStats {
        cycles: 25,
        ..SimStats::default()
    };
    stats.update_rates();
    assert_eq!(stats.cpi, 0.0);
    assert_eq!(stats.ipc, 0.0);
}

#[test]
fn rates_follow_the_counters() {
    let mut stats = SimStats {
        cycles: 8,
        instructions_retired: 4,
        ..SimStats::default()
    };
    stats.update_rates();
    assert_eq!(stats.cpi, 2.0);
    assert_eq!(stats.ipc, 0.5);
}

#[test]
fn reset_zeroes_everything() {
    let mut stats = SimStats {
        cycles: 8,
        instructions_retired: 4,
        stall_cycles: 2,
        branch_mispredictions: 1,
        ..SimStats::default()
    };
    stats.update_rates();
    stats.reset();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.stall_cycles, 0);
    assert_eq!(stats.branch_mispredictions, 0);
    assert_eq!(stats.cpi, 0.0);
}
