//! Branch predictor contract tests.
//!
//! Every predictor must satisfy the shared contract: the misprediction
//! counter advances exactly when the direction handed to `update` differs
//! from the resolved outcome.

use rvcycle_core::config::PredictorKind;
use rvcycle_core::core::units::bru::dynamic::Counter2Bit;
use rvcycle_core::core::units::bru::{
    BranchPredictor, Dynamic1Bit, Dynamic2Bit, Predictor, StaticNotTaken, StaticTaken,
};

#[test]
fn static_not_taken_never_predicts_taken() {
    let mut bp = StaticNotTaken::default();
    assert!(!bp.predict(0x1000));
    for _ in 0..10 {
        bp.update(0x1000, bp.predict(0x1000), true);
    }
    assert!(!bp.predict(0x1000), "training must not change a static predictor");
    assert_eq!(bp.mispredictions(), 10);
}

#[test]
fn static_taken_always_predicts_taken() {
    let mut bp = StaticTaken::default();
    assert!(bp.predict(0x1000));
    bp.update(0x1000, true, false);
    assert!(bp.predict(0x1000));
    assert_eq!(bp.mispredictions(), 1);
}

#[test]
fn one_bit_follows_last_outcome() {
    let mut bp = Dynamic1Bit::default();
    // Unknown PC defaults to not-taken.
    assert!(!bp.predict(0x40));

    bp.update(0x40, false, true);
    assert!(bp.predict(0x40), "remembers the last taken outcome");
    bp.update(0x40, true, false);
    assert!(!bp.predict(0x40), "flips immediately on one not-taken");
    assert_eq!(bp.mispredictions(), 2);
}

#[test]
fn one_bit_tracks_pcs_independently() {
    let mut bp = Dynamic1Bit::default();
    bp.update(0x40, false, true);
    assert!(bp.predict(0x40));
    assert!(!bp.predict(0x80), "a different PC has its own history");
}

#[test]
fn two_bit_starts_strongly_not_taken() {
    let bp = Dynamic2Bit::default();
    assert!(!bp.predict(0x40));
    assert_eq!(bp.counter(0x40), Counter2Bit::StrongNotTaken);
}

#[test]
fn two_bit_saturates_upward() {
    let mut bp = Dynamic2Bit::default();
    let pc = 0x40;
    for _ in 0..4 {
        bp.update(pc, bp.predict(pc), true);
    }
    assert_eq!(bp.counter(pc), Counter2Bit::StrongTaken);
    // Further taken outcomes keep it saturated.
    bp.update(pc, bp.predict(pc), true);
    assert_eq!(bp.counter(pc), Counter2Bit::StrongTaken);
}

#[test]
fn two_bit_hysteresis_single_flip() {
    // A loop branch taken four times, then not-taken once: the final flip
    // costs exactly one misprediction and drops the counter to weakly
    // taken, so the direction prediction survives.
    let mut bp = Dynamic2Bit::default();
    let pc = 0x40;
    for _ in 0..4 {
        bp.update(pc, bp.predict(pc), true);
    }
    let before = bp.mispredictions();

    bp.update(pc, bp.predict(pc), false);
    assert_eq!(bp.mispredictions() - before, 1);
    assert_eq!(bp.counter(pc), Counter2Bit::WeakTaken);
    assert!(bp.predict(pc), "one flip must not change the direction");
}

#[test]
fn two_bit_takes_two_flips_to_change_direction() {
    let mut bp = Dynamic2Bit::default();
    let pc = 0x40;
    for _ in 0..4 {
        bp.update(pc, bp.predict(pc), true);
    }
    bp.update(pc, bp.predict(pc), false);
    bp.update(pc, bp.predict(pc), false);
    assert!(!bp.predict(pc));
    assert_eq!(bp.counter(pc), Counter2Bit::WeakNotTaken);
}

#[test]
fn misprediction_counter_matches_contract() {
    // For every resolved branch: counter delta == (predicted != actual).
    let outcomes = [true, true, false, true, false, false, true];
    for kind in [
        PredictorKind::StaticNotTaken,
        PredictorKind::StaticTaken,
        PredictorKind::Dynamic1Bit,
        PredictorKind::Dynamic2Bit,
    ] {
        let mut bp = Predictor::from_kind(kind);
        let mut expected = 0;
        for (i, actual) in outcomes.iter().enumerate() {
            let pc = 0x100 + (i as u64 % 2) * 4;
            let predicted = bp.predict(pc);
            if predicted != *actual {
                expected += 1;
            }
            bp.update(pc, predicted, *actual);
            assert_eq!(bp.mispredictions(), expected, "predictor {:?}", kind);
        }
    }
}
