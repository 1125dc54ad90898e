//! Per-PC dynamic branch predictors.
//!
//! Both predictors keep a branch history table keyed by branch PC. A PC that
//! has never been resolved predicts not-taken.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::BranchPredictor;

/// One-bit predictor: remembers the last resolved outcome per PC.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Dynamic1Bit {
    bht: HashMap<u64, bool>,
    mispredictions: u64,
}

impl BranchPredictor for Dynamic1Bit {
    fn predict(&self, pc: u64) -> bool {
        self.bht.get(&pc).copied().unwrap_or(false)
    }

    fn update(&mut self, pc: u64, predicted: bool, actual: bool) {
        if predicted != actual {
            self.mispredictions += 1;
        }
        self.bht.insert(pc, actual);
    }

    fn mispredictions(&self) -> u64 {
        self.mispredictions
    }
}

/// State of one two-bit saturating counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Counter2Bit {
    /// Strongly not-taken (0).
    #[default]
    StrongNotTaken,
    /// Weakly not-taken (1).
    WeakNotTaken,
    /// Weakly taken (2).
    WeakTaken,
    /// Strongly taken (3).
    StrongTaken,
}

impl Counter2Bit {
    /// Predict taken in either taken state.
    fn taken(self) -> bool {
        matches!(self, Counter2Bit::WeakTaken | Counter2Bit::StrongTaken)
    }

    /// Saturating step toward the resolved outcome.
    fn train(self, actual: bool) -> Self {
        use Counter2Bit::*;
        if actual {
            match self {
                StrongNotTaken => WeakNotTaken,
                WeakNotTaken => WeakTaken,
                WeakTaken | StrongTaken => StrongTaken,
            }
        } else {
            match self {
                StrongTaken => WeakTaken,
                WeakTaken => WeakNotTaken,
                WeakNotTaken | StrongNotTaken => StrongNotTaken,
            }
        }
    }
}

/// Two-bit predictor: a saturating counter per PC, starting strongly
/// not-taken. A single outcome flip from a saturated state does not change
/// the predicted direction (hysteresis).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Dynamic2Bit {
    bht: HashMap<u64, Counter2Bit>,
    mispredictions: u64,
}

impl Dynamic2Bit {
    /// Current counter state for `pc`, for inspection in tests and dumps.
    pub fn counter(&self, pc: u64) -> Counter2Bit {
        self.bht.get(&pc).copied().unwrap_or_default()
    }
}

impl BranchPredictor for Dynamic2Bit {
    fn predict(&self, pc: u64) -> bool {
        self.counter(pc).taken()
    }

    fn update(&mut self, pc: u64, predicted: bool, actual: bool) {
        if predicted != actual {
            self.mispredictions += 1;
        }
        let next = self.counter(pc).train(actual);
        self.bht.insert(pc, next);
    }

    fn mispredictions(&self) -> u64 {
        self.mispredictions
    }
}
