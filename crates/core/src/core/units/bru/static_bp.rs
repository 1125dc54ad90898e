//! Static branch predictors.
//!
//! Both variants ignore history entirely; they differ only in the constant
//! direction they report. Updates still count mispredictions so the two can
//! be compared against the dynamic predictors.

use serde::{Deserialize, Serialize};

use super::BranchPredictor;

/// Predicts every branch as not-taken.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StaticNotTaken {
    mispredictions: u64,
}

impl BranchPredictor for StaticNotTaken {
    fn predict(&self, _pc: u64) -> bool {
        false
    }

    fn update(&mut self, _pc: u64, predicted: bool, actual: bool) {
        if predicted != actual {
            self.mispredictions += 1;
        }
    }

    fn mispredictions(&self) -> u64 {
        self.mispredictions
    }
}

/// Predicts every branch as taken.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StaticTaken {
    mispredictions: u64,
}

impl BranchPredictor for StaticTaken {
    fn predict(&self, _pc: u64) -> bool {
        true
    }

    fn update(&mut self, _pc: u64, predicted: bool, actual: bool) {
        if predicted != actual {
            self.mispredictions += 1;
        }
    }

    fn mispredictions(&self) -> u64 {
        self.mispredictions
    }
}
