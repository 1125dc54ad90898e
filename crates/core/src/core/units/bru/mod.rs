//! Branch prediction.
//!
//! This module defines the predictor contract, the four predictor variants,
//! and the branch target buffer:
//! 1. **Contract:** [`BranchPredictor`]: predict a direction, train on the
//!    resolved outcome, count mispredictions.
//! 2. **Variants:** static not-taken, static taken, per-PC 1-bit, per-PC
//!    2-bit saturating counter.
//! 3. **Dispatch:** [`Predictor`], a tagged enum over the four concrete
//!    types, so predictor state serializes with the rest of the machine.

/// Branch target buffer.
pub mod btb;
/// Per-PC dynamic predictors (1-bit and 2-bit).
pub mod dynamic;
/// Static predictors.
pub mod static_bp;

use serde::{Deserialize, Serialize};

use crate::config::PredictorKind;

pub use btb::Btb;
pub use dynamic::{Dynamic1Bit, Dynamic2Bit};
pub use static_bp::{StaticNotTaken, StaticTaken};

/// Contract shared by every branch predictor.
pub trait BranchPredictor {
    /// Predicts whether the branch at `pc` will be taken.
    fn predict(&self, pc: u64) -> bool;

    /// Trains the predictor with a resolved branch.
    ///
    /// `predicted` is the direction the fetch stage actually speculated on,
    /// `actual` the resolved outcome. The misprediction counter increments
    /// exactly when the two differ.
    fn update(&mut self, pc: u64, predicted: bool, actual: bool);

    /// Running count of mispredicted updates.
    fn mispredictions(&self) -> u64;
}

/// Tagged dispatch over the four predictor variants.
///
/// The pipeline stores this enum rather than a trait object so that the full
/// machine state (predictor included) round-trips through serde.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Predictor {
    /// Always predict not-taken.
    StaticNotTaken(StaticNotTaken),
    /// Always predict taken.
    StaticTaken(StaticTaken),
    /// Last-outcome bit per PC.
    Dynamic1Bit(Dynamic1Bit),
    /// Two-bit saturating counter per PC.
    Dynamic2Bit(Dynamic2Bit),
}

impl Predictor {
    /// Builds a fresh predictor of the configured kind.
    pub fn from_kind(kind: PredictorKind) -> Self {
        match kind {
            PredictorKind::StaticNotTaken => Predictor::StaticNotTaken(StaticNotTaken::default()),
            PredictorKind::StaticTaken => Predictor::StaticTaken(StaticTaken::default()),
            PredictorKind::Dynamic1Bit => Predictor::Dynamic1Bit(Dynamic1Bit::default()),
            PredictorKind::Dynamic2Bit => Predictor::Dynamic2Bit(Dynamic2Bit::default()),
        }
    }
}

impl BranchPredictor for Predictor {
    fn predict(&self, pc: u64) -> bool {
        match self {
            Predictor::StaticNotTaken(p) => p.predict(pc),
            Predictor::StaticTaken(p) => p.predict(pc),
            Predictor::Dynamic1Bit(p) => p.predict(pc),
            Predictor::Dynamic2Bit(p) => p.predict(pc),
        }
    }

    fn update(&mut self, pc: u64, predicted: bool, actual: bool) {
        match self {
            Predictor::StaticNotTaken(p) => p.update(pc, predicted, actual),
            Predictor::StaticTaken(p) => p.update(pc, predicted, actual),
            Predictor::Dynamic1Bit(p) => p.update(pc, predicted, actual),
            Predictor::Dynamic2Bit(p) => p.update(pc, predicted, actual),
        }
    }

    fn mispredictions(&self) -> u64 {
        match self {
            Predictor::StaticNotTaken(p) => p.mispredictions(),
            Predictor::StaticTaken(p) => p.mispredictions(),
            Predictor::Dynamic1Bit(p) => p.mispredictions(),
            Predictor::Dynamic2Bit(p) => p.mispredictions(),
        }
    }
}
