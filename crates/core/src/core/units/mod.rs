//! Functional units used by both datapaths.

/// Arithmetic logic unit.
pub mod alu;
/// Branch prediction (predictors and the branch target buffer).
pub mod bru;
