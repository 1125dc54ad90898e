//! Simulation front end: image loading and the run-loop driver.

/// Memory-image loader.
pub mod loader;
/// The simulation driver and host-facing status/snapshot types.
pub mod simulator;

pub use simulator::{Simulator, VmSnapshot, VmStatus};
