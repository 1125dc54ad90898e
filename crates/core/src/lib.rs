//! Cycle-accurate RV64I/M simulator library.
//!
//! This crate implements two organizations of the same RV64I+M integer core:
//! 1. **Single-cycle:** a reference datapath that retires one instruction per tick.
//! 2. **Five-stage pipeline:** IF/ID/EX/MEM/WB with configurable data-hazard
//!    policies (ideal, stall-only, forwarding), four branch predictors, a
//!    branch target buffer, and branch resolution in either EX or ID.
//!
//! The simulator is deterministic and single-threaded: each `tick()` is a pure
//! state transition over `(PC, latches, registers, memory, predictor, BTB,
//! counters)`. A host may drive it from a worker thread and observe state
//! between ticks; cancellation is cooperative through a stop flag.

/// Common types shared across the crate (errors).
pub mod common;
/// Simulator configuration (defaults, enums, validation).
pub mod config;
/// CPU core (register file, ALU, branch prediction, pipeline, single-cycle).
pub mod core;
/// Instruction set (field extraction, immediate decoding, RV64I/M constants).
pub mod isa;
/// Memory-image loader and the simulation driver.
pub mod sim;
/// Byte-addressable sparse memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate-wide error type.
pub use crate::common::error::VmError;
/// Top-level simulation driver; constructs either core from a validated config.
pub use crate::sim::simulator::{Simulator, VmStatus};
