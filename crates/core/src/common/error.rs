//! Simulator error definitions.
//!
//! This module defines the error type shared by every layer of the simulator.
//! Three tiers of failure exist:
//! 1. **Configuration errors:** invalid values or combinations, raised before a run.
//! 2. **Decode anomalies:** handled in place (diagnostic + NOP bubble), never raised.
//! 3. **Runtime faults:** out-of-range memory accesses, surfaced per stage.

use std::fmt;

/// Errors produced by the simulator core.
#[derive(Clone, Debug, PartialEq)]
pub enum VmError {
    /// Invalid configuration value or combination.
    ///
    /// Raised by [`Config::validate`](crate::config::Config::validate) before a
    /// run; the configuration is never mutated on failure.
    Config(String),

    /// Memory access outside the configured address space.
    ///
    /// Carries the faulting byte address and the configured memory size.
    MemoryOutOfRange {
        /// Faulting byte address.
        addr: u64,
        /// Configured memory size in bytes.
        size: u64,
    },

    /// Malformed record in a memory-image file.
    ImageFormat {
        /// 1-based line number of the offending record.
        line: usize,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Underlying I/O failure while reading an input file.
    Io(String),
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::Config(msg) => write!(f, "configuration error: {}", msg),
            VmError::MemoryOutOfRange { addr, size } => {
                write!(
                    f,
                    "memory access out of range: address {:#x} (memory size {:#x})",
                    addr, size
                )
            }
            VmError::ImageFormat { line, reason } => {
                write!(f, "memory image line {}: {}", line, reason)
            }
            VmError::Io(msg) => write!(f, "i/o error: {}", msg),
        }
    }
}

impl std::error::Error for VmError {}

impl From<std::io::Error> for VmError {
    fn from(e: std::io::Error) -> Self {
        VmError::Io(e.to_string())
    }
}
