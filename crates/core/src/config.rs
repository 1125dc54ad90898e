//! Configuration system for the simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a run. It provides:
//! 1. **Defaults:** baseline constants (memory geometry, section bases, pacing).
//! 2. **Enums:** core organization, hazard policy, predictor, resolution stage.
//! 3. **Validation:** rejection of invalid combinations before any state is built.
//!
//! Configuration is supplied as JSON (`serde` deserialization) or built with
//! `Config::default()` and adjusted field-by-field.

use serde::{Deserialize, Serialize};

use crate::common::error::VmError;

/// Default configuration constants.
mod defaults {
    /// Pause between ticks in debug-run mode, in milliseconds.
    pub const RUN_STEP_DELAY_MS: u64 = 300;

    /// Addressable memory size in bytes (full 64-bit space).
    pub const MEMORY_SIZE: u64 = u64::MAX;

    /// Sparse memory allocation granule in bytes.
    pub const MEMORY_BLOCK_SIZE: u64 = 1024;

    /// Default start address of the text section (also the reset PC).
    pub const TEXT_SECTION_START: u64 = 0x0;

    /// Default start address of the data section.
    pub const DATA_SECTION_START: u64 = 0x1000_0000;

    /// Default start address of the BSS section.
    pub const BSS_SECTION_START: u64 = 0x1100_0000;
}

/// Core organization selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmType {
    /// Reference single-cycle datapath (one instruction per tick).
    #[default]
    SingleStage,
    /// Five-stage pipeline (IF/ID/EX/MEM/WB).
    MultiStage,
}

/// Data-hazard resolution policy for the pipelined core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataHazardMode {
    /// No hazard detection; the program is assumed dependency-free.
    #[default]
    Ideal,
    /// Detect RAW hazards and stall until the producer has written back.
    Stall,
    /// Forward in-flight results; stall only for load-use distances.
    Forwarding,
}

/// Branch prediction algorithm selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictorKind {
    /// Always predict not-taken.
    #[default]
    StaticNotTaken,
    /// Always predict taken.
    StaticTaken,
    /// Per-PC last-outcome bit.
    Dynamic1Bit,
    /// Per-PC two-bit saturating counter.
    Dynamic2Bit,
}

/// Pipeline stage in which branches are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchStage {
    /// Resolve in EX using the ALU (two-slot misprediction penalty).
    #[default]
    Ex,
    /// Resolve in ID with an early comparator (one-slot penalty; uses the BTB).
    Id,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvcycle_core::config::{Config, DataHazardMode, VmType};
///
/// let json = r#"{
///     "vm_type": "multi_stage",
///     "data_hazard_mode": "forwarding",
///     "branch_predictor": "dynamic_2bit",
///     "branch_stage": "id"
/// }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.vm_type, VmType::MultiStage);
/// assert_eq!(config.data_hazard_mode, DataHazardMode::Forwarding);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Core organization.
    #[serde(default)]
    pub vm_type: VmType,

    /// Enable per-cycle diagnostics to stderr (decode anomalies, faults).
    #[serde(default)]
    pub trace_instructions: bool,

    /// Data-hazard policy (multi-stage only).
    #[serde(default)]
    pub data_hazard_mode: DataHazardMode,

    /// Branch predictor variant.
    #[serde(default)]
    pub branch_predictor: PredictorKind,

    /// Branch resolution stage.
    #[serde(default)]
    pub branch_stage: BranchStage,

    /// Pause between ticks in debug-run mode, in milliseconds.
    #[serde(default = "Config::default_run_step_delay")]
    pub run_step_delay: u64,

    /// Addressable memory size in bytes.
    #[serde(default = "Config::default_memory_size")]
    pub memory_size: u64,

    /// Sparse memory allocation granule in bytes.
    #[serde(default = "Config::default_memory_block_size")]
    pub memory_block_size: u64,

    /// Start address of the text section; also the reset PC.
    #[serde(default = "Config::default_text_section_start")]
    pub text_section_start: u64,

    /// Start address of the data section.
    #[serde(default = "Config::default_data_section_start")]
    pub data_section_start: u64,

    /// Start address of the BSS section.
    #[serde(default = "Config::default_bss_section_start")]
    pub bss_section_start: u64,

    /// Accept M-extension encodings.
    #[serde(default = "Config::default_m_extension")]
    pub m_extension_enabled: bool,

    /// Accept F-extension opcodes (no execution support; rejection control only).
    #[serde(default)]
    pub f_extension_enabled: bool,

    /// Accept D-extension opcodes (no execution support; rejection control only).
    #[serde(default)]
    pub d_extension_enabled: bool,
}

impl Config {
    /// Returns the default debug-run step delay in milliseconds.
    fn default_run_step_delay() -> u64 {
        defaults::RUN_STEP_DELAY_MS
    }

    /// Returns the default memory size in bytes.
    fn default_memory_size() -> u64 {
        defaults::MEMORY_SIZE
    }

    /// Returns the default sparse allocation granule in bytes.
    fn default_memory_block_size() -> u64 {
        defaults::MEMORY_BLOCK_SIZE
    }

    /// Returns the default text section base.
    fn default_text_section_start() -> u64 {
        defaults::TEXT_SECTION_START
    }

    /// Returns the default data section base.
    fn default_data_section_start() -> u64 {
        defaults::DATA_SECTION_START
    }

    /// Returns the default BSS section base.
    fn default_bss_section_start() -> u64 {
        defaults::BSS_SECTION_START
    }

    /// M extension is accepted by default.
    fn default_m_extension() -> bool {
        true
    }

    /// Checks configuration combinations without mutating anything.
    ///
    /// Rejected combinations:
    /// - any `data_hazard_mode` other than `ideal` on the single-stage core;
    /// - a non-default `branch_predictor` or `branch_stage` on the single-stage core;
    /// - a non-default `branch_predictor` or `branch_stage` when
    ///   `data_hazard_mode` is `ideal`.
    pub fn validate(&self) -> Result<(), VmError> {
        if self.vm_type == VmType::SingleStage {
            if self.data_hazard_mode != DataHazardMode::Ideal {
                return Err(VmError::Config(
                    "data_hazard_mode cannot be set when vm_type is single_stage".into(),
                ));
            }
            if self.branch_predictor != PredictorKind::StaticNotTaken {
                return Err(VmError::Config(
                    "branch_predictor cannot be set when vm_type is single_stage".into(),
                ));
            }
            if self.branch_stage != BranchStage::Ex {
                return Err(VmError::Config(
                    "branch_stage cannot be set when vm_type is single_stage".into(),
                ));
            }
        }
        if self.data_hazard_mode == DataHazardMode::Ideal {
            if self.branch_predictor != PredictorKind::StaticNotTaken {
                return Err(VmError::Config(
                    "branch_predictor cannot be set when data_hazard_mode is ideal".into(),
                ));
            }
            if self.branch_stage != BranchStage::Ex {
                return Err(VmError::Config(
                    "branch_stage cannot be set when data_hazard_mode is ideal".into(),
                ));
            }
        }
        if self.memory_block_size == 0 {
            return Err(VmError::Config("memory_block_size must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vm_type: VmType::default(),
            trace_instructions: false,
            data_hazard_mode: DataHazardMode::default(),
            branch_predictor: PredictorKind::default(),
            branch_stage: BranchStage::default(),
            run_step_delay: defaults::RUN_STEP_DELAY_MS,
            memory_size: defaults::MEMORY_SIZE,
            memory_block_size: defaults::MEMORY_BLOCK_SIZE,
            text_section_start: defaults::TEXT_SECTION_START,
            data_section_start: defaults::DATA_SECTION_START,
            bss_section_start: defaults::BSS_SECTION_START,
            m_extension_enabled: true,
            f_extension_enabled: false,
            d_extension_enabled: false,
        }
    }
}
