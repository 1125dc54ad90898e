//! Configuration tests.

use rvcycle_core::config::{BranchStage, Config, DataHazardMode, PredictorKind, VmType};
use rvcycle_core::VmError;

#[test]
fn defaults_are_single_stage_ideal() {
    let config = Config::default();
    assert_eq!(config.vm_type, VmType::SingleStage);
    assert_eq!(config.data_hazard_mode, DataHazardMode::Ideal);
    assert_eq!(config.branch_predictor, PredictorKind::StaticNotTaken);
    assert_eq!(config.branch_stage, BranchStage::Ex);
    assert!(config.m_extension_enabled);
    assert!(!config.f_extension_enabled);
    assert!(!config.d_extension_enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn deserializes_from_json() {
    let json = r#"{
        "vm_type": "multi_stage",
        "data_hazard_mode": "stall",
        "branch_predictor": "dynamic_1bit",
        "branch_stage": "id",
        "run_step_delay": 10,
        "text_section_start": 0
    }"#;
    let config: Config = serde_json::from_str(json).expect("json parses");
    assert_eq!(config.vm_type, VmType::MultiStage);
    assert_eq!(config.data_hazard_mode, DataHazardMode::Stall);
    assert_eq!(config.branch_predictor, PredictorKind::Dynamic1Bit);
    assert_eq!(config.branch_stage, BranchStage::Id);
    assert_eq!(config.run_step_delay, 10);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_json_uses_defaults() {
    let config: Config = serde_json::from_str("{}").expect("json parses");
    assert_eq!(config.vm_type, VmType::SingleStage);
    assert_eq!(config.run_step_delay, 300);
}

fn expect_config_error(config: Config) {
    match config.validate() {
        Err(VmError::Config(_)) => {}
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

#[test]
fn hazard_mode_rejected_on_single_stage() {
    expect_config_error(Config {
        data_hazard_mode: DataHazardMode::Forwarding,
        ..Config::default()
    });
}

#[test]
fn predictor_rejected_on_single_stage() {
    expect_config_error(Config {
        branch_predictor: PredictorKind::Dynamic2Bit,
        ..Config::default()
    });
}

#[test]
fn predictor_rejected_in_ideal_mode() {
    expect_config_error(Config {
        vm_type: VmType::MultiStage,
        data_hazard_mode: DataHazardMode::Ideal,
        branch_predictor: PredictorKind::StaticTaken,
        ..Config::default()
    });
}

#[test]
fn branch_stage_rejected_in_ideal_mode() {
    expect_config_error(Config {
        vm_type: VmType::MultiStage,
        data_hazard_mode: DataHazardMode::Ideal,
        branch_stage: BranchStage::Id,
        ..Config::default()
    });
}

#[test]
fn id_resolution_is_supported_with_stall_and_forwarding() {
    for mode in [DataHazardMode::Stall, DataHazardMode::Forwarding] {
        let config = Config {
            vm_type: VmType::MultiStage,
            data_hazard_mode: mode,
            branch_predictor: PredictorKind::Dynamic2Bit,
            branch_stage: BranchStage::Id,
            ..Config::default()
        };
        assert!(config.validate().is_ok(), "mode {:?}", mode);
    }
}

#[test]
fn zero_block_size_is_rejected() {
    expect_config_error(Config {
        memory_block_size: 0,
        ..Config::default()
    });
}
