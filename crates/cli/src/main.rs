//! rvcycle simulator CLI.
//!
//! Loads an assembled memory image and runs it on the configured core. It
//! performs:
//! 1. **Configuration:** JSON config file, overridable per-flag.
//! 2. **Execution:** free run, or debug run with breakpoints and pacing.
//! 3. **Reporting:** statistics table and an optional JSON state snapshot.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use rvcycle_core::config::{BranchStage, Config, DataHazardMode, PredictorKind, VmType};
use rvcycle_core::{Simulator, VmError};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VmTypeArg {
    SingleStage,
    MultiStage,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HazardModeArg {
    Ideal,
    Stall,
    Forwarding,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PredictorArg {
    StaticNotTaken,
    StaticTaken,
    Dynamic1bit,
    Dynamic2bit,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BranchStageArg {
    Ex,
    Id,
}

#[derive(Parser, Debug)]
#[command(
    name = "rvcycle",
    author,
    version,
    about = "Cycle-accurate RV64I/M simulator",
    long_about = "Run an assembled memory image on a single-cycle or five-stage \
                  pipelined RV64 core.\n\nExamples:\n  \
                  rvcycle program.mem\n  \
                  rvcycle program.mem --vm-type multi-stage --hazard-mode forwarding\n  \
                  rvcycle program.mem --config sim.json --snapshot"
)]
struct Cli {
    /// Memory image to load (text records: B/H/W/D/P).
    image: PathBuf,

    /// JSON configuration file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Core organization.
    #[arg(long)]
    vm_type: Option<VmTypeArg>,

    /// Data-hazard policy (multi-stage only).
    #[arg(long)]
    hazard_mode: Option<HazardModeArg>,

    /// Branch predictor variant.
    #[arg(long)]
    predictor: Option<PredictorArg>,

    /// Branch resolution stage.
    #[arg(long)]
    branch_stage: Option<BranchStageArg>,

    /// Debug run: honor breakpoints and the per-step delay.
    #[arg(long)]
    debug: bool,

    /// Breakpoint PCs for --debug (hex accepted with 0x prefix).
    #[arg(long, value_parser = parse_pc)]
    breakpoint: Vec<u64>,

    /// Per-step delay in milliseconds for --debug (overrides config).
    #[arg(long)]
    step_delay: Option<u64>,

    /// Trace decode anomalies and faults to stderr.
    #[arg(long)]
    trace: bool,

    /// Print the final machine state as JSON.
    #[arg(long)]
    snapshot: bool,
}

fn parse_pc(raw: &str) -> Result<u64, String> {
    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"));
    match digits {
        Some(d) => u64::from_str_radix(d, 16),
        None => raw.parse(),
    }
    .map_err(|_| format!("invalid PC {:?}", raw))
}

fn build_config(cli: &Cli) -> Result<Config, VmError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| VmError::Io(e.to_string()))?;
            serde_json::from_str(&text).map_err(|e| VmError::Config(e.to_string()))?
        }
        None => Config::default(),
    };

    if let Some(vm_type) = cli.vm_type {
        config.vm_type = match vm_type {
            VmTypeArg::SingleStage => VmType::SingleStage,
            VmTypeArg::MultiStage => VmType::MultiStage,
        };
    }
    if let Some(mode) = cli.hazard_mode {
        config.data_hazard_mode = match mode {
            HazardModeArg::Ideal => DataHazardMode::Ideal,
            HazardModeArg::Stall => DataHazardMode::Stall,
            HazardModeArg::Forwarding => DataHazardMode::Forwarding,
        };
    }
    if let Some(predictor) = cli.predictor {
        config.branch_predictor = match predictor {
            PredictorArg::StaticNotTaken => PredictorKind::StaticNotTaken,
            PredictorArg::StaticTaken => PredictorKind::StaticTaken,
            PredictorArg::Dynamic1bit => PredictorKind::Dynamic1Bit,
            PredictorArg::Dynamic2bit => PredictorKind::Dynamic2Bit,
        };
    }
    if let Some(stage) = cli.branch_stage {
        config.branch_stage = match stage {
            BranchStageArg::Ex => BranchStage::Ex,
            BranchStageArg::Id => BranchStage::Id,
        };
    }
    if let Some(delay) = cli.step_delay {
        config.run_step_delay = delay;
    }
    if cli.trace {
        config.trace_instructions = true;
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("rvcycle: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), VmError> {
    let config = build_config(cli)?;
    let mut sim = Simulator::new(config)?;
    sim.load_image(&cli.image)?;

    for pc in &cli.breakpoint {
        sim.add_breakpoint(*pc);
    }

    let status = if cli.debug { sim.debug_run() } else { sim.run() };
    println!("Finished with status {:?}", status);

    sim.stats().print();

    if cli.snapshot {
        let snapshot = sim.snapshot();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("rvcycle: snapshot serialization failed: {}", e),
        }
    }
    Ok(())
}
