// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fplx_core::{
    AircraftPerformance, BuiltinWriter, ExportConfig, ExportError, ExportFormat, ExportInput,
    ExportMetadata, ExportOutcome, ExportUi, FileRequest, Route, RouteExporter, RouteIssue,
    TrackPoint, ValidationChoice,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Export settings file
    #[arg(long, env = "FPLX_CONFIG")]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all export formats
    Formats,
    /// Export a route snapshot (JSON) to a simulator format
    Export(ExportArgs),
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Route snapshot in JSON
    #[arg(short, long)]
    route: PathBuf,

    /// Target format, see `fplx formats`
    #[arg(short, long)]
    format: ExportFormat,

    /// Output file, or a directory to use the proposed file name
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Export even if the route has no departure or destination airport
    #[arg(long)]
    save_anyway: bool,

    /// Also require a start position at the departure airport
    #[arg(long)]
    check_parking: bool,

    /// Aircraft track samples in JSON, written to GPX
    #[arg(long)]
    track: Option<PathBuf>,

    /// AIRAC cycle of the navdata, e.g. 2410
    #[arg(long, default_value = "")]
    cycle: String,

    #[arg(long)]
    aircraft: Option<String>,
    #[arg(long)]
    cruise_speed: Option<f32>,
    #[arg(long)]
    ground_speed: Option<f32>,
    /// Estimated enroute time in hours
    #[arg(long)]
    travel_time: Option<f32>,

    #[arg(long)]
    callsign: Option<String>,
    #[arg(long)]
    pilot: Option<String>,
    #[arg(long)]
    airline: Option<String>,
    #[arg(long)]
    livery: Option<String>,
    #[arg(long)]
    equipment: Option<String>,
    #[arg(long)]
    wake: Option<String>,
    #[arg(long)]
    transponder: Option<String>,
    /// Persons on board
    #[arg(long)]
    pob: Option<u32>,
    #[arg(long)]
    remarks: Option<String>,
}

/// Answers every dialog from the command line arguments.
struct CliUi<'a> {
    args: &'a ExportArgs,
}

impl ExportUi for CliUi<'_> {
    fn confirm_invalid_route(&mut self, issue: RouteIssue) -> ValidationChoice {
        eprintln!("Warning: {}", issue);
        if self.args.save_anyway {
            ValidationChoice::SaveAnyway
        } else {
            eprintln!("Use --save-anyway to export regardless.");
            ValidationChoice::Cancel
        }
    }

    fn edit_metadata(&mut self, _format: ExportFormat, metadata: &mut ExportMetadata) -> bool {
        let args = self.args;
        let overrides = [
            (&args.callsign, &mut metadata.callsign),
            (&args.pilot, &mut metadata.pilot_in_command),
            (&args.airline, &mut metadata.airline),
            (&args.livery, &mut metadata.livery),
            (&args.equipment, &mut metadata.equipment),
            (&args.wake, &mut metadata.wake_category),
            (&args.transponder, &mut metadata.transponder),
            (&args.remarks, &mut metadata.remarks),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
        if let Some(pob) = args.pob {
            metadata.passengers = pob;
        }
        true
    }

    fn choose_file(&mut self, request: &FileRequest) -> Option<PathBuf> {
        let output = &self.args.output;
        if !output.is_dir() {
            return Some(output.clone());
        }
        match &request.filename {
            Some(name) => Some(output.join(name)),
            None => {
                eprintln!("No file name to propose, give a file path with --output.");
                None
            }
        }
    }

    fn show_status(&mut self, message: &str) {
        println!("{}", message);
    }

    fn show_error(&mut self, error: &ExportError) {
        eprintln!("Error: {}", error);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("fplx")
        .build();
    // Only fails when a logger is already set.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn export(args: &ExportArgs, config_path: &Path) -> Result<bool> {
    let content = std::fs::read_to_string(&args.route)
        .with_context(|| format!("Failed to read {}", args.route.display()))?;
    let route = Route::from_json(&content)
        .with_context(|| format!("Failed to parse route {}", args.route.display()))?;

    let mut input = ExportInput::new(route);
    input.nav_cycle = args.cycle.clone();
    input.performance = AircraftPerformance {
        aircraft_type: args.aircraft.clone().unwrap_or_default(),
        cruise_speed_kts: args.cruise_speed.unwrap_or_default(),
        average_ground_speed_kts: args.ground_speed.unwrap_or_default(),
        travel_time_hours: args.travel_time.unwrap_or_default(),
    };
    if let Some(track) = &args.track {
        input.track = read_json::<Vec<TrackPoint>>(track)?;
    }

    let config = ExportConfig::load_from(config_path)?;
    let mut exporter = RouteExporter::new(CliUi { args }, BuiltinWriter, config)
        .with_parking_validation(args.check_parking);
    let outcome = exporter.export(args.format, &input);

    match outcome {
        ExportOutcome::Success { path, .. } => {
            log::info!("Wrote {}", path.display());
            if let Err(e) = exporter.into_config().save_to(config_path) {
                log::warn!("Could not save export settings: {:#}", e);
            }
            Ok(true)
        }
        ExportOutcome::Cancelled(reason) => {
            log::info!("Export cancelled: {:?}", reason);
            Ok(false)
        }
        ExportOutcome::Failed(_) => Ok(false),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Formats => {
            for format in ExportFormat::ALL {
                println!("{:<12} {}", format.name(), format.title(false));
            }
        }
        Commands::Export(args) => {
            let config_path = cli.config.clone().unwrap_or_else(ExportConfig::default_path);
            if !export(args, &config_path)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
