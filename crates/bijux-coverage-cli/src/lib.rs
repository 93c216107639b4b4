#![forbid(unsafe_code)]

mod helpers;
mod logging;

use bijux_coverage_core::{
    env_bool, resolve_catalog_path, sha256_hex, ExitCode, MachineError, ENV_BIJUX_LOG_JSON,
};
use bijux_coverage_ingest::{
    aggregate_recorded_raw_data, AggregateOptions, CatalogError, IngestError, JsonServiceCatalog,
};
use bijux_coverage_model::Arch;
use bijux_coverage_report::{report_paths, write_json, write_markdown_report, RenderError};
use clap::{error::ErrorKind, Parser, ValueEnum};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing::info;

const USAGE: &str = "usage: bijux-coverage <dir-to-raw-csv-metric> [amd64|arm64]";

#[derive(Parser)]
#[command(name = "bijux-coverage")]
#[command(version)]
#[command(about = "Aggregate raw integration-test metrics into API coverage reports")]
#[command(
    after_help = "Environment:\n  BIJUX_COVERAGE_CATALOG   Service catalog JSON path\n  BIJUX_LOG_LEVEL          Log filter (default: info)\n  BIJUX_LOG_JSON           Emit JSON log lines"
)]
struct Cli {
    /// Directory searched recursively for metric-report-raw-data-*.csv files.
    base_dir: PathBuf,
    /// Only aggregate files whose path contains this architecture.
    #[arg(value_enum)]
    arch: Option<ArchCli>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ArchCli {
    Amd64,
    Arm64,
}

impl From<ArchCli> for Arch {
    fn from(value: ArchCli) -> Self {
        match value {
            ArchCli::Amd64 => Arch::Amd64,
            ArchCli::Arm64 => Arch::Arm64,
        }
    }
}

#[derive(Debug)]
struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }

    fn dependency(message: String) -> Self {
        Self {
            exit_code: ExitCode::DependencyFailure,
            machine: MachineError::new("dependency_failure", &message),
        }
    }

    fn validation(message: String) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new("validation_error", &message),
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self::dependency(err.to_string())
    }
}

impl From<IngestError> for CliError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Io { .. } => Self::internal(err.to_string()),
            other => Self::validation(other.to_string()),
        }
    }
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::EmptyService(_) => Self::validation(err.to_string()),
            other => Self::internal(other.to_string()),
        }
    }
}

pub fn main_entry() -> ProcessExitCode {
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, env_bool(ENV_BIJUX_LOG_JSON, false));
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn print_usage() {
    println!("missing argument: directory");
    println!("{USAGE}");
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                print_usage();
                return Ok(());
            }
        },
    };
    if !cli.base_dir.is_dir() {
        print_usage();
        return Ok(());
    }

    logging::init_tracing();
    let arch = cli.arch.map(Arch::from);
    if let Some(arch) = arch {
        info!(
            arch = %arch,
            "set target, aggregating only matching test results; raw collection keeps all files"
        );
    }
    run_aggregate(cli.base_dir, arch)
}

fn run_aggregate(base_dir: PathBuf, arch: Option<Arch>) -> Result<(), CliError> {
    let resolved = resolve_catalog_path(&base_dir).ok_or_else(|| {
        CliError::dependency(format!(
            "service catalog not found: set BIJUX_COVERAGE_CATALOG or place service-catalog.json in {}",
            base_dir.display()
        ))
    })?;
    info!(
        path = %resolved.path.display(),
        source = resolved.source.as_str(),
        "loading service catalog"
    );
    let catalog = JsonServiceCatalog::from_path(&resolved.path)?;

    let paths = report_paths(&base_dir, &helpers::utc_run_stamp(), arch);
    fs::create_dir_all(&paths.metrics_dir).map_err(|e| {
        CliError::internal(format!("{}: {e}", paths.metrics_dir.display()))
    })?;

    let outcome = aggregate_recorded_raw_data(
        &catalog,
        &AggregateOptions {
            base_dir,
            arch_filter: arch,
            raw_collection: Some(paths.raw_collection.clone()),
        },
    )?;

    let json_text = write_json(&paths.json, &outcome.report)?;
    write_markdown_report(&paths.markdown, &outcome.report)?;

    helpers::emit_ok(&json!({
        "command": "aggregate",
        "status": "ok",
        "arch": arch.map(Arch::as_str),
        "catalog": resolved.path.display().to_string(),
        "raw_collection": paths.raw_collection.display().to_string(),
        "json_report": paths.json.display().to_string(),
        "markdown_report": paths.markdown.display().to_string(),
        "json_report_sha256": sha256_hex(json_text.as_bytes()),
        "services": outcome.report.len(),
        "skipped_services": outcome.skipped_services,
        "stats": outcome.stats,
    }))
    .map_err(CliError::internal)
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
