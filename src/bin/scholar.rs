//! Scholar CLI - Command-line interface for Scholar Focus
//!
//! Commands:
//! - report: Compute the dashboard report from exported session documents
//! - validate: List records the normalizer would have to default
//! - level: Show the scholar level for a number of focus hours
//! - config: Write a default configuration file

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scholar_focus::schema::{RawFocusSession, SessionAdapter};
use scholar_focus::types::FocusReport;
use scholar_focus::{
    level_progress, reconcile_stored_level, ComputeError, FocusConfig, FocusProcessor,
    SCHOLAR_VERSION,
};

/// Scholar - Focus-session aggregation and level progression
#[derive(Parser)]
#[command(name = "scholar")]
#[command(version = SCHOLAR_VERSION)]
#[command(about = "Turn focus-session exports into dashboard values", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute daily goal, weekly trend, level and lifetime stats
    Report {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Daily target in hours (overrides the configuration file)
        #[arg(long)]
        target_hours: Option<f64>,

        /// UTC offset for day/week boundaries, e.g. "+02:00"
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<String>,

        /// Reference instant (RFC3339); defaults to now
        #[arg(long)]
        now: Option<String>,
    },

    /// List records with missing or invalid fields
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the level for cumulative focus hours
    Level {
        /// Cumulative completed focus hours
        #[arg(long, allow_hyphen_values = true)]
        hours: f64,

        /// Level currently stored on the profile, to check for staleness
        #[arg(long)]
        stored: Option<u8>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration files
    Config {
        /// Write a default configuration to this path
        #[arg(long)]
        init: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one session document per line)
    Ndjson,
    /// JSON array of session documents
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ScholarCliError> {
    match cli.command {
        Commands::Report {
            input,
            input_format,
            output_format,
            config,
            target_hours,
            utc_offset,
            now,
        } => {
            let config = build_config(config.as_deref(), target_hours, utc_offset)?;
            cmd_report(&input, input_format, output_format, config, now.as_deref())
        }

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Level {
            hours,
            stored,
            json,
        } => cmd_level(hours, stored, json),

        Commands::Config { init } => cmd_config_init(&init),
    }
}

fn build_config(
    path: Option<&Path>,
    target_hours: Option<f64>,
    utc_offset: Option<String>,
) -> Result<FocusConfig, ScholarCliError> {
    let mut config = match path {
        Some(path) => FocusConfig::load(path)?,
        None => FocusConfig::default(),
    };
    if let Some(hours) = target_hours {
        config = config.with_target_hours(hours);
    }
    if let Some(offset) = utc_offset {
        config = config.with_utc_offset(offset);
    }
    Ok(config)
}

fn cmd_report(
    input: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: FocusConfig,
    now: Option<&str>,
) -> Result<(), ScholarCliError> {
    let now = match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| ComputeError::InvalidTimestamp(format!("--now {raw:?}: {e}")))?,
        None => Utc::now(),
    };

    let sessions = read_sessions(input, &input_format)?;
    info!(records = sessions.len(), "loaded focus sessions");

    let processor = FocusProcessor::new(config)?;
    let report = processor.process_sessions(&sessions, now);

    println!("{}", format_output(&report, &output_format)?);
    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), ScholarCliError> {
    let sessions = read_sessions(input, &input_format)?;
    let results = SessionAdapter::validate_sessions(&sessions);

    let report = ValidationReport {
        total_records: sessions.len(),
        clean_records: sessions.len() - results.len(),
        defaulted_records: results.len(),
        issues: results
            .iter()
            .map(|r| ValidationIssueDetail {
                index: r.index,
                session_id: r.session_id.clone(),
                flags: r.flags.iter().map(|f| f.as_str().to_string()).collect(),
                message: r.describe(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:     {}", report.total_records);
        println!("Clean records:     {}", report.clean_records);
        println!("Defaulted records: {}", report.defaulted_records);

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!(
                    "  - Session {} (index {}): {}",
                    issue.session_id.as_deref().unwrap_or("unknown"),
                    issue.index,
                    issue.message
                );
            }
        }
    }

    if report.defaulted_records > 0 {
        Err(ScholarCliError::ValidationFailed(report.defaulted_records))
    } else {
        Ok(())
    }
}

fn cmd_level(hours: f64, stored: Option<u8>, json: bool) -> Result<(), ScholarCliError> {
    let progress = level_progress(hours);
    let check = stored.map(|level| reconcile_stored_level(Some(level), hours));

    if json {
        let value = serde_json::json!({
            "level": progress,
            "storedLevel": check,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Level {}: {}", progress.level, progress.title);
    match progress.hours_to_next_level {
        Some(remaining) => println!(
            "{}% through this level, {:.1}h to the next",
            progress.progress_percent, remaining
        ),
        None => println!("Top level reached"),
    }
    if let Some(check) = check {
        if check.needs_update {
            println!(
                "Stored level {} is stale; derived level is {}",
                check.stored.unwrap_or(0),
                check.derived
            );
        }
    }
    Ok(())
}

fn cmd_config_init(path: &Path) -> Result<(), ScholarCliError> {
    if path.exists() {
        return Err(ScholarCliError::ConfigExists(path.display().to_string()));
    }
    fs::write(path, FocusConfig::default().to_json()?)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

// Helper functions

fn read_sessions(
    input: &Path,
    input_format: &InputFormat,
) -> Result<Vec<RawFocusSession>, ScholarCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let sessions = match input_format {
        InputFormat::Ndjson => SessionAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => SessionAdapter::parse_array(&input_data)?,
    };
    Ok(sessions)
}

fn format_output(report: &FocusReport, format: &OutputFormat) -> Result<String, ScholarCliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(report)?),
    }
}

// Error types

#[derive(Debug)]
enum ScholarCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    ConfigExists(String),
}

impl From<io::Error> for ScholarCliError {
    fn from(e: io::Error) -> Self {
        ScholarCliError::Io(e)
    }
}

impl From<ComputeError> for ScholarCliError {
    fn from(e: ComputeError) -> Self {
        ScholarCliError::Compute(e)
    }
}

impl From<serde_json::Error> for ScholarCliError {
    fn from(e: serde_json::Error) -> Self {
        ScholarCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<ScholarCliError> for CliError {
    fn from(e: ScholarCliError) -> Self {
        match e {
            ScholarCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            ScholarCliError::Compute(e) => {
                let hint = match &e {
                    ComputeError::InvalidConfig(_) => "Check dailyTargetHours and utcOffset",
                    ComputeError::InvalidTimestamp(_) => "Use an RFC3339 timestamp with offset",
                    _ => "Ensure input is an array (or NDJSON) of focus-session documents",
                };
                CliError {
                    code: "COMPUTE_ERROR".to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            ScholarCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            ScholarCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records would be defaulted", count),
                hint: Some("Fix the listed fields in the source documents".to_string()),
            },
            ScholarCliError::ConfigExists(path) => CliError {
                code: "CONFIG_EXISTS".to_string(),
                message: format!("{} already exists", path),
                hint: Some("Remove the file or choose another path".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    clean_records: usize,
    defaulted_records: usize,
    issues: Vec<ValidationIssueDetail>,
}

#[derive(serde::Serialize)]
struct ValidationIssueDetail {
    index: usize,
    session_id: Option<String>,
    flags: Vec<String>,
    message: String,
}
