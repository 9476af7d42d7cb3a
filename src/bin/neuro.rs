//! Neuro CLI - Command-line interface for the signature pipeline
//!
//! Commands:
//! - orchestrate: Analyze telemetry records from a file or stdin (batch mode)
//! - run: Analyze NDJSON telemetry from stdin line by line (streaming mode)
//! - defaults: Print the effective telemetry defaults
//! - doctor: Diagnose configuration

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use neuro_signature::types::AnalysisReport;
use neuro_signature::{
    ComputeError, Locale, OrchestrationService, OrchestratorConfig, RawTelemetry,
    TelemetryDefaults, PRODUCER_NAME, SIGNATURE_VERSION,
};

/// Neuro - cellular signature and cognitive risk scoring
#[derive(Parser)]
#[command(name = "neuro")]
#[command(version = SIGNATURE_VERSION)]
#[command(about = "Score wearable and cognitive telemetry into risk reports", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze telemetry records (batch mode)
    Orchestrate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// Telemetry defaults file (JSON, partial overrides allowed)
        #[arg(long)]
        defaults: Option<PathBuf>,

        /// Language of recommendation and alert text
        #[arg(long, default_value = "pt-br")]
        locale: LocaleArg,

        /// Override the user id of every record
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Analyze NDJSON telemetry from stdin (streaming mode)
    Run {
        /// Telemetry defaults file
        #[arg(long)]
        defaults: Option<PathBuf>,

        /// Language of recommendation and alert text
        #[arg(long, default_value = "pt-br")]
        locale: LocaleArg,

        /// Flush output after each record
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Print the effective telemetry defaults
    Defaults {
        /// Defaults file to merge over the documented values
        #[arg(long)]
        defaults: Option<PathBuf>,
    },

    /// Diagnose configuration
    Doctor {
        /// Check a defaults file
        #[arg(long)]
        defaults: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// A single JSON object or a JSON array of objects
    Json,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one report per line)
    Ndjson,
    /// JSON array of reports
    Json,
    /// Pretty-printed JSON array
    JsonPretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum LocaleArg {
    PtBr,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::PtBr => Locale::PtBr,
            LocaleArg::En => Locale::En,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

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

fn run(cli: Cli) -> Result<(), CliCommandError> {
    match cli.command {
        Commands::Orchestrate {
            input,
            output,
            input_format,
            output_format,
            defaults,
            locale,
            user_id,
        } => cmd_orchestrate(
            &input,
            &output,
            input_format,
            output_format,
            defaults.as_deref(),
            locale.into(),
            user_id,
        ),

        Commands::Run {
            defaults,
            locale,
            flush,
        } => cmd_run(defaults.as_deref(), locale.into(), flush),

        Commands::Defaults { defaults } => cmd_defaults(defaults.as_deref()),

        Commands::Doctor { defaults, json } => cmd_doctor(defaults.as_deref(), json),
    }
}

fn cmd_orchestrate(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    defaults: Option<&Path>,
    locale: Locale,
    user_id: Option<String>,
) -> Result<(), CliCommandError> {
    let input_data = read_input(input)?;

    let mut records = match input_format {
        InputFormat::Json => parse_json_records(&input_data)?,
        InputFormat::Ndjson => RawTelemetry::parse_ndjson(&input_data)?,
    };

    if records.is_empty() {
        return Err(CliCommandError::NoRecords);
    }

    if let Some(user_id) = user_id {
        for record in &mut records {
            record.user_id = Some(user_id.clone());
        }
    }

    let service = build_service(defaults, locale)?;
    info!("analyzing {} telemetry records", records.len());

    let reports: Vec<AnalysisReport> = records.iter().map(|raw| service.report(raw)).collect();
    let output_data = format_output(&reports, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_run(defaults: Option<&Path>, locale: Locale, flush: bool) -> Result<(), CliCommandError> {
    let service = build_service(defaults, locale)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut processed = 0usize;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let report_line = service.process_line(trimmed)?;
        writeln!(stdout, "{}", report_line)?;
        if flush {
            stdout.flush()?;
        }
        processed += 1;
    }

    stdout.flush()?;
    debug!("stream closed after {} records", processed);

    Ok(())
}

fn cmd_defaults(defaults: Option<&Path>) -> Result<(), CliCommandError> {
    let effective = load_defaults(defaults)?;
    println!("{}", effective.to_json()?);
    Ok(())
}

fn cmd_doctor(defaults: Option<&Path>, json: bool) -> Result<(), CliCommandError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} version {}", PRODUCER_NAME, SIGNATURE_VERSION),
    });

    if let Some(defaults_path) = defaults {
        if defaults_path.exists() {
            match fs::read_to_string(defaults_path) {
                Ok(content) => match TelemetryDefaults::from_json(&content) {
                    Ok(_) => checks.push(DoctorCheck {
                        name: "defaults".to_string(),
                        status: CheckStatus::Ok,
                        message: "Defaults file valid".to_string(),
                    }),
                    Err(e) => checks.push(DoctorCheck {
                        name: "defaults".to_string(),
                        status: CheckStatus::Error,
                        message: e.to_string(),
                    }),
                },
                Err(e) => checks.push(DoctorCheck {
                    name: "defaults".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Cannot read defaults file: {}", e),
                }),
            }
        } else {
            checks.push(DoctorCheck {
                name: "defaults".to_string(),
                status: CheckStatus::Warning,
                message: "Defaults file does not exist".to_string(),
            });
        }
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: SIGNATURE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Neuro Doctor Report");
        println!("===================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CliCommandError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, CliCommandError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_json_records(data: &str) -> Result<Vec<RawTelemetry>, CliCommandError> {
    if data.trim_start().starts_with('[') {
        Ok(RawTelemetry::parse_array(data)?)
    } else {
        Ok(vec![RawTelemetry::from_json(data)?])
    }
}

fn load_defaults(path: Option<&Path>) -> Result<TelemetryDefaults, CliCommandError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(TelemetryDefaults::from_json(&content)?)
        }
        None => Ok(TelemetryDefaults::default()),
    }
}

fn build_service(
    defaults: Option<&Path>,
    locale: Locale,
) -> Result<OrchestrationService, CliCommandError> {
    let config = OrchestratorConfig {
        defaults: load_defaults(defaults)?,
        locale,
    };
    debug!("locale={} defaults={:?}", config.locale.as_str(), config.defaults);
    Ok(OrchestrationService::with_config(config))
}

fn format_output(
    reports: &[AnalysisReport],
    format: &OutputFormat,
) -> Result<String, CliCommandError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports {
                lines.push(serde_json::to_string(report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(reports)? + "\n"),
    }
}

// Error types

#[derive(Debug)]
enum CliCommandError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    NoRecords,
    DoctorFailed,
}

impl From<io::Error> for CliCommandError {
    fn from(e: io::Error) -> Self {
        CliCommandError::Io(e)
    }
}

impl From<ComputeError> for CliCommandError {
    fn from(e: ComputeError) -> Self {
        CliCommandError::Compute(e)
    }
}

impl From<serde_json::Error> for CliCommandError {
    fn from(e: serde_json::Error) -> Self {
        CliCommandError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CliCommandError> for CliError {
    fn from(e: CliCommandError) -> Self {
        match e {
            CliCommandError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CliCommandError::Compute(ComputeError::InvalidConfig(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Run 'neuro defaults' to see the expected shape".to_string()),
            },
            CliCommandError::Compute(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure each record is a telemetry JSON object".to_string()),
            },
            CliCommandError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CliCommandError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No telemetry records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CliCommandError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
