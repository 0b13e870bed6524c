use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use card_assets_core::{
    build_copy_plans, build_run_report, discover_files, execute_plans_with_callback,
    format_config_lines, format_discovery_line, format_status_line, format_summary_lines,
    write_run_report, RawConfig, RunConfig, DEFAULT_IMAGES_DIR, DEFAULT_MODELS_DIR,
    DEFAULT_SOURCE_DIR, DEFAULT_WORKERS,
};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "card-assets",
    version,
    about = "Copy card images and models into project assets, normalizing file names."
)]
struct Cli {
    /// Source directory containing the card files (not searched recursively).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SOURCE_DIR)]
    src: PathBuf,

    /// Project root used to resolve relative destinations (default: inferred from the current directory).
    #[arg(long, value_name = "PATH")]
    project_root: Option<PathBuf>,

    /// Images destination (relative to project root if not absolute).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,

    /// Models destination (relative to project root if not absolute).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MODELS_DIR)]
    models_dir: PathBuf,

    /// Number of concurrent copy workers (values below 1 use a single worker).
    #[arg(
        short = 't',
        long,
        value_name = "N",
        default_value_t = DEFAULT_WORKERS as i64,
        allow_negative_numbers = true
    )]
    threads: i64,

    /// Show what would be copied without writing files.
    #[arg(long)]
    dry_run: bool,

    /// Only print failed files, the configuration and the summary.
    #[arg(short, long)]
    quiet: bool,

    /// Optional JSON run report output file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

impl Cli {
    fn raw_config(&self) -> RawConfig {
        RawConfig {
            source: self.src.clone(),
            project_root: self.project_root.clone(),
            images_dir: self.images_dir.clone(),
            models_dir: self.models_dir.clone(),
            workers: usize::try_from(self.threads.max(1)).unwrap_or(usize::MAX),
            dry_run: self.dry_run,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Success,
    CopyErrors,
    InvalidSource,
}

impl RunStatus {
    fn exit_code(self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::CopyErrors => 1,
            RunStatus::InvalidSource => 2,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut stdout = io::stdout();
    match run(&cli, &mut stdout) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write + Send>(cli: &Cli, out: &mut W) -> Result<RunStatus> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    let config = RunConfig::resolve(cli.raw_config(), &cwd);
    debug!("resolved configuration: {config:?}");

    if let Err(err) = config.validate_source() {
        writeln!(out, "ERROR: {err}")?;
        return Ok(RunStatus::InvalidSource);
    }

    for line in format_config_lines(&config) {
        writeln!(out, "{line}")?;
    }

    let discovered = match discover_files(&config.source) {
        Ok(discovered) => discovered,
        Err(err) => {
            writeln!(out, "ERROR: {err:#}")?;
            return Ok(RunStatus::InvalidSource);
        }
    };
    writeln!(out, "{}", format_discovery_line(&discovered))?;

    let plans = build_copy_plans(&discovered, &config.destinations());
    if plans.is_empty() {
        writeln!(out, "Nothing to do.")?;
        return Ok(RunStatus::Success);
    }

    let quiet = cli.quiet;
    // Workers share the writer; the first write failure is kept and later lines are dropped.
    let sink: Mutex<(&mut W, io::Result<()>)> = Mutex::new((out, Ok(())));
    let output = execute_plans_with_callback(plans, &config.execute_options(), |result| {
        if quiet && !result.outcome.is_error() {
            return;
        }
        let mut guard = sink.lock().unwrap_or_else(PoisonError::into_inner);
        let (out, status) = &mut *guard;
        if status.is_ok() {
            *status = writeln!(out, "{}", format_status_line(result));
        }
    });
    let (out, status) = sink.into_inner().unwrap_or_else(PoisonError::into_inner);
    status.context("failed to write status line")?;

    writeln!(out)?;
    for line in format_summary_lines(&output.summary, config.dry_run) {
        writeln!(out, "{line}")?;
    }

    if let Some(report_path) = &cli.report {
        let report = build_run_report(&config, &discovered, &output.results, &output.summary);
        write_run_report(&report, report_path)?;
        writeln!(out, "Run report written to {}", report_path.display())?;
    }

    if output.summary.has_errors() {
        Ok(RunStatus::CopyErrors)
    } else {
        Ok(RunStatus::Success)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
