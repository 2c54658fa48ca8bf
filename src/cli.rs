//! Command-line interface.
//!
//! Defines the CLI structure using clap derive macros and runs the selected
//! command against the library.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    ErrorPolicy, LineEndingMode, RepairOptions, RepairReport, check_lines, repair_file,
    repair_lines,
};

/// Validates and repairs the checksums of NMEA 0183 sentences.
#[derive(Parser, Debug)]
#[command(name = "nmea0183-checksum")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Treat `\r\n` as the line terminator instead of `\n`.
    #[arg(long, global = true)]
    pub crlf: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write every sentence of a log with a valid checksum.
    Repair(RepairArgs),

    /// Report sentences with a wrong checksum, without writing anything.
    Check(CheckArgs),
}

/// Arguments for the repair command.
#[derive(Args, Debug)]
pub struct RepairArgs {
    /// Log file to read sentences from.
    pub input: PathBuf,

    /// File to write repaired sentences to (default: stdout).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// What to do with lines that are not sentences.
    #[arg(long, value_enum, default_value = "abort")]
    pub on_error: OnError,
}

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Log file to read sentences from.
    pub input: PathBuf,
}

/// Handling of malformed lines, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Stop at the first malformed line
    Abort,
    /// Drop malformed lines and continue
    Skip,
    /// Copy malformed lines unchanged and continue
    PassThrough,
}

impl From<OnError> for ErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Abort => ErrorPolicy::Abort,
            OnError::Skip => ErrorPolicy::Skip,
            OnError::PassThrough => ErrorPolicy::PassThrough,
        }
    }
}

/// What a finished command has to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// One-line summary of the run
    pub summary: String,
    /// Whether the process should exit successfully
    pub success: bool,
}

impl Cli {
    fn line_ending(&self) -> LineEndingMode {
        if self.crlf {
            LineEndingMode::Crlf
        } else {
            LineEndingMode::Lf
        }
    }

    /// Initializes logging based on verbosity, honouring `RUST_LOG` when set.
    pub fn init_logging(&self) {
        let log_level = match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            _ => "trace",
        };

        // Ignored if a logger is already installed.
        let env = env_logger::Env::default().default_filter_or(log_level);
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .try_init();
    }
}

/// Executes the command selected on the command line.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, or if a repair run
/// aborts on a malformed line.
pub fn execute(cli: &Cli) -> Result<Outcome> {
    log::debug!("arguments: {cli:?}");

    match &cli.command {
        Commands::Repair(args) => {
            let options = RepairOptions::new(args.on_error.into(), cli.line_ending());
            let report = repair(args, options)?;

            Ok(Outcome {
                summary: report.to_string(),
                success: true,
            })
        }
        Commands::Check(args) => {
            let options = RepairOptions::new(ErrorPolicy::default(), cli.line_ending());
            let reader = open(&args.input)?;
            let report = check_lines(reader, options)
                .with_context(|| format!("failed to check {}", args.input.display()))?;

            Ok(Outcome {
                summary: report.to_string(),
                success: report.is_clean(),
            })
        }
    }
}

fn repair(args: &RepairArgs, options: RepairOptions) -> Result<RepairReport> {
    let report = match &args.output {
        Some(output) => repair_file(&args.input, output, options),
        None => {
            let reader = open(&args.input)?;
            repair_lines(reader, io::stdout().lock(), options)
        }
    };

    report.with_context(|| format!("failed to repair {}", args.input.display()))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    Ok(BufReader::new(file))
}
