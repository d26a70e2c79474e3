mod check;
mod output;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use output::OutputFormat;
use shellcheck_core::{ExternalLinter, Settings};
use shellcheck_core_process::{ShellcheckProcess, find_shellcheck_executables};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "shellcheck-annotate")]
#[command(
    about = "Run ShellCheck and map its findings onto exact character ranges",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to a JSON settings file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// ShellCheck executable to run (overrides the settings file)
    #[arg(long, value_name = "PATH", global = true)]
    shellcheck: Option<PathBuf>,

    /// Highlight from the first non-blank character to the end of the line
    #[arg(long, global = true)]
    whole_line: bool,

    /// Report ShellCheck errors as warnings
    #[arg(long, global = true)]
    errors_as_warnings: bool,

    /// Per-file time limit in seconds
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Log to stderr (-v debug, -vv trace); `RUST_LOG` is used otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check shell scripts and print their annotations
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Check every given file, not only `.sh` / `.bash` ones
        #[arg(long)]
        all_files: bool,
    },

    /// Print the version of the configured ShellCheck executable
    Version,

    /// List ShellCheck executables found on PATH
    Find,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(&cli)?;

    match &cli.command {
        Commands::Check {
            files,
            format,
            all_files,
        } => check::run(&settings, files, *format, *all_files),
        Commands::Version => {
            let version = ShellcheckProcess::from_settings(&settings).version()?;
            if version.is_empty() {
                println!("n.a.");
            } else {
                println!("{version}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Find => {
            let found = find_shellcheck_executables();
            if found.is_empty() {
                eprintln!("no shellcheck executable found on PATH");
                return Ok(ExitCode::FAILURE);
            }
            for path in found {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Settings file values, overridden by command-line flags.
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(executable) = &cli.shellcheck {
        settings.shellcheck_executable = executable.display().to_string();
    }
    if cli.whole_line {
        settings.highlight_whole_line = true;
    }
    if cli.errors_as_warnings {
        settings.treat_all_issues_as_warnings = true;
    }
    if let Some(secs) = cli.timeout {
        settings.timeout_secs = secs;
    }

    tracing::debug!(?settings, "resolved settings");
    Ok(settings)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        1 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
