//! moveit-merge CLI

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::style::Stylize;
use cli::{RunOptions, run_consolidate};
use moveit_merge::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moveit-merge")]
#[command(about = "Merge several git repositories into one, each under its own subdirectory")]
#[command(version)]
struct Cli {
    /// Working directory for the scratch clone and the merged repository
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Directory holding README.md, .gitignore and per-distro subdirectories
    #[arg(short, long)]
    template_dir: Option<PathBuf>,

    /// Use flags understood by git older than 2.9
    #[arg(long)]
    legacy_git: bool,

    /// Show the plan without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Ask before removing directories left over from a previous run
    #[arg(long)]
    confirm: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = RunOptions {
        template_dir: cli.template_dir,
        legacy_git: cli.legacy_git,
        dry_run: cli.dry_run,
        confirm: cli.confirm,
    };

    match run_consolidate(&cli.path, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".error());
            let code = e.downcast_ref::<Error>().map_or(1, Error::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
