//! cam2gerber - CLI tool to run EAGLE CAM jobs from the command line.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cam2gerber::config::{DEFAULT_BOARD_PATH, DEFAULT_EAGLE_PATH};
use cam2gerber::{
    parse_cam_file, run_cam_file, CommandRunner, DryRunRunner, ProcessRunner, RunConfig,
};

/// Produce Gerber and Excellon files from an EAGLE CAM job without the GUI.
#[derive(Parser, Debug)]
#[command(name = "cam2gerber")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CAM job file (.cam)
    #[arg(short, long)]
    cam: PathBuf,

    /// Board file (.brd)
    #[arg(short, long, default_value = DEFAULT_BOARD_PATH)]
    board: PathBuf,

    /// EAGLE command-line executable
    #[arg(short, long, env = "EAGLECON", default_value = DEFAULT_EAGLE_PATH)]
    eagle: PathBuf,

    /// Print the commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Output the parsed job as JSON and exit
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Debug output
    if args.debug {
        let job = parse_cam_file(&args.cam)
            .with_context(|| format!("Failed to parse {}", args.cam.display()))?;
        let json = serde_json::to_string_pretty(&job)?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    if !args.board.exists() {
        anyhow::bail!(
            "The board file path \"{}\" does not exist",
            args.board.display()
        );
    }

    let config = RunConfig {
        eagle: args.eagle,
        board: args.board,
        dry_run: args.dry_run,
    };

    if !config.dry_run && !config.eagle_is_bare_name() && !config.eagle.exists() {
        anyhow::bail!(
            "The file \"{}\" does not exist. Please specify the EAGLE executable with --eagle",
            config.eagle.display()
        );
    }

    info!("Processing: {}", args.cam.display());

    let mut process = ProcessRunner;
    let mut dry = DryRunRunner::default();
    let runner: &mut dyn CommandRunner = if config.dry_run {
        &mut dry
    } else {
        &mut process
    };

    let report = run_cam_file(&args.cam, &config, runner)
        .with_context(|| format!("CAM job {} did not run", args.cam.display()))?;

    info!("{}", report.summary());

    if report.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
