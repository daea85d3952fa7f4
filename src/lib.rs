//! cam2gerber - run EAGLE CAM jobs without the CAM Processor GUI.
//!
//! A `.cam` file describes a set of output files (extended Gerber, Excellon
//! drill) and which board layers go into each. This library reads the job,
//! checks it against the board's layer table and invokes the EAGLE
//! command-line tool once per output file.
//!
//! # Example
//!
//! ```no_run
//! use cam2gerber::{run_cam_file, ProcessRunner, RunConfig};
//! use std::path::Path;
//!
//! let config = RunConfig::new("schema.brd");
//! let report = run_cam_file(Path::new("gerb274x.cam"), &config, &mut ProcessRunner).unwrap();
//! println!("{}", report.summary());
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod validation;

// Re-exports for convenience
pub use command::{
    build_eagle_command, run_cam_job, CommandRunner, DryRunRunner, EagleCommand, JobReport,
    ProcessRunner, RunStatus,
};
pub use config::RunConfig;
pub use error::{CamError, Result};
pub use model::{CamJob, CamSection, CamValue};
pub use parser::{parse_cam_file, BoardLayers};
pub use validation::{validate_job, ValidationResult};

/// Run a CAM job file against the board named in `config`.
///
/// Parses the job, loads the board's layer table once and hands every
/// section to `runner`. Problems inside individual sections are collected in
/// the returned report; only unreadable inputs are errors.
pub fn run_cam_file(
    cam_path: &std::path::Path,
    config: &RunConfig,
    runner: &mut dyn CommandRunner,
) -> Result<JobReport> {
    let job = parse_cam_file(cam_path)?;
    tracing::info!(
        "Parsed {} section(s) from {}",
        job.sections.len(),
        cam_path.display()
    );
    if let Some(description) = &job.description {
        tracing::debug!("Job description: {}", description);
    }

    let board = BoardLayers::from_file(&config.board)?;

    Ok(run_cam_job(&job, &board, config, runner))
}
