//! Running every section of a CAM job in order.

use crate::config::RunConfig;
use crate::model::CamJob;
use crate::parser::BoardLayers;
use crate::validation::validate_job;
use tracing::{error, info, warn};

use super::{build_eagle_command, CommandRunner, EagleCommand, RunStatus};

/// What happened to one section.
#[derive(Debug, Clone)]
pub struct SectionOutcome {
    pub tag: String,
    pub name: String,
    /// `None` when the command could not be built.
    pub command: Option<EagleCommand>,
    /// `None` when the command was not run.
    pub status: Option<RunStatus>,
}

/// Summary of a whole CAM job run.
#[derive(Debug, Default)]
pub struct JobReport {
    pub outcomes: Vec<SectionOutcome>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl JobReport {
    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    fn error(&mut self, message: String) {
        error!("{}", message);
        self.errors.push(message);
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// True when the run produced no warnings and no errors.
    pub fn success(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "CAM job completed with {} warnings and {} errors",
            self.warning_count(),
            self.error_count()
        )
    }
}

/// Validate a job, then build and run one command per section.
///
/// Sections run one after another; a failing section is recorded and the
/// next one still runs.
pub fn run_cam_job(
    job: &CamJob,
    board: &BoardLayers,
    config: &RunConfig,
    runner: &mut dyn CommandRunner,
) -> JobReport {
    let mut report = JobReport::default();

    let validation = validate_job(job, board);
    for message in validation.warnings {
        report.warn(message);
    }
    for message in validation.errors {
        report.error(message);
    }

    for section in &job.sections {
        let mut outcome = SectionOutcome {
            tag: section.tag.clone(),
            name: section.display_name().to_string(),
            command: None,
            status: None,
        };

        let command = match build_eagle_command(section, board, config) {
            Ok(command) => command,
            Err(e) => {
                report.error(format!("Section '{}': {}", outcome.name, e));
                report.outcomes.push(outcome);
                continue;
            }
        };

        info!("{}", command);
        match runner.run(&command) {
            Ok(status) => {
                info!("return code: {}", status);
                if !status.success() {
                    report.warn(format!(
                        "EAGLE return code = {} for section '{}'",
                        status, outcome.name
                    ));
                }
                outcome.status = Some(status);
            }
            Err(e) => report.error(format!("Section '{}': {}", outcome.name, e)),
        }

        outcome.command = Some(command);
        report.outcomes.push(outcome);
    }

    report
}
