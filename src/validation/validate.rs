//! Validation logic for CAM jobs.

use crate::command::resolve_layers;
use crate::config::{is_supported_device, SUPPORTED_DEVICES};
use crate::model::{CamJob, CamSection};
use crate::parser::BoardLayers;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a whole job.
pub fn validate_job(job: &CamJob, board: &BoardLayers) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if job.sections.is_empty() {
        result.add_error("The CAM job has no sections to run");
    }

    for tag in job.missing_sections() {
        result.add_warning(format!(
            "Section [{}] is declared in the job header but has no settings",
            tag
        ));
    }

    for section in &job.sections {
        result.merge(validate_section(section, board));
    }

    result
}

/// Validate a single section.
pub fn validate_section(section: &CamSection, board: &BoardLayers) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let device = section.device.text();

    if !is_supported_device(device) {
        result.add_warning(format!(
            "Device \"{}\" is not supported, and the generated command line may be missing parameters. Only {} are supported.",
            device,
            SUPPORTED_DEVICES
                .iter()
                .map(|d| format!("\"{}\"", d))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    for layer in resolve_layers(section, board).unknown {
        result.add_warning(format!(
            "Layer {} in the CAM tab named '{}' is not a layer listed in the board file",
            layer,
            section.display_name()
        ));
    }

    if section.layer_tokens().is_empty() {
        result.add_warning(format!(
            "Section '{}' lists no layers",
            section.display_name()
        ));
    }

    result
}
