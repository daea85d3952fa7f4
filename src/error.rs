//! Error types for CAM job processing.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for CAM job processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// General parse error (-3)
    ParseError = -3,
    /// First section is not [CAM Processor Job] (-11)
    NotACamJob = -11,
    /// Job header declares no sections (-12)
    NoSections = -12,
    /// Generator could not be started (E300)
    SpawnFailed = 300,
}

/// Main error type for the CAM runner.
#[derive(Debug, Error)]
pub enum CamError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Not a CAM processor job: expected [CAM Processor Job], found '{found}'")]
    NotACamJob { found: String },

    #[error("No sections found in the CAM file")]
    NoSections,

    #[error("Section [{section}] at line {line} is not declared in the job header")]
    UndeclaredSection { line: usize, section: String },

    #[error("Missing required field '{field}' in section [{section}]")]
    MissingField { section: String, field: String },

    #[error("Invalid value for '{field}': expected {expected}, got '{value}'")]
    InvalidValue {
        field: String,
        expected: String,
        value: String,
    },

    #[error("Failed to start '{program}': {source}")]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CamError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CamError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CamError::EmptyFile { .. } => ErrorCode::EmptyFile,
            CamError::NotACamJob { .. } => ErrorCode::NotACamJob,
            CamError::NoSections => ErrorCode::NoSections,
            CamError::UndeclaredSection { .. } => ErrorCode::ParseError,
            CamError::MissingField { .. } => ErrorCode::ParseError,
            CamError::InvalidValue { .. } => ErrorCode::ParseError,
            CamError::SpawnFailed { .. } => ErrorCode::SpawnFailed,
            CamError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    pub(crate) fn invalid(
        field: impl Into<String>,
        expected: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        CamError::InvalidValue {
            field: field.into(),
            expected: expected.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for CAM job operations.
pub type Result<T> = std::result::Result<T, CamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_codes() {
        assert_eq!(CamError::NoSections.code_value(), -12);
        let err = CamError::MissingField {
            section: "Sec_1".into(),
            field: "Device".into(),
        };
        assert_eq!(err.code(), ErrorCode::ParseError);
        assert_eq!(
            err.to_string(),
            "Missing required field 'Device' in section [Sec_1]"
        );
    }
}
