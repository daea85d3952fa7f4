//! Pre-run checks of a CAM job against its board.

mod validate;

pub use validate::{validate_job, validate_section, ValidationResult};
