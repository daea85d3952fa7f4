//! Data model types for CAM jobs.

mod job;
mod value;

pub use job::{CamJob, CamSection};
pub use value::CamValue;
