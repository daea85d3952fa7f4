//! CAM job and board file parsers.

mod board;
mod cam;
mod values;

pub use board::BoardLayers;
pub use cam::{parse_cam_file, CamParser};
pub use values::*;
