//! EAGLE command building and dispatch.

mod builder;
mod dispatch;
mod runner;

pub use builder::{
    build_eagle_command, flag_args, output_name, parse_offset, resolve_layers, EagleCommand,
    LayerSelection,
};
pub use dispatch::{run_cam_job, JobReport, SectionOutcome};
pub use runner::{CommandRunner, DryRunRunner, ProcessRunner, RunStatus};
