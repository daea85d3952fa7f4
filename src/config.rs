//! Configuration constants and settings for the CAM runner.

use std::path::PathBuf;

/// Tag of the first section of every CAM job file.
pub const JOB_HEADER_TAG: &str = "CAM Processor Job";

/// Default location of the EAGLE command-line executable.
#[cfg(windows)]
pub const DEFAULT_EAGLE_PATH: &str = r"C:\Program Files (x86)\EAGLE-6.5.0\bin\eaglecon.exe";

/// Default location of the EAGLE command-line executable.
#[cfg(not(windows))]
pub const DEFAULT_EAGLE_PATH: &str = "eaglecon";

/// Default board file when none is given.
pub const DEFAULT_BOARD_PATH: &str = "./schema.brd";

/// Output devices the command builder knows how to parameterize.
pub const SUPPORTED_DEVICES: [&str; 3] = ["EXCELLON", "GERBER_RS274X", "GERBER_RS274X_25"];

/// CAM processor option letters, in `Flags=` order.
///
/// m: mirror, r: rotate 90, u: rotate 180, c: positive coordinates,
/// q: quick plot, O: optimize pen movement, f: fill pads.
pub const FLAG_LETTERS: [char; 7] = ['m', 'r', 'u', 'c', 'q', 'O', 'f'];

/// Default state of each option in [`FLAG_LETTERS`].
pub const FLAG_DEFAULTS: [bool; 7] = [false, false, false, true, false, true, true];

/// Language preferred when resolving localized values.
pub const PREFERRED_LANGUAGE: &str = "en";

/// Check whether a device name is one the builder supports.
pub fn is_supported_device(device: &str) -> bool {
    SUPPORTED_DEVICES.contains(&device)
}

/// Linear unit used in CAM offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Mil,
    Millimeters,
    Centimeters,
    Inches,
}

impl Unit {
    /// Parse a unit suffix such as `mil` or `mm`.
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s.trim() {
            "mil" => Some(Unit::Mil),
            "mm" => Some(Unit::Millimeters),
            "cm" => Some(Unit::Centimeters),
            "inch" => Some(Unit::Inches),
            _ => None,
        }
    }

    /// Number of this unit in one inch.
    pub fn per_inch(&self) -> f64 {
        match self {
            Unit::Mil => 1000.0,
            Unit::Millimeters => 25.4,
            Unit::Centimeters => 2.54,
            Unit::Inches => 1.0,
        }
    }

    /// Convert a value in this unit to inches.
    pub fn to_inches(&self, value: f64) -> f64 {
        value / self.per_inch()
    }
}

/// Settings for one CAM job run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// EAGLE command-line executable.
    pub eagle: PathBuf,
    /// Board file the outputs are generated from.
    pub board: PathBuf,
    /// Log commands without executing them.
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            eagle: PathBuf::from(DEFAULT_EAGLE_PATH),
            board: PathBuf::from(DEFAULT_BOARD_PATH),
            dry_run: false,
        }
    }
}

impl RunConfig {
    /// Create a configuration for a board, using the default executable.
    pub fn new(board: impl Into<PathBuf>) -> Self {
        Self {
            board: board.into(),
            ..Default::default()
        }
    }

    /// Whether the executable is a bare program name left to `PATH` lookup.
    pub fn eagle_is_bare_name(&self) -> bool {
        self.eagle.components().count() == 1 && !self.eagle.is_absolute()
    }
}
