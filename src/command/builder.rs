//! Mapping of CAM section settings to EAGLE command-line arguments.

use crate::config::{RunConfig, Unit, FLAG_DEFAULTS, FLAG_LETTERS};
use crate::error::{CamError, Result};
use crate::model::CamSection;
use crate::parser::BoardLayers;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static OFFSET_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    let number = r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?";
    Regex::new(&format!(r"^({number})(\S+)\s+({number})(\S+)$")).expect("valid offset regex")
});

/// One invocation of the EAGLE command-line tool.
#[derive(Debug, Clone, PartialEq)]
pub struct EagleCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl EagleCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }
}

fn quote_if_needed(s: &str) -> String {
    if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

impl fmt::Display for EagleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", quote_if_needed(arg))?;
        }
        Ok(())
    }
}

/// Expand `%N`, `%E`, `%P`, `%H` and `%%` in an output name template.
///
/// Placeholders refer to the board file: name without extension, extension
/// without dot, containing directory. `%H` is the user's home directory.
pub fn output_name(template: &str, board: &Path) -> String {
    let lossy = |s: Option<&std::ffi::OsStr>| {
        s.map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('N') => lossy(board.file_stem()),
            Some('E') => lossy(board.extension()),
            Some('P') => board
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            Some('H') => dirs::home_dir()
                .map(|h| h.display().to_string())
                .unwrap_or_default(),
            Some('%') => "%".to_string(),
            _ => {
                out.push('%');
                continue;
            }
        };
        chars.next();
        out.push_str(&replacement);
    }

    out
}

/// Convert a `Flags=` value into the options that differ from the defaults.
pub fn flag_args(flags: &str) -> Result<Vec<String>> {
    let values: Vec<&str> = flags.split_whitespace().collect();
    if values.len() > FLAG_LETTERS.len() {
        return Err(CamError::invalid(
            "Flags",
            format!("at most {} values", FLAG_LETTERS.len()),
            flags,
        ));
    }

    let mut args = Vec::new();
    for (index, value) in values.iter().enumerate() {
        let on = match *value {
            "1" => true,
            "0" => false,
            _ => return Err(CamError::invalid("Flags", "0 or 1", *value)),
        };
        if on != FLAG_DEFAULTS[index] {
            let sign = if on { '+' } else { '-' };
            args.push(format!("-{}{}", FLAG_LETTERS[index], sign));
        }
    }

    Ok(args)
}

/// Parse an `Offset=` value such as `0.5mm 10mil` into inches.
pub fn parse_offset(text: &str) -> Result<(f64, f64)> {
    let caps = OFFSET_PAIR
        .captures(text.trim())
        .ok_or_else(|| CamError::invalid("Offset", "'<number><unit> <number><unit>'", text))?;

    let to_inches = |number: &str, suffix: &str| -> Result<f64> {
        let unit = Unit::from_suffix(suffix)
            .ok_or_else(|| CamError::invalid("Offset", "unit mil, mm, cm or inch", suffix))?;
        let value: f64 = number
            .parse()
            .map_err(|_| CamError::invalid("Offset", "a number", number))?;
        Ok(unit.to_inches(value))
    };

    Ok((to_inches(&caps[1], &caps[2])?, to_inches(&caps[3], &caps[4])?))
}

/// Layers of a section split by whether the board defines them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSelection {
    pub valid: Vec<String>,
    pub unknown: Vec<String>,
}

/// Check each requested layer against the board's layer table.
pub fn resolve_layers(section: &CamSection, board: &BoardLayers) -> LayerSelection {
    let mut selection = LayerSelection::default();
    for token in section.layer_tokens() {
        if board.contains(token) {
            selection.valid.push(token.to_string());
        } else {
            selection.unknown.push(token.to_string());
        }
    }
    selection
}

/// Build the EAGLE invocation that produces one section's output file.
pub fn build_eagle_command(
    section: &CamSection,
    board: &BoardLayers,
    config: &RunConfig,
) -> Result<EagleCommand> {
    let mut cmd = EagleCommand::new(&config.eagle);

    for flag in flag_args(section.flags.text())? {
        cmd.arg(flag);
    }

    cmd.arg("-X");
    cmd.arg(format!("-d{}", section.device.text()));
    cmd.arg(format!(
        "-o{}",
        output_name(section.output.text(), &config.board)
    ));

    if let Some(wheel) = section.wheel_template() {
        let wheel = output_name(wheel, &config.board);
        if !wheel.is_empty() {
            cmd.arg(format!("-W{}", wheel));
        }
    }

    // Offsets always carry a decimal point, e.g. `-x1.0`.
    let (x, y) = parse_offset(section.offset.text())?;
    if x != 0.0 {
        cmd.arg(format!("-x{:?}", x));
    }
    if y != 0.0 {
        cmd.arg(format!("-y{:?}", y));
    }

    cmd.arg(config.board.display().to_string());

    for layer in resolve_layers(section, board).valid {
        cmd.arg(layer);
    }

    Ok(cmd)
}
