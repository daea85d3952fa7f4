//! CAM job and per-output section records.

use serde::{Deserialize, Serialize};

use super::CamValue;

/// One output file the CAM job produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamSection {
    /// Section tag from the `[tag]` header line.
    pub tag: String,
    /// Display name shown in the CAM processor tab.
    pub name: Option<CamValue>,
    pub prompt: Option<CamValue>,
    /// Output device, e.g. `GERBER_RS274X` or `EXCELLON`.
    pub device: CamValue,
    /// Aperture wheel file template.
    pub wheel: Option<CamValue>,
    pub rack: Option<CamValue>,
    pub scale: Option<CamValue>,
    /// Output file name template, e.g. `%N.cmp`.
    pub output: CamValue,
    /// Seven space-separated 0/1 option switches.
    pub flags: CamValue,
    pub emulate: CamValue,
    /// X and Y offset with units, e.g. `0.0mil 0.0mil`.
    pub offset: CamValue,
    pub sheet: Option<CamValue>,
    pub tolerance: Option<CamValue>,
    pub pen: Option<CamValue>,
    pub page: Option<CamValue>,
    /// Space-separated layer numbers or names.
    pub layers: CamValue,
    pub colors: Option<CamValue>,
}

impl CamSection {
    /// Create an empty section with a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Human-readable name, falling back to the tag.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name.text(),
            _ => &self.tag,
        }
    }

    /// Layer tokens in the order they were listed.
    pub fn layer_tokens(&self) -> Vec<&str> {
        self.layers.text().split_whitespace().collect()
    }

    /// Wheel template, if one is set and non-empty.
    pub fn wheel_template(&self) -> Option<&str> {
        self.wheel
            .as_ref()
            .map(|w| w.text())
            .filter(|w| !w.is_empty())
    }
}

/// A parsed CAM processor job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamJob {
    /// Job description, usually localized.
    pub description: Option<CamValue>,
    /// Section tags declared in the job header, in order.
    pub declared: Vec<String>,
    /// Section blocks in file order.
    pub sections: Vec<CamSection>,
}

impl CamJob {
    /// Create an empty job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a section by tag.
    pub fn section(&self, tag: &str) -> Option<&CamSection> {
        self.sections.iter().find(|s| s.tag == tag)
    }

    /// Declared tags that have no section block.
    pub fn missing_sections(&self) -> Vec<&str> {
        self.declared
            .iter()
            .filter(|tag| self.section(tag).is_none())
            .map(|tag| tag.as_str())
            .collect()
    }

    /// Check whether a tag was declared in the job header.
    pub fn is_declared(&self, tag: &str) -> bool {
        self.declared.iter().any(|t| t == tag)
    }
}
