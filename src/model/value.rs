//! Values read from CAM file key lines.

use serde::{Deserialize, Serialize};

use crate::config::PREFERRED_LANGUAGE;

/// The value of a CAM key, either plain or translated per language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CamValue {
    /// `Key=value` or `Key="value"`.
    Text(String),
    /// One or more `Key[lang]="value"` lines, in file order.
    Localized(Vec<(String, String)>),
}

impl Default for CamValue {
    fn default() -> Self {
        CamValue::Text(String::new())
    }
}

impl CamValue {
    /// Resolve to a single string.
    ///
    /// Localized values prefer English, then the first language listed.
    pub fn text(&self) -> &str {
        match self {
            CamValue::Text(s) => s,
            CamValue::Localized(entries) => self
                .translation(PREFERRED_LANGUAGE)
                .or_else(|| entries.first().map(|(_, v)| v.as_str()))
                .unwrap_or(""),
        }
    }

    /// Look up a specific language of a localized value.
    pub fn translation(&self, lang: &str) -> Option<&str> {
        match self {
            CamValue::Text(_) => None,
            CamValue::Localized(entries) => entries
                .iter()
                .find(|(l, _)| l == lang)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// True when the resolved text is empty.
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

impl From<&str> for CamValue {
    fn from(s: &str) -> Self {
        CamValue::Text(s.to_string())
    }
}

impl std::fmt::Display for CamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
