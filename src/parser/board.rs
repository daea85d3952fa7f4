//! Layer table of an EAGLE board file.

use crate::error::{CamError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static LAYER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*<layer number="([0-9]+)" name="([^"]+)""#).expect("valid layer regex")
});

/// Layer numbers and names defined by a board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayers {
    /// (number, name) pairs in file order.
    layers: Vec<(String, String)>,
}

impl BoardLayers {
    /// Read the layer table from a `.brd` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CamError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let board = Self::parse(&content);
        debug!(
            "Board {} defines {} layer(s)",
            path.display(),
            board.layers.len()
        );
        Ok(board)
    }

    /// Collect `<layer number=".." name=".."` lines from board XML.
    pub fn parse(content: &str) -> Self {
        let layers = content
            .lines()
            .filter_map(|line| LAYER_LINE.captures(line))
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect();
        Self { layers }
    }

    /// Build a table directly from pairs.
    pub fn from_pairs<I, N, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            layers: pairs
                .into_iter()
                .map(|(n, s)| (n.into(), s.into()))
                .collect(),
        }
    }

    /// True when the token is a known layer number or name.
    pub fn contains(&self, token: &str) -> bool {
        self.layers.iter().any(|(n, s)| n == token || s == token)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
