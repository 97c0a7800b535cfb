use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{TilepackError, WidthPattern};

/// Runtime configuration shared by the encoder and decoder.
///
/// The width pattern is never stored in the packed stream, so both sides
/// must be handed the same configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Repeating slot widths, e.g. `[3, 2, 9]`.
    pub pattern: WidthPattern,
    /// Bytes to decode per read. `None` reads to the end of the input.
    #[serde(default)]
    pub byte_count: Option<u64>,
}

impl Config {
    pub fn new(pattern: WidthPattern) -> Self {
        Self {
            pattern,
            byte_count: None,
        }
    }

    /// Load a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TilepackError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, TilepackError> {
        serde_json::from_str(text).map_err(|e| TilepackError::Config(e.to_string()))
    }
}
