//! Configuration for hufftext

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chunking::check_group_size;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Number of input characters folded into one unit before coding.
    /// Must be the same for compress and decompress.
    pub unit_group_size: usize,
    pub max_input_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            unit_group_size: 1,
            max_input_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}

impl CodecConfig {
    pub fn with_group_size(unit_group_size: usize) -> Self {
        Self {
            unit_group_size,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CodecConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        check_group_size(self.unit_group_size)
    }
}
