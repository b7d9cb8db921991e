use std::fs;
use std::path::Path;

use btmesh_access::SchemaError;
use serde::Deserialize;
use thiserror::Error;

use crate::family::FamilyKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read codec configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid codec configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to build message schemas: {0}")]
    Schema(#[from] SchemaError),
}

/// Which message families a codec understands and how strict it is.
///
/// ```toml
/// families = ["generic_property", "light_extended_controller"]
/// allow_trailing_data = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub families: Vec<FamilyKind>,
    /// Drop (and log) bytes left after the parameters instead of failing.
    pub allow_trailing_data: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { families: FamilyKind::all(), allow_trailing_data: false }
    }
}

impl CodecConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
