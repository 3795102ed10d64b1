use std::{fs, path::Path};

use tracing::{debug, instrument};

use super::RuntimeConfig;
use crate::{GafError, Result};

/// File name of the runtime configuration inside the application home.
pub const RUNTIME_CONFIG_FILE: &str = "runtime.toml";

impl RuntimeConfig {
    /// Parses a runtime configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `GafError::TomlParseError` if the text is not valid TOML or
    /// does not match the schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GafError::toml_parse(e, None))
    }

    /// Loads the runtime configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns `GafError::IoError` if the file cannot be read and
    /// `GafError::TomlParseError` if it cannot be parsed.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GafError::IoError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| GafError::toml_parse(e, Some(path)))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`RuntimeConfig::load`] for an existing file.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No runtime config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
