//! Runtime configuration.
//!
//! Optional `runtime.toml` in the application home that tunes the settings
//! file format and logging. Every field has a default, so a missing file or
//! a partial file is always valid.

mod loading;
mod logging;
mod settings_format;


pub use loading::RUNTIME_CONFIG_FILE;
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use settings_format::{LineEnding, SETTINGS_ENCODING, SettingsFormat};

use serde::{Deserialize, Serialize};

/// Main runtime configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuntimeConfig {
    /// Settings file format knobs.
    #[serde(default)]
    pub settings: SettingsFormat,

    /// Logging setup.
    #[serde(default)]
    pub logging: LoggingConfig,
}
