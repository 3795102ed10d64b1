use serde::{Deserialize, Serialize};

use crate::convert::DEFAULT_DATE_FORMAT;

/// Character encoding of settings files. Informational only; files are
/// always read and written as UTF-8.
pub const SETTINGS_ENCODING: &str = "UTF-8";

/// Line terminator written after each settings line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// The platform newline (`\r\n` on Windows, `\n` elsewhere).
    #[default]
    Native,

    /// Unix newline.
    Lf,

    /// Windows newline.
    Crlf,
}

impl LineEnding {
    /// The terminator as text.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Text format of a settings file.
///
/// Keys and values must not contain the separator, the comment marker or
/// line breaks to round-trip; nothing is escaped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsFormat {
    /// Lines starting with this marker are comments.
    #[serde(default = "default_comment_marker")]
    pub comment_marker: String,

    /// Separates a key from its value.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Terminator written after each line.
    #[serde(default)]
    pub line_ending: LineEnding,

    /// File name suffix appended to the settings base name.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// `chrono` pattern used by the date converter.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_comment_marker() -> String {
    "#".to_string()
}

fn default_separator() -> String {
    "=".to_string()
}

fn default_suffix() -> String {
    ".pref".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for SettingsFormat {
    fn default() -> Self {
        Self {
            comment_marker: default_comment_marker(),
            separator: default_separator(),
            line_ending: LineEnding::default(),
            suffix: default_suffix(),
            date_format: default_date_format(),
        }
    }
}

impl SettingsFormat {
    /// File name for a settings base name, e.g. `settings.pref`.
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{base_name}{}", self.suffix)
    }
}
