use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::{
    cli::CliError, convert::ConvertError, i18n::I18nError, settings::SettingsError,
    undo::UndoError,
};

/// Error types for the Gaf runtime.
///
/// Each subsystem reports its own error enum; this type aggregates them at
/// the application level together with configuration and home directory
/// failures.
#[derive(Error, Debug)]
pub enum GafError {
    /// No converter is registered for a value kind
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// Settings persistence or typed access failed
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Command-line parsing, validation or dispatch failed
    #[error(transparent)]
    Cli(#[from] CliError),

    /// Undo/redo history misuse
    #[error(transparent)]
    Undo(#[from] UndoError),

    /// Localized text lookup failed
    #[error(transparent)]
    I18n(#[from] I18nError),

    /// The application home directory could not be determined or created
    #[error("home directory '{path}' unavailable: {details}")]
    HomeDir {
        /// Home directory path
        path: PathBuf,
        /// Underlying error details
        details: String,
    },

    /// A shutdown cleanup could not run
    #[error("cleanup '{name}' failed: {details}")]
    Cleanup {
        /// Cleanup name
        name: String,
        /// Failure details
        details: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error (for compatibility)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for Gaf operations.
pub type Result<T> = result::Result<T, GafError>;

impl GafError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        GafError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates a home directory error for `path`.
    pub fn home_dir(error: impl fmt::Display, path: &Path) -> Self {
        GafError::HomeDir {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
