//! Localized text lookup.
//!
//! The [`Translator`] trait is the seam the application talks to; [`Catalog`]
//! is an in-memory implementation loaded from `key=value` text.

mod catalog;
mod format;

#[cfg(test)]
mod tests;

use std::{fmt::Display, path::PathBuf};

use thiserror::Error;

pub use catalog::Catalog;
pub use format::format_message;

/// Errors raised by text lookup and catalog loading.
#[derive(Error, Debug)]
pub enum I18nError {
    /// No text for the key
    #[error("missing text for key '{key}'")]
    MissingText {
        /// Requested key
        key: String,
    },

    /// A catalog file could not be read
    #[error("failed to load catalog '{path}': {details}")]
    Load {
        /// Catalog file path
        path: PathBuf,
        /// Underlying error details
        details: String,
    },
}

/// Source of localized text.
///
/// Implementors provide [`fetch_text`](Translator::fetch_text); the rest
/// builds on it. Patterns use `{0}`, `{1}`, ... placeholders.
pub trait Translator {
    /// Raw text for `key`, if known.
    fn fetch_text(&self, key: &str) -> Option<String>;

    /// Text for `key`.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::MissingText` if the key is unknown.
    fn text(&self, key: &str) -> Result<String, I18nError> {
        self.fetch_text(key).ok_or_else(|| I18nError::MissingText {
            key: key.to_string(),
        })
    }

    /// Text for `key`, or `default` if the key is unknown.
    fn optional_text(&self, key: &str, default: &str) -> String {
        self.fetch_text(key).unwrap_or_else(|| default.to_string())
    }

    /// Text for `key` with placeholders replaced by `args`.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::MissingText` if the key is unknown.
    fn text_with(&self, key: &str, args: &[&dyn Display]) -> Result<String, I18nError> {
        self.text(key).map(|pattern| format_message(&pattern, args))
    }

    /// Like [`text_with`](Translator::text_with), formatting `default` when
    /// the key is unknown.
    fn optional_text_with(&self, key: &str, default: &str, args: &[&dyn Display]) -> String {
        format_message(&self.optional_text(key, default), args)
    }
}
