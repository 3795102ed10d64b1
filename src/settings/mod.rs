//! File-backed string settings with typed access.
//!
//! A [`SettingsStore`] keeps every value as a raw string and converts on
//! access through its [`ConverterRegistry`](crate::convert::ConverterRegistry).
//! Changes are tracked so the store is written back at most once, usually from
//! an application cleanup hook.

mod codec;
mod store;

#[cfg(test)]
mod tests;

use std::{cell::RefCell, io, path::PathBuf, rc::Rc};

use thiserror::Error;

use crate::convert::ConvertError;

pub use store::SettingsStore;

/// A settings store shared between the application and its cleanup hooks.
pub type SharedSettings = Rc<RefCell<SettingsStore>>;

/// Errors raised by settings access and persistence.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Typed access for a kind without a registered converter
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// The directory holding the settings file could not be created
    #[error("cannot create settings directory '{path}': {details}")]
    HomeDirCreate {
        /// Directory path
        path: PathBuf,
        /// Underlying error details
        details: String,
    },

    /// Reading the settings file failed
    #[error("failed to load settings from '{path}': {details}")]
    Load {
        /// Settings file path
        path: PathBuf,
        /// Underlying error details
        details: String,
    },

    /// Writing the settings file failed
    #[error("failed to persist settings to '{path}': {details}")]
    Persistence {
        /// Path being written
        path: PathBuf,
        /// Underlying error details
        details: String,
    },

    /// `sync` on a store that was not opened from a file
    #[error("settings store has no backing file")]
    NoBackingFile,

    /// Reading or writing a caller supplied stream failed
    #[error("settings stream error: {0}")]
    Stream(#[from] io::Error),
}
