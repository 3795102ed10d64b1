//! Gaf - option-driven application runtime.
//!
//! Gaf provides the stateful core an application needs around its user
//! interface, independent of any toolkit:
//!
//! - Typed, file-backed settings store with a pluggable converter registry
//! - Command-line option dispatcher binding options to initializers or commands
//! - LIFO undo/redo history for editing components
//! - Application context with ordered shutdown cleanups
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gaf::settings::SettingsStore;
//!
//! let mut settings = SettingsStore::new();
//! settings.set("window.width", 800_i64)?;
//!
//! let width: i64 = settings.get("window.width", 640)?;
//! assert_eq!(width, 800);
//! # Ok::<(), gaf::settings::SettingsError>(())
//! ```

/// Application context, cleanup hooks and home directory layout.
pub mod app;

/// Command-line option dispatch.
pub mod cli;

/// Runtime configuration loaded from the application home.
pub mod config;

/// String/value converters and their registry.
pub mod convert;

/// Core error types and result aliases.
pub mod core;

/// Localization collaborator interface.
pub mod i18n;

/// Typed key/value settings persistence.
pub mod settings;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Undo/redo history management.
pub mod undo;

/// Re-exported core types for convenience.
pub use core::{GafError, Result};
