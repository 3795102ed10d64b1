//! Application context.
//!
//! An [`Application`] owns what the rest of the runtime hangs off: name,
//! version, arguments, the home directory, runtime configuration, the
//! installed translator and the ordered list of shutdown cleanups.

mod application;
mod cleanup;
mod paths;


pub use application::{Application, DEFAULT_ERROR_TIP_KEY, DebugLevel};
pub use cleanup::{CleanupId, CleanupRegistry};
pub use paths::AppPaths;
