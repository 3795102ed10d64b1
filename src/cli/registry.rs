use std::{collections::HashMap, fmt};

use tracing::debug;

use super::CliError;

type Handler<S> = Box<dyn Fn(&mut S) -> i32>;

/// Named handlers over a state `S`, looked up by string at run time.
///
/// Used where a command name arrives as data, e.g. from an option value,
/// instead of being bound to an option at declaration time.
///
/// # Example Structure
///
/// ```text
/// table
/// ├── clear  -> fn(&mut S) -> i32
/// ├── list   -> fn(&mut S) -> i32
/// └── sync   -> fn(&mut S) -> i32
/// ```
pub struct CommandTable<S> {
    handlers: HashMap<String, Handler<S>>,
}

impl<S> CommandTable<S> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` under `name`, replacing any previous one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl Fn(&mut S) -> i32 + 'static,
    ) {
        let name = name.into();
        debug!(name = %name, "Registering command");
        self.handlers.insert(name, Box::new(handler));
    }

    /// Runs the handler registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if no handler has that name.
    pub fn perform(&self, name: &str, state: &mut S) -> Result<i32, CliError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| CliError::CommandNotFound(name.to_string()))?;

        Ok(handler(state))
    }

    /// Whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S> Default for CommandTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for CommandTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("names", &self.names())
            .finish()
    }
}
