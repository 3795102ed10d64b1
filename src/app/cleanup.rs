use std::fmt;

use tracing::{debug, warn};

use crate::GafError;

type Callback = Box<dyn FnOnce() -> Result<(), GafError>>;

/// Handle returned by [`CleanupRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CleanupId(u64);

struct Cleanup {
    id: CleanupId,
    name: String,
    callback: Callback,
}

/// Ordered shutdown callbacks, each run at most once.
#[derive(Default)]
pub struct CleanupRegistry {
    next_id: u64,
    entries: Vec<Cleanup>,
}

impl CleanupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a callback; `name` only appears in logs.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        callback: impl FnOnce() -> Result<(), GafError> + 'static,
    ) -> CleanupId {
        let id = CleanupId(self.next_id);
        self.next_id += 1;
        self.entries.push(Cleanup {
            id,
            name: name.into(),
            callback: Box::new(callback),
        });
        id
    }

    /// Removes a pending callback. Returns false if it already ran or was
    /// removed.
    pub fn remove(&mut self, id: CleanupId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Number of pending callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no callback is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every pending callback in registration order.
    ///
    /// A failing callback is logged and the rest still run. Returns the
    /// number of failures.
    pub fn run_all(&mut self) -> usize {
        let mut failures = 0;
        for entry in self.entries.drain(..) {
            debug!(cleanup = %entry.name, "Running cleanup");
            if let Err(e) = (entry.callback)() {
                warn!(cleanup = %entry.name, error = %e, "Cleanup failed");
                failures += 1;
            }
        }
        failures
    }
}

impl fmt::Debug for CleanupRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        f.debug_struct("CleanupRegistry")
            .field("pending", &names)
            .finish()
    }
}
