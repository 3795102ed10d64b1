//! Two-stack undo/redo history.
//!
//! Undoing a task pops it and runs its reversal. The reversal decides what
//! can be redone by registering a related redo task through the
//! [`TaskHistory`] handle it receives; nothing moves between stacks on its
//! own.

mod manager;
mod shared;
mod task;


use std::fmt;

use thiserror::Error;

pub use manager::UndoManager;
pub use shared::SharedUndoManager;
pub use task::{HistoryTask, TaskHistory};

/// History operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Running the latest undo task
    Undo,
    /// Running the latest redo task
    Redo,
    /// Recording a new undo task
    Record,
    /// Dropping both stacks
    Reset,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Undo => write!(f, "undo"),
            Operation::Redo => write!(f, "redo"),
            Operation::Record => write!(f, "record"),
            Operation::Reset => write!(f, "reset"),
        }
    }
}

/// Errors raised by history operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UndoError {
    /// Undo or redo with an empty stack
    #[error("nothing to {operation}")]
    NoHistory {
        /// The empty stack
        operation: Operation,
    },

    /// The history was mutated from inside a running task
    #[error("cannot {operation} while a history task is running")]
    ReentrantStackMutation {
        /// The operation that was attempted
        operation: Operation,
    },
}
