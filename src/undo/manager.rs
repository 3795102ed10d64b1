use tracing::debug;

use super::{HistoryTask, Operation, TaskHistory, UndoError};

/// Undo and redo stacks of [`HistoryTask`]s.
#[derive(Debug, Default)]
pub struct UndoManager {
    undo_stack: Vec<HistoryTask>,
    redo_stack: Vec<HistoryTask>,
}

impl UndoManager {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new undoable action and invalidates the redo branch.
    pub fn insert_undo_task(&mut self, task: HistoryTask) {
        self.insert_undo_task_with(task, true);
    }

    /// Records a new undoable action, clearing redo history if `clear_redo`.
    pub fn insert_undo_task_with(&mut self, task: HistoryTask, clear_redo: bool) {
        debug!(message = task.message(), clear_redo, "Recording undo task");
        self.undo_stack.push(task);
        if clear_redo {
            self.redo_stack.clear();
        }
    }

    pub(super) fn push_redo(&mut self, task: HistoryTask) {
        self.redo_stack.push(task);
    }

    /// Pops and runs the latest undo task.
    ///
    /// # Errors
    ///
    /// Returns `UndoError::NoHistory` if there is nothing to undo.
    pub fn undo(&mut self) -> Result<(), UndoError> {
        let task = self.undo_stack.pop().ok_or(UndoError::NoHistory {
            operation: Operation::Undo,
        })?;
        debug!(message = task.message(), "Undo");
        task.run(&mut TaskHistory::new(self));
        Ok(())
    }

    /// Pops and runs the latest redo task.
    ///
    /// # Errors
    ///
    /// Returns `UndoError::NoHistory` if there is nothing to redo.
    pub fn redo(&mut self) -> Result<(), UndoError> {
        let task = self.redo_stack.pop().ok_or(UndoError::NoHistory {
            operation: Operation::Redo,
        })?;
        debug!(message = task.message(), "Redo");
        task.run(&mut TaskHistory::new(self));
        Ok(())
    }

    /// Whether an undo task is pending.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a redo task is pending.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Message of the task the next undo would run.
    pub fn present_undo_message(&self) -> Option<&str> {
        self.undo_stack.last().map(HistoryTask::message)
    }

    /// Message of the task the next redo would run.
    pub fn present_redo_message(&self) -> Option<&str> {
        self.redo_stack.last().map(HistoryTask::message)
    }

    /// Drops both stacks.
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Number of pending undo tasks.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of pending redo tasks.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
