use std::{
    cell::{RefCell, RefMut},
    rc::Rc,
};

use super::{HistoryTask, Operation, UndoError, UndoManager};

/// Cloneable handle to one [`UndoManager`].
///
/// Tasks may hold a clone to record follow-up actions later. Mutating the
/// history from inside a running task is reported as
/// `UndoError::ReentrantStackMutation` instead of panicking; queries answer
/// `None` in that case.
#[derive(Debug, Clone, Default)]
pub struct SharedUndoManager(Rc<RefCell<UndoManager>>);

impl SharedUndoManager {
    /// Creates a handle to an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    fn manager_mut(&self, operation: Operation) -> Result<RefMut<'_, UndoManager>, UndoError> {
        self.0
            .try_borrow_mut()
            .map_err(|_| UndoError::ReentrantStackMutation { operation })
    }

    /// See [`UndoManager::insert_undo_task`].
    ///
    /// # Errors
    ///
    /// Returns `UndoError::ReentrantStackMutation` while a task is running.
    pub fn insert_undo_task(&self, task: HistoryTask) -> Result<(), UndoError> {
        self.manager_mut(Operation::Record)?.insert_undo_task(task);
        Ok(())
    }

    /// See [`UndoManager::insert_undo_task_with`].
    ///
    /// # Errors
    ///
    /// Returns `UndoError::ReentrantStackMutation` while a task is running.
    pub fn insert_undo_task_with(
        &self,
        task: HistoryTask,
        clear_redo: bool,
    ) -> Result<(), UndoError> {
        self.manager_mut(Operation::Record)?
            .insert_undo_task_with(task, clear_redo);
        Ok(())
    }

    /// See [`UndoManager::undo`].
    ///
    /// # Errors
    ///
    /// Returns `UndoError::ReentrantStackMutation` while a task is running and
    /// `UndoError::NoHistory` if the stack is empty.
    pub fn undo(&self) -> Result<(), UndoError> {
        self.manager_mut(Operation::Undo)?.undo()
    }

    /// See [`UndoManager::redo`].
    ///
    /// # Errors
    ///
    /// Same as [`undo`](Self::undo) for the redo stack.
    pub fn redo(&self) -> Result<(), UndoError> {
        self.manager_mut(Operation::Redo)?.redo()
    }

    /// Drops both stacks, e.g. when the edited document is reloaded.
    ///
    /// # Errors
    ///
    /// Returns `UndoError::ReentrantStackMutation` while a task is running.
    pub fn reset(&self) -> Result<(), UndoError> {
        self.manager_mut(Operation::Reset)?.reset();
        Ok(())
    }

    /// Whether an undo task is pending; `None` while a task is running.
    pub fn can_undo(&self) -> Option<bool> {
        self.with(UndoManager::can_undo)
    }

    /// Whether a redo task is pending; `None` while a task is running.
    pub fn can_redo(&self) -> Option<bool> {
        self.with(UndoManager::can_redo)
    }

    /// Message of the task the next undo would run.
    ///
    /// `None` if the stack is empty or a task is running.
    pub fn present_undo_message(&self) -> Option<String> {
        self.with(|m| m.present_undo_message().map(str::to_string))
            .flatten()
    }

    /// Message of the task the next redo would run.
    ///
    /// `None` if the stack is empty or a task is running.
    pub fn present_redo_message(&self) -> Option<String> {
        self.with(|m| m.present_redo_message().map(str::to_string))
            .flatten()
    }

    /// Runs `f` with shared access to the manager.
    ///
    /// Returns `None` while a task is running.
    pub fn with<R>(&self, f: impl FnOnce(&UndoManager) -> R) -> Option<R> {
        self.0.try_borrow().ok().map(|manager| f(&manager))
    }
}
