use std::fmt;

use super::UndoManager;

type TaskAction = Box<dyn FnOnce(&mut TaskHistory<'_>)>;

/// A history entry: a user-facing message and the work to run once.
pub struct HistoryTask {
    message: String,
    action: TaskAction,
}

impl HistoryTask {
    /// Creates a task whose `action` runs when it is undone or redone.
    pub fn new(
        message: impl Into<String>,
        action: impl FnOnce(&mut TaskHistory<'_>) + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            action: Box::new(action),
        }
    }

    /// Text describing what running the task does, e.g. "Undo typing".
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(super) fn run(self, history: &mut TaskHistory<'_>) {
        (self.action)(history);
    }
}

impl fmt::Debug for HistoryTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryTask")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Restricted view of the manager given to a running task.
///
/// It can only push related tasks; undo and redo are not reachable from
/// inside a task.
pub struct TaskHistory<'a> {
    manager: &'a mut UndoManager,
}

impl<'a> TaskHistory<'a> {
    pub(super) fn new(manager: &'a mut UndoManager) -> Self {
        Self { manager }
    }

    /// Pushes the task that redoes what the running reversal undid.
    pub fn add_related_redo_task(&mut self, task: HistoryTask) {
        self.manager.push_redo(task);
    }

    /// Pushes the task that undoes what the running replay redid.
    ///
    /// Redo history is kept.
    pub fn add_related_undo_task(&mut self, task: HistoryTask) {
        self.manager.insert_undo_task_with(task, false);
    }
}
