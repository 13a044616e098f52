//! In-memory task record store.
//!
//! [`TaskStore`] owns the task collection and provides the mutation
//! operations behind the HTTP API. It holds no locks and does no I/O;
//! callers own synchronization and persistence.

use crate::task::{Task, TaskError, TaskId, validate_text};

/// An ordered collection of task records.
///
/// Insertion order is preserved across all operations. Stores are plain
/// values so tests can instantiate independent ones; the server wraps a
/// single store in shared state.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing records, e.g. from a snapshot.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Returns all records in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Validates and appends a new task, returning a clone of the record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TextEmpty`] or [`TaskError::TextTooLong`].
    pub fn add(&mut self, text: &str) -> Result<Task, TaskError> {
        let task = Task::new(text)?;
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Flips the completion flag of the matched record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no record matches.
    pub fn toggle(&mut self, id: &TaskId) -> Result<Task, TaskError> {
        let task = self.find_mut(id)?;
        task.completed = !task.completed;
        Ok(task.clone())
    }

    /// Replaces the text of the matched record with the trimmed replacement.
    ///
    /// Empty replacement text is rejected, the same rule as [`Self::add`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no record matches, or
    /// [`TaskError::TextEmpty`] / [`TaskError::TextTooLong`] for invalid text.
    pub fn edit_text(&mut self, id: &TaskId, new_text: &str) -> Result<Task, TaskError> {
        let text = validate_text(new_text)?;
        let task = self.find_mut(id)?;
        task.text = text;
        Ok(task.clone())
    }

    /// Removes the matched record. Returns `false` if no record matched.
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        self.tasks.len() < before
    }

    /// Removes all records matching the predicate, returning the count removed.
    pub fn remove_where(&mut self, predicate: impl Fn(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !predicate(t));
        before - self.tasks.len()
    }

    /// Removes all completed records, returning the count removed.
    pub fn clear_completed(&mut self) -> usize {
        self.remove_where(|t| t.completed)
    }

    fn find_mut(&mut self, id: &TaskId) -> Result<&mut Task, TaskError> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }
}
