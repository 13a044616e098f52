//! Shared application state: task store, board, and write-through snapshot.
//!
//! All mutations acquire the store's write lock and, when a snapshot file is
//! configured, rewrite it before the lock is released. That serializes every
//! read-modify-write cycle through a single writer at a time, eliminating the
//! lost-update race a lockless file-backed store would have.

use taskboard_core::{Board, FilterMode, Task, TaskError, TaskId, TaskStore, filter, paginate};
use tokio::sync::RwLock;

use crate::persist::{PersistError, SnapshotFile};

/// Errors surfaced by state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A domain-level task error (validation or not-found).
    #[error(transparent)]
    Task(#[from] TaskError),
    /// The snapshot file could not be written.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// A page of tasks plus the total size of the filtered set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TaskPage {
    /// The tasks on this page, in insertion order.
    pub tasks: Vec<Task>,
    /// Total number of tasks in the filtered set.
    pub total: usize,
}

/// Shared server state holding the task store, the board, and the optional
/// snapshot file.
pub struct AppState {
    tasks: RwLock<TaskStore>,
    board: RwLock<Board>,
    snapshot: Option<SnapshotFile>,
    page_size: usize,
}

impl AppState {
    /// Creates an in-memory state with the given default page size.
    #[must_use]
    pub fn in_memory(page_size: usize) -> Self {
        Self {
            tasks: RwLock::new(TaskStore::new()),
            board: RwLock::new(Board::new()),
            snapshot: None,
            page_size,
        }
    }

    /// Creates a state backed by a JSON snapshot file, loading any existing
    /// tasks from it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if an existing snapshot cannot be read or
    /// parsed.
    pub fn with_snapshot(snapshot: SnapshotFile, page_size: usize) -> Result<Self, PersistError> {
        let tasks = snapshot.load()?;
        tracing::info!(path = %snapshot.path().display(), count = tasks.len(), "loaded task snapshot");
        Ok(Self {
            tasks: RwLock::new(TaskStore::from_tasks(tasks)),
            board: RwLock::new(Board::new()),
            snapshot: Some(snapshot),
            page_size,
        })
    }

    /// The configured default page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns a filtered, optionally paginated view of the task list.
    ///
    /// Without `page` and `limit` the full filtered list is returned; with
    /// either present, `limit` falls back to the configured page size and
    /// `page` to 1.
    pub async fn list_tasks(
        &self,
        mode: FilterMode,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> TaskPage {
        let store = self.tasks.read().await;
        let filtered = filter(store.tasks(), mode);

        if page.is_none() && limit.is_none() {
            return TaskPage {
                total: filtered.len(),
                tasks: filtered.into_iter().cloned().collect(),
            };
        }

        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(self.page_size);
        let (slice, total) = paginate(&filtered, page, limit);
        TaskPage {
            tasks: slice.iter().map(|t| (*t).clone()).collect(),
            total,
        }
    }

    /// Creates a new task and persists the change.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Task`] on invalid text, or
    /// [`StateError::Persist`] if the snapshot write fails.
    pub async fn add_task(&self, text: &str) -> Result<Task, StateError> {
        let mut store = self.tasks.write().await;
        let task = store.add(text)?;
        self.persist(&store)?;
        tracing::info!(task_id = %task.id, "task created");
        Ok(task)
    }

    /// Flips the completion flag of a task and persists the change.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Task`] if the id does not match, or
    /// [`StateError::Persist`] if the snapshot write fails.
    pub async fn toggle_task(&self, id: &TaskId) -> Result<Task, StateError> {
        let mut store = self.tasks.write().await;
        let task = store.toggle(id)?;
        self.persist(&store)?;
        tracing::info!(task_id = %task.id, completed = task.completed, "task toggled");
        Ok(task)
    }

    /// Replaces the text of a task and persists the change.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Task`] on an unknown id or invalid text, or
    /// [`StateError::Persist`] if the snapshot write fails.
    pub async fn edit_task(&self, id: &TaskId, text: &str) -> Result<Task, StateError> {
        let mut store = self.tasks.write().await;
        let task = store.edit_text(id, text)?;
        self.persist(&store)?;
        tracing::info!(task_id = %task.id, "task text edited");
        Ok(task)
    }

    /// Removes a task, returning `false` if no record matched.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Persist`] if the snapshot write fails.
    pub async fn remove_task(&self, id: &TaskId) -> Result<bool, StateError> {
        let mut store = self.tasks.write().await;
        let removed = store.remove(id);
        if removed {
            self.persist(&store)?;
            tracing::info!(task_id = %id, "task removed");
        }
        Ok(removed)
    }

    /// Removes all completed tasks, returning the count removed.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Persist`] if the snapshot write fails.
    pub async fn clear_completed(&self) -> Result<usize, StateError> {
        let mut store = self.tasks.write().await;
        let removed = store.clear_completed();
        if removed > 0 {
            self.persist(&store)?;
        }
        tracing::info!(count = removed, "cleared completed tasks");
        Ok(removed)
    }

    /// Returns a copy of the current board.
    pub async fn board(&self) -> Board {
        self.board.read().await.clone()
    }

    /// Plays a move for the current player. Rejected moves (occupied cell,
    /// out-of-range index, terminal state) return `false` and leave the
    /// board unchanged.
    pub async fn play_move(&self, index: usize) -> bool {
        let mut board = self.board.write().await;
        let applied = board.play(index);
        if applied {
            tracing::info!(index, status = ?board.status(), "move played");
        } else {
            tracing::debug!(index, "move rejected");
        }
        applied
    }

    /// Resets the board to the initial state.
    pub async fn restart_game(&self) {
        let mut board = self.board.write().await;
        board.reset();
        tracing::info!("board reset");
    }

    /// Rewrites the snapshot while the caller still holds the write lock.
    fn persist(&self, store: &TaskStore) -> Result<(), PersistError> {
        if let Some(snapshot) = &self.snapshot {
            snapshot.save(store.tasks())?;
        }
        Ok(())
    }
}
