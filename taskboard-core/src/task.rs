//! Task record model and identifier generation.
//!
//! A [`TaskId`] is a base-36 millisecond timestamp concatenated with a random
//! base-36 suffix. Collisions are possible but treated as negligible; this is
//! an explicit non-guarantee of the id scheme, not something callers should
//! defend against.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum allowed task text length in characters.
pub const MAX_TASK_TEXT_LENGTH: usize = 256;

/// Errors that can occur during task operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task text cannot be empty after trimming.
    #[error("task text cannot be empty")]
    TextEmpty,
    /// Task text exceeds the maximum length.
    #[error("task text too long (max {MAX_TASK_TEXT_LENGTH} characters)")]
    TextTooLong,
    /// Task with the given ID was not found.
    #[error("task not found: {0}")]
    NotFound(String),
}

/// Unique identifier for a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh identifier: base-36 timestamp plus random suffix.
    #[must_use]
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let suffix: u64 = rand::rng().random();
        Self(format!("{}{}", to_base36(millis), to_base36(u128::from(suffix))))
    }

    /// Wraps an existing identifier string.
    #[must_use]
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Encodes a number in lowercase base-36, the alphabet JavaScript's
/// `Number.toString(36)` uses.
fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// A single task record.
///
/// Created with `completed = false`; mutated in place by toggle and edit,
/// removed by delete or bulk clear-completed. Text is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Trimmed, non-empty task text.
    pub text: String,
    /// Whether the task has been completed.
    pub completed: bool,
}

impl Task {
    /// Creates a new task with a fresh id, validating the text.
    ///
    /// The text is trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TextEmpty`] if the text is empty after trimming,
    /// or [`TaskError::TextTooLong`] if it exceeds 256 characters.
    pub fn new(text: &str) -> Result<Self, TaskError> {
        let text = validate_text(text)?;
        Ok(Self {
            id: TaskId::generate(),
            text,
            completed: false,
        })
    }
}

/// Trims and validates task text, returning the trimmed string.
///
/// # Errors
///
/// Returns [`TaskError::TextEmpty`] or [`TaskError::TextTooLong`].
pub fn validate_text(text: &str) -> Result<String, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::TextEmpty);
    }
    if trimmed.chars().count() > MAX_TASK_TEXT_LENGTH {
        return Err(TaskError::TextTooLong);
    }
    Ok(trimmed.to_string())
}
