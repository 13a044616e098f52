//! Filtering and pagination over task collections.
//!
//! Both operations are pure views: they never mutate the underlying records
//! and always preserve insertion order.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Partition of a task collection by completion flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// All tasks.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl FilterMode {
    /// Returns `true` if the task belongs to this partition.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl std::str::FromStr for FilterMode {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Error for a filter string that is not `all`, `active`, or `completed`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown filter mode: {0}")]
pub struct UnknownFilter(pub String);

/// Returns the subsequence of tasks in the given partition, order preserved.
#[must_use]
pub fn filter(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks.iter().filter(|t| mode.matches(t)).collect()
}

/// Returns the 1-indexed page slice and the total item count.
///
/// Out-of-range pages, page 0, and a zero page size all yield an empty
/// slice rather than an error.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let total = items.len();
    if page == 0 || page_size == 0 {
        return (&[], total);
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= total {
        return (&[], total);
    }
    let end = start.saturating_add(page_size).min(total);
    (&items[start..end], total)
}
