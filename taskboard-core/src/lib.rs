//! Domain types and state logic for Taskboard.
//!
//! Pure, synchronous building blocks with no I/O: the task model and record
//! store, the filter/pagination query layer, and the tic-tac-toe board state
//! machine. The HTTP server in `taskboard-server` wraps these in shared
//! application state.

pub mod board;
pub mod filter;
pub mod store;
pub mod task;

pub use board::{Board, GameStatus, Player};
pub use filter::{FilterMode, filter, paginate};
pub use store::TaskStore;
pub use task::{Task, TaskError, TaskId};
