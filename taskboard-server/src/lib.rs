//! Taskboard HTTP server library.
//!
//! Exposes the server for use in tests and embedding. The server owns a
//! single [`state::AppState`] (task store, board, optional JSON snapshot)
//! and serves the task and board routes over HTTP/JSON.

pub mod config;
pub mod http;
pub mod persist;
pub mod state;
