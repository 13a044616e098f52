//! HTTP boundary: router, request/response shapes, and error mapping.
//!
//! The handlers parse requests, call into [`AppState`], and serialize JSON
//! responses. Error taxonomy: validation and malformed bodies map to 400,
//! unknown ids to 404, snapshot write failures to 500. Every request is
//! independent; no failure is fatal to the process.

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post, put};
use serde::{Deserialize, Serialize};

use taskboard_core::{FilterMode, GameStatus, Player, Task, TaskError, TaskId};

use crate::state::{AppState, StateError, TaskPage};

/// An error response: HTTP status plus a short plain-text message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<StateError> for ApiError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Task(task_err) => Self::from(task_err),
            StateError::Persist(persist_err) => {
                tracing::error!(error = %persist_err, "snapshot write failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "failed to persist tasks".to_string(),
                }
            }
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::TextEmpty | TaskError::TextTooLong => Self::bad_request(err.to_string()),
            TaskError::NotFound(_) => Self::not_found(err.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Query parameters for `GET /tasks`.
#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    filter: Option<String>,
    page: Option<usize>,
    limit: Option<usize>,
}

/// Body for `POST /tasks`.
#[derive(Debug, Deserialize)]
struct CreateTask {
    text: String,
}

/// Body for `PUT /tasks/{id}`: either `{"action":"toggle"}` or `{"text":...}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateTask {
    action: Option<String>,
    text: Option<String>,
}

/// Query parameters for bulk `DELETE /tasks`.
#[derive(Debug, Default, Deserialize)]
struct BulkDeleteQuery {
    completed: Option<String>,
}

/// Form body for `POST /play`.
#[derive(Debug, Deserialize)]
struct PlayForm {
    index: usize,
}

/// Response body for `GET /board`.
#[derive(Debug, Serialize)]
struct BoardView {
    cells: Vec<Option<Player>>,
    current_player: Player,
    winner: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /tasks` — filtered, optionally paginated task listing.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TaskPage>, ApiError> {
    let mode = query
        .filter
        .as_deref()
        .map(str::parse::<FilterMode>)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?
        .unwrap_or_default();

    Ok(Json(state.list_tasks(mode, query.page, query.limit).await))
}

/// `POST /tasks` — create a task. 201 with the record, 400 on bad input.
async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let task = state.add_task(&body.text).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /tasks/{id}` — toggle or edit. 200 with the record, 404 unknown id.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let id = TaskId::from_string(id);

    if let Some(text) = body.text {
        return Ok(Json(state.edit_task(&id, &text).await?));
    }
    match body.action.as_deref() {
        Some("toggle") => Ok(Json(state.toggle_task(&id).await?)),
        Some(other) => Err(ApiError::bad_request(format!("unknown action: {other}"))),
        None => Err(ApiError::bad_request(
            "body must contain \"text\" or {\"action\":\"toggle\"}",
        )),
    }
}

/// `DELETE /tasks/{id}` — 204 on removal, 404 if no record matched.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = TaskId::from_string(id);
    if state.remove_task(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("task not found: {id}")))
    }
}

/// `DELETE /tasks?completed=true` — bulk clear of completed tasks.
async fn delete_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BulkDeleteQuery>,
) -> Result<StatusCode, ApiError> {
    if query.completed.as_deref() != Some("true") {
        return Err(ApiError::bad_request(
            "bulk delete requires ?completed=true",
        ));
    }
    state.clear_completed().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /board` — current board state as JSON.
async fn board_state(State(state): State<Arc<AppState>>) -> Json<BoardView> {
    let board = state.board().await;
    let winner = match board.status() {
        GameStatus::InProgress => None,
        GameStatus::Won(player) => Some(player.to_string()),
        GameStatus::Draw => Some("Draw".to_string()),
    };
    Json(BoardView {
        cells: board.cells().to_vec(),
        current_player: board.current_player(),
        winner,
    })
}

/// `POST /play` — play a move for the current player, then redirect.
///
/// Rejected in-range moves (occupied cell, terminal state) are silent
/// no-ops; only a missing or unparseable index is a client error.
async fn play(
    State(state): State<Arc<AppState>>,
    payload: Result<Form<PlayForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    state.play_move(form.index).await;
    Ok(Redirect::to("/"))
}

/// `POST /restart` — reset the board, then redirect.
async fn restart(State(state): State<Arc<AppState>>) -> Redirect {
    state.restart_game().await;
    Redirect::to("/")
}

// ---------------------------------------------------------------------------
// Router and server entry points
// ---------------------------------------------------------------------------

/// Builds the application router over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(list_tasks).post(create_task).delete(delete_tasks),
        )
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route("/board", get(board_state))
        .route("/play", post(play))
        .route("/restart", post(restart))
        .with_state(state)
}

/// Starts the server on the given address and returns the bound address and
/// a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok((bound_addr, handle))
}
