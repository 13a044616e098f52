//! Integration tests for the board HTTP routes.
//!
//! `POST /play` and `POST /restart` answer with a 303 redirect, so these
//! tests use a client with redirect-following disabled.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::redirect::Policy;
use serde_json::Value;
use taskboard_server::http;
use taskboard_server::state::AppState;

/// Starts an in-memory server and returns its base URL plus a client that
/// does not follow redirects.
async fn start_test_server() -> (String, reqwest::Client) {
    let state = Arc::new(AppState::in_memory(8));
    let (addr, _handle) = http::start_server("127.0.0.1:0", state)
        .await
        .expect("failed to start test server");
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("failed to build client");
    (format!("http://{addr}"), client)
}

async fn play(base: &str, client: &reqwest::Client, index: usize) -> StatusCode {
    client
        .post(format!("{base}/play"))
        .form(&[("index", index.to_string())])
        .send()
        .await
        .unwrap()
        .status()
}

async fn board(base: &str, client: &reqwest::Client) -> Value {
    client
        .get(format!("{base}/board"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn initial_board_is_empty() {
    let (base, client) = start_test_server().await;
    let state = board(&base, &client).await;

    assert_eq!(state["current_player"], "X");
    assert_eq!(state["winner"], Value::Null);
    let cells = state["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 9);
    assert!(cells.iter().all(Value::is_null));
}

#[tokio::test]
async fn play_responds_with_redirect() {
    let (base, client) = start_test_server().await;
    let status = play(&base, &client, 0).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let state = board(&base, &client).await;
    assert_eq!(state["cells"][0], "X");
    assert_eq!(state["current_player"], "O");
}

#[tokio::test]
async fn column_win_and_terminal_no_op() {
    let (base, client) = start_test_server().await;

    // play(0) X, play(1) O, play(3) X, play(4) O, play(6) X -> X wins 0-3-6.
    for index in [0, 1, 3, 4, 6] {
        assert_eq!(play(&base, &client, index).await, StatusCode::SEE_OTHER);
    }

    let state = board(&base, &client).await;
    assert_eq!(state["winner"], "X");

    // A further play(2) is a no-op: still redirects, board unchanged.
    assert_eq!(play(&base, &client, 2).await, StatusCode::SEE_OTHER);
    let after = board(&base, &client).await;
    assert_eq!(after, state);
}

#[tokio::test]
async fn occupied_cell_is_silent_no_op() {
    let (base, client) = start_test_server().await;
    play(&base, &client, 4).await;

    let before = board(&base, &client).await;
    assert_eq!(play(&base, &client, 4).await, StatusCode::SEE_OTHER);
    assert_eq!(board(&base, &client).await, before);
}

#[tokio::test]
async fn draw_reported_as_winner_draw() {
    let (base, client) = start_test_server().await;
    // X O X / X O O / O X X — full board, no line.
    for index in [0, 1, 2, 4, 3, 6, 7, 5, 8] {
        play(&base, &client, index).await;
    }
    let state = board(&base, &client).await;
    assert_eq!(state["winner"], "Draw");
}

#[tokio::test]
async fn missing_index_is_400() {
    let (base, client) = start_test_server().await;
    let resp = client
        .post(format!("{base}/play"))
        .form(&[("other", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unparseable_index_is_400() {
    let (base, client) = start_test_server().await;
    let resp = client
        .post(format!("{base}/play"))
        .form(&[("index", "five")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn restart_resets_the_board() {
    let (base, client) = start_test_server().await;
    for index in [0, 1, 3, 4, 6] {
        play(&base, &client, index).await;
    }

    let resp = client
        .post(format!("{base}/restart"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let state = board(&base, &client).await;
    assert_eq!(state["winner"], Value::Null);
    assert_eq!(state["current_player"], "X");
    assert!(state["cells"].as_array().unwrap().iter().all(Value::is_null));
}
