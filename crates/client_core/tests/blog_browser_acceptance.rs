use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use client_core::{
    views::{detail_view, list_rows},
    FetchOrchestrator, JsonPlaceholderClient, Route, SharedStore,
};
use serde_json::json;
use shared::domain::{PostId, UserId};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct RemoteState {
    user_hits: Arc<Mutex<HashMap<i64, usize>>>,
    post_hits: Arc<Mutex<usize>>,
}

async fn posts(State(state): State<RemoteState>) -> impl IntoResponse {
    *state.post_hits.lock().expect("hits") += 1;
    Json(json!([
        { "id": 1, "userId": 7, "title": "A", "body": "b" },
        { "id": 2, "userId": 7, "title": "C", "body": "d" }
    ]))
}

async fn user(State(state): State<RemoteState>, Path(id): Path<i64>) -> axum::response::Response {
    *state.user_hits.lock().expect("hits").entry(id).or_default() += 1;
    if id == 7 {
        Json(json!({ "id": 7, "name": "Kurtis Weissnat", "website": "elvis.io" })).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn spawn_remote() -> anyhow::Result<(String, RemoteState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = RemoteState::default();
    let app = Router::new()
        .route("/posts", get(posts))
        .route("/users/:id", get(user))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

#[tokio::test]
async fn two_posts_by_one_author_fetch_that_author_once() {
    let (base_url, remote) = spawn_remote().await.expect("spawn remote");
    let client = JsonPlaceholderClient::new(&base_url).expect("client");
    let mut orchestrator = FetchOrchestrator::new(client);
    let store = SharedStore::new();

    let dispatched = orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");
    let report = orchestrator.settle().await;

    assert_eq!(dispatched, vec![UserId(7)]);
    assert_eq!(report.completed, 1);
    assert_eq!(*remote.post_hits.lock().expect("hits"), 1);
    assert_eq!(
        remote.user_hits.lock().expect("hits").clone(),
        HashMap::from([(7, 1)])
    );

    let state = store.snapshot();
    assert_eq!(
        state.posts.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![PostId(1), PostId(2)]
    );
    assert_eq!(state.users.len(), 1);

    let rows = list_rows(&state);
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|row| row.author.as_deref() == Some("Kurtis Weissnat")));

    let Route::Show { id } = Route::resolve(&rows[1].show_path) else {
        panic!("row should link to the detail screen");
    };
    assert_eq!(detail_view(&state, &id).title, "C");
}
