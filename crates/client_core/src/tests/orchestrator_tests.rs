use super::*;

use std::{
    collections::HashMap,
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{PostId, User},
    error::{FailureKind, Resource},
};
use tokio::sync::Semaphore;

use crate::store::SharedStore;

struct FakeApi {
    posts: Result<Vec<Post>, FetchFailed>,
    users: HashMap<UserId, User>,
    user_requests: Mutex<Vec<UserId>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeApi {
    fn new(posts: Vec<Post>, users: Vec<User>) -> Self {
        Self {
            posts: Ok(posts),
            users: users.into_iter().map(|user| (user.id, user)).collect(),
            user_requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    fn failing_posts() -> Self {
        let mut api = Self::new(Vec::new(), Vec::new());
        api.posts = Err(FetchFailed::posts(FailureKind::Status(503), "unavailable"));
        api
    }

    /// Author fetches block until permits are added to the returned gate.
    fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    fn requested_users(&self) -> Vec<UserId> {
        self.user_requests.lock().expect("requests").clone()
    }
}

#[async_trait]
impl BlogApi for FakeApi {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchFailed> {
        self.posts.clone()
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, FetchFailed> {
        self.user_requests.lock().expect("requests").push(id);
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.expect("gate open");
        }
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| FetchFailed::user(id, FailureKind::Status(404), "no such user"))
    }
}

fn post(id: i64, user_id: i64, title: &str, body: &str) -> Post {
    Post {
        id: PostId(id),
        user_id: UserId(user_id),
        title: title.to_string(),
        body: body.to_string(),
    }
}

fn user(id: i64, name: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        username: None,
        email: None,
    }
}

#[test]
fn distinct_author_ids_preserve_first_appearance() {
    let posts = vec![
        post(1, 3, "a", ""),
        post(2, 1, "b", ""),
        post(3, 3, "c", ""),
        post(4, 2, "d", ""),
        post(5, 1, "e", ""),
    ];
    assert_eq!(
        distinct_author_ids(&posts),
        vec![UserId(3), UserId(1), UserId(2)]
    );
    assert!(distinct_author_ids(&[]).is_empty());
}

#[tokio::test]
async fn shared_author_is_fetched_exactly_once() {
    let posts = vec![post(1, 7, "A", "b"), post(2, 7, "C", "d")];
    let api = Arc::new(FakeApi::new(posts.clone(), vec![user(7, "Kurtis")]));
    let mut orchestrator = FetchOrchestrator::with_shared_api(Arc::clone(&api));
    let store = SharedStore::new();

    let dispatched = orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");
    let report = orchestrator.settle().await;

    assert_eq!(dispatched, vec![UserId(7)]);
    assert_eq!(api.requested_users(), vec![UserId(7)]);
    assert_eq!(report.completed, 1);

    let state = store.snapshot();
    assert_eq!(state.posts, posts);
    assert_eq!(state.users, vec![user(7, "Kurtis")]);
}

#[tokio::test]
async fn posts_failure_aborts_before_any_author_fetch() {
    let api = Arc::new(FakeApi::failing_posts());
    let mut orchestrator = FetchOrchestrator::with_shared_api(Arc::clone(&api));
    let store = SharedStore::new();

    let err = orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect_err("must fail");

    assert_eq!(err.resource, Resource::Posts);
    assert_eq!(err.kind, FailureKind::Status(503));
    assert_eq!(orchestrator.in_flight(), 0);
    assert!(api.requested_users().is_empty());
    assert_eq!(store.snapshot(), crate::store::AppState::default());
}

#[tokio::test]
async fn failing_author_does_not_block_siblings() {
    let posts = vec![
        post(1, 1, "a", ""),
        post(2, 2, "b", ""),
        post(3, 3, "c", ""),
    ];
    let api = FakeApi::new(posts, vec![user(1, "Leanne"), user(3, "Clementine")]);
    let mut orchestrator = FetchOrchestrator::new(api);
    let store = SharedStore::new();

    orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");
    let report = orchestrator.settle().await;

    assert_eq!(report.completed, 3);
    assert_eq!(report.cancelled, 0);

    let read = store.read();
    assert!(read.user(UserId(1)).is_some());
    assert!(read.user(UserId(2)).is_none());
    assert!(read.user(UserId(3)).is_some());
    assert_eq!(read.posts().len(), 3);
}

#[tokio::test]
async fn posts_are_visible_before_authors_resolve() {
    let posts = vec![post(1, 1, "a", ""), post(2, 2, "b", "")];
    let (api, gate) =
        FakeApi::new(posts, vec![user(1, "Leanne"), user(2, "Ervin")]).gated();
    let mut orchestrator = FetchOrchestrator::new(api);
    let store = SharedStore::new();

    orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");

    assert_eq!(store.read().posts().len(), 2);
    assert!(store.read().users().is_empty());
    assert_eq!(orchestrator.in_flight(), 2);

    gate.add_permits(2);
    let report = orchestrator.settle().await;

    assert_eq!(report.completed, 2);
    assert_eq!(store.read().users().len(), 2);
}

#[tokio::test]
async fn cancel_stops_in_flight_authors_from_mutating_state() {
    let posts = vec![post(1, 1, "a", ""), post(2, 2, "b", "")];
    let (api, gate) =
        FakeApi::new(posts, vec![user(1, "Leanne"), user(2, "Ervin")]).gated();
    let mut orchestrator = FetchOrchestrator::new(api);
    let store = SharedStore::new();

    orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");
    orchestrator.cancel();
    gate.add_permits(2);
    let report = orchestrator.settle().await;

    assert_eq!(report.cancelled, 2);
    assert_eq!(report.completed, 0);
    assert!(store.read().users().is_empty());
    assert_eq!(store.read().posts().len(), 2);
}

#[tokio::test]
async fn dropping_orchestrator_aborts_outstanding_fetches() {
    let posts = vec![post(1, 1, "a", "")];
    let (api, gate) = FakeApi::new(posts, vec![user(1, "Leanne")]).gated();
    let mut orchestrator = FetchOrchestrator::new(api);
    let store = SharedStore::new();

    orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");
    drop(orchestrator);
    gate.add_permits(1);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(store.read().users().is_empty());
}

#[tokio::test]
async fn finished_author_fetches_are_not_counted_in_flight() {
    let posts = vec![post(1, 1, "a", ""), post(2, 2, "b", "")];
    let api = FakeApi::new(posts, vec![user(1, "Leanne"), user(2, "Ervin")]);
    let mut orchestrator = FetchOrchestrator::new(api);
    let store = SharedStore::new();

    orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(store.read().users().len(), 2);
    assert_eq!(orchestrator.in_flight(), 0);

    let report = orchestrator.settle().await;
    assert_eq!(report.completed, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn nothing_is_dispatched_after_cancel_returns() {
    let posts: Vec<Post> = (1..=20).map(|id| post(id, id, "t", "")).collect();
    let users: Vec<User> = (1..=20).map(|id| user(id, "u")).collect();
    let (api, gate) = FakeApi::new(posts, users).gated();
    let mut orchestrator = FetchOrchestrator::new(api);
    let store = SharedStore::new();

    orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");
    gate.add_permits(20);
    orchestrator.cancel();
    let seen_at_cancel = store.read().users().len();
    orchestrator.settle().await;

    assert_eq!(store.read().users().len(), seen_at_cancel);
}

#[test]
fn closed_dispatch_gate_skips_dispatch() {
    let gate = DispatchGate::default();
    let mut runs = 0;

    assert!(gate.run_unless_closed(|| runs += 1));
    gate.clone().close();
    assert!(!gate.run_unless_closed(|| runs += 1));
    assert_eq!(runs, 1);
}

#[tokio::test]
async fn new_load_is_not_affected_by_an_earlier_cancel() {
    let posts = vec![post(1, 1, "a", "")];
    let api = FakeApi::new(posts, vec![user(1, "Leanne")]);
    let mut orchestrator = FetchOrchestrator::new(api);
    let store = SharedStore::new();

    orchestrator.cancel();
    orchestrator
        .load_posts_and_authors(&store)
        .await
        .expect("load");
    orchestrator.settle().await;

    assert_eq!(store.read().users().len(), 1);
}
