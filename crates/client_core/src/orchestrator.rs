use std::{
    collections::HashSet,
    sync::{Arc, PoisonError, RwLock},
};

use shared::{
    domain::{Post, UserId},
    error::FetchFailed,
};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::{
    api::BlogApi,
    store::{Action, ActionSink},
};

/// Distinct author ids in order of first appearance.
pub fn distinct_author_ids(posts: &[Post]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .map(|post| post.user_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SettleReport {
    pub completed: usize,
    pub cancelled: usize,
    pub panicked: usize,
}

impl SettleReport {
    fn record(&mut self, result: Result<(), JoinError>) {
        match result {
            Ok(()) => self.completed += 1,
            Err(err) if err.is_cancelled() => self.cancelled += 1,
            Err(err) => {
                warn!("orchestrator: author fetch task panicked: {err}");
                self.panicked += 1;
            }
        }
    }
}

/// Shared by one load's author tasks. Closing waits for any dispatch that is
/// already running, so nothing is dispatched once `close` returns.
#[derive(Debug, Clone, Default)]
struct DispatchGate(Arc<RwLock<bool>>);

impl DispatchGate {
    fn close(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = true;
    }

    fn run_unless_closed(&self, dispatch: impl FnOnce()) -> bool {
        let closed = self.0.read().unwrap_or_else(PoisonError::into_inner);
        if *closed {
            return false;
        }
        dispatch();
        true
    }
}

/// Loads posts, then fans out one author fetch per distinct author.
///
/// Author fetches run as tasks in a group owned by the orchestrator, so the
/// owner can wait for them ([`settle`](Self::settle)) or abort them
/// ([`cancel`](Self::cancel)). Dropping the orchestrator aborts whatever is
/// still in flight.
pub struct FetchOrchestrator<A: BlogApi + 'static> {
    api: Arc<A>,
    authors: JoinSet<()>,
    gate: DispatchGate,
    /// Outcomes of tasks joined by `in_flight` before `settle` was called.
    reaped: SettleReport,
}

impl<A: BlogApi + 'static> FetchOrchestrator<A> {
    pub fn new(api: A) -> Self {
        Self::with_shared_api(Arc::new(api))
    }

    pub fn with_shared_api(api: Arc<A>) -> Self {
        Self {
            api,
            authors: JoinSet::new(),
            gate: DispatchGate::default(),
            reaped: SettleReport::default(),
        }
    }

    /// Returns once posts are dispatched and author fetches are spawned.
    /// Must be called from within a tokio runtime.
    pub async fn load_posts_and_authors<S>(&mut self, sink: &S) -> Result<Vec<UserId>, FetchFailed>
    where
        S: ActionSink + Clone,
    {
        let posts = match self.api.fetch_posts().await {
            Ok(posts) => posts,
            Err(err) => {
                warn!(resource = %err.resource, "orchestrator: posts fetch failed: {err}");
                return Err(err);
            }
        };

        let author_ids = distinct_author_ids(&posts);
        info!(
            post_count = posts.len(),
            author_count = author_ids.len(),
            "orchestrator: posts loaded"
        );
        sink.dispatch(Action::PostsLoaded(posts));

        self.gate = DispatchGate::default();
        for &user_id in &author_ids {
            let api = Arc::clone(&self.api);
            let sink = sink.clone();
            let gate = self.gate.clone();
            self.authors.spawn(async move {
                match api.fetch_user(user_id).await {
                    Ok(user) => {
                        if !gate.run_unless_closed(|| sink.dispatch(Action::UserLoaded(user))) {
                            debug!(user_id = user_id.0, "orchestrator: cancelled; author dropped");
                        }
                    }
                    Err(err) => {
                        warn!(user_id = user_id.0, "orchestrator: author fetch failed: {err}");
                    }
                }
            });
        }

        Ok(author_ids)
    }

    /// Author fetches that have not finished yet. Finished tasks are joined
    /// here and their outcomes carried into the next [`settle`](Self::settle).
    pub fn in_flight(&mut self) -> usize {
        while let Some(result) = self.authors.try_join_next() {
            self.reaped.record(result);
        }
        self.authors.len()
    }

    pub async fn settle(&mut self) -> SettleReport {
        let mut report = std::mem::take(&mut self.reaped);
        while let Some(result) = self.authors.join_next().await {
            report.record(result);
        }
        report
    }

    /// No `UserLoaded` is dispatched after this returns, including from a task
    /// that is mid-poll on another worker thread.
    pub fn cancel(&mut self) {
        self.gate.close();
        if !self.authors.is_empty() {
            info!(in_flight = self.authors.len(), "orchestrator: cancelling author fetches");
        }
        self.authors.abort_all();
    }
}

impl<A: BlogApi + 'static> Drop for FetchOrchestrator<A> {
    fn drop(&mut self) {
        self.gate.close();
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
