use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use shared::domain::{Post, PostId, User, UserId};
use tokio::sync::mpsc::UnboundedSender;

/// Everything the screens read. Both collections start empty and only change
/// through [`reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub posts: Vec<Post>,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PostsLoaded(Vec<Post>),
    UserLoaded(User),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::PostsLoaded(_) => "posts_loaded",
            Action::UserLoaded(_) => "user_loaded",
        }
    }
}

pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::PostsLoaded(posts) => {
            state.posts = posts;
        }
        // Append only; duplicate authors are filtered before dispatch.
        Action::UserLoaded(user) => {
            state.users.push(user);
        }
    }
    state
}

#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) {
        tracing::trace!(action = action.name(), "store: apply");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn posts(&self) -> &[Post] {
        &self.state.posts
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.state.posts.iter().find(|post| post.id == id)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.state.users.iter().find(|user| user.id == id)
    }
}

/// Receives the transitions produced by the fetch orchestrator.
pub trait ActionSink: Send + Sync + 'static {
    fn dispatch(&self, action: Action);
}

impl ActionSink for UnboundedSender<Action> {
    fn dispatch(&self, action: Action) {
        if self.send(action).is_err() {
            tracing::debug!("action receiver dropped; discarding transition");
        }
    }
}

/// A [`Store`] shared between the orchestrator's tasks and a reader on another task.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> AppState {
        self.read().state().clone()
    }
}

impl ActionSink for SharedStore {
    fn dispatch(&self, action: Action) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(action);
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
