//! Screen view-models derived from [`AppState`]. Lookups never fail: a missing
//! post or author degrades to an empty or generic rendering.

use shared::domain::PostId;

use crate::{router::Route, store::AppState};

pub const DELETE_HEADING: &str = "Delete This Post";
pub const DELETE_GENERIC_MESSAGE: &str = "Are you sure you want to delete this post?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub post_id: PostId,
    pub title: String,
    pub body: String,
    /// `None` until the author's record has been fetched.
    pub author: Option<String>,
    pub show_path: String,
    pub delete_path: String,
}

pub fn list_rows(state: &AppState) -> Vec<PostRow> {
    state
        .posts
        .iter()
        .map(|post| PostRow {
            post_id: post.id,
            title: post.title.clone(),
            body: post.body.clone(),
            author: state
                .users
                .iter()
                .find(|user| user.id == post.user_id)
                .map(|user| user.name.clone()),
            show_path: Route::show(post.id).path(),
            delete_path: Route::delete(post.id).path(),
        })
        .collect()
}

pub fn parse_post_id(param: &str) -> Option<PostId> {
    param.trim().parse::<i64>().ok().map(PostId)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub body: String,
}

impl DetailView {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }
}

/// Looks the post up by its `id` field, not by its position in the collection.
pub fn detail_view(state: &AppState, id_param: &str) -> DetailView {
    parse_post_id(id_param)
        .and_then(|id| state.posts.iter().find(|post| post.id == id))
        .map(|post| DetailView {
            title: post.title.clone(),
            body: post.body.clone(),
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub heading: &'static str,
    pub message: String,
    /// Parsed route id, present even if the post itself is not loaded.
    pub post_id: Option<PostId>,
}

/// Same lookup as [`detail_view`]: by post `id`, not by position.
pub fn delete_prompt(state: &AppState, id_param: &str) -> DeletePrompt {
    let post_id = parse_post_id(id_param);
    let message = post_id
        .and_then(|id| state.posts.iter().find(|post| post.id == id))
        .map(|post| {
            format!(
                "Are you sure you want to delete the post with title: {}",
                post.title
            )
        })
        .unwrap_or_else(|| DELETE_GENERIC_MESSAGE.to_string());

    DeletePrompt {
        heading: DELETE_HEADING,
        message,
        post_id,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    Confirm,
    Cancel,
}

impl DeleteDecision {
    /// Where the router goes after the overlay is answered.
    /// Confirming keeps the overlay open: deletion is only logged.
    pub fn next_route(self) -> Option<Route> {
        match self {
            DeleteDecision::Confirm => None,
            DeleteDecision::Cancel => Some(Route::List),
        }
    }
}

/// Records a confirmed delete. The remote collection is read-only, so nothing
/// is removed from either the remote source or the store.
pub fn log_delete_confirmation(id_param: &str) {
    tracing::info!(post_id = id_param, "delete confirmed; remote deletion is not performed");
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
