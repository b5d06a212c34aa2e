//! UI/backend events and error modeling for desktop GUI controller.

use shared::error::{FailureKind, FetchFailed};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Decode,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadPosts,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_fetch(context: UiErrorContext, err: &FetchFailed) -> Self {
        let category = match err.kind {
            FailureKind::Transport => UiErrorCategory::Transport,
            FailureKind::Status(_) => UiErrorCategory::Server,
            FailureKind::Decode => UiErrorCategory::Decode,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("dns")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid payload") || message_lower.contains("decode") {
            UiErrorCategory::Decode
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Errors that leave the screen without data get a persistent banner.
    pub fn wants_banner(&self) -> bool {
        matches!(
            self.context,
            UiErrorContext::BackendStartup | UiErrorContext::LoadPosts
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Decode => "Unexpected response",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
