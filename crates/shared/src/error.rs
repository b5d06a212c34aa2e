use std::fmt;

use thiserror::Error;

use crate::domain::UserId;

/// Remote resource a fetch was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Posts,
    User(UserId),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Posts => f.write_str("posts"),
            Resource::User(id) => write!(f, "user {id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a response (DNS, connect, timeout).
    Transport,
    /// The remote answered with a non-success status.
    Status(u16),
    /// The body could not be decoded into the expected record shape.
    Decode,
}

#[derive(Debug, Clone, Error)]
#[error("failed to fetch {resource}: {message}")]
pub struct FetchFailed {
    pub resource: Resource,
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailed {
    pub fn posts(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            resource: Resource::Posts,
            kind,
            message: message.into(),
        }
    }

    pub fn user(id: UserId, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            resource: Resource::User(id),
            kind,
            message: message.into(),
        }
    }

    pub fn id(&self) -> Option<UserId> {
        match self.resource {
            Resource::Posts => None,
            Resource::User(id) => Some(id),
        }
    }
}
