use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{Post, User, UserId},
    error::{FailureKind, FetchFailed},
};
use thiserror::Error;
use tracing::debug;

use crate::config::{Settings, SettingsError};

/// Read-only access to the remote post/author collections.
#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchFailed>;
    async fn fetch_user(&self, id: UserId) -> Result<User, FetchFailed>;
}

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct JsonPlaceholderClient {
    http: Client,
    base_url: String,
}

impl JsonPlaceholderClient {
    pub fn new(base_url: &str) -> Result<Self, ClientBuildError> {
        let settings = Settings::default().with_api_base_url(base_url)?;
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientBuildError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        fail: impl Fn(FailureKind, String) -> FetchFailed,
    ) -> Result<T, FetchFailed> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| fail(FailureKind::Transport, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(
                FailureKind::Status(status.as_u16()),
                format!("GET {url} returned {status}"),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| fail(FailureKind::Decode, format!("invalid payload from {url}: {err}")))
    }
}

#[async_trait]
impl BlogApi for JsonPlaceholderClient {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchFailed> {
        self.get_json("/posts", |kind, message| FetchFailed::posts(kind, message))
            .await
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, FetchFailed> {
        self.get_json(&format!("/users/{}", id.0), |kind, message| {
            FetchFailed::user(id, kind, message)
        })
        .await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
