//! Data access, state and navigation for the blog browser.
//!
//! Front ends construct one [`Store`] (or [`SharedStore`]) at startup, drive a
//! [`FetchOrchestrator`] against a [`BlogApi`] implementation, and render the
//! screen named by the current [`Route`] through the view-models in [`views`].

pub mod api;
pub mod config;
pub mod orchestrator;
pub mod router;
pub mod store;
pub mod views;

pub use api::{BlogApi, JsonPlaceholderClient};
pub use config::{Settings, SettingsError};
pub use orchestrator::{distinct_author_ids, FetchOrchestrator, SettleReport};
pub use router::{Navigator, Route};
pub use store::{reduce, Action, ActionSink, AppState, SharedStore, Store};
