//! UI layer for desktop GUI: app shell, route screens and the delete overlay.

pub mod app;
pub mod overlay;
pub mod screens;

pub use app::{BlogBrowserApp, StartupConfig};
