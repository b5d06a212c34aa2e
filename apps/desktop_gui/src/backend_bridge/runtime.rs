//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{
    views, Action, ActionSink, FetchOrchestrator, JsonPlaceholderClient, Settings,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Forwards store transitions from author fetch tasks to the UI thread,
/// which owns the store. The action queue must be unbounded: a transition
/// is only lost when the UI has gone away.
#[derive(Clone)]
pub struct UiActionSink {
    action_tx: Sender<Action>,
}

impl UiActionSink {
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }
}

impl ActionSink for UiActionSink {
    fn dispatch(&self, action: Action) {
        let name = action.name();
        if self.action_tx.send(action).is_err() {
            tracing::debug!(action = name, "ui gone; dropping transition");
        }
    }
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    action_tx: Sender<Action>,
    settings: Settings,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match JsonPlaceholderClient::from_settings(&settings) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("failed to build remote api client: {err}");
                    return;
                }
            };
            tracing::info!(base_url = client.base_url(), "backend: remote api client ready");

            let mut orchestrator = FetchOrchestrator::new(client);
            let sink = UiActionSink::new(action_tx);
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadPostsAndAuthors => {
                        tracing::info!("backend: load_posts_and_authors");
                        match orchestrator.load_posts_and_authors(&sink).await {
                            Ok(author_ids) => {
                                tracing::info!(
                                    author_count = author_ids.len(),
                                    "backend: author fetches dispatched"
                                );
                                let _ = ui_tx.try_send(UiEvent::Info("Posts loaded".to_string()));
                            }
                            Err(err) => {
                                tracing::error!("backend: load_posts_and_authors failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_fetch(
                                    UiErrorContext::LoadPosts,
                                    &err,
                                )));
                            }
                        }
                    }
                    BackendCommand::ConfirmDelete { id } => {
                        views::log_delete_confirmation(&id);
                        let _ = ui_tx.try_send(UiEvent::Info(format!(
                            "Delete of post {id} logged; nothing was removed"
                        )));
                    }
                    BackendCommand::Shutdown => {
                        tracing::info!("backend: shutdown requested");
                        break;
                    }
                }
            }

            orchestrator.cancel();
        });
    });
}
