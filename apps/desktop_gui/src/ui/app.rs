use client_core::{
    views::{self, DeleteDecision},
    Action, Navigator, Route, Store,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::{overlay, screens};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub initial_path: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

pub struct BlogBrowserApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    action_rx: Receiver<Action>,

    store: Store,
    navigator: Navigator,
    address: String,

    /// Set the first time the list screen mounts; the load is never re-issued.
    list_load_requested: bool,
    posts_failed: bool,

    status: String,
    status_banner: Option<StatusBanner>,
}

impl BlogBrowserApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        action_rx: Receiver<Action>,
        startup: StartupConfig,
    ) -> Self {
        let navigator = Navigator::new(Route::resolve(&startup.initial_path));
        Self {
            cmd_tx,
            ui_rx,
            action_rx,
            store: Store::new(),
            address: navigator.current().path(),
            navigator,
            list_load_requested: false,
            posts_failed: false,
            status: "Starting".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        for action in self.action_rx.try_iter() {
            self.store.apply(action);
        }
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    if err.wants_banner() {
                        self.posts_failed = true;
                        self.status_banner = Some(StatusBanner {
                            message: self.status.clone(),
                        });
                    }
                }
            }
        }
    }

    fn ensure_list_loaded(&mut self) {
        if self.list_load_requested {
            return;
        }
        self.list_load_requested = true;
        self.status = "Loading posts".to_string();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LoadPostsAndAuthors,
            &mut self.status,
        );
    }

    fn navigate(&mut self, route: Route) {
        self.navigator.push(route);
        self.address = self.navigator.current().path();
    }

    fn go_back(&mut self) {
        if self.navigator.back() {
            self.address = self.navigator.current().path();
        }
    }

    fn go_forward(&mut self) {
        if self.navigator.forward() {
            self.address = self.navigator.current().path();
        }
    }

    fn answer_delete(&mut self, id: &str, decision: DeleteDecision) {
        if decision == DeleteDecision::Confirm {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::ConfirmDelete { id: id.to_string() },
                &mut self.status,
            );
        }
        if let Some(next) = decision.next_route() {
            self.navigate(next);
        }
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.navigator.can_go_back(), egui::Button::new("<"))
                    .on_hover_text("Back")
                    .clicked()
                {
                    self.go_back();
                }
                if ui
                    .add_enabled(self.navigator.can_go_forward(), egui::Button::new(">"))
                    .on_hover_text("Forward")
                    .clicked()
                {
                    self.go_forward();
                }
                if ui.button("Posts").clicked() {
                    self.navigate(Route::List);
                }

                let address = ui.add(
                    egui::TextEdit::singleline(&mut self.address)
                        .desired_width(260.0)
                        .hint_text("/show/1"),
                );
                let submitted =
                    address.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Go").clicked() || submitted {
                    let path = self.address.trim().to_string();
                    self.navigate(Route::resolve(&path));
                }
            });
            ui.add_space(4.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!(
                        "{} posts, {} authors",
                        self.store.posts().len(),
                        self.store.users().len()
                    ));
                });
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = &self.status_banner else {
            return;
        };
        let mut dismissed = false;
        egui::Frame::new()
            .fill(egui::Color32::from_rgb(255, 246, 246))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(224, 180, 180)))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(159, 58, 56), banner.message.as_str());
                    if ui.small_button("x").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.status_banner = None;
        }
        ui.add_space(8.0);
    }

    fn show_screen(&mut self, ui: &mut egui::Ui, route: &Route) -> Option<Route> {
        match route {
            Route::List => {
                self.ensure_list_loaded();
                let rows = views::list_rows(self.store.state());
                let loading = self.store.posts().is_empty() && !self.posts_failed;
                screens::show_list(ui, &rows, loading)
            }
            Route::Show { id } => {
                screens::show_detail(ui, &views::detail_view(self.store.state(), id))
            }
            Route::NotFound { path } => screens::show_not_found(ui, path),
            Route::Delete { .. } => None,
        }
    }
}

impl eframe::App for BlogBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_nav_bar(ctx);
        self.show_status_bar(ctx);

        let current = self.navigator.current().clone();
        let underlay = if current.is_overlay() {
            self.navigator.underlay()
        } else {
            current.clone()
        };

        let mut navigate_to = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            navigate_to = self.show_screen(ui, &underlay);
        });

        if let Route::Delete { id } = &current {
            let prompt = views::delete_prompt(self.store.state(), id);
            if let Some(decision) = overlay::show_delete_overlay(ctx, &prompt) {
                self.answer_delete(id, decision);
            }
        } else if let Some(route) = navigate_to {
            self.navigate(route);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

impl Drop for BlogBrowserApp {
    fn drop(&mut self) {
        // Cancels in-flight author fetches; the store is going away with us.
        match self.cmd_tx.try_send(BackendCommand::Shutdown) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("command queue full; backend will stop when the queue disconnects");
            }
        }
    }
}
