//! Route screens. Each returns the route the user asked to navigate to, if any.

use client_core::{
    views::{DetailView, PostRow},
    Route,
};
use eframe::egui;

const DELETE_RED: egui::Color32 = egui::Color32::from_rgb(219, 40, 40);
const LINK_BLUE: egui::Color32 = egui::Color32::from_rgb(33, 133, 208);

pub fn show_list(ui: &mut egui::Ui, rows: &[PostRow], loading: bool) -> Option<Route> {
    let mut navigate_to = None;

    if rows.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            if loading {
                ui.spinner();
            } else {
                ui.weak("No posts");
            }
        });
        return None;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in rows {
                ui.push_id(row.post_id.0, |ui| {
                    if let Some(route) = post_row(ui, row) {
                        navigate_to = Some(route);
                    }
                });
                ui.separator();
            }
        });

    navigate_to
}

fn post_row(ui: &mut egui::Ui, row: &PostRow) -> Option<Route> {
    let mut navigate_to = None;
    ui.add_space(4.0);
    ui.label(egui::RichText::new(row.title.as_str()).strong().size(16.0));
    ui.label(row.body.as_str());
    if let Some(author) = &row.author {
        ui.label(egui::RichText::new(author.as_str()).italics());
    }
    ui.horizontal(|ui| {
        if ui
            .button(egui::RichText::new("Details").color(LINK_BLUE))
            .clicked()
        {
            navigate_to = Some(Route::resolve(&row.show_path));
        }
        if ui
            .button(egui::RichText::new("Delete").color(DELETE_RED))
            .clicked()
        {
            navigate_to = Some(Route::resolve(&row.delete_path));
        }
    });
    ui.add_space(4.0);
    navigate_to
}

pub fn show_detail(ui: &mut egui::Ui, view: &DetailView) -> Option<Route> {
    ui.heading("Show Item");
    ui.add_space(8.0);
    if !view.is_empty() {
        ui.label(egui::RichText::new(view.title.as_str()).strong().size(16.0));
        ui.label(view.body.as_str());
    }
    ui.add_space(12.0);
    ui.button("Back to posts").clicked().then_some(Route::List)
}

pub fn show_not_found(ui: &mut egui::Ui, path: &str) -> Option<Route> {
    ui.heading("Not found");
    ui.label(format!("Nothing is served at {path:?}."));
    ui.add_space(12.0);
    ui.button("Back to posts").clicked().then_some(Route::List)
}
