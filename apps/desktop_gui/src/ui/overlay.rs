//! Delete confirmation drawn as a modal on its own layer above the current screen.

use client_core::views::{DeleteDecision, DeletePrompt};
use eframe::egui;

pub fn show_delete_overlay(ctx: &egui::Context, prompt: &DeletePrompt) -> Option<DeleteDecision> {
    let modal = egui::Modal::new(egui::Id::new("delete_post_overlay")).show(ctx, |ui| {
        ui.set_width(420.0);
        ui.heading(prompt.heading);
        ui.add_space(8.0);
        ui.label(prompt.message.as_str());
        ui.add_space(12.0);

        let mut decision = None;
        ui.horizontal(|ui| {
            if ui
                .button(egui::RichText::new("Delete").color(egui::Color32::from_rgb(219, 40, 40)))
                .clicked()
            {
                decision = Some(DeleteDecision::Confirm);
            }
            if ui.button("Cancel").clicked() {
                decision = Some(DeleteDecision::Cancel);
            }
        });
        decision
    });

    // Clicking the backdrop or pressing Escape dismisses, same as cancel.
    if modal.inner.is_none() && modal.should_close() {
        return Some(DeleteDecision::Cancel);
    }
    modal.inner
}
