//! Card and banner widgets. Every string goes through a plain label, so
//! directory content is never interpreted as markup.

use eframe::egui;
use shared::domain::FeedbackKind;

use crate::controller::{
    directory_view::{CapabilityCard, RosterSection},
    feedback::FeedbackMessage,
    UiAction,
};

fn banner_colors(kind: FeedbackKind) -> (egui::Color32, egui::Stroke) {
    match kind {
        FeedbackKind::Success => (
            egui::Color32::from_rgb(40, 92, 60),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(86, 160, 112)),
        ),
        FeedbackKind::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
    }
}

pub fn feedback_banner(ui: &mut egui::Ui, message: &FeedbackMessage) {
    let (fill, stroke) = banner_colors(message.kind);
    egui::Frame::new()
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&message.text).color(egui::Color32::WHITE));
        });
}

fn field_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.label(value);
    });
}

pub fn capability_card(ui: &mut egui::Ui, card: &CapabilityCard, actions: &mut Vec<UiAction>) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading(&card.title);
            ui.label(&card.description);
            ui.add_space(6.0);

            field_row(ui, "Practice Area:", &card.practice_area);
            field_row(ui, "Industry Verticals:", &card.industry_verticals);
            field_row(ui, "Capacity:", &card.capacity);
            ui.add_space(6.0);

            ui.label(egui::RichText::new(&card.team).strong());
            match &card.roster {
                RosterSection::Empty { notice } => {
                    ui.label(egui::RichText::new(*notice).italics().weak());
                }
                RosterSection::Members(entries) => {
                    for entry in entries {
                        ui.horizontal(|ui| {
                            ui.label(&entry.email);
                            if ui.small_button("Remove").clicked() {
                                actions.push(UiAction::Unregister(entry.remove.clone()));
                            }
                        });
                    }
                }
            }

            ui.add_space(8.0);
            if ui.button("Register Expertise").clicked() {
                actions.push(UiAction::OpenRegistration(card.register.clone()));
            }
        });
}
