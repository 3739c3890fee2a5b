use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    directory_view::ListState, events::UiEvent, modal::CloseTrigger, DirectoryController,
    UiAction,
};
use crate::ui::widgets;

const IDLE_REPAINT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

pub struct DirectoryGuiApp {
    controller: DirectoryController,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
}

impl DirectoryGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut controller = DirectoryController::new(cmd_tx);
        controller.start(Instant::now());
        Self {
            controller,
            ui_rx,
            server_url: startup.server_url,
        }
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle_event(event, now);
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("directory_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Capability Directory");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(self.controller.status()).weak());
                    ui.label(egui::RichText::new(&self.server_url).monospace().weak());
                });
            });
            if let Some(message) = self.controller.feedback().visible() {
                ui.add_space(4.0);
                widgets::feedback_banner(ui, message);
            }
            ui.add_space(6.0);
        });
    }

    fn show_directory(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::CentralPanel::default().show(ctx, |ui| match self.controller.list().state() {
            ListState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(crate::controller::directory_view::LOADING_NOTICE);
                });
            }
            ListState::Unavailable { notice } => {
                ui.label(egui::RichText::new(*notice).color(ui.visuals().error_fg_color));
            }
            ListState::Cards(cards) => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for card in cards {
                            widgets::capability_card(ui, card, actions);
                            ui.add_space(10.0);
                        }
                    });
            }
        });
    }

    fn show_registration_modal(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let Some(label) = self.controller.modal().session().map(|s| s.label()) else {
            return;
        };
        let focus = self.controller.take_focus_request();

        let modal = egui::Modal::new(egui::Id::new("registration_modal")).show(ctx, |ui| {
            ui.set_width(360.0);
            ui.heading("Register Expertise");
            ui.label(label);
            ui.add_space(8.0);

            let mut submitted = false;
            if let Some(email) = self.controller.email_input_mut() {
                let response = ui.add(
                    egui::TextEdit::singleline(email)
                        .id(egui::Id::new("registration_email"))
                        .hint_text("consultant@example.com")
                        .desired_width(f32::INFINITY),
                );
                if focus {
                    response.request_focus();
                }
                submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Register").clicked() {
                    submitted = true;
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::CloseModal(CloseTrigger::CloseControl));
                }
            });
            if submitted {
                actions.push(UiAction::SubmitRegistration);
            }
        });

        if modal.backdrop_response.clicked() {
            actions.push(UiAction::CloseModal(CloseTrigger::Backdrop));
        }
    }
}

impl eframe::App for DirectoryGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);
        self.controller.tick(now);

        let mut actions = Vec::new();
        if self.controller.modal().is_open() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            actions.push(UiAction::CloseModal(CloseTrigger::Escape));
        }

        self.show_header(ctx);
        self.show_directory(ctx, &mut actions);
        self.show_registration_modal(ctx, &mut actions);

        for action in actions {
            self.controller.handle_action(action, now);
        }

        let wait = self
            .controller
            .time_until_next_timer(Instant::now())
            .map_or(IDLE_REPAINT, |due| due.min(IDLE_REPAINT));
        ctx.request_repaint_after(wait);
    }
}
