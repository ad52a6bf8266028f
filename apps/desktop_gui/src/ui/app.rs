use std::time::Duration;

use client_core::view::{submit_button_label, EMPTY_DIRECTORY_TEXT};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::SHORT_CODE_MAX_LEN;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_command, reducer::GuiState,
};
use crate::ui::theme::{notice_palette, ACCENT, DANGER, HEADER_FILL};

const CARD_MAX_WIDTH: f32 = 960.0;
const ORIGINAL_URL_MAX_CHARS: usize = 48;

pub struct TinyLinkApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: GuiState,
}

impl TinyLinkApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: GuiState::new(api_base_url),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) -> bool {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.notification)
    }

    fn submit(&mut self) {
        if let Some(cmd) = self.state.begin_submit() {
            if !self.dispatch(cmd) {
                self.state.submitting = false;
            }
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::NONE
                    .fill(HEADER_FILL)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("TinyLink")
                            .strong()
                            .size(20.0)
                            .color(egui::Color32::WHITE),
                    );
                    ui.label(
                        egui::RichText::new("Simple URL shortener")
                            .small()
                            .color(egui::Color32::LIGHT_GRAY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Backend: {}", self.state.api_base_url))
                                .monospace()
                                .small()
                                .color(egui::Color32::LIGHT_GRAY),
                        );
                    });
                });
            });
    }

    fn show_form_card(&mut self, ui: &mut egui::Ui) {
        card(ui, |ui| {
            ui.label(egui::RichText::new("Create Short Link").strong().size(18.0));
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("Long URL");
                ui.colored_label(DANGER, "*");
            });
            let url_resp = ui.add(
                egui::TextEdit::singleline(&mut self.state.url_input)
                    .hint_text("https://example.com/very/long/url")
                    .desired_width(f32::INFINITY),
            );
            let enter_pressed =
                url_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.horizontal(|ui| {
                ui.label("Custom code");
                ui.weak("(optional, 6-8 chars A-Z, a-z, 0-9)");
            });
            ui.add(
                egui::TextEdit::singleline(&mut self.state.code_input)
                    .char_limit(SHORT_CODE_MAX_LEN)
                    .hint_text("e.g. yt2025")
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(4.0);
            let submitting = self.state.submitting;
            let clicked = ui
                .horizontal(|ui| {
                    let clicked = ui
                        .add_enabled(
                            !submitting,
                            egui::Button::new(
                                egui::RichText::new(submit_button_label(submitting))
                                    .color(egui::Color32::WHITE),
                            )
                            .fill(ACCENT),
                        )
                        .clicked();
                    ui.weak("Leave custom code empty to auto-generate one.");
                    clicked
                })
                .inner;

            if clicked || (enter_pressed && !submitting) {
                self.submit();
            }

            self.show_message_box(ui);
        });
    }

    fn show_message_box(&self, ui: &mut egui::Ui) {
        let Some(notification) = &self.state.notification else {
            return;
        };
        let palette = notice_palette(notification.severity);
        ui.add_space(8.0);
        egui::Frame::NONE
            .fill(palette.fill)
            .stroke(egui::Stroke::new(1.0, palette.stroke))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(&notification.text).color(palette.text));
            });
    }

    fn show_links_card(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();

        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("All Links").strong().size(18.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Reload").clicked() {
                        actions.push(BackendCommand::Refresh);
                    }
                    ui.weak(self.state.table.total_label());
                });
            });
            ui.add_space(6.0);

            if self.state.table.is_empty() {
                ui.weak(EMPTY_DIRECTORY_TEXT);
                return;
            }

            egui::ScrollArea::horizontal().show(ui, |ui| {
                egui::Grid::new("links_table")
                    .num_columns(6)
                    .striped(true)
                    .spacing(egui::vec2(16.0, 8.0))
                    .show(ui, |ui| {
                        for header in [
                            "Code",
                            "Short URL",
                            "Original URL",
                            "Clicks",
                            "Last clicked",
                            "Actions",
                        ] {
                            ui.label(egui::RichText::new(header).strong());
                        }
                        ui.end_row();

                        for row in &self.state.table.rows {
                            ui.monospace(&row.code);
                            ui.horizontal(|ui| {
                                ui.hyperlink_to(&row.short_url, &row.short_url);
                                if ui.small_button("Copy").clicked() {
                                    actions.push(BackendCommand::CopyToClipboard {
                                        text: row.short_url.clone(),
                                    });
                                }
                            });
                            ui.hyperlink_to(
                                ellipsize(&row.original_url, ORIGINAL_URL_MAX_CHARS),
                                &row.original_url,
                            )
                            .on_hover_text(&row.original_url);
                            ui.label(row.clicks.to_string());
                            ui.weak(&row.last_clicked);
                            if ui
                                .button(egui::RichText::new("Delete").color(DANGER))
                                .clicked()
                            {
                                actions.push(BackendCommand::DeleteLink {
                                    code: row.code.clone(),
                                });
                            }
                            ui.end_row();
                        }
                    });
            });
        });

        for action in actions {
            self.dispatch(action);
        }
    }
}

fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::NONE
        .fill(ui.visuals().extreme_bg_color)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(20, 16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

impl eframe::App for TinyLinkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CARD_MAX_WIDTH);
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        self.show_form_card(ui);
                        ui.add_space(16.0);
                        self.show_links_card(ui);
                    });
                });
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
