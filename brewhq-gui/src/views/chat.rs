use chrono::Local;
use eframe::egui;

use brewhq_core::{MessageRole, QUICK_SUGGESTIONS};

use crate::app::{BrewApp, UiAction};

impl BrewApp {
    /// Left panel with "New Chat" and earlier conversations
    pub(crate) fn show_chat_history(&mut self, ctx: &egui::Context, project_id: u32) {
        if self.state.chat().project_id() != Some(project_id) {
            self.push(UiAction::AttachChat(project_id));
            return;
        }

        let mut actions = Vec::new();
        egui::SidePanel::left("chat_history")
            .default_width(220.0)
            .show(ctx, |ui| {
                if ui.button("➕ New Chat").clicked() {
                    actions.push(UiAction::NewChat);
                }
                ui.separator();

                let chat = self.state.chat();
                if chat.history().is_empty() {
                    ui.label(egui::RichText::new("No previous chats").weak());
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for entry in chat.history() {
                        let selected = chat.selected_chat() == Some(entry.id);
                        let label = format!(
                            "{}\n{}",
                            entry.first_message,
                            entry.timestamp.with_timezone(&Local).format("%b %-d %H:%M")
                        );
                        if ui.selectable_label(selected, label).clicked() {
                            actions.push(UiAction::LoadChat(entry.id));
                        }
                    }
                });
            });
        self.pending_actions.extend(actions);
    }

    pub(crate) fn show_chat(&mut self, ui: &mut egui::Ui, project_id: u32) {
        let name = self
            .state
            .project(project_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Project {}", project_id));
        ui.heading(format!("Ask about {}", name));
        ui.separator();

        let mut send = None;
        let awaiting = self.state.chat().is_awaiting_reply();

        egui::TopBottomPanel::bottom("chat_input")
            .resizable(false)
            .show_inside(ui, |ui| {
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    let can_send = self.state.chat().can_send();
                    let width = ui.available_width() - 80.0;
                    let input = &mut self.state.chat_mut().input;
                    let response = ui.add(
                        egui::TextEdit::singleline(input)
                            .hint_text("Ask a question about this project...")
                            .desired_width(width),
                    );
                    let enter = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.add_enabled(can_send, egui::Button::new("Send")).clicked()
                        || (enter && can_send)
                    {
                        send = Some(input.clone());
                    }
                });
                ui.add_space(5.0);
            });

        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let messages = self.state.chat().messages();
                if messages.is_empty() {
                    ui.add_space(20.0);
                    ui.label(egui::RichText::new("Try asking:").weak());
                    for suggestion in QUICK_SUGGESTIONS {
                        if ui.button(suggestion).clicked() && !awaiting {
                            send = Some(suggestion.to_string());
                        }
                    }
                }

                for message in messages {
                    let (who, color) = match message.role {
                        MessageRole::User => ("You", egui::Color32::from_rgb(100, 150, 255)),
                        MessageRole::Assistant => {
                            ("Assistant", egui::Color32::from_rgb(120, 200, 120))
                        }
                    };
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(color, egui::RichText::new(who).strong());
                            ui.label(
                                egui::RichText::new(
                                    message
                                        .timestamp
                                        .with_timezone(&Local)
                                        .format("%H:%M")
                                        .to_string(),
                                )
                                .weak(),
                            );
                        });
                        ui.label(message.content.as_str());
                    });
                }

                if awaiting {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new("Thinking...").weak());
                    });
                }
            });

        if let Some(text) = send {
            self.push(UiAction::SendMessage(text));
        }
    }
}
