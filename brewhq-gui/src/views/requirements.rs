use chrono::Local;
use eframe::egui;

use brewhq_core::{format_last_viewed, RequirementForm};

use crate::app::{BrewApp, UiAction};

impl BrewApp {
    pub(crate) fn show_requirements(&mut self, ui: &mut egui::Ui, project_id: u32) {
        let Some(project) = self.state.project(project_id) else {
            ui.label(format!("Project {} not found", project_id));
            return;
        };

        ui.horizontal(|ui| {
            ui.heading(format!("{} Requirements", project.name));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Analyse Requirement").clicked() {
                    self.requirement_form = Some(RequirementForm::default());
                }
                if ui.button("💬 Chat").clicked() {
                    self.pending_actions.push(UiAction::OpenChat(project_id));
                }
            });
        });
        ui.separator();

        let requirements = self.state.requirements_for(project_id);
        if requirements.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(egui::RichText::new("No requirements yet").heading());
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui
                        .add(egui::Button::new("💬 Ask Brewer\nChat about this project")
                            .min_size(egui::vec2(200.0, 60.0)))
                        .clicked()
                    {
                        self.pending_actions.push(UiAction::OpenChat(project_id));
                    }
                    if ui
                        .add(egui::Button::new("🔍 Analyse Requirement\nAdd the first requirement")
                            .min_size(egui::vec2(200.0, 60.0)))
                        .clicked()
                    {
                        self.requirement_form = Some(RequirementForm::default());
                    }
                });
            });
            return;
        }

        let now = Local::now();
        let mut actions = Vec::new();
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("requirements_grid")
                .num_columns(5)
                .striped(true)
                .spacing([20.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Impact");
                    ui.strong("Last viewed");
                    ui.strong("Edited by");
                    ui.label("");
                    ui.end_row();

                    for requirement in requirements {
                        ui.horizontal(|ui| {
                            if ui.link(requirement.name.as_str()).clicked() {
                                actions.push(UiAction::SelectRequirement(requirement.id.clone()));
                            }
                            if requirement.has_draft {
                                ui.colored_label(egui::Color32::from_rgb(220, 160, 0), "draft");
                            }
                        });
                        ui.label(format!("{}/5", requirement.impact_score));
                        ui.label(format_last_viewed(requirement.last_viewed, &now));
                        ui.label(requirement.edited_by.as_str());
                        if ui.small_button("🗑").on_hover_text("Delete requirement").clicked() {
                            actions.push(UiAction::RequestDeleteRequirement(
                                requirement.id.clone(),
                            ));
                        }
                        ui.end_row();
                    }
                });
        });
        self.pending_actions.extend(actions);
    }

    /// Modal form behind "Analyse Requirement"
    pub(crate) fn show_requirement_form(&mut self, ctx: &egui::Context) {
        let Some(form) = self.requirement_form.as_mut() else {
            return;
        };

        let mut open = true;
        let mut submit = false;
        let mut cancel = false;
        egui::Window::new("Analyse Requirement")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(500.0)
            .show(ctx, |ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut form.name);
                ui.add_space(5.0);

                ui.label("Value statement:");
                ui.add(
                    egui::TextEdit::multiline(&mut form.value_statement)
                        .hint_text("As a <user> I want <goal> so that <benefit>")
                        .desired_rows(3),
                );
                ui.add_space(5.0);

                ui.label("Acceptance criteria:");
                ui.add(egui::TextEdit::multiline(&mut form.acceptance_criteria).desired_rows(6));
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Analyse").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if submit {
            self.push(UiAction::SubmitRequirement);
        } else if cancel || !open {
            self.requirement_form = None;
        }
    }
}
