use eframe::egui;

use brewhq_core::DEFAULT_BRANCH;

use crate::app::{BrewApp, UiAction};

impl BrewApp {
    pub(crate) fn show_projects(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Projects");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("➕ New Project").clicked() {
                    self.push(UiAction::StartNewProject);
                }
            });
        });
        ui.separator();

        if self.state.projects().is_empty() {
            ui.label("No projects yet. Create one to get started.");
            return;
        }

        let mut actions = Vec::new();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for project in self.state.projects() {
                let expanded = self.state.view.is_expanded(project.id);
                let favorite = self.state.view.is_favorite(project.id);

                ui.horizontal(|ui| {
                    let arrow = if expanded { "▾" } else { "▸" };
                    if ui.small_button(arrow).clicked() {
                        actions.push(UiAction::ToggleExpanded(project.id));
                    }
                    let star = if favorite { "★" } else { "☆" };
                    if ui.small_button(star).on_hover_text("Favorite").clicked() {
                        actions.push(UiAction::ToggleFavorite(project.id));
                    }
                    if ui
                        .link(egui::RichText::new(project.name.as_str()).strong())
                        .clicked()
                    {
                        actions.push(UiAction::OpenProject(project.id));
                    }
                    ui.label(egui::RichText::new(project.description.as_str()).weak());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🗑").on_hover_text("Delete project").clicked() {
                            actions.push(UiAction::RequestDeleteProject(project.id));
                        }
                        if ui.button("💬 Chat").clicked() {
                            actions.push(UiAction::OpenChat(project.id));
                        }
                        ui.label(format!("{} repositories", project.repositories.len()));
                    });
                });

                if expanded {
                    ui.indent(("repos", project.id), |ui| {
                        if project.repositories.is_empty() {
                            ui.label(egui::RichText::new("No repositories connected").italics());
                        }
                        for repo in &project.repositories {
                            ui.horizontal(|ui| {
                                ui.label(repo.name.as_str());
                                ui.label(
                                    egui::RichText::new(format!("({})", repo.branch)).weak(),
                                );
                                if ui.link(repo.url.as_str()).clicked() {
                                    actions.push(UiAction::OpenUrl(repo.url.clone()));
                                }
                                if ui.small_button("🗑").on_hover_text("Remove repository").clicked()
                                {
                                    actions.push(UiAction::RequestDeleteRepository(
                                        project.id,
                                        repo.name.clone(),
                                    ));
                                }
                            });
                        }

                        if self.adding_repository == Some(project.id) {
                            ui.horizontal(|ui| {
                                ui.add(
                                    egui::TextEdit::singleline(&mut self.repo_name)
                                        .hint_text("Name")
                                        .desired_width(140.0),
                                );
                                ui.add(
                                    egui::TextEdit::singleline(&mut self.repo_branch)
                                        .hint_text(DEFAULT_BRANCH)
                                        .desired_width(80.0),
                                );
                                ui.add(
                                    egui::TextEdit::singleline(&mut self.repo_url)
                                        .hint_text("URL")
                                        .desired_width(220.0),
                                );
                                let ready = !self.repo_name.trim().is_empty();
                                if ui.add_enabled(ready, egui::Button::new("Add")).clicked() {
                                    actions.push(UiAction::AddRepository(project.id));
                                }
                                if ui.button("Cancel").clicked() {
                                    self.adding_repository = None;
                                }
                            });
                        } else if ui.small_button("➕ Add repository").clicked() {
                            self.adding_repository = Some(project.id);
                            self.repo_name.clear();
                            self.repo_branch.clear();
                            self.repo_url.clear();
                        }
                    });
                }
                ui.separator();
            }
        });
        self.pending_actions.extend(actions);
    }
}
