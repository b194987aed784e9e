use eframe::egui;

use brewhq_core::{WizardStep, DEFAULT_BRANCH};

use crate::app::{BrewApp, UiAction};

impl BrewApp {
    pub(crate) fn show_new_project(&mut self, ui: &mut egui::Ui) {
        let step = self.state.wizard.step();
        ui.heading(format!("Step {} of 2: {}", step.number(), step.title()));
        ui.separator();

        match step {
            WizardStep::Details => {
                egui::Grid::new("project_details")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Name:");
                        ui.text_edit_singleline(&mut self.state.wizard.form.name);
                        ui.end_row();

                        ui.label("Description:");
                        ui.text_edit_multiline(&mut self.state.wizard.form.description);
                        ui.end_row();
                    });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.push(UiAction::Back);
                    }
                    if ui.button("Next ➡").clicked() {
                        self.push(UiAction::WizardNext);
                    }
                });
            }
            WizardStep::ConnectRepository => {
                ui.label("Optionally connect a repository. Leave the name empty to skip.");
                ui.add_space(5.0);
                egui::Grid::new("connect_repository")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Repository:");
                        ui.text_edit_singleline(&mut self.repo_name);
                        ui.end_row();

                        ui.label("Branch:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.repo_branch)
                                .hint_text(DEFAULT_BRANCH),
                        );
                        ui.end_row();

                        ui.label("URL:");
                        ui.text_edit_singleline(&mut self.repo_url);
                        ui.end_row();
                    });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("⬅ Back").clicked() {
                        self.push(UiAction::WizardBack);
                    }
                    if ui.button("Create Project").clicked() {
                        self.push(UiAction::WizardFinish);
                    }
                });
            }
        }
    }
}
