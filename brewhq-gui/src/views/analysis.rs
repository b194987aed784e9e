use chrono::Local;
use eframe::egui;

use brewhq_core::{
    ActionKind, CitationDetail, ImpactReview, ItemKind, ItemRef, ItemState, Severity,
};

use crate::app::{BrewApp, ReviewAction, UiAction};

/// Snapshot of one item row, taken before drawing so the editor can
/// borrow the review mutably
struct ItemRow {
    target: ItemRef,
    text: String,
    state: ItemState,
    manual: bool,
    citation: Option<usize>,
}

fn rows(review: &ImpactReview, kind: ItemKind) -> Vec<ItemRow> {
    let analysis = review.analysis();
    analysis
        .items()
        .into_iter()
        .filter(|item| item.kind == kind)
        .map(|target| ItemRow {
            text: review.display_text(&target).unwrap_or_default(),
            state: review.item_state(&target),
            manual: analysis.is_manual(&target) == Some(true),
            citation: review.citation_number(&target),
            target,
        })
        .collect()
}

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::High => egui::Color32::from_rgb(220, 50, 50),
        Severity::Medium => egui::Color32::from_rgb(220, 160, 0),
        Severity::Low => egui::Color32::from_rgb(80, 160, 80),
    }
}

static SECTIONS: [(ItemKind, &str); 5] = [
    (ItemKind::Dependency, "Dependencies"),
    (ItemKind::Risk, "Risks"),
    (ItemKind::Ui, "UI/UX Impacts"),
    (ItemKind::Code, "Code Impacts"),
    (ItemKind::Data, "Data Impacts"),
];

impl BrewApp {
    pub(crate) fn show_analysis(&mut self, ui: &mut egui::Ui) {
        let Some(review) = self.state.review() else {
            ui.label("No analysis open.");
            return;
        };

        let requirement = review.requirement().clone();
        let summary = review.analysis().executive_summary.clone();
        let criteria = review.acceptance_criteria().to_string();
        let pending = review.pending().len();
        let sections: Vec<(ItemKind, &str, Vec<ItemRow>)> = SECTIONS
            .iter()
            .map(|(kind, title)| (*kind, *title, rows(review, *kind)))
            .collect();

        ui.horizontal(|ui| {
            ui.heading(requirement.display_name());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("📜 Activity Log").clicked() {
                    self.pending_actions
                        .push(UiAction::Review(ReviewAction::ToggleLog));
                }
                if ui
                    .add_enabled(pending > 0, egui::Button::new("Accept All"))
                    .clicked()
                {
                    self.pending_actions.push(UiAction::AcceptAll);
                }
                let label = format!("Review Changes ({})", pending);
                if ui.add_enabled(pending > 0, egui::Button::new(label)).clicked() {
                    self.pending_actions
                        .push(UiAction::Review(ReviewAction::OpenPanel));
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if !requirement.value_statement.is_empty() {
                ui.label(egui::RichText::new(requirement.value_statement.as_str()).italics());
            }
            ui.collapsing("Acceptance Criteria", |ui| {
                if criteria.trim().is_empty() {
                    ui.label(egui::RichText::new("None yet").weak());
                } else {
                    ui.label(criteria.as_str());
                }
            });

            ui.add_space(8.0);
            ui.group(|ui| {
                ui.strong("Executive Summary");
                ui.label(summary.as_str());
            });

            for (kind, title, items) in sections {
                ui.add_space(8.0);
                egui::CollapsingHeader::new(title)
                    .default_open(true)
                    .show(ui, |ui| {
                        for row in items {
                            self.show_item_row(ui, row);
                        }
                        self.show_add_item(ui, kind);
                    });
            }
        });
    }

    fn show_item_row(&mut self, ui: &mut egui::Ui, row: ItemRow) {
        let target = row.target.clone();
        let review = |action| UiAction::Review(action);

        if row.state == ItemState::Editing {
            ui.group(|ui| {
                ui.label(egui::RichText::new(format!("Editing {}", target.kind.label())).strong());
                if let Some(buffer) = self
                    .state
                    .review_mut()
                    .and_then(|r| r.edit_buffer_mut())
                {
                    ui.add(egui::TextEdit::multiline(buffer).desired_rows(3));
                }
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        self.pending_actions.push(review(ReviewAction::SubmitEdit));
                    }
                    if ui.button("Discard").clicked() {
                        self.pending_actions
                            .push(review(ReviewAction::Discard(target.clone())));
                    }
                });
            });
            return;
        }

        // Inline editor for a user-added item
        if let Some((editing, text)) = self.manual_edit.as_mut() {
            if *editing == target {
                let mut save = false;
                let mut cancel = false;
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(text);
                    save = ui.button("Save").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
                if save {
                    let text = text.clone();
                    self.pending_actions
                        .push(review(ReviewAction::UpdateManual(target, text)));
                } else if cancel {
                    self.manual_edit = None;
                }
                return;
            }
        }

        ui.horizontal(|ui| {
            match row.state {
                ItemState::Pending(ActionKind::Ignore) => {
                    ui.label(egui::RichText::new(row.text.as_str()).strikethrough().weak());
                }
                ItemState::Pending(ActionKind::Edit) => {
                    ui.label(egui::RichText::new(row.text.as_str()).underline());
                }
                _ => {
                    ui.label(row.text.as_str());
                }
            }
            if let Some(number) = row.citation {
                if ui.small_button(format!("[{}]", number)).clicked() {
                    self.citation_popup = Some(number);
                }
            }
            if row.manual {
                ui.label(egui::RichText::new("added").small().weak());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match row.state {
                    ItemState::Untouched | ItemState::Editing => {
                        if row.manual {
                            if ui.small_button("🗑").clicked() {
                                self.pending_actions
                                    .push(review(ReviewAction::RemoveManual(target.clone())));
                            }
                            if ui.small_button("✏").clicked() {
                                self.manual_edit = Some((target.clone(), row.text.clone()));
                            }
                        }
                        if ui.small_button("Ignore").clicked() {
                            self.pending_actions.push(review(ReviewAction::Stage(
                                target.clone(),
                                ActionKind::Ignore,
                            )));
                        }
                        if ui.small_button("Edit").clicked() {
                            self.pending_actions.push(review(ReviewAction::Stage(
                                target.clone(),
                                ActionKind::Edit,
                            )));
                        }
                    }
                    ItemState::Pending(kind) => {
                        if ui.small_button("Undo").clicked() {
                            self.pending_actions
                                .push(review(ReviewAction::Discard(target.clone())));
                        }
                        ui.label(egui::RichText::new(format!("pending {}", kind)).weak());
                    }
                    ItemState::Resolved(status) => {
                        if ui.small_button("Reconsider").clicked() {
                            self.pending_actions
                                .push(review(ReviewAction::Reconsider(target.clone())));
                        }
                        ui.label(egui::RichText::new(status.to_string()).weak());
                    }
                }
            });
        });
    }

    fn show_add_item(&mut self, ui: &mut egui::Ui, kind: ItemKind) {
        let form = &mut self.manual_form;
        let mut add = None;

        ui.horizontal(|ui| match kind {
            ItemKind::Risk => {
                ui.add(
                    egui::TextEdit::singleline(&mut form.risk_description)
                        .hint_text("New risk")
                        .desired_width(220.0),
                );
                egui::ComboBox::from_id_salt("new_risk_severity")
                    .selected_text(
                        egui::RichText::new(form.risk_severity.to_string())
                            .color(severity_color(form.risk_severity)),
                    )
                    .show_ui(ui, |ui| {
                        for severity in [Severity::High, Severity::Medium, Severity::Low] {
                            ui.selectable_value(
                                &mut form.risk_severity,
                                severity,
                                severity.to_string(),
                            );
                        }
                    });
                ui.add(
                    egui::TextEdit::singleline(&mut form.risk_mitigation)
                        .hint_text("Mitigation")
                        .desired_width(220.0),
                );
                if ui
                    .add_enabled(
                        !form.risk_description.trim().is_empty(),
                        egui::Button::new("Add"),
                    )
                    .clicked()
                {
                    add = Some(ReviewAction::AddRisk);
                }
            }
            ItemKind::Dependency => {
                ui.add(
                    egui::TextEdit::singleline(&mut form.dependency)
                        .hint_text("New dependency")
                        .desired_width(300.0),
                );
                if ui
                    .add_enabled(!form.dependency.trim().is_empty(), egui::Button::new("Add"))
                    .clicked()
                {
                    add = Some(ReviewAction::AddDependency);
                }
            }
            kind => {
                if let Some(text) = form.impact_mut(kind) {
                    ui.add(
                        egui::TextEdit::singleline(text)
                            .hint_text("New impact")
                            .desired_width(300.0),
                    );
                    let enabled = !text.trim().is_empty();
                    if ui.add_enabled(enabled, egui::Button::new("Add")).clicked() {
                        add = Some(ReviewAction::AddImpact(kind));
                    }
                }
            }
        });

        if let Some(action) = add {
            self.push(UiAction::Review(action));
        }
    }

    /// "Review Changes" side panel listing pending actions
    pub(crate) fn show_review_panel(&mut self, ctx: &egui::Context) {
        let Some(review) = self.state.review() else {
            return;
        };
        if !review.is_review_panel_open() {
            return;
        }
        let pending: Vec<(ItemRef, String)> = review
            .pending()
            .iter()
            .map(|a| (a.target(), a.describe()))
            .collect();

        let mut actions = Vec::new();
        egui::SidePanel::right("review_panel")
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Review Changes");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").clicked() {
                            actions.push(UiAction::Review(ReviewAction::ClosePanel));
                        }
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (target, description) in &pending {
                        ui.group(|ui| {
                            ui.label(description.as_str());
                            ui.horizontal(|ui| {
                                if ui.button("✔ Accept").clicked() {
                                    actions.push(UiAction::Review(ReviewAction::Accept(
                                        target.clone(),
                                    )));
                                }
                                if ui.button("✖ Reject").clicked() {
                                    actions.push(UiAction::Review(ReviewAction::Reject(
                                        target.clone(),
                                    )));
                                }
                                if ui.button("Discard").clicked() {
                                    actions.push(UiAction::Review(ReviewAction::Discard(
                                        target.clone(),
                                    )));
                                }
                            });
                        });
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Accept All").clicked() {
                        actions.push(UiAction::AcceptAll);
                    }
                    if ui.button("Reject All").clicked() {
                        actions.push(UiAction::Review(ReviewAction::RejectAll));
                    }
                    if ui.button("Undo All").clicked() {
                        actions.push(UiAction::Review(ReviewAction::UndoAll));
                    }
                });
            });
        self.pending_actions.extend(actions);
    }

    pub(crate) fn show_activity_log(&mut self, ctx: &egui::Context) {
        let Some(review) = self.state.review() else {
            return;
        };
        if !review.is_activity_log_open() {
            return;
        }

        let mut open = true;
        egui::Window::new("Activity Log")
            .open(&mut open)
            .default_width(420.0)
            .show(ctx, |ui| {
                if review.completed().is_empty() && review.pending().is_empty() {
                    ui.label(egui::RichText::new("No activity yet").weak());
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for action in review.pending().iter().chain(review.completed()) {
                        ui.horizontal(|ui| {
                            let time = action.effective_time().with_timezone(&Local);
                            ui.label(egui::RichText::new(time.format("%H:%M:%S").to_string()).weak());
                            ui.label(action.describe());
                            ui.label(egui::RichText::new(action.username.as_str()).weak());
                        });
                    }
                });
            });

        if !open {
            self.push(UiAction::Review(ReviewAction::ToggleLog));
        }
    }

    pub(crate) fn show_citation_popup(&mut self, ctx: &egui::Context) {
        let Some(number) = self.citation_popup else {
            return;
        };
        let Some(citation) = self.state.review().and_then(|r| r.citation(number)) else {
            self.citation_popup = None;
            return;
        };

        let mut open = true;
        egui::Window::new(format!("[{}] {}", number, citation.target.kind.label()))
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| match &citation.detail {
                CitationDetail::Risk {
                    description,
                    severity,
                    mitigation,
                } => {
                    ui.label(description.as_str());
                    ui.colored_label(
                        severity_color(*severity),
                        format!("Severity: {}", severity),
                    );
                    ui.label(format!("Mitigation: {}", mitigation));
                }
                CitationDetail::Impact { description } => {
                    ui.label(description.as_str());
                }
            });

        if !open {
            self.citation_popup = None;
        }
    }
}
