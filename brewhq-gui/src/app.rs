use eframe::egui;
use log::{debug, warn};
use std::time::Duration;
use uuid::Uuid;

use brewhq_core::{
    ActionKind, AppState, Config, ItemKind, ItemRef, ReplyWorker, Repository, RequirementForm,
    Route, Severity, StoreError, DEFAULT_BRANCH,
};

/// Operations collected while drawing and applied at the start of the next
/// frame (to avoid borrow checker issues)
pub enum UiAction {
    NavigatePath(String),
    Back,
    OpenProject(u32),
    StartNewProject,
    ToggleExpanded(u32),
    ToggleFavorite(u32),
    OpenUrl(String),
    AddRepository(u32),
    RequestDeleteProject(u32),
    RequestDeleteRepository(u32, String),
    RequestDeleteRequirement(String),
    ConfirmSnackbar,
    DismissSnackbar,
    WizardNext,
    WizardBack,
    WizardFinish,
    SubmitRequirement,
    SelectRequirement(String),
    OpenChat(u32),
    AttachChat(u32),
    Review(ReviewAction),
    AcceptAll,
    SendMessage(String),
    NewChat,
    LoadChat(Uuid),
}

pub enum ReviewAction {
    Stage(ItemRef, ActionKind),
    SubmitEdit,
    Discard(ItemRef),
    Accept(ItemRef),
    Reject(ItemRef),
    RejectAll,
    UndoAll,
    Reconsider(ItemRef),
    OpenPanel,
    ClosePanel,
    ToggleLog,
    AddRisk,
    AddImpact(ItemKind),
    AddDependency,
    UpdateManual(ItemRef, String),
    RemoveManual(ItemRef),
}

/// Inputs of the "add item" forms on the analysis page
pub struct ManualItemForm {
    pub risk_description: String,
    pub risk_severity: Severity,
    pub risk_mitigation: String,
    pub ui_impact: String,
    pub code_impact: String,
    pub data_impact: String,
    pub dependency: String,
}

impl Default for ManualItemForm {
    fn default() -> Self {
        Self {
            risk_description: String::new(),
            risk_severity: Severity::Medium,
            risk_mitigation: String::new(),
            ui_impact: String::new(),
            code_impact: String::new(),
            data_impact: String::new(),
            dependency: String::new(),
        }
    }
}

impl ManualItemForm {
    pub fn impact_mut(&mut self, kind: ItemKind) -> Option<&mut String> {
        match kind {
            ItemKind::Ui => Some(&mut self.ui_impact),
            ItemKind::Code => Some(&mut self.code_impact),
            ItemKind::Data => Some(&mut self.data_impact),
            _ => None,
        }
    }
}

pub struct BrewApp {
    pub(crate) state: AppState,

    // Requirement form, open while Some
    pub(crate) requirement_form: Option<RequirementForm>,

    // Repository inputs, shared by wizard step 2 and the projects page
    pub(crate) adding_repository: Option<u32>,
    pub(crate) repo_name: String,
    pub(crate) repo_branch: String,
    pub(crate) repo_url: String,

    // Analysis page
    pub(crate) manual_form: ManualItemForm,
    pub(crate) manual_edit: Option<(ItemRef, String)>,
    pub(crate) citation_popup: Option<usize>,

    // Chat
    pub(crate) reply_worker: Option<ReplyWorker>,

    // Messages
    pub(crate) message: Option<(String, bool)>, // (message, is_error)

    pub(crate) pending_actions: Vec<UiAction>,
}

impl BrewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        Self {
            state: AppState::new(config),
            requirement_form: None,
            adding_repository: None,
            repo_name: String::new(),
            repo_branch: String::new(),
            repo_url: String::new(),
            manual_form: ManualItemForm::default(),
            manual_edit: None,
            citation_popup: None,
            reply_worker: None,
            message: None,
            pending_actions: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, action: UiAction) {
        self.pending_actions.push(action);
    }

    fn report(&mut self, result: Result<(), StoreError>) {
        if let Err(e) = result {
            debug!("Refused: {}", e);
            self.message = Some((e.to_string(), true));
        }
    }

    fn clear_repository_inputs(&mut self) {
        self.repo_name.clear();
        self.repo_branch.clear();
        self.repo_url.clear();
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::NavigatePath(path) => {
                if self.state.navigate_path(&path).is_none() {
                    self.message = Some((format!("Unknown page: {}", path), true));
                }
            }
            UiAction::Back => {
                self.state.back();
            }
            UiAction::OpenProject(id) => {
                let result = self.state.select_project(id);
                self.report(result);
            }
            UiAction::StartNewProject => {
                self.clear_repository_inputs();
                self.state.start_new_project();
            }
            UiAction::ToggleExpanded(id) => {
                self.state.view.toggle_expanded(id);
            }
            UiAction::ToggleFavorite(id) => {
                self.state.view.toggle_favorite(id);
            }
            UiAction::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    warn!("Failed to open {}: {}", url, e);
                    self.message = Some((format!("Failed to open URL: {}", e), true));
                }
            }
            UiAction::AddRepository(project_id) => {
                let repository = Repository::new(
                    self.repo_name.trim(),
                    if self.repo_branch.trim().is_empty() {
                        DEFAULT_BRANCH
                    } else {
                        self.repo_branch.trim()
                    },
                    self.repo_url.trim(),
                );
                match self.state.add_repository(project_id, repository) {
                    Ok(()) => {
                        self.adding_repository = None;
                        self.clear_repository_inputs();
                    }
                    Err(e) => self.message = Some((e.to_string(), true)),
                }
            }
            UiAction::RequestDeleteProject(id) => {
                let result = self.state.request_delete_project(id).map(|_| ());
                self.report(result);
            }
            UiAction::RequestDeleteRepository(project_id, name) => {
                let result = self
                    .state
                    .request_delete_repository(project_id, &name)
                    .map(|_| ());
                self.report(result);
            }
            UiAction::RequestDeleteRequirement(id) => {
                let result = self.state.request_delete_requirement(&id).map(|_| ());
                self.report(result);
            }
            UiAction::ConfirmSnackbar => {
                let result = self.state.confirm_snackbar().map(|_| ());
                self.report(result);
            }
            UiAction::DismissSnackbar => {
                self.state.dismiss_snackbar();
            }
            UiAction::WizardNext => self.state.wizard.next(),
            UiAction::WizardBack => self.state.wizard.back(),
            UiAction::WizardFinish => {
                if !self.repo_name.trim().is_empty() {
                    let (name, branch, url) = (
                        self.repo_name.clone(),
                        self.repo_branch.clone(),
                        self.repo_url.clone(),
                    );
                    self.state.wizard.connect_repository(&name, &branch, &url);
                }
                if let Some(id) = self.state.finish_wizard() {
                    self.clear_repository_inputs();
                    self.message = Some((format!("Project {} created", id), false));
                }
            }
            UiAction::SubmitRequirement => {
                if let Some(form) = self.requirement_form.take() {
                    match self.state.submit_requirement(form.clone()) {
                        Ok(_) => self.reset_analysis_inputs(),
                        Err(e) => {
                            // Keep the form open so the user can fix it
                            self.requirement_form = Some(form);
                            self.message = Some((e.to_string(), true));
                        }
                    }
                }
            }
            UiAction::SelectRequirement(id) => {
                let result = self.state.select_requirement(&id);
                self.reset_analysis_inputs();
                self.report(result);
            }
            UiAction::OpenChat(project_id) => {
                let result = self.state.open_chat(project_id);
                self.chat_attached(result);
            }
            UiAction::AttachChat(project_id) => {
                let result = self.state.attach_chat(project_id);
                self.chat_attached(result);
            }
            UiAction::Review(action) => self.apply_review(action),
            UiAction::AcceptAll => match self.state.accept_all_changes() {
                Ok(count) => self.message = Some((format!("Accepted {} change(s)", count), false)),
                Err(e) => self.message = Some((e.to_string(), true)),
            },
            UiAction::SendMessage(text) => match self.state.ask(&text) {
                Ok(pending) => self.reply_worker = Some(self.state.spawn_reply(pending)),
                Err(e) => self.message = Some((e.to_string(), true)),
            },
            UiAction::NewChat => self.state.chat_mut().new_chat(),
            UiAction::LoadChat(id) => {
                self.state.chat_mut().load_chat(id);
            }
        }
    }

    /// A replaced chat session makes any reply in flight stale
    fn chat_attached(&mut self, result: Result<bool, StoreError>) {
        match result {
            Ok(true) => {
                if self.reply_worker.take().is_some() {
                    debug!("Dropped reply for the previous chat session");
                }
            }
            Ok(false) => {}
            Err(e) => self.message = Some((e.to_string(), true)),
        }
    }

    fn reset_analysis_inputs(&mut self) {
        self.manual_form = ManualItemForm::default();
        self.manual_edit = None;
        self.citation_popup = None;
    }

    fn apply_review(&mut self, action: ReviewAction) {
        let Some(review) = self.state.review_mut() else {
            self.message = Some((StoreError::NoOpenAnalysis.to_string(), true));
            return;
        };
        let result = match action {
            ReviewAction::Stage(item, kind) => review.stage(item, kind).map(|_| ()),
            ReviewAction::SubmitEdit => review.submit_edit().map(|_| ()),
            ReviewAction::Discard(item) => review.discard(&item).map(|_| ()),
            ReviewAction::Accept(item) => review.accept(&item).map(|_| ()),
            ReviewAction::Reject(item) => review.reject(&item).map(|_| ()),
            ReviewAction::RejectAll => review.reject_all().map(|_| ()),
            ReviewAction::UndoAll => {
                review.undo_all();
                Ok(())
            }
            ReviewAction::Reconsider(item) => review.reconsider(&item).map(|_| ()),
            ReviewAction::OpenPanel => review.open_review_panel(),
            ReviewAction::ClosePanel => {
                review.close_review_panel();
                Ok(())
            }
            ReviewAction::ToggleLog => {
                review.toggle_activity_log();
                Ok(())
            }
            ReviewAction::AddRisk => {
                let form = &mut self.manual_form;
                review.add_risk(
                    std::mem::take(&mut form.risk_description),
                    form.risk_severity,
                    std::mem::take(&mut form.risk_mitigation),
                );
                Ok(())
            }
            ReviewAction::AddImpact(kind) => {
                let description = self
                    .manual_form
                    .impact_mut(kind)
                    .map(std::mem::take)
                    .unwrap_or_default();
                review.add_impact(kind, description).map(|_| ())
            }
            ReviewAction::AddDependency => {
                review.add_dependency(std::mem::take(&mut self.manual_form.dependency));
                Ok(())
            }
            ReviewAction::UpdateManual(item, text) => {
                self.manual_edit = None;
                review.update_manual(&item, text)
            }
            ReviewAction::RemoveManual(item) => review.remove_manual(&item),
        };

        self.report(result);
    }

    fn poll_reply(&mut self, ctx: &egui::Context) {
        let Some(worker) = &self.reply_worker else {
            return;
        };
        match worker.poll() {
            Some(reply) => {
                self.reply_worker = None;
                let result = self.state.receive_reply(reply);
                self.report(result);
            }
            None => ctx.request_repaint_after(Duration::from_millis(100)),
        }
    }

    fn show_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("☕ BrewHQ");
                ui.separator();

                let can_go_back = self.state.navigator().depth() > 1;
                if ui.add_enabled(can_go_back, egui::Button::new("⬅")).clicked() {
                    self.push(UiAction::Back);
                }

                let crumbs = self.state.breadcrumbs();
                let last = crumbs.len().saturating_sub(1);
                for (idx, crumb) in crumbs.into_iter().enumerate() {
                    match crumb.path {
                        Some(path) => {
                            if ui.link(crumb.label.as_str()).clicked() {
                                self.pending_actions.push(UiAction::NavigatePath(path));
                            }
                        }
                        None => {
                            ui.label(egui::RichText::new(crumb.label.as_str()).strong());
                        }
                    }
                    if idx < last {
                        ui.label("/");
                    }
                }

                if let Some(current) = self.state.current_project().map(|p| p.id) {
                    ui.separator();
                    let mut selected = current;
                    let name = self
                        .state
                        .project(current)
                        .map(|p| p.name.clone())
                        .unwrap_or_default();
                    egui::ComboBox::from_label("Project")
                        .selected_text(name)
                        .show_ui(ui, |ui| {
                            for project in self.state.projects() {
                                ui.selectable_value(
                                    &mut selected,
                                    project.id,
                                    project.name.as_str(),
                                );
                            }
                        });
                    if selected != current {
                        self.pending_actions.push(UiAction::OpenProject(selected));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(self.state.username()).weak());
                    if let Some((msg, is_error)) = &self.message {
                        let color = if *is_error {
                            egui::Color32::RED
                        } else {
                            egui::Color32::GREEN
                        };
                        ui.colored_label(color, msg);
                    }
                });
            });
        });
    }

    fn show_snackbar(&mut self, ctx: &egui::Context) {
        let Some(snackbar) = self.state.snackbar() else {
            return;
        };
        let message = snackbar.message.clone();
        let action_label = snackbar.action_label.clone();

        egui::TopBottomPanel::bottom("snackbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(message).strong());
                if ui
                    .button(egui::RichText::new(action_label).color(egui::Color32::RED))
                    .clicked()
                {
                    self.push(UiAction::ConfirmSnackbar);
                }
                if ui.button("Cancel").clicked() {
                    self.push(UiAction::DismissSnackbar);
                }
            });
        });
    }
}

impl eframe::App for BrewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle pending operations
        for action in std::mem::take(&mut self.pending_actions) {
            self.apply(action);
        }
        self.poll_reply(ctx);

        self.show_top_panel(ctx);
        self.show_snackbar(ctx);

        let route = self.state.route();
        if matches!(route, Route::Analyze { .. }) {
            self.show_review_panel(ctx);
        }
        if let Route::Chat { project_id } = route {
            self.show_chat_history(ctx, project_id);
        }

        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::Home | Route::Projects => self.show_projects(ui),
            Route::NewProject => self.show_new_project(ui),
            Route::Requirements { project_id } => self.show_requirements(ui, project_id),
            Route::Chat { project_id } => self.show_chat(ui, project_id),
            Route::Analyze { .. } => self.show_analysis(ui),
        });

        self.show_requirement_form(ctx);
        self.show_citation_popup(ctx);
        self.show_activity_log(ctx);

        if !self.pending_actions.is_empty() {
            ctx.request_repaint();
        }
    }
}
