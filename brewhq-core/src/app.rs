//! Application state shared by the front-ends.
//!
//! [`AppState`] owns every store and view-model of a session. Front-ends
//! hold one instance and drive it through `&mut` calls; nothing here is
//! global.

use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use crate::analysis::{AnalysisProvider, ImpactReview, MockAnalysisProvider};
use crate::chat::{
    Assistant, AssistantReply, CannedAssistant, ChatSession, PendingReply, ReplyWorker,
};
use crate::config::Config;
use crate::error::StoreError;
use crate::export::Snapshot;
use crate::models::{NewProjectForm, Project, Repository, Requirement, RequirementForm};
use crate::navigation::{breadcrumbs, Breadcrumb, Navigator, Route};
use crate::projects::{ProjectStore, ProjectsView};
use crate::requirements::RequirementStore;
use crate::scoring::{ImpactScorer, RandomImpactScorer};
use crate::snackbar::{PendingDeletion, Snackbar};
use crate::wizard::NewProjectWizard;

/// The review on the analysis page and the stored requirement it edits
#[derive(Debug, Clone)]
pub struct OpenAnalysis {
    /// `None` when the page was restored from history without a stored
    /// requirement to write back to
    pub requirement_id: Option<String>,
    pub review: ImpactReview,
}

pub struct AppState {
    config: Config,
    projects: ProjectStore,
    requirements: RequirementStore,
    pub view: ProjectsView,
    pub wizard: NewProjectWizard,
    navigator: Navigator,
    snackbar: Option<Snackbar>,
    analysis: Option<OpenAnalysis>,
    chat: ChatSession,
    scorer: Box<dyn ImpactScorer>,
    analyzer: Box<dyn AnalysisProvider>,
    assistant: Arc<dyn Assistant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    /// Starts a session from the config's seed projects with the built-in
    /// scorer, analysis provider and assistant
    pub fn new(config: Config) -> Self {
        let projects = ProjectStore::new(config.projects());
        info!(
            "Starting session for {} with {} projects",
            config.username,
            projects.len()
        );
        Self {
            config,
            projects,
            requirements: RequirementStore::new(),
            view: ProjectsView::default(),
            wizard: NewProjectWizard::new(),
            navigator: Navigator::default(),
            snackbar: None,
            analysis: None,
            chat: ChatSession::default(),
            scorer: Box::new(RandomImpactScorer),
            analyzer: Box::new(MockAnalysisProvider),
            assistant: Arc::new(CannedAssistant),
        }
    }

    pub fn with_scorer(mut self, scorer: impl ImpactScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn with_analysis_provider(mut self, provider: impl AnalysisProvider + 'static) -> Self {
        self.analyzer = Box::new(provider);
        self
    }

    pub fn with_assistant(mut self, assistant: impl Assistant + 'static) -> Self {
        self.assistant = Arc::new(assistant);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn username(&self) -> &str {
        &self.config.username
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.list()
    }

    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn requirements(&self) -> &[Requirement] {
        self.requirements.list()
    }

    pub fn requirement(&self, id: &str) -> Option<&Requirement> {
        self.requirements.get(id)
    }

    pub fn requirements_for(&self, project_id: u32) -> Vec<&Requirement> {
        self.requirements.for_project(project_id)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.projects, &self.requirements)
    }

    // Navigation

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn route(&self) -> Route {
        self.navigator.route()
    }

    /// Breadcrumbs for the current page
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(self.route(), self.projects.list(), self.navigator.state())
    }

    /// Project named by the current route
    pub fn current_project(&self) -> Option<&Project> {
        self.route().project_id().and_then(|id| self.projects.get(id))
    }

    /// Moves to `route`. Leaving the analysis page closes its review.
    pub fn navigate(&mut self, route: Route, state: Option<RequirementForm>) {
        if matches!(self.route(), Route::Analyze { .. }) {
            self.close_analysis();
        }
        self.navigator.navigate(route, state);
    }

    /// Navigates to a URL-like path; returns the parsed route
    pub fn navigate_path(&mut self, path: &str) -> Option<Route> {
        let route = Route::parse(path)?;
        self.navigate(route, None);
        Some(route)
    }

    /// Goes back one page; false when there is no earlier page
    pub fn back(&mut self) -> bool {
        if self.navigator.depth() <= 1 {
            return false;
        }
        if matches!(self.route(), Route::Analyze { .. }) {
            self.close_analysis();
        }
        self.navigator.back();
        if matches!(self.route(), Route::Analyze { .. }) && self.analysis.is_none() {
            if let Some(form) = self.navigator.state().cloned() {
                debug!("Restoring analysis for '{}' from history", form.display_name());
                self.open_review(None, form);
            }
        }
        true
    }

    /// Project dropdown: shows the chosen project's requirements
    pub fn select_project(&mut self, project_id: u32) -> Result<(), StoreError> {
        if self.projects.get(project_id).is_none() {
            return Err(StoreError::ProjectNotFound(project_id));
        }
        self.navigate(Route::Requirements { project_id }, None);
        Ok(())
    }

    // Projects

    /// Opens the new-project wizard on its first step
    pub fn start_new_project(&mut self) {
        self.wizard = NewProjectWizard::new();
        self.navigate(Route::NewProject, None);
    }

    /// Creates a project and returns to the projects page
    pub fn create_project(&mut self, form: NewProjectForm) -> u32 {
        let id = self.projects.create(form).id;
        self.navigate(Route::Projects, None);
        id
    }

    /// Completes the wizard; `None` unless it is on its final step
    pub fn finish_wizard(&mut self) -> Option<u32> {
        let form = self.wizard.finish()?;
        Some(self.create_project(form))
    }

    pub fn add_repository(
        &mut self,
        project_id: u32,
        repository: Repository,
    ) -> Result<(), StoreError> {
        self.projects.add_repository(project_id, repository)
    }

    // Deletion requests

    pub fn snackbar(&self) -> Option<&Snackbar> {
        self.snackbar.as_ref()
    }

    fn raise_snackbar(&mut self, deletion: PendingDeletion) -> &Snackbar {
        let snackbar = Snackbar::for_deletion(deletion);
        debug!("Snackbar: {}", snackbar.message);
        self.snackbar.insert(snackbar)
    }

    pub fn request_delete_project(&mut self, id: u32) -> Result<&Snackbar, StoreError> {
        let name = self
            .projects
            .get(id)
            .ok_or(StoreError::ProjectNotFound(id))?
            .name
            .clone();
        Ok(self.raise_snackbar(PendingDeletion::Project { id, name }))
    }

    pub fn request_delete_repository(
        &mut self,
        project_id: u32,
        name: &str,
    ) -> Result<&Snackbar, StoreError> {
        let project = self
            .projects
            .get(project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;
        if project.repository(name).is_none() {
            return Err(StoreError::RepositoryNotFound {
                project_id,
                name: name.to_string(),
            });
        }
        Ok(self.raise_snackbar(PendingDeletion::Repository {
            project_id,
            name: name.to_string(),
        }))
    }

    pub fn request_delete_requirement(&mut self, id: &str) -> Result<&Snackbar, StoreError> {
        let name = self
            .requirements
            .get(id)
            .ok_or_else(|| StoreError::RequirementNotFound(id.to_string()))?
            .name
            .clone();
        Ok(self.raise_snackbar(PendingDeletion::Requirement {
            id: id.to_string(),
            name,
        }))
    }

    /// Runs the deletion behind the snackbar's action button
    pub fn confirm_snackbar(&mut self) -> Result<PendingDeletion, StoreError> {
        let snackbar = self.snackbar.take().ok_or(StoreError::NoSnackbar)?;
        match &snackbar.deletion {
            PendingDeletion::Project { id, .. } => {
                self.projects.delete(*id)?;
                let removed = self.requirements.delete_for_project(*id);
                if removed > 0 {
                    debug!("Removed {} requirements of project {}", removed, id);
                }
                self.view.forget(*id);
            }
            PendingDeletion::Repository { project_id, name } => {
                self.projects.delete_repository(*project_id, name)?;
            }
            PendingDeletion::Requirement { id, .. } => {
                self.requirements.delete(id)?;
                if self
                    .analysis
                    .as_ref()
                    .is_some_and(|open| open.requirement_id.as_deref() == Some(id.as_str()))
                {
                    self.analysis = None;
                }
            }
        }
        Ok(snackbar.deletion)
    }

    /// Cancel: drops the request without deleting anything
    pub fn dismiss_snackbar(&mut self) -> Option<Snackbar> {
        self.snackbar.take()
    }

    // Requirements and analysis

    /// Creates a requirement in the current project and opens its impact
    /// analysis. Returns the new requirement id.
    pub fn submit_requirement(&mut self, form: RequirementForm) -> Result<String, StoreError> {
        let project_id = self
            .current_project()
            .map(|p| p.id)
            .ok_or(StoreError::NoCurrentProject)?;
        if form.name.trim().is_empty() {
            return Err(StoreError::MissingRequirementName);
        }

        let id = self
            .requirements
            .create(&form, project_id, &self.config.username, self.scorer.as_ref())
            .id
            .clone();
        self.navigate(Route::Analyze { project_id }, Some(form.clone()));
        self.open_review(Some(id.clone()), form);
        Ok(id)
    }

    /// Opens the analysis page for a stored requirement
    pub fn select_requirement(&mut self, id: &str) -> Result<(), StoreError> {
        // Write back any open review before reading the stored criteria
        self.close_analysis();
        self.requirements.mark_viewed(id, Utc::now())?;
        let requirement = self
            .requirements
            .get(id)
            .ok_or_else(|| StoreError::RequirementNotFound(id.to_string()))?;
        let project_id = requirement.project_id;
        let form = requirement.form();

        self.navigate(Route::Analyze { project_id }, Some(form.clone()));
        self.open_review(Some(id.to_string()), form);
        Ok(())
    }

    fn open_review(&mut self, requirement_id: Option<String>, form: RequirementForm) {
        let analysis = self.analyzer.analyze(&form);
        debug!(
            "Opened {} analysis for '{}'",
            self.analyzer.name(),
            form.display_name()
        );
        self.analysis = Some(OpenAnalysis {
            requirement_id,
            review: ImpactReview::new(form, analysis, self.config.username.clone()),
        });
    }

    pub fn open_analysis(&self) -> Option<&OpenAnalysis> {
        self.analysis.as_ref()
    }

    pub fn review(&self) -> Option<&ImpactReview> {
        self.analysis.as_ref().map(|open| &open.review)
    }

    pub fn review_mut(&mut self) -> Option<&mut ImpactReview> {
        self.analysis.as_mut().map(|open| &mut open.review)
    }

    /// Accept All: resolves every pending change and clears the draft flag
    pub fn accept_all_changes(&mut self) -> Result<usize, StoreError> {
        let open = self.analysis.as_mut().ok_or(StoreError::NoOpenAnalysis)?;
        let count = open.review.accept_all()?;
        if let Some(id) = open.requirement_id.clone() {
            let criteria = open.review.acceptance_criteria().to_string();
            self.requirements
                .update_acceptance_criteria(&id, &criteria, &self.config.username)?;
            self.requirements.set_draft(&id, false)?;
        }
        Ok(count)
    }

    /// Closes the analysis page, writing accepted criteria back. The
    /// requirement stays a draft only while changes remain pending.
    pub fn leave_analysis(&mut self) -> Result<(), StoreError> {
        let open = self.analysis.take().ok_or(StoreError::NoOpenAnalysis)?;
        let Some(id) = open.requirement_id else {
            return Ok(());
        };
        if self.requirements.get(&id).is_none() {
            return Ok(());
        }
        self.requirements.update_acceptance_criteria(
            &id,
            open.review.acceptance_criteria(),
            &self.config.username,
        )?;
        self.requirements.set_draft(&id, open.review.has_pending())?;
        Ok(())
    }

    fn close_analysis(&mut self) {
        if self.analysis.is_some() {
            if let Err(e) = self.leave_analysis() {
                debug!("Closing analysis: {}", e);
            }
        }
    }

    // Chat

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    /// Opens Ask Brewer for a project. The session survives navigation
    /// within the same project; returns true when it was replaced.
    pub fn open_chat(&mut self, project_id: u32) -> Result<bool, StoreError> {
        let reset = self.attach_chat(project_id)?;
        self.navigate(Route::Chat { project_id }, None);
        Ok(reset)
    }

    /// Points the chat session at a project without navigating, starting a
    /// fresh session when the project changes. Returns true when the old
    /// session was replaced; any reply still in flight for it is stale.
    pub fn attach_chat(&mut self, project_id: u32) -> Result<bool, StoreError> {
        if self.projects.get(project_id).is_none() {
            return Err(StoreError::ProjectNotFound(project_id));
        }
        if self.chat.project_id() == Some(project_id) {
            return Ok(false);
        }
        debug!("Chat session now scoped to project {}", project_id);
        self.chat = ChatSession::new(Some(project_id));
        Ok(true)
    }

    /// Posts a user message and returns the question for the assistant
    pub fn ask(&mut self, text: &str) -> Result<PendingReply, StoreError> {
        self.chat.submit(text)
    }

    /// Starts the delayed reply on a background thread
    pub fn spawn_reply(&self, pending: PendingReply) -> ReplyWorker {
        ReplyWorker::spawn(self.assistant.clone(), pending, self.config.reply_delay())
    }

    /// Answers immediately, skipping the delay
    pub fn answer_now(&self, pending: &PendingReply) -> AssistantReply {
        pending.answer(self.assistant.as_ref())
    }

    pub fn receive_reply(&mut self, reply: AssistantReply) -> Result<(), StoreError> {
        self.chat.complete_reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::CANNED_REPLY;
    use crate::config::ChatConfig;
    use crate::models::{ActionKind, ItemKind, ItemRef};
    use crate::scoring::FixedImpactScorer;

    fn app() -> AppState {
        let config = Config {
            chat: ChatConfig { reply_delay_ms: 0 },
            ..Config::default()
        };
        AppState::new(config).with_scorer(FixedImpactScorer(3))
    }

    fn checkout() -> RequirementForm {
        RequirementForm::new(
            "Checkout Redesign",
            "As a shopper I want a faster checkout",
            "",
        )
    }

    fn risk1() -> ItemRef {
        ItemRef::new(ItemKind::Risk, "r1")
    }

    #[test]
    fn test_checkout_redesign_opens_analysis() {
        let mut app = AppState::default();
        app.select_project(1).unwrap();
        let id = app.submit_requirement(checkout()).unwrap();

        assert_eq!(app.route(), Route::Analyze { project_id: 1 });
        let crumbs = app.breadcrumbs();
        assert_eq!(crumbs.last().unwrap().label, "Checkout Redesign");

        let requirement = app.requirement(&id).unwrap();
        assert!((1..=5).contains(&requirement.impact_score));
        assert!(requirement.has_draft);
        assert_eq!(requirement.created_by, "John Doe");
        assert_eq!(app.review().unwrap().requirement().name, "Checkout Redesign");
    }

    #[test]
    fn test_submit_requires_project_and_name() {
        let mut app = app();
        assert_eq!(
            app.submit_requirement(checkout()),
            Err(StoreError::NoCurrentProject)
        );

        app.select_project(1).unwrap();
        assert_eq!(
            app.submit_requirement(RequirementForm::new("  ", "", "")),
            Err(StoreError::MissingRequirementName)
        );
        assert!(app.requirements().is_empty());
        assert_eq!(app.route(), Route::Requirements { project_id: 1 });
    }

    #[test]
    fn test_create_project_returns_to_projects() {
        let mut app = app();
        app.start_new_project();
        assert_eq!(app.route(), Route::NewProject);

        app.wizard.form.name = "Mobile App".to_string();
        assert!(app.finish_wizard().is_none());
        app.wizard.next();
        let id = app.finish_wizard().unwrap();

        assert_eq!(id, 3);
        assert_eq!(app.projects().len(), 3);
        assert_eq!(app.route(), Route::Projects);
    }

    #[test]
    fn test_snackbar_only_deletes_on_confirm() {
        let mut app = app();
        let message = app.request_delete_project(2).unwrap().message.clone();
        assert_eq!(message, "Delete project \"Analytics Dashboard\"?");

        app.dismiss_snackbar();
        assert_eq!(app.projects().len(), 2);
        assert_eq!(app.confirm_snackbar(), Err(StoreError::NoSnackbar));

        app.request_delete_repository(1, "frontend-web").unwrap();
        let deleted = app.confirm_snackbar().unwrap();
        assert!(matches!(deleted, PendingDeletion::Repository { .. }));
        assert_eq!(app.project(1).unwrap().repositories.len(), 1);
        assert!(app.snackbar().is_none());
    }

    #[test]
    fn test_deleting_project_removes_its_requirements() {
        let mut app = app();
        app.select_project(1).unwrap();
        app.submit_requirement(checkout()).unwrap();
        app.view.toggle_favorite(1);

        app.request_delete_project(1).unwrap();
        app.confirm_snackbar().unwrap();

        assert!(app.project(1).is_none());
        assert!(app.requirements_for(1).is_empty());
        assert!(!app.view.is_favorite(1));
    }

    #[test]
    fn test_deleting_requirement() {
        let mut app = app();
        app.select_project(1).unwrap();
        let id = app.submit_requirement(checkout()).unwrap();
        app.navigate(Route::Requirements { project_id: 1 }, None);

        let message = app.request_delete_requirement(&id).unwrap().message.clone();
        assert_eq!(message, "Delete requirement \"Checkout Redesign\"?");
        app.confirm_snackbar().unwrap();
        assert!(app.requirement(&id).is_none());
        assert!(app.request_delete_requirement(&id).is_err());
    }

    #[test]
    fn test_leaving_with_pending_changes_keeps_draft() {
        let mut app = app();
        app.select_project(1).unwrap();
        let id = app.submit_requirement(checkout()).unwrap();

        let review = app.review_mut().unwrap();
        review.stage(risk1(), ActionKind::Ignore).unwrap();
        review.stage(ItemRef::new(ItemKind::Code, "c1"), ActionKind::Ignore).unwrap();
        review.accept(&risk1()).unwrap();

        app.navigate(Route::Projects, None);
        assert!(app.review().is_none());

        let requirement = app.requirement(&id).unwrap();
        assert!(requirement.has_draft);
        assert!(requirement
            .acceptance_criteria
            .starts_with("Impact: Risk Mitigation\n"));
    }

    #[test]
    fn test_resolving_each_change_clears_draft() {
        let mut app = app();
        app.select_project(1).unwrap();
        let id = app.submit_requirement(checkout()).unwrap();
        assert!(app.requirement(&id).unwrap().has_draft);

        let review = app.review_mut().unwrap();
        review.stage(risk1(), ActionKind::Ignore).unwrap();
        review.stage(ItemRef::new(ItemKind::Code, "c1"), ActionKind::Ignore).unwrap();
        review.accept(&risk1()).unwrap();
        review.reject(&ItemRef::new(ItemKind::Code, "c1")).unwrap();
        assert!(!review.has_pending());

        app.navigate(Route::Projects, None);
        assert!(!app.requirement(&id).unwrap().has_draft);
    }

    #[test]
    fn test_accept_all_clears_draft() {
        let mut app = app();
        app.select_project(1).unwrap();
        let id = app.submit_requirement(checkout()).unwrap();
        assert_eq!(app.accept_all_changes(), Err(StoreError::NoPendingActions));

        let review = app.review_mut().unwrap();
        review.stage(risk1(), ActionKind::Edit).unwrap();
        review.set_edit_content("Add SMS fallback").unwrap();
        review.submit_edit().unwrap();

        assert_eq!(app.accept_all_changes(), Ok(1));
        let requirement = app.requirement(&id).unwrap();
        assert!(!requirement.has_draft);
        assert_eq!(
            requirement.acceptance_criteria,
            "Impact: Risk Mitigation\nAdd SMS fallback"
        );

        app.leave_analysis().unwrap();
        assert!(!app.requirement(&id).unwrap().has_draft);
        assert_eq!(app.leave_analysis(), Err(StoreError::NoOpenAnalysis));
    }

    #[test]
    fn test_select_requirement_updates_last_viewed() {
        let mut app = app();
        app.select_project(1).unwrap();
        let id = app.submit_requirement(checkout()).unwrap();
        let before = app.requirement(&id).unwrap().last_viewed;
        app.navigate(Route::Requirements { project_id: 1 }, None);

        app.select_requirement(&id).unwrap();
        assert!(app.requirement(&id).unwrap().last_viewed >= before);
        assert_eq!(app.route(), Route::Analyze { project_id: 1 });
        assert_eq!(
            app.open_analysis().unwrap().requirement_id.as_deref(),
            Some(id.as_str())
        );
        assert!(app.select_requirement("missing").is_err());
    }

    #[test]
    fn test_select_requirement_from_open_analysis_keeps_accepted_criteria() {
        let mut app = app();
        app.select_project(1).unwrap();
        let id = app.submit_requirement(checkout()).unwrap();

        let review = app.review_mut().unwrap();
        review.stage(risk1(), ActionKind::Ignore).unwrap();
        review.accept(&risk1()).unwrap();
        let accepted = review.acceptance_criteria().to_string();
        assert!(accepted.starts_with("Impact: Risk Mitigation\n"));

        app.select_requirement(&id).unwrap();
        assert_eq!(app.review().unwrap().acceptance_criteria(), accepted);

        app.leave_analysis().unwrap();
        assert_eq!(app.requirement(&id).unwrap().acceptance_criteria, accepted);
    }

    #[test]
    fn test_back_restores_analysis_from_history() {
        let mut app = app();
        app.select_project(1).unwrap();
        app.submit_requirement(checkout()).unwrap();
        app.open_chat(1).unwrap();
        assert!(app.review().is_none());

        assert!(app.back());
        assert_eq!(app.route(), Route::Analyze { project_id: 1 });
        let open = app.open_analysis().unwrap();
        assert!(open.requirement_id.is_none());
        assert_eq!(open.review.requirement().name, "Checkout Redesign");
    }

    #[test]
    fn test_navigate_path_and_project_dropdown() {
        let mut app = app();
        assert_eq!(
            app.navigate_path("/projects/2/chat"),
            Some(Route::Chat { project_id: 2 })
        );
        assert_eq!(app.current_project().unwrap().name, "Analytics Dashboard");
        assert!(app.navigate_path("/nowhere").is_none());

        assert_eq!(app.select_project(9), Err(StoreError::ProjectNotFound(9)));
        app.select_project(1).unwrap();
        assert_eq!(app.route(), Route::Requirements { project_id: 1 });
    }

    #[test]
    fn test_chat_round_trip() {
        let mut app = app();
        app.open_chat(1).unwrap();
        let pending = app.ask("How do I write acceptance criteria?").unwrap();

        let reply = app.spawn_reply(pending).wait().unwrap();
        app.receive_reply(reply).unwrap();

        let chat = app.chat();
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].content, CANNED_REPLY);
        assert_eq!(chat.history().len(), 1);
        assert_eq!(chat.history()[0].messages.len(), 2);

        app.navigate(Route::Projects, None);
        assert_eq!(app.open_chat(1), Ok(false));
        assert_eq!(app.chat().history().len(), 1);
        assert_eq!(app.open_chat(2), Ok(true));
        assert!(app.chat().history().is_empty());
    }

    #[test]
    fn test_switching_project_drops_reply_in_flight() {
        let mut app = app();
        app.open_chat(1).unwrap();
        let pending = app.ask("What depends on auth-service?").unwrap();
        assert!(app.chat().is_awaiting_reply());

        assert_eq!(app.attach_chat(1), Ok(false));
        assert!(app.chat().is_awaiting_reply());

        assert_eq!(app.attach_chat(2), Ok(true));
        assert!(!app.chat().is_awaiting_reply());
        let stale = app.answer_now(&pending);
        assert_eq!(app.receive_reply(stale), Err(StoreError::NoReplyPending));
    }
}
