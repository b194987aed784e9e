pub mod analysis;
pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod navigation;
pub mod projects;
pub mod requirements;
pub mod scoring;
pub mod seed;
pub mod snackbar;
pub mod wizard;

// Re-export commonly used types
pub use analysis::{
    AnalysisProvider, Citation, CitationDetail, EditState, ImpactReview, ItemState,
    MockAnalysisProvider,
};
pub use app::{AppState, OpenAnalysis};
pub use chat::{
    Assistant, AssistantReply, CannedAssistant, ChatHistoryEntry, ChatMessage, ChatSession,
    MessageRole, PendingReply, ReplyWorker, CANNED_REPLY, QUICK_SUGGESTIONS,
};
pub use config::{
    get_config_dir, get_config_path, init_config, load_config, ChatConfig, Config,
};
pub use error::StoreError;
pub use export::{render, write_export, ExportFormat, Snapshot};
pub use models::{
    ActionKind, ActionStatus, Dependency, Impact, ImpactAction, ImpactAnalysis, ItemKind, ItemRef,
    NewProjectForm, Project, Repository, Requirement, RequirementForm, Risk, Severity,
    DEFAULT_BRANCH, NO_DESCRIPTION, UNTITLED_PROJECT, UNTITLED_REQUIREMENT,
};
pub use navigation::{breadcrumbs, Breadcrumb, Location, Navigator, Route};
pub use projects::{ProjectStore, ProjectsView};
pub use requirements::{format_last_viewed, RequirementStore};
pub use scoring::{FixedImpactScorer, ImpactScorer, RandomImpactScorer};
pub use seed::{default_projects, DEFAULT_USERNAME};
pub use snackbar::{PendingDeletion, Snackbar};
pub use wizard::{NewProjectWizard, WizardStep};
