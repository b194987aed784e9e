use thiserror::Error;

use crate::models::{ItemKind, ItemRef};

/// Errors returned when an operation's precondition does not hold.
///
/// Front-ends use these to grey out or ignore the triggering control.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Project not found: {0}")]
    ProjectNotFound(u32),

    #[error("Repository '{name}' not found in project {project_id}")]
    RepositoryNotFound { project_id: u32, name: String },

    #[error("Repository '{name}' already exists in project {project_id}")]
    DuplicateRepository { project_id: u32, name: String },

    #[error("Requirement not found: {0}")]
    RequirementNotFound(String),

    #[error("Requirement name is required")]
    MissingRequirementName,

    #[error("No project selected")]
    NoCurrentProject,

    #[error("Analysis item not found: {0}")]
    ItemNotFound(ItemRef),

    #[error("{0} is not an impact category")]
    NotAnImpactKind(ItemKind),

    #[error("No pending action for {0}")]
    NoPendingAction(ItemRef),

    #[error("No pending actions to review")]
    NoPendingActions,

    #[error("{0} has no accepted or rejected change to reconsider")]
    NotResolved(ItemRef),

    #[error("No item is being edited")]
    NotEditing,

    #[error("{0} was produced by the analysis and cannot be removed")]
    NotManual(ItemRef),

    #[error("No impact analysis is open")]
    NoOpenAnalysis,

    #[error("Nothing is awaiting confirmation")]
    NoSnackbar,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Brewer is still answering the previous message")]
    ReplyInFlight,

    #[error("No reply is pending")]
    NoReplyPending,
}
