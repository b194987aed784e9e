//! Confirmation toast for destructive actions.
//!
//! Raising a snackbar only records the request; the deletion runs when the
//! user clicks its action button. There is no timer.

use std::fmt;

/// A deletion waiting for the user to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDeletion {
    Project { id: u32, name: String },
    Repository { project_id: u32, name: String },
    Requirement { id: String, name: String },
}

impl fmt::Display for PendingDeletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingDeletion::Project { name, .. } => write!(f, "Delete project \"{}\"?", name),
            PendingDeletion::Repository { name, .. } => {
                write!(f, "Delete repository \"{}\"?", name)
            }
            PendingDeletion::Requirement { name, .. } => {
                write!(f, "Delete requirement \"{}\"?", name)
            }
        }
    }
}

/// Toast with a message, a single action button and Cancel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snackbar {
    pub message: String,
    pub action_label: String,
    pub deletion: PendingDeletion,
}

impl Snackbar {
    pub fn for_deletion(deletion: PendingDeletion) -> Self {
        Self {
            message: deletion.to_string(),
            action_label: "Delete".to_string(),
            deletion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let bar = Snackbar::for_deletion(PendingDeletion::Repository {
            project_id: 1,
            name: "frontend-web".to_string(),
        });
        assert_eq!(bar.message, "Delete repository \"frontend-web\"?");
        assert_eq!(bar.action_label, "Delete");

        let bar = Snackbar::for_deletion(PendingDeletion::Requirement {
            id: "1".to_string(),
            name: "Checkout Redesign".to_string(),
        });
        assert_eq!(bar.message, "Delete requirement \"Checkout Redesign\"?");
    }
}
