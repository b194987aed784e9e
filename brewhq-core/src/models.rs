use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to a project created with a blank name
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Description given to a project created with a blank description
pub const NO_DESCRIPTION: &str = "No description provided";

/// Header shown for a requirement without a name
pub const UNTITLED_REQUIREMENT: &str = "Untitled Requirement";

/// Default branch for newly connected repositories
pub const DEFAULT_BRANCH: &str = "main";

/// A source repository connected to a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// Repository name, unique within its project
    pub name: String,
    pub branch: String,
    pub url: String,
}

impl Repository {
    pub fn new(name: impl Into<String>, branch: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branch: branch.into(),
            url: url.into(),
        }
    }
}

/// A project grouping repositories and requirements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

impl Project {
    /// Looks up a connected repository by name
    pub fn repository(&self, name: &str) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.name == name)
    }
}

/// Fields collected by the new-project wizard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProjectForm {
    pub name: String,
    pub description: String,
    /// Repository connected during the second wizard step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

impl NewProjectForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            repository: None,
        }
    }
}

/// Fields collected by the "Analyse Requirement" form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementForm {
    pub name: String,
    pub value_statement: String,
    pub acceptance_criteria: String,
}

impl RequirementForm {
    pub fn new(
        name: impl Into<String>,
        value_statement: impl Into<String>,
        acceptance_criteria: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value_statement: value_statement.into(),
            acceptance_criteria: acceptance_criteria.into(),
        }
    }

    /// Name to show in headers, falling back to a placeholder
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNTITLED_REQUIREMENT
        } else {
            &self.name
        }
    }
}

/// A user-story style requirement scoped to a single project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Requirement {
    /// Millisecond timestamp of creation, as a string
    pub id: String,
    pub project_id: u32,
    pub name: String,
    pub value_statement: String,
    pub acceptance_criteria: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub last_viewed: DateTime<Utc>,
    pub edited_by: String,
    /// Set while the requirement has unresolved analysis changes
    pub has_draft: bool,
    /// Impact score between 1 and 5
    pub impact_score: u8,
}

impl Requirement {
    /// Returns the editable fields as a form
    pub fn form(&self) -> RequirementForm {
        RequirementForm {
            name: self.name.clone(),
            value_statement: self.value_statement.clone(),
            acceptance_criteria: self.acceptance_criteria.clone(),
        }
    }
}

/// Severity of a risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
        }
    }
}

/// A risk found by the impact analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Risk {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub mitigation: String,
    /// True for risks added by the user rather than the analysis
    #[serde(default)]
    pub is_manual: bool,
}

/// A UI/UX, code or data impact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Impact {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub is_manual: bool,
}

/// A system the requirement depends on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dependency {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_manual: bool,
}

/// Breakdown of a requirement's dependencies, risks and impacts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpactAnalysis {
    pub dependencies: Vec<Dependency>,
    pub risks: Vec<Risk>,
    pub ui_ux_impacts: Vec<Impact>,
    pub code_impacts: Vec<Impact>,
    pub data_impacts: Vec<Impact>,
    pub executive_summary: String,
}

impl ImpactAnalysis {
    /// Returns the impact list for an impact category
    pub fn impacts(&self, kind: ItemKind) -> Option<&Vec<Impact>> {
        match kind {
            ItemKind::Ui => Some(&self.ui_ux_impacts),
            ItemKind::Code => Some(&self.code_impacts),
            ItemKind::Data => Some(&self.data_impacts),
            _ => None,
        }
    }

    pub fn impacts_mut(&mut self, kind: ItemKind) -> Option<&mut Vec<Impact>> {
        match kind {
            ItemKind::Ui => Some(&mut self.ui_ux_impacts),
            ItemKind::Code => Some(&mut self.code_impacts),
            ItemKind::Data => Some(&mut self.data_impacts),
            _ => None,
        }
    }

    /// Every item in page order: dependencies, risks, then UI/UX, code and
    /// data impacts
    pub fn items(&self) -> Vec<ItemRef> {
        let dependencies = self
            .dependencies
            .iter()
            .map(|d| ItemRef::new(ItemKind::Dependency, d.id.clone()));
        let risks = self
            .risks
            .iter()
            .map(|r| ItemRef::new(ItemKind::Risk, r.id.clone()));
        let impacts = [ItemKind::Ui, ItemKind::Code, ItemKind::Data]
            .into_iter()
            .flat_map(|kind| {
                self.impacts(kind)
                    .into_iter()
                    .flatten()
                    .map(move |i| ItemRef::new(kind, i.id.clone()))
            });
        dependencies.chain(risks).chain(impacts).collect()
    }

    /// Text an action against `target` operates on.
    ///
    /// For risks this is the mitigation, for impacts the description and
    /// for dependencies the name.
    pub fn item_text(&self, target: &ItemRef) -> Option<String> {
        match target.kind {
            ItemKind::Risk => self
                .risks
                .iter()
                .find(|r| r.id == target.id)
                .map(|r| r.mitigation.clone()),
            ItemKind::Dependency => self
                .dependencies
                .iter()
                .find(|d| d.id == target.id)
                .map(|d| d.name.clone()),
            ItemKind::Requirement => None,
            kind => self
                .impacts(kind)?
                .iter()
                .find(|i| i.id == target.id)
                .map(|i| i.description.clone()),
        }
    }

    /// Whether `target` was added by the user
    pub fn is_manual(&self, target: &ItemRef) -> Option<bool> {
        match target.kind {
            ItemKind::Risk => self
                .risks
                .iter()
                .find(|r| r.id == target.id)
                .map(|r| r.is_manual),
            ItemKind::Dependency => self
                .dependencies
                .iter()
                .find(|d| d.id == target.id)
                .map(|d| d.is_manual),
            ItemKind::Requirement => None,
            kind => self
                .impacts(kind)?
                .iter()
                .find(|i| i.id == target.id)
                .map(|i| i.is_manual),
        }
    }
}

/// Category of an analysis item an action targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Risk,
    Ui,
    Code,
    Data,
    Dependency,
    Requirement,
}

impl ItemKind {
    /// Heading used when a change is written into acceptance criteria
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Risk => "Risk Mitigation",
            ItemKind::Ui => "UI/UX Impact",
            ItemKind::Code => "Code Impact",
            ItemKind::Data => "Data Impact",
            ItemKind::Dependency => "Dependency",
            ItemKind::Requirement => "Requirement",
        }
    }

    /// True for the three impact columns
    pub fn is_impact(&self) -> bool {
        matches!(self, ItemKind::Ui | ItemKind::Code | ItemKind::Data)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Risk => write!(f, "risk"),
            ItemKind::Ui => write!(f, "ui"),
            ItemKind::Code => write!(f, "code"),
            ItemKind::Data => write!(f, "data"),
            ItemKind::Dependency => write!(f, "dependency"),
            ItemKind::Requirement => write!(f, "requirement"),
        }
    }
}

/// Identifies one analysis item.
///
/// Item ids are only unique within a category (`d1` names both a
/// dependency and a data impact in the mock analysis), so the kind is part
/// of the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub id: String,
}

impl ItemRef {
    pub fn new(kind: ItemKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// What the user asked to do with an item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Edit,
    Ignore,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Edit => write!(f, "edit"),
            ActionKind::Ignore => write!(f, "ignore"),
        }
    }
}

/// Outcome recorded on a completed action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Accepted,
    Rejected,
    Added,
    Removed,
    Edited,
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStatus::Accepted => write!(f, "Accepted"),
            ActionStatus::Rejected => write!(f, "Rejected"),
            ActionStatus::Added => write!(f, "Added"),
            ActionStatus::Removed => write!(f, "Removed"),
            ActionStatus::Edited => write!(f, "Edited"),
        }
    }
}

/// A staged or completed operation against an analysis item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpactAction {
    /// Id of the targeted item
    pub id: String,
    #[serde(rename = "type")]
    pub item_kind: ItemKind,
    /// Original item text
    pub item: String,
    pub action: ActionKind,
    pub timestamp: DateTime<Utc>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ImpactAction {
    pub fn new(
        target: &ItemRef,
        item: impl Into<String>,
        action: ActionKind,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id: target.id.clone(),
            item_kind: target.kind,
            item: item.into(),
            action,
            timestamp: Utc::now(),
            username: username.into(),
            edited_content: None,
            status: None,
            completed_at: None,
        }
    }

    pub fn target(&self) -> ItemRef {
        ItemRef::new(self.item_kind, self.id.clone())
    }

    /// Edited text when present, otherwise the original item text
    pub fn content(&self) -> &str {
        self.edited_content.as_deref().unwrap_or(&self.item)
    }

    /// Marks the action completed with `status`
    pub fn complete(mut self, status: ActionStatus) -> Self {
        self.status = Some(status);
        self.completed_at = Some(Utc::now());
        self
    }

    /// Block appended to acceptance criteria when the action is accepted
    pub fn change_description(&self) -> String {
        format!("\n\nImpact: {}\n{}", self.item_kind.label(), self.content())
    }

    /// One-line activity log entry
    pub fn describe(&self) -> String {
        match self.status {
            None => {
                let verb = match self.action {
                    ActionKind::Edit => "Edited",
                    ActionKind::Ignore => "Ignored",
                };
                format!("{} {}: {}", verb, self.item_kind, self.item)
            }
            Some(status) => format!("{} {}: {}", status, self.item_kind, self.content()),
        }
    }

    /// When the action was completed, or staged if still pending
    pub fn effective_time(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analysis() -> ImpactAnalysis {
        ImpactAnalysis {
            dependencies: vec![Dependency {
                id: "d1".to_string(),
                name: "Authentication Service".to_string(),
                is_manual: false,
            }],
            risks: vec![Risk {
                id: "r1".to_string(),
                description: "High load".to_string(),
                severity: Severity::High,
                mitigation: "Add caching".to_string(),
                is_manual: false,
            }],
            ui_ux_impacts: vec![],
            code_impacts: vec![],
            data_impacts: vec![Impact {
                id: "d1".to_string(),
                description: "New schema".to_string(),
                is_manual: true,
            }],
            executive_summary: String::new(),
        }
    }

    #[test]
    fn test_item_text_distinguishes_kinds_sharing_an_id() {
        let analysis = sample_analysis();
        assert_eq!(
            analysis.item_text(&ItemRef::new(ItemKind::Dependency, "d1")),
            Some("Authentication Service".to_string())
        );
        assert_eq!(
            analysis.item_text(&ItemRef::new(ItemKind::Data, "d1")),
            Some("New schema".to_string())
        );
        assert_eq!(
            analysis.item_text(&ItemRef::new(ItemKind::Risk, "r1")),
            Some("Add caching".to_string())
        );
        assert_eq!(analysis.item_text(&ItemRef::new(ItemKind::Code, "d1")), None);
        assert_eq!(analysis.is_manual(&ItemRef::new(ItemKind::Data, "d1")), Some(true));
    }

    #[test]
    fn test_items_in_page_order() {
        let items = sample_analysis().items();
        assert_eq!(
            items,
            vec![
                ItemRef::new(ItemKind::Dependency, "d1"),
                ItemRef::new(ItemKind::Risk, "r1"),
                ItemRef::new(ItemKind::Data, "d1"),
            ]
        );
    }

    #[test]
    fn test_change_description_prefers_edited_content() {
        let target = ItemRef::new(ItemKind::Risk, "r1");
        let mut action = ImpactAction::new(&target, "Add caching", ActionKind::Edit, "Jane");
        assert_eq!(
            action.change_description(),
            "\n\nImpact: Risk Mitigation\nAdd caching"
        );

        action.edited_content = Some("Add a CDN".to_string());
        assert_eq!(action.change_description(), "\n\nImpact: Risk Mitigation\nAdd a CDN");
    }

    #[test]
    fn test_describe_pending_and_completed() {
        let target = ItemRef::new(ItemKind::Ui, "ui1");
        let action = ImpactAction::new(&target, "New flow", ActionKind::Ignore, "Jane");
        assert_eq!(action.describe(), "Ignored ui: New flow");

        let done = action.complete(ActionStatus::Rejected);
        assert_eq!(done.describe(), "Rejected ui: New flow");
        assert!(done.completed_at.is_some());
    }

    #[test]
    fn test_action_serializes_kind_as_type() {
        let target = ItemRef::new(ItemKind::Code, "c1");
        let action = ImpactAction::new(&target, "API change", ActionKind::Edit, "Jane");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "code");
        assert_eq!(json["action"], "edit");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_requirement_form_display_name() {
        assert_eq!(RequirementForm::default().display_name(), UNTITLED_REQUIREMENT);
        assert_eq!(
            RequirementForm::new("Checkout Redesign", "", "").display_name(),
            "Checkout Redesign"
        );
    }
}
