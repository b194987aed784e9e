use anyhow::Result;
use inquire::{Confirm, Editor, Select, Text};
use std::fmt::Display;
use uuid::Uuid;

use brewhq_core::{
    ChatHistoryEntry, ImpactReview, ItemKind, ItemRef, NewProjectForm, Project, Requirement,
    RequirementForm, Severity, Snackbar, DEFAULT_BRANCH,
};

/// Shows a menu; `None` when the user presses Esc
pub fn choose<T: Display>(message: &str, options: Vec<T>) -> Result<Option<T>> {
    if options.is_empty() {
        return Ok(None);
    }
    Ok(Select::new(message, options).prompt_skippable()?)
}

/// Picks one of `labels`, returning its index
fn choose_index(message: &str, labels: Vec<String>) -> Result<Option<usize>> {
    if labels.is_empty() {
        return Ok(None);
    }
    let choice = Select::new(message, labels).raw_prompt_skippable()?;
    Ok(choice.map(|option| option.index))
}

fn text_with_default<'a>(message: &'a str, current: &'a str) -> Text<'a, 'a> {
    let text = Text::new(message);
    if current.is_empty() {
        text
    } else {
        text.with_default(current)
    }
}

/// Prompts for the first wizard step, keeping values entered before going
/// back. `None` if the user backs out.
pub fn prompt_project_details(form: &NewProjectForm) -> Result<Option<(String, String)>> {
    let Some(name) = text_with_default("Project name:", &form.name).prompt_skippable()? else {
        return Ok(None);
    };
    let description = text_with_default("Description:", &form.description).prompt()?;
    Ok(Some((name, description)))
}

/// Prompts for an optional repository to connect
pub fn prompt_repository() -> Result<Option<(String, String, String)>> {
    let connect = Confirm::new("Connect a repository?")
        .with_default(false)
        .prompt()?;
    if !connect {
        return Ok(None);
    }

    let name = Text::new("Repository name:").prompt()?;
    let branch = Text::new("Branch:").with_default(DEFAULT_BRANCH).prompt()?;
    let url = Text::new("URL:").prompt()?;
    Ok(Some((name, branch, url)))
}

/// Prompts for the "Analyse Requirement" form
pub fn prompt_requirement_form() -> Result<RequirementForm> {
    let name = Text::new("Requirement name:").prompt()?;
    let value_statement = Text::new("Value statement:")
        .with_help_message("As a <user> I want <goal> so that <benefit>")
        .prompt()?;
    let acceptance_criteria = Editor::new("Acceptance criteria:").prompt()?;
    Ok(RequirementForm::new(name, value_statement, acceptance_criteria))
}

pub fn prompt_select_project(projects: &[Project]) -> Result<Option<u32>> {
    let labels = projects
        .iter()
        .map(|p| format!("{} ({})", p.name, p.description))
        .collect();
    Ok(choose_index("Select a project:", labels)?.map(|idx| projects[idx].id))
}

pub fn prompt_select_repository(project: &Project) -> Result<Option<String>> {
    let labels = project
        .repositories
        .iter()
        .map(|r| format!("{} ({})", r.name, r.branch))
        .collect();
    Ok(choose_index("Select a repository:", labels)?
        .map(|idx| project.repositories[idx].name.clone()))
}

pub fn prompt_select_requirement(requirements: &[&Requirement]) -> Result<Option<String>> {
    let labels = requirements
        .iter()
        .map(|r| {
            let draft = if r.has_draft { " [draft]" } else { "" };
            format!("{}{}", r.name, draft)
        })
        .collect();
    Ok(choose_index("Select a requirement:", labels)?.map(|idx| requirements[idx].id.clone()))
}

/// Picks an analysis item, optionally limited to user-added ones
pub fn prompt_select_item(
    review: &ImpactReview,
    message: &str,
    manual_only: bool,
) -> Result<Option<ItemRef>> {
    let analysis = review.analysis();
    let items: Vec<ItemRef> = analysis
        .items()
        .into_iter()
        .filter(|item| !manual_only || analysis.is_manual(item) == Some(true))
        .collect();
    let labels = items
        .iter()
        .map(|item| {
            format!(
                "{} [{}]: {}",
                item.kind.label(),
                item.id,
                review.display_text(item).unwrap_or_default()
            )
        })
        .collect();
    Ok(choose_index(message, labels)?.map(|idx| items[idx].clone()))
}

/// Picks a pending action from the review panel
pub fn prompt_select_pending(review: &ImpactReview) -> Result<Option<ItemRef>> {
    let labels = review.pending().iter().map(|a| a.describe()).collect();
    Ok(choose_index("Pending change:", labels)?.map(|idx| review.pending()[idx].target()))
}

/// Opens the editor on `text`; `None` if the user backs out
pub fn prompt_edit_text(message: &str, text: &str) -> Result<Option<String>> {
    Ok(Editor::new(message)
        .with_predefined_text(text)
        .prompt_skippable()?
        .map(|s| s.trim().to_string()))
}

pub fn prompt_new_risk() -> Result<(String, Severity, String)> {
    let description = Text::new("Risk:").prompt()?;
    let severity = Select::new(
        "Severity:",
        vec![Severity::High, Severity::Medium, Severity::Low],
    )
    .prompt()?;
    let mitigation = Text::new("Mitigation:").prompt()?;
    Ok((description, severity, mitigation))
}

pub fn prompt_impact_kind() -> Result<Option<ItemKind>> {
    let kinds = vec![ItemKind::Ui, ItemKind::Code, ItemKind::Data];
    let labels = kinds.iter().map(|k| k.label().to_string()).collect();
    Ok(choose_index("Impact category:", labels)?.map(|idx| kinds[idx]))
}

pub fn prompt_select_chat(history: &[ChatHistoryEntry]) -> Result<Option<Uuid>> {
    let labels = history
        .iter()
        .map(|entry| {
            format!(
                "{} ({})",
                entry.first_message,
                entry.timestamp.with_timezone(&chrono::Local).format("%b %-d %H:%M")
            )
        })
        .collect();
    Ok(choose_index("Previous chats:", labels)?.map(|idx| history[idx].id))
}

/// Asks the user to confirm a snackbar's action
pub fn prompt_snackbar(snackbar: &Snackbar) -> Result<bool> {
    let prompt = format!("{} ({} / Cancel)", snackbar.message, snackbar.action_label);
    Ok(Confirm::new(&prompt).with_default(false).prompt()?)
}
