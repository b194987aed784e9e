//! Interactive session walking the application's pages.
//!
//! Each page prints itself, shows a menu and maps the choice onto
//! [`AppState`]. Esc on a page menu goes back; Ctrl-C quits.

use anyhow::Result;
use colored::Colorize;
use inquire::{InquireError, Text};
use log::debug;
use std::fmt;
use std::path::PathBuf;

use brewhq_core::{
    write_export, ActionKind, AppState, ExportFormat, ImpactReview, Repository, Route,
    StoreError, WizardStep, QUICK_SUGGESTIONS,
};

use crate::prompts::{self, choose};
use crate::render;

enum Flow {
    Continue,
    Quit,
}

pub fn run(app: &mut AppState) -> Result<()> {
    println!(
        "{} {}",
        "BrewHQ".bold(),
        format!("signed in as {} (Esc goes back, Ctrl-C quits)", app.username()).dimmed()
    );

    loop {
        render::print_breadcrumbs(&app.breadcrumbs());
        let result = match app.route() {
            Route::Home | Route::Projects => projects_page(app),
            Route::NewProject => new_project_page(app),
            Route::Requirements { project_id } => requirements_page(app, project_id),
            Route::Chat { project_id } => chat_page(app, project_id),
            Route::Analyze { .. } => analysis_page(app),
        };

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => match e.downcast_ref::<InquireError>() {
                Some(InquireError::OperationCanceled) => {}
                Some(InquireError::OperationInterrupted) => break,
                _ => return Err(e),
            },
        }
    }

    println!("{}", "Goodbye!".dimmed());
    Ok(())
}

/// Prints a refused operation and carries on
fn report<T>(result: Result<T, StoreError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            println!("{}", e.to_string().yellow());
            None
        }
    }
}

/// Esc on a page menu
fn go_back(app: &mut AppState) -> Flow {
    app.back();
    Flow::Continue
}

fn resolve_snackbar(app: &mut AppState) -> Result<()> {
    let Some(snackbar) = app.snackbar() else {
        return Ok(());
    };
    if prompts::prompt_snackbar(snackbar)? {
        report(app.confirm_snackbar());
        println!("{}", "Deleted.".green());
    } else {
        app.dismiss_snackbar();
        println!("{}", "Cancelled.".dimmed());
    }
    Ok(())
}

// Projects page

#[derive(Clone, Copy)]
enum ProjectAction {
    Open,
    Expand,
    Favorite,
    NewProject,
    AddRepository,
    ShowRepository,
    DeleteRepository,
    DeleteProject,
    Export,
    Quit,
}

impl fmt::Display for ProjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectAction::Open => "Open project",
            ProjectAction::Expand => "Expand / collapse project",
            ProjectAction::Favorite => "Toggle favorite",
            ProjectAction::NewProject => "New project",
            ProjectAction::AddRepository => "Connect repository",
            ProjectAction::ShowRepository => "Show repository URL",
            ProjectAction::DeleteRepository => "Delete repository",
            ProjectAction::DeleteProject => "Delete project",
            ProjectAction::Export => "Export session",
            ProjectAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn projects_page(app: &mut AppState) -> Result<Flow> {
    render::print_projects(app.projects(), &app.view);

    let actions = vec![
        ProjectAction::Open,
        ProjectAction::Expand,
        ProjectAction::Favorite,
        ProjectAction::NewProject,
        ProjectAction::AddRepository,
        ProjectAction::ShowRepository,
        ProjectAction::DeleteRepository,
        ProjectAction::DeleteProject,
        ProjectAction::Export,
        ProjectAction::Quit,
    ];
    let Some(action) = choose("Projects:", actions)? else {
        return Ok(go_back(app));
    };

    match action {
        ProjectAction::NewProject => app.start_new_project(),
        ProjectAction::Export => export_session(app)?,
        ProjectAction::Quit => return Ok(Flow::Quit),
        action => {
            let Some(id) = prompts::prompt_select_project(app.projects())? else {
                return Ok(Flow::Continue);
            };
            project_action(app, action, id)?;
        }
    }
    Ok(Flow::Continue)
}

fn project_action(app: &mut AppState, action: ProjectAction, id: u32) -> Result<()> {
    match action {
        ProjectAction::Open => {
            report(app.select_project(id));
        }
        ProjectAction::Expand => {
            app.view.toggle_expanded(id);
        }
        ProjectAction::Favorite => {
            let favorite = app.view.toggle_favorite(id);
            debug!("Project {} favorite: {}", id, favorite);
        }
        ProjectAction::AddRepository => {
            if let Some((name, branch, url)) = prompts::prompt_repository()? {
                report(app.add_repository(id, Repository::new(name, branch, url)));
            }
        }
        ProjectAction::ShowRepository => {
            let Some(project) = app.project(id) else {
                return Ok(());
            };
            if let Some(name) = prompts::prompt_select_repository(project)? {
                if let Some(repo) = project.repository(&name) {
                    println!("{}", repo.url.underline());
                }
            }
        }
        ProjectAction::DeleteRepository => {
            let Some(project) = app.project(id) else {
                return Ok(());
            };
            if let Some(name) = prompts::prompt_select_repository(project)? {
                if report(app.request_delete_repository(id, &name)).is_some() {
                    resolve_snackbar(app)?;
                }
            }
        }
        ProjectAction::DeleteProject => {
            if report(app.request_delete_project(id)).is_some() {
                resolve_snackbar(app)?;
            }
        }
        ProjectAction::NewProject | ProjectAction::Export | ProjectAction::Quit => {}
    }
    Ok(())
}

fn export_session(app: &AppState) -> Result<()> {
    let formats = vec![ExportFormat::Markdown, ExportFormat::Json, ExportFormat::Yaml];
    let Some(format) = choose("Format:", formats)? else {
        return Ok(());
    };
    let default_name = match format {
        ExportFormat::Markdown => "brewhq-export.md",
        ExportFormat::Json => "brewhq-export.json",
        ExportFormat::Yaml => "brewhq-export.yaml",
    };
    let path = Text::new("Output file:").with_default(default_name).prompt()?;
    let path = PathBuf::from(path);

    write_export(&app.snapshot(), format, &path)?;
    println!("{} {}", "Exported to".green(), path.display());
    Ok(())
}

// New project wizard

#[derive(Clone, Copy)]
enum WizardAction {
    Create,
    Back,
    Cancel,
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardAction::Create => f.write_str("Create project"),
            WizardAction::Back => f.write_str("Back"),
            WizardAction::Cancel => f.write_str("Cancel"),
        }
    }
}

fn new_project_page(app: &mut AppState) -> Result<Flow> {
    let step = app.wizard.step();
    println!("{}", format!("Step {} of 2: {}", step.number(), step.title()).bold());

    match step {
        WizardStep::Details => match prompts::prompt_project_details(&app.wizard.form)? {
            Some((name, description)) => {
                app.wizard.form.name = name;
                app.wizard.form.description = description;
                app.wizard.next();
            }
            None => return Ok(go_back(app)),
        },
        WizardStep::ConnectRepository => {
            if let Some((name, branch, url)) = prompts::prompt_repository()? {
                app.wizard.connect_repository(&name, &branch, &url);
            }
            let actions = vec![WizardAction::Create, WizardAction::Back, WizardAction::Cancel];
            match choose("Next:", actions)? {
                Some(WizardAction::Create) => {
                    if let Some(id) = app.finish_wizard() {
                        println!("{}", format!("Created project {}", id).green());
                    }
                }
                Some(WizardAction::Back) => app.wizard.back(),
                Some(WizardAction::Cancel) | None => return Ok(go_back(app)),
            }
        }
    }
    Ok(Flow::Continue)
}

// Requirements page

#[derive(Clone, Copy)]
enum RequirementAction {
    Analyse,
    Open,
    Delete,
    AskBrewer,
    SwitchProject,
    Back,
    Quit,
}

impl fmt::Display for RequirementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequirementAction::Analyse => "Analyse requirement",
            RequirementAction::Open => "Open requirement",
            RequirementAction::Delete => "Delete requirement",
            RequirementAction::AskBrewer => "Ask Brewer",
            RequirementAction::SwitchProject => "Switch project",
            RequirementAction::Back => "Back",
            RequirementAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn requirements_page(app: &mut AppState, project_id: u32) -> Result<Flow> {
    let Some(project) = app.project(project_id) else {
        println!("{}", StoreError::ProjectNotFound(project_id).to_string().yellow());
        app.navigate(Route::Projects, None);
        return Ok(Flow::Continue);
    };
    println!("{} {}", project.name.bold(), project.description.dimmed());

    let requirements = app.requirements_for(project_id);
    render::print_requirements(&requirements);

    let mut actions = vec![RequirementAction::Analyse];
    if !requirements.is_empty() {
        actions.push(RequirementAction::Open);
        actions.push(RequirementAction::Delete);
    }
    actions.extend([
        RequirementAction::AskBrewer,
        RequirementAction::SwitchProject,
        RequirementAction::Back,
        RequirementAction::Quit,
    ]);

    let Some(action) = choose("Requirements:", actions)? else {
        return Ok(go_back(app));
    };
    match action {
        RequirementAction::Analyse => {
            let form = prompts::prompt_requirement_form()?;
            report(app.submit_requirement(form));
        }
        RequirementAction::Open => {
            let requirements = app.requirements_for(project_id);
            if let Some(id) = prompts::prompt_select_requirement(&requirements)? {
                report(app.select_requirement(&id));
            }
        }
        RequirementAction::Delete => {
            let requirements = app.requirements_for(project_id);
            if let Some(id) = prompts::prompt_select_requirement(&requirements)? {
                if report(app.request_delete_requirement(&id)).is_some() {
                    resolve_snackbar(app)?;
                }
            }
        }
        RequirementAction::AskBrewer => {
            report(app.open_chat(project_id));
        }
        RequirementAction::SwitchProject => {
            if let Some(id) = prompts::prompt_select_project(app.projects())? {
                report(app.select_project(id));
            }
        }
        RequirementAction::Back => return Ok(go_back(app)),
        RequirementAction::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

// Impact analysis page

#[derive(Clone, Copy)]
enum AnalysisAction {
    Edit,
    Ignore,
    Review,
    AcceptAll,
    UndoAll,
    Reconsider,
    AddRisk,
    AddImpact,
    AddDependency,
    EditManual,
    RemoveManual,
    Citation,
    ActivityLog,
    Back,
    Quit,
}

impl fmt::Display for AnalysisAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnalysisAction::Edit => "Edit item",
            AnalysisAction::Ignore => "Ignore item",
            AnalysisAction::Review => "Review changes",
            AnalysisAction::AcceptAll => "Accept all changes",
            AnalysisAction::UndoAll => "Undo all changes",
            AnalysisAction::Reconsider => "Reconsider item",
            AnalysisAction::AddRisk => "Add risk",
            AnalysisAction::AddImpact => "Add impact",
            AnalysisAction::AddDependency => "Add dependency",
            AnalysisAction::EditManual => "Edit added item",
            AnalysisAction::RemoveManual => "Remove added item",
            AnalysisAction::Citation => "Show citation",
            AnalysisAction::ActivityLog => "Toggle activity log",
            AnalysisAction::Back => "Back",
            AnalysisAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn review_mut(app: &mut AppState) -> Result<&mut ImpactReview> {
    Ok(app.review_mut().ok_or(StoreError::NoOpenAnalysis)?)
}

fn analysis_page(app: &mut AppState) -> Result<Flow> {
    let Some(review) = app.review() else {
        println!("{}", "No requirement selected.".yellow());
        return Ok(go_back(app));
    };
    render::print_analysis(review);
    if review.is_activity_log_open() {
        println!();
        render::print_activity_log(review);
    }

    let mut actions = vec![AnalysisAction::Edit, AnalysisAction::Ignore];
    if review.has_pending() {
        actions.extend([
            AnalysisAction::Review,
            AnalysisAction::AcceptAll,
            AnalysisAction::UndoAll,
        ]);
    }
    actions.extend([
        AnalysisAction::Reconsider,
        AnalysisAction::AddRisk,
        AnalysisAction::AddImpact,
        AnalysisAction::AddDependency,
        AnalysisAction::EditManual,
        AnalysisAction::RemoveManual,
        AnalysisAction::Citation,
        AnalysisAction::ActivityLog,
        AnalysisAction::Back,
        AnalysisAction::Quit,
    ]);

    let Some(action) = choose("Impact analysis:", actions)? else {
        return Ok(go_back(app));
    };
    match action {
        AnalysisAction::Edit => edit_item(app, false)?,
        AnalysisAction::Reconsider => edit_item(app, true)?,
        AnalysisAction::Ignore => {
            let review = review_mut(app)?;
            if let Some(item) = prompts::prompt_select_item(review, "Ignore which item?", false)? {
                report(review.stage(item, ActionKind::Ignore).map(|_| ()));
            }
        }
        AnalysisAction::Review => review_panel(app)?,
        AnalysisAction::AcceptAll => {
            if let Some(count) = report(app.accept_all_changes()) {
                println!("{}", format!("Accepted {} change(s)", count).green());
            }
        }
        AnalysisAction::UndoAll => {
            let count = review_mut(app)?.undo_all();
            println!("{}", format!("Discarded {} pending change(s)", count).dimmed());
        }
        AnalysisAction::AddRisk => {
            let (description, severity, mitigation) = prompts::prompt_new_risk()?;
            review_mut(app)?.add_risk(description, severity, mitigation);
        }
        AnalysisAction::AddImpact => {
            if let Some(kind) = prompts::prompt_impact_kind()? {
                let description = Text::new("Description:").prompt()?;
                report(review_mut(app)?.add_impact(kind, description));
            }
        }
        AnalysisAction::AddDependency => {
            let name = Text::new("Dependency:").prompt()?;
            review_mut(app)?.add_dependency(name);
        }
        AnalysisAction::EditManual => {
            let review = review_mut(app)?;
            if let Some(item) = prompts::prompt_select_item(review, "Edit which item?", true)? {
                let current = review.display_text(&item).unwrap_or_default();
                if let Some(text) = prompts::prompt_edit_text("New text:", &current)? {
                    report(review.update_manual(&item, text));
                }
            }
        }
        AnalysisAction::RemoveManual => {
            let review = review_mut(app)?;
            if let Some(item) = prompts::prompt_select_item(review, "Remove which item?", true)? {
                report(review.remove_manual(&item));
            }
        }
        AnalysisAction::Citation => show_citation(review_mut(app)?)?,
        AnalysisAction::ActivityLog => {
            review_mut(app)?.toggle_activity_log();
        }
        AnalysisAction::Back => return Ok(go_back(app)),
        AnalysisAction::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Stages an edit (or reconsiders a resolved item) and runs the editor
fn edit_item(app: &mut AppState, reconsider: bool) -> Result<()> {
    let review = review_mut(app)?;
    let message = if reconsider {
        "Reconsider which item?"
    } else {
        "Edit which item?"
    };
    let Some(item) = prompts::prompt_select_item(review, message, false)? else {
        return Ok(());
    };

    let staged = if reconsider {
        review.reconsider(&item).map(|_| ())
    } else {
        review.stage(item.clone(), ActionKind::Edit).map(|_| ())
    };
    if report(staged).is_none() {
        return Ok(());
    }

    let seed = review
        .editing()
        .map(|e| e.content.clone())
        .unwrap_or_default();
    match prompts::prompt_edit_text("Edit content:", &seed)? {
        Some(text) => {
            review.set_edit_content(text)?;
            review.submit_edit()?;
            println!("{}", "Edit staged for review.".green());
        }
        None => {
            review.discard(&item)?;
            println!("{}", "Edit discarded.".dimmed());
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum PanelAction {
    Decide,
    AcceptAll,
    RejectAll,
    Close,
}

impl fmt::Display for PanelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelAction::Decide => f.write_str("Accept or reject a change"),
            PanelAction::AcceptAll => f.write_str("Accept all"),
            PanelAction::RejectAll => f.write_str("Reject all"),
            PanelAction::Close => f.write_str("Close"),
        }
    }
}

#[derive(Clone, Copy)]
enum Decision {
    Accept,
    Reject,
    Discard,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accept => f.write_str("Accept"),
            Decision::Reject => f.write_str("Reject"),
            Decision::Discard => f.write_str("Discard"),
        }
    }
}

/// The "Review Changes" panel
fn review_panel(app: &mut AppState) -> Result<()> {
    if report(review_mut(app)?.open_review_panel()).is_none() {
        return Ok(());
    }

    loop {
        let review = review_mut(app)?;
        if !review.is_review_panel_open() || !review.has_pending() {
            review.close_review_panel();
            break;
        }

        println!("\n{}", "Review Changes".bold());
        for action in review.pending() {
            println!("  {}", action.describe());
            if let Some(edited) = &action.edited_content {
                println!("    {} {}", "->".dimmed(), edited.green());
            }
        }

        let actions = vec![
            PanelAction::Decide,
            PanelAction::AcceptAll,
            PanelAction::RejectAll,
            PanelAction::Close,
        ];
        match choose("Review:", actions)? {
            Some(PanelAction::Decide) => {
                let Some(item) = prompts::prompt_select_pending(review)? else {
                    continue;
                };
                let decisions = vec![Decision::Accept, Decision::Reject, Decision::Discard];
                match choose("Decision:", decisions)? {
                    Some(Decision::Accept) => {
                        report(review.accept(&item).map(|_| ()));
                    }
                    Some(Decision::Reject) => {
                        report(review.reject(&item).map(|_| ()));
                    }
                    Some(Decision::Discard) => {
                        report(review.discard(&item).map(|_| ()));
                    }
                    None => {}
                }
            }
            Some(PanelAction::AcceptAll) => {
                if let Some(count) = report(app.accept_all_changes()) {
                    println!("{}", format!("Accepted {} change(s)", count).green());
                }
            }
            Some(PanelAction::RejectAll) => {
                if let Some(count) = report(review.reject_all()) {
                    println!("{}", format!("Rejected {} change(s)", count).red());
                }
            }
            Some(PanelAction::Close) | None => {
                review.close_review_panel();
                break;
            }
        }
    }
    Ok(())
}

fn show_citation(review: &ImpactReview) -> Result<()> {
    let citations = review.citations();
    let labels: Vec<String> = citations
        .iter()
        .map(|c| {
            format!(
                "[{}] {}",
                c.number,
                review.analysis().item_text(&c.target).unwrap_or_default()
            )
        })
        .collect();
    if let Some(label) = choose("Citation:", labels)? {
        if let Some(citation) = citations
            .iter()
            .find(|c| label.starts_with(&format!("[{}]", c.number)))
        {
            render::print_citation(citation.number, &citation.detail);
        }
    }
    Ok(())
}

// Ask Brewer

#[derive(Clone, Copy)]
enum ChatAction {
    Send,
    Suggestion,
    NewChat,
    History,
    Back,
    Quit,
}

impl fmt::Display for ChatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChatAction::Send => "Send message",
            ChatAction::Suggestion => "Use a suggestion",
            ChatAction::NewChat => "New chat",
            ChatAction::History => "Open previous chat",
            ChatAction::Back => "Back",
            ChatAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn chat_page(app: &mut AppState, project_id: u32) -> Result<Flow> {
    if report(app.attach_chat(project_id)).is_none() {
        app.navigate(Route::Projects, None);
        return Ok(Flow::Continue);
    }
    render::print_chat(app.chat().messages());

    let mut actions = vec![ChatAction::Send];
    if app.chat().messages().is_empty() {
        actions.push(ChatAction::Suggestion);
    }
    actions.push(ChatAction::NewChat);
    if !app.chat().history().is_empty() {
        actions.push(ChatAction::History);
    }
    actions.extend([ChatAction::Back, ChatAction::Quit]);

    let Some(action) = choose("Ask Brewer:", actions)? else {
        return Ok(go_back(app));
    };
    match action {
        ChatAction::Send => {
            let text = Text::new("Message:").prompt()?;
            send_message(app, &text);
        }
        ChatAction::Suggestion => {
            if let Some(text) = choose("Suggestion:", QUICK_SUGGESTIONS.to_vec())? {
                send_message(app, text);
            }
        }
        ChatAction::NewChat => app.chat_mut().new_chat(),
        ChatAction::History => {
            if let Some(id) = prompts::prompt_select_chat(app.chat().history())? {
                app.chat_mut().load_chat(id);
            }
        }
        ChatAction::Back => return Ok(go_back(app)),
        ChatAction::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Sends a message and waits out the reply delay
pub fn send_message(app: &mut AppState, text: &str) {
    let Some(pending) = report(app.ask(text)) else {
        return;
    };
    println!("{}", "Brewer is typing...".dimmed().italic());
    match app.spawn_reply(pending).wait() {
        Some(reply) => {
            report(app.receive_reply(reply));
        }
        None => println!("{}", "Brewer did not answer.".red()),
    }
}
