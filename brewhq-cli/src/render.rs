//! Terminal rendering of pages

use chrono::Local;
use colored::{ColoredString, Colorize};

use brewhq_core::{
    format_last_viewed, ActionKind, ActionStatus, Breadcrumb, ChatMessage, CitationDetail,
    ImpactReview, ItemKind, ItemRef, ItemState, MessageRole, Project, ProjectsView, Requirement,
    Severity, QUICK_SUGGESTIONS,
};

pub fn print_breadcrumbs(crumbs: &[Breadcrumb]) {
    let trail: Vec<String> = crumbs
        .iter()
        .map(|c| match c.path {
            Some(_) => c.label.dimmed().to_string(),
            None => c.label.bold().to_string(),
        })
        .collect();
    let separator = " / ".dimmed().to_string();
    println!("\n{}", trail.join(separator.as_str()));
}

pub fn print_projects(projects: &[Project], view: &ProjectsView) {
    if projects.is_empty() {
        println!("{}", "No projects yet.".yellow());
        return;
    }

    println!(
        "{:<3} {:<4} | {:<28} | {:<5} | {}",
        "", "ID", "Name", "Repos", "Description"
    );
    println!("{}", "-".repeat(80));
    for project in projects {
        let star = if view.is_favorite(project.id) {
            "★".yellow()
        } else {
            " ".normal()
        };
        let marker = if view.is_expanded(project.id) { "▾" } else { "▸" };
        println!(
            "{}{}  {:<4} | {:<28} | {:<5} | {}",
            star,
            marker,
            project.id,
            project.name,
            project.repositories.len(),
            project.description
        );
        if view.is_expanded(project.id) {
            if project.repositories.is_empty() {
                println!("{:>10}{}", "", "no repositories".dimmed());
            }
            for repo in &project.repositories {
                println!(
                    "{:>10}{} {} {}",
                    "",
                    repo.name.cyan(),
                    format!("({})", repo.branch).dimmed(),
                    repo.url
                );
            }
        }
    }
}

fn impact_score(score: u8) -> ColoredString {
    let text = format!("{}/5", score);
    match score {
        4..=5 => text.red(),
        3 => text.yellow(),
        _ => text.green(),
    }
}

pub fn print_requirements(requirements: &[&Requirement]) {
    if requirements.is_empty() {
        println!("{}", "No requirements yet.".yellow());
        println!(
            "  Ask Brewer for help getting started, or analyse your first requirement."
        );
        return;
    }

    let now = Local::now();
    println!(
        "{:<32} | {:<6} | {:<6} | {:<11} | {}",
        "Name", "Impact", "Draft", "Last viewed", "Edited by"
    );
    println!("{}", "-".repeat(80));
    for req in requirements {
        let draft = if req.has_draft {
            "draft".yellow()
        } else {
            "".normal()
        };
        println!(
            "{:<32} | {:<6} | {:<6} | {:<11} | {}",
            req.name,
            impact_score(req.impact_score),
            draft,
            format_last_viewed(req.last_viewed, &now),
            req.edited_by
        );
    }
}

fn severity(severity: Severity) -> ColoredString {
    match severity {
        Severity::High => "High".red(),
        Severity::Medium => "Medium".yellow(),
        Severity::Low => "Low".green(),
    }
}

fn state_badge(state: ItemState) -> ColoredString {
    match state {
        ItemState::Untouched => "".normal(),
        ItemState::Editing => "[editing]".cyan(),
        ItemState::Pending(ActionKind::Edit) => "[pending edit]".yellow(),
        ItemState::Pending(ActionKind::Ignore) => "[pending ignore]".yellow(),
        ItemState::Resolved(ActionStatus::Accepted) => "[accepted]".green(),
        ItemState::Resolved(ActionStatus::Rejected) => "[rejected]".red(),
        ItemState::Resolved(status) => format!("[{}]", status).dimmed(),
    }
}

fn print_item(review: &ImpactReview, item: &ItemRef) {
    let text = review.display_text(item).unwrap_or_default();
    let citation = review
        .citation_number(item)
        .map(|n| format!("[{}] ", n))
        .unwrap_or_default();
    let manual = if review.analysis().is_manual(item) == Some(true) {
        " (added)".dimmed().to_string()
    } else {
        String::new()
    };
    println!(
        "  {}{}{} {}",
        citation.dimmed(),
        text,
        manual,
        state_badge(review.item_state(item))
    );
}

/// Prints the analysis page: requirement, summary and every section
pub fn print_analysis(review: &ImpactReview) {
    let requirement = review.requirement();
    println!("{}", requirement.display_name().bold().underline());
    if !requirement.value_statement.is_empty() {
        println!("{}", requirement.value_statement.italic());
    }
    println!("\n{}", "Acceptance Criteria".bold());
    if review.acceptance_criteria().is_empty() {
        println!("  {}", "none yet".dimmed());
    } else {
        for line in review.acceptance_criteria().lines() {
            println!("  {}", line);
        }
    }

    let analysis = review.analysis();
    let markers: Vec<String> = review
        .citations()
        .iter()
        .map(|c| format!("[{}]", c.number))
        .collect();
    println!("\n{}", "Executive Summary".bold());
    println!("  {} {}", analysis.executive_summary, markers.join("").dimmed());

    let sections = [
        ("Dependencies", ItemKind::Dependency),
        ("Risks", ItemKind::Risk),
        ("UI/UX Impacts", ItemKind::Ui),
        ("Code Impacts", ItemKind::Code),
        ("Data Impacts", ItemKind::Data),
    ];
    let items = analysis.items();
    for (title, kind) in sections {
        println!("\n{}", title.bold());
        for item in items.iter().filter(|i| i.kind == kind) {
            if kind == ItemKind::Risk {
                if let Some(risk) = analysis.risks.iter().find(|r| r.id == item.id) {
                    println!("  {} {}", severity(risk.severity), risk.description);
                }
            }
            print_item(review, item);
        }
    }

    if review.has_pending() {
        println!(
            "\n{}",
            format!("{} change(s) awaiting review", review.pending().len()).yellow()
        );
    }
}

pub fn print_citation(number: usize, detail: &CitationDetail) {
    match detail {
        CitationDetail::Risk {
            description,
            severity: level,
            mitigation,
        } => {
            println!("[{}] {} ({} severity)", number, description.bold(), severity(*level));
            println!("    Mitigation: {}", mitigation);
        }
        CitationDetail::Impact { description } => {
            println!("[{}] {}", number, description);
        }
    }
}

pub fn print_activity_log(review: &ImpactReview) {
    println!("{}", "Pending".bold());
    if review.pending().is_empty() {
        println!("  {}", "nothing pending".dimmed());
    }
    for action in review.pending() {
        println!(
            "  {} {} {}",
            action.timestamp.with_timezone(&Local).format("%H:%M:%S").to_string().dimmed(),
            action.describe(),
            format!("by {}", action.username).dimmed()
        );
    }

    println!("{}", "Completed".bold());
    if review.completed().is_empty() {
        println!("  {}", "nothing completed".dimmed());
    }
    for action in review.completed() {
        let line = match action.status {
            Some(ActionStatus::Accepted) | Some(ActionStatus::Added) => action.describe().green(),
            Some(ActionStatus::Rejected) | Some(ActionStatus::Removed) => action.describe().red(),
            _ => action.describe().normal(),
        };
        println!(
            "  {} {} {}",
            action
                .effective_time()
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string()
                .dimmed(),
            line,
            format!("by {}", action.username).dimmed()
        );
    }
}

pub fn print_message(message: &ChatMessage) {
    match message.role {
        MessageRole::User => println!("{} {}", "You:".bold().blue(), message.content),
        MessageRole::Assistant => println!("{} {}", "Brewer:".bold().green(), message.content),
    }
}

pub fn print_chat(messages: &[ChatMessage]) {
    if messages.is_empty() {
        println!("{}", "How can I help with your requirements?".bold());
        for suggestion in QUICK_SUGGESTIONS {
            println!("  {} {}", "›".dimmed(), suggestion);
        }
        return;
    }
    for message in messages {
        print_message(message);
    }
}
