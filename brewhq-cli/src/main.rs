mod cli;
mod prompts;
mod render;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use std::path::Path;

use brewhq_core::{
    init_config, load_config, render as render_export, write_export, ActionKind, AppState,
    Config, ExportFormat, ItemKind, MessageRole, RequirementForm, Route,
};

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // `init` may target a config file that does not exist yet
    let config = match (&cli.command, cli.config.as_deref()) {
        (Some(Command::Init { .. }), Some(path)) if !path.exists() => Config::default(),
        (_, path) => load_config(path)?,
    }
    .with_username(cli.user.as_deref());
    let mut app = AppState::new(config);

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            shell::run(&mut app)?;
        }
        Command::Projects => {
            handle_projects(&mut app);
        }
        Command::Analyze {
            name,
            value,
            criteria,
            project,
            accept_all,
        } => {
            handle_analyze(&mut app, name, value, criteria, project, accept_all)?;
        }
        Command::Ask { message } => {
            handle_ask(&mut app, &message.join(" "))?;
        }
        Command::Routes { path } => {
            handle_routes(&mut app, &path)?;
        }
        Command::Init { force } => {
            let path = init_config(app.config(), cli.config.as_deref(), force)?;
            println!("{} {}", "Wrote config to".green(), path.display());
        }
        Command::Export { format, output } => {
            handle_export(&app, &format, output.as_deref())?;
        }
    }

    Ok(())
}

/// Warnings by default; each -v raises the level. RUST_LOG still wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn handle_projects(app: &mut AppState) {
    for project in app.projects().iter().map(|p| p.id).collect::<Vec<_>>() {
        app.view.toggle_expanded(project);
    }
    render::print_projects(app.projects(), &app.view);
}

fn handle_analyze(
    app: &mut AppState,
    name: String,
    value: Option<String>,
    criteria: Option<String>,
    project: u32,
    accept_all: bool,
) -> Result<()> {
    app.select_project(project)?;
    let form = RequirementForm::new(
        name,
        value.unwrap_or_default(),
        criteria.unwrap_or_default(),
    );
    let id = app.submit_requirement(form)?;

    if accept_all {
        let review = app.review_mut().context("Analysis did not open")?;
        let items: Vec<_> = review
            .analysis()
            .items()
            .into_iter()
            .filter(|item| item.kind == ItemKind::Risk || item.kind.is_impact())
            .collect();
        for item in items {
            review.stage(item, ActionKind::Edit)?;
        }
        let count = app.accept_all_changes()?;
        println!("{}", format!("Accepted {} change(s)", count).green());
    }

    if let Some(review) = app.review() {
        render::print_analysis(review);
    }
    app.leave_analysis()?;

    let requirement = app
        .requirement(&id)
        .context("Requirement missing after analysis")?;
    println!();
    println!(
        "{} {} {}",
        "Created".green(),
        requirement.name.bold(),
        format!(
            "(impact {}/5{})",
            requirement.impact_score,
            if requirement.has_draft { ", draft" } else { "" }
        )
        .dimmed()
    );
    Ok(())
}

fn handle_ask(app: &mut AppState, message: &str) -> Result<()> {
    shell::send_message(app, message);
    let last = app.chat().messages().last();
    if let Some(reply) = last.filter(|m| m.role == MessageRole::Assistant) {
        render::print_message(reply);
    }
    Ok(())
}

fn handle_routes(app: &mut AppState, path: &str) -> Result<()> {
    let route = Route::parse(path).with_context(|| format!("Unknown path: {}", path))?;
    app.navigate(route, None);

    println!("{} {}", "Route:".bold(), route);
    let crumbs: Vec<String> = app
        .breadcrumbs()
        .into_iter()
        .map(|crumb| match crumb.path {
            Some(path) => format!("{} ({})", crumb.label, path.dimmed()),
            None => crumb.label.bold().to_string(),
        })
        .collect();
    println!("{}", crumbs.join(" / "));
    Ok(())
}

fn handle_export(app: &AppState, format: &str, output: Option<&Path>) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let snapshot = app.snapshot();

    match output {
        Some(path) => {
            write_export(&snapshot, format, path)?;
            println!("Exported to {}: {}", format, path.display());
            println!("  Total projects: {}", snapshot.projects.len());
            println!("  Total requirements: {}", snapshot.requirements.len());
        }
        None => {
            print!("{}", render_export(&snapshot, format)?);
        }
    }
    Ok(())
}
