//! Snapshot export of the session's projects and requirements

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Project, Requirement};
use crate::projects::ProjectStore;
use crate::requirements::RequirementStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Markdown,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => bail!("Unknown export format '{}' (expected json, yaml or markdown)", other),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Yaml => write!(f, "yaml"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Everything an export contains
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub projects: Vec<Project>,
    pub requirements: Vec<Requirement>,
}

impl Snapshot {
    pub fn capture(projects: &ProjectStore, requirements: &RequirementStore) -> Self {
        Self {
            generated_at: Utc::now(),
            projects: projects.list().to_vec(),
            requirements: requirements.list().to_vec(),
        }
    }

    fn requirements_for(&self, project_id: u32) -> impl Iterator<Item = &Requirement> {
        self.requirements
            .iter()
            .filter(move |r| r.project_id == project_id)
    }
}

/// Renders the snapshot in the requested format
pub fn render(snapshot: &Snapshot, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot as JSON")
        }
        ExportFormat::Yaml => {
            serde_yaml::to_string(snapshot).context("Failed to serialize snapshot as YAML")
        }
        ExportFormat::Markdown => Ok(render_markdown(snapshot)),
    }
}

fn render_markdown(snapshot: &Snapshot) -> String {
    let mut output = String::new();
    output.push_str("# BrewHQ Projects\n\n");
    output.push_str(&format!(
        "_Generated {}_\n\n",
        snapshot.generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));

    for project in &snapshot.projects {
        output.push_str(&format!("## {}\n\n", project.name));
        output.push_str(&format!("{}\n\n", project.description));

        if !project.repositories.is_empty() {
            output.push_str("### Repositories\n\n");
            for repo in &project.repositories {
                output.push_str(&format!("- **{}** ({}) {}\n", repo.name, repo.branch, repo.url));
            }
            output.push('\n');
        }

        let mut requirements = snapshot.requirements_for(project.id).peekable();
        if requirements.peek().is_none() {
            continue;
        }
        output.push_str("### Requirements\n\n");
        for req in requirements {
            let draft = if req.has_draft { " (draft)" } else { "" };
            output.push_str(&format!("#### {}{}\n\n", req.name, draft));
            output.push_str(&format!(
                "**Impact:** {}/5 | **Created by:** {} | **Edited by:** {}\n\n",
                req.impact_score, req.created_by, req.edited_by
            ));
            if !req.value_statement.is_empty() {
                output.push_str(&format!("{}\n\n", req.value_statement));
            }
            if !req.acceptance_criteria.is_empty() {
                output.push_str("**Acceptance Criteria:**\n\n");
                output.push_str(&format!("{}\n\n", req.acceptance_criteria));
            }
        }
    }

    output
}

/// Renders the snapshot and writes it to `output_path`
pub fn write_export(snapshot: &Snapshot, format: ExportFormat, output_path: &Path) -> Result<()> {
    let content = render(snapshot, format)?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write export to {:?}", output_path))?;

    info!(
        "Exported {} projects and {} requirements as {} to {}",
        snapshot.projects.len(),
        snapshot.requirements.len(),
        format,
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequirementForm;
    use crate::scoring::FixedImpactScorer;
    use crate::seed::default_projects;
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        let projects = ProjectStore::new(default_projects());
        let mut requirements = RequirementStore::new();
        requirements.create(
            &RequirementForm::new(
                "Checkout Redesign",
                "As a shopper I want a faster checkout",
                "Impact: Code Impact\nNew payment API",
            ),
            1,
            "John Doe",
            &FixedImpactScorer(4),
        );
        Snapshot::capture(&projects, &requirements)
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_json_export_reads_back() {
        let snapshot = sample();
        let json = render(&snapshot, ExportFormat::Json).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_markdown_groups_requirements_by_project() {
        let markdown = render(&sample(), ExportFormat::Markdown).unwrap();
        assert!(markdown.contains("## E-commerce Platform"));
        assert!(markdown.contains("#### Checkout Redesign (draft)"));
        assert!(markdown.contains("**Impact:** 4/5"));
        assert!(markdown.contains("- **frontend-web** (main)"));

        let analytics = markdown.find("## Analytics Dashboard").unwrap();
        let checkout = markdown.find("#### Checkout Redesign").unwrap();
        assert!(checkout < analytics);
    }

    #[test]
    fn test_write_export_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("snapshot.yaml");

        write_export(&sample(), ExportFormat::Yaml, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Snapshot = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed.projects.len(), 2);
        assert_eq!(parsed.requirements[0].impact_score, 4);
    }
}
