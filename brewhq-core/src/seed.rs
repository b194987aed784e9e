//! Built-in data a fresh session starts with

use crate::models::{Project, Repository};

/// User recorded as author when no username is configured
pub const DEFAULT_USERNAME: &str = "John Doe";

/// Projects shown before any configuration overrides them
pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "E-commerce Platform".to_string(),
            description: "A modern e-commerce solution with advanced features".to_string(),
            repositories: vec![
                Repository::new(
                    "frontend-web",
                    "main",
                    "https://github.com/example/frontend-web",
                ),
                Repository::new("backend-api", "main", "https://github.com/example/backend-api"),
            ],
        },
        Project {
            id: 2,
            name: "Analytics Dashboard".to_string(),
            description: "Real-time analytics and reporting dashboard".to_string(),
            repositories: vec![Repository::new(
                "analytics-dashboard",
                "main",
                "https://github.com/example/analytics-dashboard",
            )],
        },
    ]
}
