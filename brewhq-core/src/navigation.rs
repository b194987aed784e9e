//! Routes, navigation history and breadcrumbs

use log::debug;
use std::fmt;

use crate::models::{Project, RequirementForm};

/// A page of the application, addressed by a URL-like path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` renders the projects page
    Home,
    Projects,
    NewProject,
    Requirements { project_id: u32 },
    Chat { project_id: u32 },
    Analyze { project_id: u32 },
}

impl Route {
    /// Parses a path such as `/projects/2/requirements/analyze`.
    /// Trailing slashes are ignored; unknown paths give `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["projects"] => Some(Route::Projects),
            ["new-project"] => Some(Route::NewProject),
            ["projects", id, rest @ ..] => {
                let project_id = id.parse().ok()?;
                match rest {
                    ["requirements"] => Some(Route::Requirements { project_id }),
                    ["chat"] => Some(Route::Chat { project_id }),
                    ["requirements", "analyze"] => Some(Route::Analyze { project_id }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::NewProject => "/new-project".to_string(),
            Route::Requirements { project_id } => format!("/projects/{}/requirements", project_id),
            Route::Chat { project_id } => format!("/projects/{}/chat", project_id),
            Route::Analyze { project_id } => {
                format!("/projects/{}/requirements/analyze", project_id)
            }
        }
    }

    pub fn project_id(&self) -> Option<u32> {
        match self {
            Route::Requirements { project_id }
            | Route::Chat { project_id }
            | Route::Analyze { project_id } => Some(*project_id),
            _ => None,
        }
    }

    /// True for the two routes that render the projects page
    pub fn is_projects_page(&self) -> bool {
        matches!(self, Route::Home | Route::Projects)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One visited page plus the state handed to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    /// Requirement carried to the analysis page
    pub state: Option<RequirementForm>,
}

/// History stack of visited locations
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Location>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            history: vec![Location {
                route: start,
                state: None,
            }],
        }
    }

    pub fn current(&self) -> &Location {
        // The stack never drops its root entry
        &self.history[self.history.len() - 1]
    }

    pub fn route(&self) -> Route {
        self.current().route
    }

    pub fn state(&self) -> Option<&RequirementForm> {
        self.current().state.as_ref()
    }

    pub fn navigate(&mut self, route: Route, state: Option<RequirementForm>) {
        debug!("Navigate {} -> {}", self.route(), route);
        self.history.push(Location { route, state });
    }

    /// Pops back to the previous location; false when already at the root
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    /// Link target; the current page has none
    pub path: Option<String>,
}

impl Breadcrumb {
    fn link(label: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            path: Some(route.path()),
        }
    }

    fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: None,
        }
    }
}

fn project_label(projects: &[Project], project_id: u32) -> String {
    projects
        .iter()
        .find(|p| p.id == project_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("Project {}", project_id))
}

/// Builds the breadcrumb trail for a route from its path segments and the
/// location state
pub fn breadcrumbs(
    route: Route,
    projects: &[Project],
    state: Option<&RequirementForm>,
) -> Vec<Breadcrumb> {
    let root = || Breadcrumb::link("Projects", Route::Projects);
    match route {
        Route::Home | Route::Projects => vec![Breadcrumb::current("Projects")],
        Route::NewProject => vec![root(), Breadcrumb::current("New Project")],
        Route::Requirements { project_id } => {
            vec![root(), Breadcrumb::current(project_label(projects, project_id))]
        }
        Route::Chat { project_id } => vec![
            root(),
            Breadcrumb::link(
                project_label(projects, project_id),
                Route::Requirements { project_id },
            ),
            Breadcrumb::current("Ask Brewer"),
        ],
        Route::Analyze { project_id } => vec![
            root(),
            Breadcrumb::link(
                project_label(projects, project_id),
                Route::Requirements { project_id },
            ),
            Breadcrumb::current(
                state
                    .map(|form| form.display_name().to_string())
                    .unwrap_or_else(|| "Impact Analysis".to_string()),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_projects;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/projects"), Some(Route::Projects));
        assert_eq!(Route::parse("/projects/"), Some(Route::Projects));
        assert_eq!(Route::parse("/new-project"), Some(Route::NewProject));
        assert_eq!(
            Route::parse("/projects/3/requirements"),
            Some(Route::Requirements { project_id: 3 })
        );
        assert_eq!(
            Route::parse("/projects/3/chat"),
            Some(Route::Chat { project_id: 3 })
        );
        assert_eq!(
            Route::parse("/projects/3/requirements/analyze"),
            Some(Route::Analyze { project_id: 3 })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        assert_eq!(Route::parse("/projects/abc/requirements"), None);
        assert_eq!(Route::parse("/projects/1"), None);
        assert_eq!(Route::parse("/settings"), None);
        assert_eq!(Route::parse("/projects/1/requirements/analyze/extra"), None);
    }

    #[test]
    fn test_path_round_trip() {
        let routes = [
            Route::Home,
            Route::Projects,
            Route::NewProject,
            Route::Requirements { project_id: 7 },
            Route::Chat { project_id: 7 },
            Route::Analyze { project_id: 7 },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_navigator_back_stops_at_root() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Projects, None);
        nav.navigate(
            Route::Analyze { project_id: 1 },
            Some(RequirementForm::new("Checkout Redesign", "", "")),
        );
        assert_eq!(nav.state().unwrap().name, "Checkout Redesign");

        assert!(nav.back());
        assert_eq!(nav.route(), Route::Projects);
        assert!(nav.state().is_none());
        assert!(nav.back());
        assert!(!nav.back());
        assert_eq!(nav.route(), Route::Home);
    }

    #[test]
    fn test_breadcrumbs_for_analysis() {
        let projects = default_projects();
        let form = RequirementForm::new("Checkout Redesign", "", "");
        let crumbs = breadcrumbs(Route::Analyze { project_id: 1 }, &projects, Some(&form));

        let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Projects", "E-commerce Platform", "Checkout Redesign"]);
        assert_eq!(crumbs[1].path.as_deref(), Some("/projects/1/requirements"));
        assert!(crumbs.last().unwrap().path.is_none());
    }

    #[test]
    fn test_breadcrumbs_fallbacks() {
        let crumbs = breadcrumbs(Route::Requirements { project_id: 9 }, &[], None);
        assert_eq!(crumbs[1].label, "Project 9");

        let crumbs = breadcrumbs(Route::Analyze { project_id: 9 }, &[], None);
        assert_eq!(crumbs[2].label, "Impact Analysis");

        let crumbs = breadcrumbs(Route::Home, &[], None);
        assert_eq!(crumbs.len(), 1);
        assert!(crumbs[0].path.is_none());
    }
}
