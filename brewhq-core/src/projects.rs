//! In-memory project store and the projects page view state

use log::{debug, info};
use std::collections::BTreeSet;

use crate::error::StoreError;
use crate::models::{NewProjectForm, Project, Repository, NO_DESCRIPTION, UNTITLED_PROJECT};

/// Holds every project of the session in insertion order
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Project, StoreError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))
    }

    /// Next project id: one past the current count, unless a surviving
    /// project already holds it
    fn next_id(&self) -> u32 {
        let candidate = self.projects.len() as u32 + 1;
        if self.get(candidate).is_none() {
            candidate
        } else {
            self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
        }
    }

    /// Creates a project from the wizard form, substituting defaults for
    /// blank fields
    pub fn create(&mut self, form: NewProjectForm) -> &Project {
        let name = match form.name.trim() {
            "" => UNTITLED_PROJECT.to_string(),
            name => name.to_string(),
        };
        let description = match form.description.trim() {
            "" => NO_DESCRIPTION.to_string(),
            description => description.to_string(),
        };
        let project = Project {
            id: self.next_id(),
            name,
            description,
            repositories: form.repository.into_iter().collect(),
        };
        info!("Created project {} ({})", project.id, project.name);
        self.projects.push(project);
        &self.projects[self.projects.len() - 1]
    }

    pub fn delete(&mut self, id: u32) -> Result<Project, StoreError> {
        let pos = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))?;
        let project = self.projects.remove(pos);
        info!("Deleted project {} ({})", project.id, project.name);
        Ok(project)
    }

    pub fn add_repository(
        &mut self,
        project_id: u32,
        repository: Repository,
    ) -> Result<(), StoreError> {
        let project = self.get_mut(project_id)?;
        if project.repository(&repository.name).is_some() {
            return Err(StoreError::DuplicateRepository {
                project_id,
                name: repository.name,
            });
        }
        debug!("Connected repository {} to project {}", repository.name, project_id);
        project.repositories.push(repository);
        Ok(())
    }

    /// Removes the named repository, leaving the project's others untouched
    pub fn delete_repository(
        &mut self,
        project_id: u32,
        name: &str,
    ) -> Result<Repository, StoreError> {
        let project = self.get_mut(project_id)?;
        let pos = project
            .repositories
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| StoreError::RepositoryNotFound {
                project_id,
                name: name.to_string(),
            })?;
        debug!("Removed repository {} from project {}", name, project_id);
        Ok(project.repositories.remove(pos))
    }
}

/// Expanded and favorite markers on the projects page; never persisted
#[derive(Debug, Clone, Default)]
pub struct ProjectsView {
    expanded: BTreeSet<u32>,
    favorites: BTreeSet<u32>,
}

impl ProjectsView {
    /// Flips the expanded state and returns the new value
    pub fn toggle_expanded(&mut self, id: u32) -> bool {
        toggle(&mut self.expanded, id)
    }

    /// Flips the favorite state and returns the new value
    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        toggle(&mut self.favorites, id)
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded.contains(&id)
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    /// Drops markers for a deleted project
    pub fn forget(&mut self, id: u32) {
        self.expanded.remove(&id);
        self.favorites.remove(&id);
    }
}

fn toggle(set: &mut BTreeSet<u32>, id: u32) -> bool {
    if !set.remove(&id) {
        set.insert(id);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_projects;

    #[test]
    fn test_create_assigns_next_id() {
        let mut store = ProjectStore::new(default_projects());
        let before = store.len();

        let id = store
            .create(NewProjectForm::new("Mobile App", "iOS and Android"))
            .id;

        assert_eq!(store.len(), before + 1);
        assert_eq!(id, before as u32 + 1);
        assert_eq!(store.get(id).unwrap().name, "Mobile App");
        assert!(store.get(id).unwrap().repositories.is_empty());
    }

    #[test]
    fn test_create_uses_defaults_for_blank_fields() {
        let mut store = ProjectStore::default();
        let project = store.create(NewProjectForm::new("  ", ""));
        assert_eq!(project.name, UNTITLED_PROJECT);
        assert_eq!(project.description, NO_DESCRIPTION);
        assert_eq!(project.id, 1);
    }

    #[test]
    fn test_create_after_delete_avoids_id_collision() {
        let mut store = ProjectStore::new(default_projects());
        store.delete(1).unwrap();

        let id = store.create(NewProjectForm::new("Next", "")).id;
        assert_eq!(id, 3);
        assert_eq!(store.list().iter().filter(|p| p.id == id).count(), 1);
    }

    #[test]
    fn test_create_attaches_wizard_repository() {
        let mut store = ProjectStore::default();
        let mut form = NewProjectForm::new("Docs", "");
        form.repository = Some(Repository::new("docs", "main", "https://example.com/docs"));

        let project = store.create(form);
        assert_eq!(project.repositories.len(), 1);
        assert_eq!(project.repositories[0].name, "docs");
    }

    #[test]
    fn test_delete_repository_leaves_others() {
        let mut store = ProjectStore::new(default_projects());

        let removed = store.delete_repository(1, "frontend-web").unwrap();
        assert_eq!(removed.name, "frontend-web");

        let project = store.get(1).unwrap();
        assert_eq!(project.repositories.len(), 1);
        assert_eq!(project.repositories[0].name, "backend-api");
        assert_eq!(store.get(2).unwrap().repositories.len(), 1);
    }

    #[test]
    fn test_delete_missing_repository_is_an_error() {
        let mut store = ProjectStore::new(default_projects());
        assert!(matches!(
            store.delete_repository(1, "nope"),
            Err(StoreError::RepositoryNotFound { .. })
        ));
        assert_eq!(
            store.delete_repository(42, "frontend-web"),
            Err(StoreError::ProjectNotFound(42))
        );
    }

    #[test]
    fn test_add_repository_rejects_duplicates() {
        let mut store = ProjectStore::new(default_projects());
        let repo = Repository::new("backend-api", "dev", "https://example.com");
        assert!(matches!(
            store.add_repository(1, repo),
            Err(StoreError::DuplicateRepository { .. })
        ));

        store
            .add_repository(1, Repository::new("infra", "main", "https://example.com/infra"))
            .unwrap();
        assert_eq!(store.get(1).unwrap().repositories.len(), 3);
    }

    #[test]
    fn test_view_toggles() {
        let mut view = ProjectsView::default();
        assert!(view.toggle_expanded(1));
        assert!(view.is_expanded(1));
        assert!(!view.toggle_expanded(1));
        assert!(!view.is_expanded(1));

        view.toggle_favorite(2);
        assert!(view.is_favorite(2));
        view.forget(2);
        assert!(!view.is_favorite(2));
    }
}
