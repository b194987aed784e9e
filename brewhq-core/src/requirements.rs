//! In-memory requirement store

use chrono::{DateTime, Local, TimeZone, Utc};
use log::{debug, info};

use crate::error::StoreError;
use crate::models::{Requirement, RequirementForm};
use crate::scoring::ImpactScorer;

/// Holds the requirements of every project
#[derive(Debug, Clone, Default)]
pub struct RequirementStore {
    requirements: Vec<Requirement>,
    last_id: i64,
}

impl RequirementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn get(&self, id: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Requirement, StoreError> {
        self.requirements
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::RequirementNotFound(id.to_string()))
    }

    /// Requirements belonging to `project_id`, in creation order
    pub fn for_project(&self, project_id: u32) -> Vec<&Requirement> {
        self.requirements
            .iter()
            .filter(|r| r.project_id == project_id)
            .collect()
    }

    /// Millisecond timestamp id, bumped past the previous one so two
    /// requirements created in the same millisecond stay distinct
    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = millis;
        millis.to_string()
    }

    /// Creates a requirement from the form.
    ///
    /// New requirements start as drafts until their analysis changes are
    /// accepted.
    pub fn create(
        &mut self,
        form: &RequirementForm,
        project_id: u32,
        username: &str,
        scorer: &dyn ImpactScorer,
    ) -> &Requirement {
        let now = Utc::now();
        let requirement = Requirement {
            id: self.next_id(now),
            project_id,
            name: form.name.clone(),
            value_statement: form.value_statement.clone(),
            acceptance_criteria: form.acceptance_criteria.clone(),
            created_at: now,
            created_by: username.to_string(),
            last_viewed: now,
            edited_by: username.to_string(),
            has_draft: true,
            impact_score: scorer.score(form),
        };
        info!(
            "Created requirement {} '{}' in project {} (impact {})",
            requirement.id, requirement.name, project_id, requirement.impact_score
        );
        self.requirements.push(requirement);
        &self.requirements[self.requirements.len() - 1]
    }

    pub fn delete(&mut self, id: &str) -> Result<Requirement, StoreError> {
        let pos = self
            .requirements
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::RequirementNotFound(id.to_string()))?;
        let requirement = self.requirements.remove(pos);
        info!("Deleted requirement {} '{}'", requirement.id, requirement.name);
        Ok(requirement)
    }

    /// Drops every requirement of a deleted project, returning how many
    pub fn delete_for_project(&mut self, project_id: u32) -> usize {
        let before = self.requirements.len();
        self.requirements.retain(|r| r.project_id != project_id);
        before - self.requirements.len()
    }

    pub fn mark_viewed(&mut self, id: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let requirement = self.get_mut(id)?;
        requirement.last_viewed = at;
        debug!("Requirement {} viewed", id);
        Ok(())
    }

    pub fn set_draft(&mut self, id: &str, has_draft: bool) -> Result<(), StoreError> {
        let requirement = self.get_mut(id)?;
        if requirement.has_draft != has_draft {
            debug!("Requirement {} draft flag -> {}", id, has_draft);
        }
        requirement.has_draft = has_draft;
        Ok(())
    }

    /// Writes reviewed acceptance criteria back to the requirement
    pub fn update_acceptance_criteria(
        &mut self,
        id: &str,
        criteria: &str,
        editor: &str,
    ) -> Result<(), StoreError> {
        let requirement = self.get_mut(id)?;
        if requirement.acceptance_criteria != criteria {
            requirement.acceptance_criteria = criteria.to_string();
            requirement.edited_by = editor.to_string();
        }
        Ok(())
    }
}

/// Formats a timestamp for the requirement list: time of day when it falls
/// on the same local day as `now`, otherwise month and day
pub fn format_last_viewed<Tz: TimeZone>(timestamp: DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let local = timestamp.with_timezone(&Local);
    let today = now.with_timezone(&Local).date_naive();
    if local.date_naive() == today {
        local.format("%H:%M").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{FixedImpactScorer, RandomImpactScorer};
    use chrono::Duration;

    fn checkout_form() -> RequirementForm {
        RequirementForm::new("Checkout Redesign", "As a shopper...", "")
    }

    #[test]
    fn test_create_populates_fields() {
        let mut store = RequirementStore::new();
        let req = store
            .create(&checkout_form(), 1, "Jane", &RandomImpactScorer)
            .clone();

        assert_eq!(req.project_id, 1);
        assert_eq!(req.name, "Checkout Redesign");
        assert_eq!(req.created_by, "Jane");
        assert_eq!(req.edited_by, "Jane");
        assert!(req.has_draft);
        assert!((1..=5).contains(&req.impact_score));
        assert!(req.id.parse::<i64>().is_ok());
    }

    #[test]
    fn test_ids_are_unique_within_a_millisecond() {
        let mut store = RequirementStore::new();
        let scorer = FixedImpactScorer(2);
        let a = store.create(&checkout_form(), 1, "Jane", &scorer).id.clone();
        let b = store.create(&checkout_form(), 1, "Jane", &scorer).id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_for_project_filters() {
        let mut store = RequirementStore::new();
        let scorer = FixedImpactScorer(2);
        store.create(&checkout_form(), 1, "Jane", &scorer);
        store.create(&checkout_form(), 2, "Jane", &scorer);
        store.create(&checkout_form(), 1, "Jane", &scorer);

        assert_eq!(store.for_project(1).len(), 2);
        assert_eq!(store.for_project(2).len(), 1);
        assert!(store.for_project(3).is_empty());

        assert_eq!(store.delete_for_project(1), 2);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_delete_and_missing() {
        let mut store = RequirementStore::new();
        let id = store
            .create(&checkout_form(), 1, "Jane", &FixedImpactScorer(1))
            .id
            .clone();
        assert_eq!(store.delete(&id).unwrap().id, id);
        assert_eq!(
            store.delete(&id),
            Err(StoreError::RequirementNotFound(id.clone()))
        );
    }

    #[test]
    fn test_mark_viewed_and_draft() {
        let mut store = RequirementStore::new();
        let id = store
            .create(&checkout_form(), 1, "Jane", &FixedImpactScorer(1))
            .id
            .clone();
        let later = Utc::now() + Duration::hours(2);

        store.mark_viewed(&id, later).unwrap();
        store.set_draft(&id, false).unwrap();

        let req = store.get(&id).unwrap();
        assert_eq!(req.last_viewed, later);
        assert!(!req.has_draft);
    }

    #[test]
    fn test_update_acceptance_criteria_records_editor() {
        let mut store = RequirementStore::new();
        let id = store
            .create(&checkout_form(), 1, "Jane", &FixedImpactScorer(1))
            .id
            .clone();

        store
            .update_acceptance_criteria(&id, "Impact: Code Impact\nNew API", "Sam")
            .unwrap();
        let req = store.get(&id).unwrap();
        assert_eq!(req.acceptance_criteria, "Impact: Code Impact\nNew API");
        assert_eq!(req.edited_by, "Sam");
    }

    #[test]
    fn test_format_last_viewed() {
        let ts = Utc::now();
        let local = ts.with_timezone(&Local);

        assert_eq!(format_last_viewed(ts, &local), local.format("%H:%M").to_string());

        let later = local + Duration::days(3);
        assert_eq!(format_last_viewed(ts, &later), local.format("%b %-d").to_string());
    }
}
