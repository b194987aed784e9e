//! Review workflow over an impact analysis.
//!
//! Each analysis item moves through
//! `untouched -> pending(edit | ignore) -> accepted | rejected`.
//! Discarding a pending action returns the item to untouched; accepted and
//! rejected are final for that action, and reconsidering stages a new edit.

use log::debug;

use crate::analysis::citation::{self, Citation};
use crate::error::StoreError;
use crate::models::{
    ActionKind, ActionStatus, Dependency, Impact, ImpactAction, ImpactAnalysis, ItemKind, ItemRef,
    RequirementForm, Risk, Severity,
};

/// Item currently open in an inline editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub target: ItemRef,
    pub content: String,
}

/// Where an item stands in the review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Untouched,
    /// Pending edit with the inline editor open
    Editing,
    Pending(ActionKind),
    Resolved(ActionStatus),
}

/// View-model behind the impact analysis page
#[derive(Debug, Clone)]
pub struct ImpactReview {
    requirement: RequirementForm,
    analysis: ImpactAnalysis,
    username: String,
    /// Newest first
    pending: Vec<ImpactAction>,
    /// Newest first
    completed: Vec<ImpactAction>,
    editing: Option<EditState>,
    review_panel_open: bool,
    activity_log_open: bool,
    manual_seq: u32,
}

impl ImpactReview {
    pub fn new(
        requirement: RequirementForm,
        analysis: ImpactAnalysis,
        username: impl Into<String>,
    ) -> Self {
        Self {
            requirement,
            analysis,
            username: username.into(),
            pending: Vec::new(),
            completed: Vec::new(),
            editing: None,
            review_panel_open: false,
            activity_log_open: false,
            manual_seq: 0,
        }
    }

    pub fn requirement(&self) -> &RequirementForm {
        &self.requirement
    }

    pub fn acceptance_criteria(&self) -> &str {
        &self.requirement.acceptance_criteria
    }

    pub fn analysis(&self) -> &ImpactAnalysis {
        &self.analysis
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Staged actions, newest first
    pub fn pending(&self) -> &[ImpactAction] {
        &self.pending
    }

    /// Accepted, rejected and manual-change entries, newest first
    pub fn completed(&self) -> &[ImpactAction] {
        &self.completed
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_for(&self, target: &ItemRef) -> Option<&ImpactAction> {
        self.pending.iter().find(|a| &a.target() == target)
    }

    fn last_completed_for(&self, target: &ItemRef) -> Option<&ImpactAction> {
        self.completed.iter().find(|a| {
            &a.target() == target
                && matches!(
                    a.status,
                    Some(ActionStatus::Accepted) | Some(ActionStatus::Rejected)
                )
        })
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn item_state(&self, target: &ItemRef) -> ItemState {
        if self.editing.as_ref().is_some_and(|e| &e.target == target) {
            return ItemState::Editing;
        }
        if let Some(action) = self.pending_for(target) {
            return ItemState::Pending(action.action);
        }
        match self.last_completed_for(target).and_then(|a| a.status) {
            Some(status) => ItemState::Resolved(status),
            None => ItemState::Untouched,
        }
    }

    /// Text to display for an item: a submitted edit wins over the original
    pub fn display_text(&self, target: &ItemRef) -> Option<String> {
        if let Some(edited) = self
            .pending_for(target)
            .and_then(|a| a.edited_content.clone())
        {
            return Some(edited);
        }
        self.analysis.item_text(target)
    }

    fn take_pending(&mut self, target: &ItemRef) -> Result<ImpactAction, StoreError> {
        let pos = self
            .pending
            .iter()
            .position(|a| &a.target() == target)
            .ok_or_else(|| StoreError::NoPendingAction(target.clone()))?;
        if self.editing.as_ref().is_some_and(|e| &e.target == target) {
            self.editing = None;
        }
        Ok(self.pending.remove(pos))
    }

    fn stage_with_text(&mut self, target: ItemRef, item: String, action: ActionKind) -> &ImpactAction {
        self.pending.retain(|a| a.target() != target);
        let staged = ImpactAction::new(&target, item.clone(), action, self.username.clone());
        match action {
            ActionKind::Edit => {
                self.editing = Some(EditState {
                    target: target.clone(),
                    content: item,
                });
            }
            ActionKind::Ignore => {
                if self.editing.as_ref().is_some_and(|e| e.target == target) {
                    self.editing = None;
                }
            }
        }
        debug!("Staged {} on {}", action, target);
        self.pending.insert(0, staged);
        &self.pending[0]
    }

    /// Stages an edit or ignore for an item.
    ///
    /// A second stage for the same item replaces the first. Staging an edit
    /// opens the inline editor seeded with the item text.
    pub fn stage(&mut self, target: ItemRef, action: ActionKind) -> Result<&ImpactAction, StoreError> {
        let item = self
            .analysis
            .item_text(&target)
            .ok_or_else(|| StoreError::ItemNotFound(target.clone()))?;
        Ok(self.stage_with_text(target, item, action))
    }

    pub fn set_edit_content(&mut self, content: impl Into<String>) -> Result<(), StoreError> {
        let editing = self.editing.as_mut().ok_or(StoreError::NotEditing)?;
        editing.content = content.into();
        Ok(())
    }

    /// Mutable edit buffer for text widgets
    pub fn edit_buffer_mut(&mut self) -> Option<&mut String> {
        self.editing.as_mut().map(|e| &mut e.content)
    }

    /// Saves the editor content onto the pending edit and closes the editor
    pub fn submit_edit(&mut self) -> Result<&ImpactAction, StoreError> {
        let editing = self.editing.take().ok_or(StoreError::NotEditing)?;
        let pos = self
            .pending
            .iter()
            .position(|a| a.target() == editing.target)
            .ok_or_else(|| StoreError::NoPendingAction(editing.target.clone()))?;
        self.pending[pos].edited_content = Some(editing.content);
        Ok(&self.pending[pos])
    }

    /// Drops the pending action for an item (Discard / Undo)
    pub fn discard(&mut self, target: &ItemRef) -> Result<ImpactAction, StoreError> {
        let action = self.take_pending(target)?;
        debug!("Discarded pending {} on {}", action.action, target);
        Ok(action)
    }

    fn append_change(&mut self, action: &ImpactAction) {
        let change = action.change_description();
        let criteria = &mut self.requirement.acceptance_criteria;
        if criteria.is_empty() {
            *criteria = change.trim().to_string();
        } else {
            criteria.push_str(&change);
        }
    }

    /// Accepts a pending action and appends it to the acceptance criteria
    pub fn accept(&mut self, target: &ItemRef) -> Result<&ImpactAction, StoreError> {
        let action = self.take_pending(target)?.complete(ActionStatus::Accepted);
        self.append_change(&action);
        debug!("Accepted change on {}", target);
        self.completed.insert(0, action);
        Ok(&self.completed[0])
    }

    /// Rejects a pending action; acceptance criteria are left alone
    pub fn reject(&mut self, target: &ItemRef) -> Result<&ImpactAction, StoreError> {
        let action = self.take_pending(target)?.complete(ActionStatus::Rejected);
        debug!("Rejected change on {}", target);
        self.completed.insert(0, action);
        Ok(&self.completed[0])
    }

    /// Accepts every pending action and closes the review panel.
    /// Returns how many were accepted.
    pub fn accept_all(&mut self) -> Result<usize, StoreError> {
        if self.pending.is_empty() {
            return Err(StoreError::NoPendingActions);
        }
        let mut accepted: Vec<ImpactAction> = std::mem::take(&mut self.pending)
            .into_iter()
            .map(|a| a.complete(ActionStatus::Accepted))
            .collect();
        for action in &accepted {
            self.append_change(action);
        }
        let count = accepted.len();
        accepted.append(&mut self.completed);
        self.completed = accepted;
        self.editing = None;
        self.review_panel_open = false;
        debug!("Accepted {} changes", count);
        Ok(count)
    }

    /// Rejects every pending action and closes the review panel
    pub fn reject_all(&mut self) -> Result<usize, StoreError> {
        if self.pending.is_empty() {
            return Err(StoreError::NoPendingActions);
        }
        let mut rejected: Vec<ImpactAction> = std::mem::take(&mut self.pending)
            .into_iter()
            .map(|a| a.complete(ActionStatus::Rejected))
            .collect();
        let count = rejected.len();
        rejected.append(&mut self.completed);
        self.completed = rejected;
        self.editing = None;
        self.review_panel_open = false;
        Ok(count)
    }

    /// Drops all pending actions and closes any editor
    pub fn undo_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.editing = None;
        self.review_panel_open = false;
        count
    }

    /// Reopens an accepted or rejected item as a new pending edit seeded
    /// with the last resolved content. Removed items cannot be reopened.
    pub fn reconsider(&mut self, target: &ItemRef) -> Result<&ImpactAction, StoreError> {
        if self.analysis.item_text(target).is_none() {
            return Err(StoreError::ItemNotFound(target.clone()));
        }
        if self.pending_for(target).is_some() {
            return Err(StoreError::NotResolved(target.clone()));
        }
        let previous = self
            .last_completed_for(target)
            .ok_or_else(|| StoreError::NotResolved(target.clone()))?;
        let original = previous.item.clone();
        let content = previous.content().to_string();

        self.stage_with_text(target.clone(), original, ActionKind::Edit);
        if let Some(editing) = self.editing.as_mut() {
            editing.content = content;
        }
        Ok(&self.pending[0])
    }

    fn next_manual_id(&mut self, prefix: &str) -> String {
        self.manual_seq += 1;
        format!("{}{}", prefix, self.manual_seq)
    }

    fn log_manual(&mut self, target: &ItemRef, text: &str, status: ActionStatus) {
        let entry = ImpactAction::new(target, text, ActionKind::Edit, self.username.clone())
            .complete(status);
        self.completed.insert(0, entry);
    }

    pub fn add_risk(
        &mut self,
        description: impl Into<String>,
        severity: Severity,
        mitigation: impl Into<String>,
    ) -> ItemRef {
        let id = self.next_manual_id("mr");
        let risk = Risk {
            id: id.clone(),
            description: description.into(),
            severity,
            mitigation: mitigation.into(),
            is_manual: true,
        };
        let target = ItemRef::new(ItemKind::Risk, id);
        let text = risk.mitigation.clone();
        self.analysis.risks.push(risk);
        self.log_manual(&target, &text, ActionStatus::Added);
        target
    }

    pub fn add_impact(
        &mut self,
        kind: ItemKind,
        description: impl Into<String>,
    ) -> Result<ItemRef, StoreError> {
        let prefix = match kind {
            ItemKind::Ui => "mui",
            ItemKind::Code => "mc",
            ItemKind::Data => "mda",
            other => return Err(StoreError::NotAnImpactKind(other)),
        };
        let id = self.next_manual_id(prefix);
        let impact = Impact {
            id: id.clone(),
            description: description.into(),
            is_manual: true,
        };
        let target = ItemRef::new(kind, id);
        let text = impact.description.clone();
        if let Some(list) = self.analysis.impacts_mut(kind) {
            list.push(impact);
        }
        self.log_manual(&target, &text, ActionStatus::Added);
        Ok(target)
    }

    pub fn add_dependency(&mut self, name: impl Into<String>) -> ItemRef {
        let id = self.next_manual_id("mdep");
        let dependency = Dependency {
            id: id.clone(),
            name: name.into(),
            is_manual: true,
        };
        let target = ItemRef::new(ItemKind::Dependency, id);
        let text = dependency.name.clone();
        self.analysis.dependencies.push(dependency);
        self.log_manual(&target, &text, ActionStatus::Added);
        target
    }

    fn ensure_manual(&self, target: &ItemRef) -> Result<(), StoreError> {
        match self.analysis.is_manual(target) {
            None => Err(StoreError::ItemNotFound(target.clone())),
            Some(false) => Err(StoreError::NotManual(target.clone())),
            Some(true) => Ok(()),
        }
    }

    /// Rewrites a user-added item in place; such items skip the review
    pub fn update_manual(
        &mut self,
        target: &ItemRef,
        text: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.ensure_manual(target)?;
        let text = text.into();
        match target.kind {
            ItemKind::Risk => {
                if let Some(risk) = self.analysis.risks.iter_mut().find(|r| r.id == target.id) {
                    risk.mitigation = text.clone();
                }
            }
            ItemKind::Dependency => {
                if let Some(dep) = self
                    .analysis
                    .dependencies
                    .iter_mut()
                    .find(|d| d.id == target.id)
                {
                    dep.name = text.clone();
                }
            }
            kind => {
                if let Some(impact) = self
                    .analysis
                    .impacts_mut(kind)
                    .and_then(|list| list.iter_mut().find(|i| i.id == target.id))
                {
                    impact.description = text.clone();
                }
            }
        }
        self.log_manual(target, &text, ActionStatus::Edited);
        Ok(())
    }

    /// Deletes a user-added item together with any pending action on it
    pub fn remove_manual(&mut self, target: &ItemRef) -> Result<(), StoreError> {
        self.ensure_manual(target)?;
        let text = self.analysis.item_text(target).unwrap_or_default();
        match target.kind {
            ItemKind::Risk => self.analysis.risks.retain(|r| r.id != target.id),
            ItemKind::Dependency => self.analysis.dependencies.retain(|d| d.id != target.id),
            kind => {
                if let Some(list) = self.analysis.impacts_mut(kind) {
                    list.retain(|i| i.id != target.id);
                }
            }
        }
        let _ = self.take_pending(target);
        self.log_manual(target, &text, ActionStatus::Removed);
        Ok(())
    }

    pub fn citations(&self) -> Vec<Citation> {
        citation::citations(&self.analysis)
    }

    /// Citation with footnote `number`, if any
    pub fn citation(&self, number: usize) -> Option<Citation> {
        self.citations().into_iter().find(|c| c.number == number)
    }

    pub fn citation_number(&self, target: &ItemRef) -> Option<usize> {
        self.citations()
            .into_iter()
            .find(|c| &c.target == target)
            .map(|c| c.number)
    }

    /// Opens the "Review Changes" panel; unavailable with nothing pending
    pub fn open_review_panel(&mut self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            return Err(StoreError::NoPendingActions);
        }
        self.review_panel_open = true;
        Ok(())
    }

    pub fn close_review_panel(&mut self) {
        self.review_panel_open = false;
    }

    pub fn is_review_panel_open(&self) -> bool {
        self.review_panel_open
    }

    pub fn toggle_activity_log(&mut self) -> bool {
        self.activity_log_open = !self.activity_log_open;
        self.activity_log_open
    }

    pub fn is_activity_log_open(&self) -> bool {
        self.activity_log_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisProvider, MockAnalysisProvider};

    fn review_with_criteria(criteria: &str) -> ImpactReview {
        let form = RequirementForm::new("Checkout Redesign", "As a shopper...", criteria);
        let analysis = MockAnalysisProvider.analyze(&form);
        ImpactReview::new(form, analysis, "Jane")
    }

    fn risk1() -> ItemRef {
        ItemRef::new(ItemKind::Risk, "r1")
    }

    fn ui1() -> ItemRef {
        ItemRef::new(ItemKind::Ui, "ui1")
    }

    #[test]
    fn test_stage_edit_creates_single_action() {
        let mut review = review_with_criteria("");
        let action = review.stage(risk1(), ActionKind::Edit).unwrap();
        assert_eq!(action.id, "r1");
        assert_eq!(action.item, "Implement fallback authentication");
        assert_eq!(action.username, "Jane");

        assert_eq!(review.pending().len(), 1);
        assert_eq!(review.item_state(&risk1()), ItemState::Editing);
        assert_eq!(
            review.editing().unwrap().content,
            "Implement fallback authentication"
        );
    }

    #[test]
    fn test_second_edit_replaces_first() {
        let mut review = review_with_criteria("");
        review.stage(risk1(), ActionKind::Edit).unwrap();
        review.set_edit_content("first").unwrap();
        review.submit_edit().unwrap();

        review.stage(risk1(), ActionKind::Edit).unwrap();
        review.set_edit_content("second").unwrap();
        review.submit_edit().unwrap();

        let matching: Vec<_> = review
            .pending()
            .iter()
            .filter(|a| a.target() == risk1())
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].edited_content.as_deref(), Some("second"));
    }

    #[test]
    fn test_same_id_in_different_kinds_are_independent() {
        let mut review = review_with_criteria("");
        review
            .stage(ItemRef::new(ItemKind::Dependency, "d1"), ActionKind::Ignore)
            .unwrap();
        review
            .stage(ItemRef::new(ItemKind::Data, "d1"), ActionKind::Ignore)
            .unwrap();
        assert_eq!(review.pending().len(), 2);
    }

    #[test]
    fn test_stage_unknown_item() {
        let mut review = review_with_criteria("");
        let missing = ItemRef::new(ItemKind::Risk, "r99");
        assert_eq!(
            review.stage(missing.clone(), ActionKind::Edit).unwrap_err(),
            StoreError::ItemNotFound(missing)
        );
    }

    #[test]
    fn test_submit_edit_sets_content_and_closes_editor() {
        let mut review = review_with_criteria("");
        review.stage(ui1(), ActionKind::Edit).unwrap();
        review.set_edit_content("Redesign the payment flow").unwrap();
        review.submit_edit().unwrap();

        assert!(review.editing().is_none());
        assert_eq!(review.item_state(&ui1()), ItemState::Pending(ActionKind::Edit));
        assert_eq!(
            review.display_text(&ui1()).as_deref(),
            Some("Redesign the payment flow")
        );
        assert_eq!(review.submit_edit().unwrap_err(), StoreError::NotEditing);
    }

    #[test]
    fn test_discard_returns_to_untouched() {
        let mut review = review_with_criteria("");
        review.stage(ui1(), ActionKind::Edit).unwrap();
        review.discard(&ui1()).unwrap();

        assert!(review.pending().is_empty());
        assert!(review.editing().is_none());
        assert_eq!(review.item_state(&ui1()), ItemState::Untouched);
        assert!(review.discard(&ui1()).is_err());
    }

    #[test]
    fn test_accept_moves_to_completed_and_appends_criteria() {
        let mut review = review_with_criteria("Given a cart");
        review.stage(risk1(), ActionKind::Edit).unwrap();
        review.set_edit_content("Cache sessions").unwrap();
        review.submit_edit().unwrap();

        let accepted = review.accept(&risk1()).unwrap();
        assert_eq!(accepted.status, Some(ActionStatus::Accepted));
        assert!(accepted.completed_at.is_some());

        assert!(review.pending().is_empty());
        assert_eq!(review.completed().len(), 1);
        assert_eq!(
            review.acceptance_criteria(),
            "Given a cart\n\nImpact: Risk Mitigation\nCache sessions"
        );
        assert_eq!(
            review.item_state(&risk1()),
            ItemState::Resolved(ActionStatus::Accepted)
        );
    }

    #[test]
    fn test_accept_into_empty_criteria_is_trimmed() {
        let mut review = review_with_criteria("");
        review.stage(ui1(), ActionKind::Ignore).unwrap();
        review.accept(&ui1()).unwrap();
        assert_eq!(
            review.acceptance_criteria(),
            "Impact: UI/UX Impact\nNew user flow needed for payment process"
        );
    }

    #[test]
    fn test_reject_leaves_criteria() {
        let mut review = review_with_criteria("Given a cart");
        review.stage(risk1(), ActionKind::Ignore).unwrap();

        let rejected = review.reject(&risk1()).unwrap();
        assert_eq!(rejected.status, Some(ActionStatus::Rejected));
        assert!(review.pending().is_empty());
        assert_eq!(review.acceptance_criteria(), "Given a cart");
    }

    #[test]
    fn test_accept_all() {
        let mut review = review_with_criteria("");
        let targets = [
            risk1(),
            ui1(),
            ItemRef::new(ItemKind::Code, "c2"),
        ];
        for target in &targets {
            review.stage(target.clone(), ActionKind::Ignore).unwrap();
        }
        review.open_review_panel().unwrap();

        assert_eq!(review.accept_all().unwrap(), 3);
        assert!(review.pending().is_empty());
        assert_eq!(review.completed().len(), 3);
        assert!(!review.is_review_panel_open());
        for target in &targets {
            assert!(review.pending_for(target).is_none());
            assert_eq!(
                review.item_state(target),
                ItemState::Resolved(ActionStatus::Accepted)
            );
        }
        assert_eq!(review.acceptance_criteria().matches("Impact:").count(), 3);
        assert_eq!(review.accept_all().unwrap_err(), StoreError::NoPendingActions);
    }

    #[test]
    fn test_reject_all_and_undo_all() {
        let mut review = review_with_criteria("");
        review.stage(risk1(), ActionKind::Ignore).unwrap();
        review.stage(ui1(), ActionKind::Edit).unwrap();
        assert_eq!(review.reject_all().unwrap(), 2);
        assert_eq!(review.acceptance_criteria(), "");

        review.stage(risk1(), ActionKind::Edit).unwrap();
        assert_eq!(review.undo_all(), 1);
        assert!(review.editing().is_none());
        assert!(review.pending().is_empty());
    }

    #[test]
    fn test_review_panel_requires_pending() {
        let mut review = review_with_criteria("");
        assert_eq!(
            review.open_review_panel().unwrap_err(),
            StoreError::NoPendingActions
        );
        review.stage(risk1(), ActionKind::Ignore).unwrap();
        review.open_review_panel().unwrap();
        assert!(review.is_review_panel_open());
    }

    #[test]
    fn test_reconsider_reopens_with_last_content() {
        let mut review = review_with_criteria("");
        assert!(review.reconsider(&risk1()).is_err());

        review.stage(risk1(), ActionKind::Edit).unwrap();
        review.set_edit_content("Cache sessions").unwrap();
        review.submit_edit().unwrap();
        review.accept(&risk1()).unwrap();

        let action = review.reconsider(&risk1()).unwrap();
        assert_eq!(action.action, ActionKind::Edit);
        assert_eq!(action.item, "Implement fallback authentication");
        assert_eq!(review.editing().unwrap().content, "Cache sessions");
        assert_eq!(review.completed().len(), 1);
    }

    #[test]
    fn test_removed_item_cannot_be_reconsidered() {
        let mut review = review_with_criteria("");
        let dep = review.add_dependency("Inventory Service");
        review.stage(dep.clone(), ActionKind::Ignore).unwrap();
        review.accept(&dep).unwrap();
        let criteria = review.acceptance_criteria().to_string();

        review.remove_manual(&dep).unwrap();
        assert_eq!(
            review.reconsider(&dep).unwrap_err(),
            StoreError::ItemNotFound(dep.clone())
        );
        assert!(review.pending().is_empty());
        assert_eq!(review.acceptance_criteria(), criteria);
    }

    #[test]
    fn test_manual_items_lifecycle() {
        let mut review = review_with_criteria("");
        let risk = review.add_risk("Vendor lock-in", Severity::Low, "Abstract the gateway");
        let impact = review.add_impact(ItemKind::Code, "Refactor cart service").unwrap();
        let dep = review.add_dependency("Inventory Service");

        assert_eq!(review.analysis().risks.len(), 3);
        assert_eq!(review.analysis().code_impacts.len(), 3);
        assert_eq!(review.analysis().dependencies.len(), 3);
        assert_eq!(review.completed()[0].status, Some(ActionStatus::Added));

        review.update_manual(&dep, "Stock Service").unwrap();
        assert_eq!(review.analysis().item_text(&dep).as_deref(), Some("Stock Service"));
        assert_eq!(review.completed()[0].status, Some(ActionStatus::Edited));

        review.stage(impact.clone(), ActionKind::Edit).unwrap();
        review.remove_manual(&impact).unwrap();
        assert!(review.pending().is_empty());
        assert!(review.editing().is_none());
        assert_eq!(review.analysis().code_impacts.len(), 2);
        assert_eq!(review.completed()[0].status, Some(ActionStatus::Removed));

        review.remove_manual(&risk).unwrap();
        assert_eq!(review.analysis().risks.len(), 2);
    }

    #[test]
    fn test_system_items_cannot_be_removed() {
        let mut review = review_with_criteria("");
        assert_eq!(
            review.remove_manual(&risk1()).unwrap_err(),
            StoreError::NotManual(risk1())
        );
        assert!(matches!(
            review.add_impact(ItemKind::Risk, "nope"),
            Err(StoreError::NotAnImpactKind(ItemKind::Risk))
        ));
    }

    #[test]
    fn test_citation_lookup() {
        let review = review_with_criteria("");
        assert_eq!(review.citation_number(&ui1()), Some(3));
        let citation = review.citation(3).unwrap();
        assert_eq!(citation.target, ui1());
        assert!(review.citation(99).is_none());
    }

    #[test]
    fn test_activity_log_descriptions() {
        let mut review = review_with_criteria("");
        review.stage(ui1(), ActionKind::Ignore).unwrap();
        assert_eq!(
            review.pending()[0].describe(),
            "Ignored ui: New user flow needed for payment process"
        );
        review.reject(&ui1()).unwrap();
        assert_eq!(
            review.completed()[0].describe(),
            "Rejected ui: New user flow needed for payment process"
        );
        assert!(review.toggle_activity_log());
    }
}
