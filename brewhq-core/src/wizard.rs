//! Two-step "new project" wizard

use crate::models::{NewProjectForm, Repository, DEFAULT_BRANCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Name and description
    #[default]
    Details,
    ConnectRepository,
}

impl WizardStep {
    /// 1-based position shown in the step indicator
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::ConnectRepository => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Details => "Create Project",
            WizardStep::ConnectRepository => "Connect Repository",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewProjectWizard {
    step: WizardStep,
    pub form: NewProjectForm,
}

impl NewProjectWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn next(&mut self) {
        self.step = WizardStep::ConnectRepository;
    }

    pub fn back(&mut self) {
        self.step = WizardStep::Details;
    }

    /// Connects a repository; a blank branch becomes the default branch
    pub fn connect_repository(&mut self, name: &str, branch: &str, url: &str) {
        let branch = if branch.trim().is_empty() {
            DEFAULT_BRANCH
        } else {
            branch.trim()
        };
        self.form.repository = Some(Repository::new(name.trim(), branch, url.trim()));
    }

    /// Completes the wizard, handing back the form and resetting for reuse.
    /// Only the final step can finish.
    pub fn finish(&mut self) -> Option<NewProjectForm> {
        if self.step != WizardStep::ConnectRepository {
            return None;
        }
        let form = std::mem::take(&mut self.form);
        self.step = WizardStep::Details;
        Some(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_requires_second_step() {
        let mut wizard = NewProjectWizard::new();
        wizard.form.name = "Mobile".to_string();
        assert_eq!(wizard.step().number(), 1);
        assert!(wizard.finish().is_none());

        wizard.next();
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::Details);

        wizard.next();
        wizard.connect_repository("mobile-app", "", "https://github.com/example/mobile-app");
        let form = wizard.finish().unwrap();
        assert_eq!(form.name, "Mobile");
        assert_eq!(form.repository.unwrap().branch, DEFAULT_BRANCH);

        assert_eq!(wizard.step(), WizardStep::Details);
        assert!(wizard.form.name.is_empty());
    }
}
