use crate::models::{Dependency, Impact, ImpactAnalysis, RequirementForm, Risk, Severity};

/// Source of impact analyses.
///
/// The only implementation today returns canned data; a real analysis
/// engine slots in behind the same trait.
pub trait AnalysisProvider: Send + Sync {
    /// Short name for status lines
    fn name(&self) -> &str;

    /// Produces the analysis for a requirement
    fn analyze(&self, requirement: &RequirementForm) -> ImpactAnalysis;
}

/// Returns the same demonstration analysis for every requirement
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalysisProvider;

fn impact(id: &str, description: &str) -> Impact {
    Impact {
        id: id.to_string(),
        description: description.to_string(),
        is_manual: false,
    }
}

fn risk(id: &str, description: &str, severity: Severity, mitigation: &str) -> Risk {
    Risk {
        id: id.to_string(),
        description: description.to_string(),
        severity,
        mitigation: mitigation.to_string(),
        is_manual: false,
    }
}

fn dependency(id: &str, name: &str) -> Dependency {
    Dependency {
        id: id.to_string(),
        name: name.to_string(),
        is_manual: false,
    }
}

impl AnalysisProvider for MockAnalysisProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn analyze(&self, _requirement: &RequirementForm) -> ImpactAnalysis {
        ImpactAnalysis {
            dependencies: vec![
                dependency("d1", "Authentication Service"),
                dependency("d2", "Payment Gateway"),
            ],
            risks: vec![
                risk(
                    "r1",
                    "High load during peak hours",
                    Severity::High,
                    "Implement fallback authentication",
                ),
                risk(
                    "r2",
                    "Data consistency across services",
                    Severity::Medium,
                    "Add retry mechanism",
                ),
            ],
            ui_ux_impacts: vec![
                impact("ui1", "New user flow needed for payment process"),
                impact("ui2", "Mobile responsiveness updates required"),
            ],
            code_impacts: vec![
                impact("c1", "API endpoint modifications needed"),
                impact("c2", "New middleware for request validation"),
            ],
            data_impacts: vec![
                impact("d1", "New schema for user preferences"),
                impact("d2", "Database migration required"),
            ],
            executive_summary: "This requirement introduces significant changes to the payment \
                processing workflow, affecting multiple system components. Key considerations \
                include security implications and user experience improvements."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_analysis_shape() {
        let analysis = MockAnalysisProvider.analyze(&RequirementForm::default());
        assert_eq!(analysis.dependencies.len(), 2);
        assert_eq!(analysis.risks.len(), 2);
        assert_eq!(analysis.ui_ux_impacts.len(), 2);
        assert_eq!(analysis.code_impacts.len(), 2);
        assert_eq!(analysis.data_impacts.len(), 2);
        assert!(!analysis.executive_summary.is_empty());
        assert!(analysis.risks.iter().all(|r| !r.is_manual));
    }
}
