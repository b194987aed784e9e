use crate::models::{ImpactAnalysis, ItemKind, ItemRef, Severity};

/// Full detail behind a numbered footnote marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationDetail {
    Risk {
        description: String,
        severity: Severity,
        mitigation: String,
    },
    Impact {
        description: String,
    },
}

/// A numbered reference to a risk or impact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// 1-based footnote number
    pub number: usize,
    pub target: ItemRef,
    pub detail: CitationDetail,
}

/// Numbers risks first, then UI/UX, code and data impacts
pub fn citations(analysis: &ImpactAnalysis) -> Vec<Citation> {
    let risks = analysis.risks.iter().map(|r| {
        (
            ItemRef::new(ItemKind::Risk, r.id.clone()),
            CitationDetail::Risk {
                description: r.description.clone(),
                severity: r.severity,
                mitigation: r.mitigation.clone(),
            },
        )
    });
    let impacts = [ItemKind::Ui, ItemKind::Code, ItemKind::Data]
        .into_iter()
        .flat_map(|kind| {
            analysis
                .impacts(kind)
                .into_iter()
                .flatten()
                .map(move |i| {
                    (
                        ItemRef::new(kind, i.id.clone()),
                        CitationDetail::Impact {
                            description: i.description.clone(),
                        },
                    )
                })
        });

    risks
        .chain(impacts)
        .enumerate()
        .map(|(idx, (target, detail))| Citation {
            number: idx + 1,
            target,
            detail,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisProvider, MockAnalysisProvider};
    use crate::models::RequirementForm;

    #[test]
    fn test_numbering_order() {
        let analysis = MockAnalysisProvider.analyze(&RequirementForm::default());
        let all = citations(&analysis);

        assert_eq!(all.len(), 8);
        assert_eq!(all[0].number, 1);
        assert_eq!(all[0].target, ItemRef::new(ItemKind::Risk, "r1"));
        assert!(matches!(
            all[0].detail,
            CitationDetail::Risk {
                severity: Severity::High,
                ..
            }
        ));
        assert_eq!(all[2].target, ItemRef::new(ItemKind::Ui, "ui1"));
        assert_eq!(all[7].target, ItemRef::new(ItemKind::Data, "d2"));
        assert_eq!(all[7].number, 8);
    }
}
