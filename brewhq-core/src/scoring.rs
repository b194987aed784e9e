//! Impact scoring for new requirements.
//!
//! Scores are placeholders until a real scoring model exists; the trait keeps
//! the choice out of the stores.

use rand::Rng;

use crate::models::RequirementForm;

pub const MIN_IMPACT_SCORE: u8 = 1;
pub const MAX_IMPACT_SCORE: u8 = 5;

/// Assigns an impact score to a requirement at creation time
pub trait ImpactScorer: Send + Sync {
    /// Returns a score in `MIN_IMPACT_SCORE..=MAX_IMPACT_SCORE`
    fn score(&self, form: &RequirementForm) -> u8;
}

/// Picks a uniformly random score
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomImpactScorer;

impl ImpactScorer for RandomImpactScorer {
    fn score(&self, _form: &RequirementForm) -> u8 {
        rand::thread_rng().gen_range(MIN_IMPACT_SCORE..=MAX_IMPACT_SCORE)
    }
}

/// Always returns the same score, clamped into range
#[derive(Debug, Clone, Copy)]
pub struct FixedImpactScorer(pub u8);

impl ImpactScorer for FixedImpactScorer {
    fn score(&self, _form: &RequirementForm) -> u8 {
        self.0.clamp(MIN_IMPACT_SCORE, MAX_IMPACT_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_scores_stay_in_range() {
        let form = RequirementForm::new("Checkout Redesign", "As a shopper...", "");
        for _ in 0..200 {
            let score = RandomImpactScorer.score(&form);
            assert!((MIN_IMPACT_SCORE..=MAX_IMPACT_SCORE).contains(&score));
        }
    }

    #[test]
    fn test_fixed_scorer_clamps() {
        let form = RequirementForm::default();
        assert_eq!(FixedImpactScorer(0).score(&form), 1);
        assert_eq!(FixedImpactScorer(3).score(&form), 3);
        assert_eq!(FixedImpactScorer(9).score(&form), 5);
    }
}
