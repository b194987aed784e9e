//! Impact analysis: the pluggable provider and the review workflow
//!
//! An [`AnalysisProvider`] produces an [`ImpactAnalysis`](crate::models::ImpactAnalysis)
//! for a requirement; an [`ImpactReview`] tracks the user's edit, ignore,
//! accept and reject decisions against it.

pub mod citation;
pub mod provider;
pub mod review;

pub use citation::{Citation, CitationDetail};
pub use provider::{AnalysisProvider, MockAnalysisProvider};
pub use review::{EditState, ImpactReview, ItemState};
