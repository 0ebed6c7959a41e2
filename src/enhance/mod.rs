//! Validation and application of review-derived modifications.
//!
//! The flow for one run is: [`BatchApplier`] drives [`ModificationValidator`]
//! (which uses [`TextLocator`]) and [`mutator::apply`] over the modifications
//! in order, and [`attribution::assemble`] packages the result.

pub mod applier;
pub mod attribution;
pub mod locator;
pub mod mutator;
pub mod validator;

pub use applier::{BatchApplier, BatchOutcome};
pub use attribution::{assemble, EnhancedRecipe, EnhancementSummary};
pub use locator::{MatchMethod, MatchResult, TextLocator};
pub use mutator::{replay, ChangeRecord};
pub use validator::{ModificationValidator, RejectionReason, ValidationOutcome};

use crate::error::EnhanceError;
use crate::model::{Modification, Recipe};

/// Apply `modifications` from one review to `recipe` and attribute the result
pub fn enhance(
    applier: &BatchApplier,
    recipe: &Recipe,
    modifications: &[Modification],
    source_review_id: &str,
) -> Result<EnhancedRecipe, EnhanceError> {
    // check the attribution link before doing any work
    if source_review_id.trim().is_empty() {
        return Err(EnhanceError::MissingReviewId);
    }
    let outcome = applier.apply_batch(modifications, recipe)?;
    assemble(
        recipe,
        outcome.final_recipe,
        outcome.accepted,
        outcome.rejected,
        source_review_id,
    )
}
