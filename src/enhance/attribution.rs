use serde::Serialize;

use super::mutator::ChangeRecord;
use super::validator::ValidationOutcome;
use crate::error::EnhanceError;
use crate::model::{Recipe, TargetField};

/// Counts describing what an enhancement run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancementSummary {
    pub original_recipe_id: String,
    pub total_modifications: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub ingredient_changes: usize,
    pub instruction_changes: usize,
}

/// A recipe enhanced from a single review, with every accepted and rejected
/// edit attributed to it
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedRecipe {
    pub final_recipe: Recipe,
    pub source_review_id: String,
    pub accepted_changes: Vec<ChangeRecord>,
    pub rejected_changes: Vec<ValidationOutcome>,
    pub summary: EnhancementSummary,
}

/// Combine the results of a run into an [`EnhancedRecipe`].
///
/// Fails only when `source_review_id` is blank.
pub fn assemble(
    original_recipe: &Recipe,
    final_recipe: Recipe,
    accepted: Vec<ChangeRecord>,
    rejected: Vec<ValidationOutcome>,
    source_review_id: &str,
) -> Result<EnhancedRecipe, EnhanceError> {
    if source_review_id.trim().is_empty() {
        return Err(EnhanceError::MissingReviewId);
    }

    let changes_to = |field: TargetField| accepted.iter().filter(|c| c.field == field).count();
    let summary = EnhancementSummary {
        original_recipe_id: original_recipe.recipe_id.clone(),
        total_modifications: accepted.len() + rejected.len(),
        accepted: accepted.len(),
        rejected: rejected.len(),
        ingredient_changes: changes_to(TargetField::Ingredient),
        instruction_changes: changes_to(TargetField::Instruction),
    };

    Ok(EnhancedRecipe {
        final_recipe,
        source_review_id: source_review_id.to_string(),
        accepted_changes: accepted,
        rejected_changes: rejected,
        summary,
    })
}
