use log::{debug, info, warn};

use super::mutator::{self, ChangeRecord};
use super::validator::{ModificationValidator, ValidationOutcome};
use crate::config::MatchingConfig;
use crate::error::EnhanceError;
use crate::model::{Modification, Recipe};

/// Result of folding a batch of modifications over one recipe
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub final_recipe: Recipe,
    pub accepted: Vec<ChangeRecord>,
    pub rejected: Vec<ValidationOutcome>,
}

/// Validates and applies modifications strictly in the order given
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchApplier {
    validator: ModificationValidator,
}

impl BatchApplier {
    pub fn new(config: &MatchingConfig) -> Self {
        BatchApplier {
            validator: ModificationValidator::new(config),
        }
    }

    pub fn with_validator(validator: ModificationValidator) -> Self {
        BatchApplier { validator }
    }

    /// Apply `modifications` to `recipe`.
    ///
    /// Each modification is validated against the recipe as left by the ones
    /// before it. Rejected modifications leave the state untouched, so the
    /// run always completes with every input accounted for in either
    /// `accepted` or `rejected`.
    pub fn apply_batch(
        &self,
        modifications: &[Modification],
        recipe: &Recipe,
    ) -> Result<BatchOutcome, EnhanceError> {
        let mut current = recipe.clone();
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for (position, modification) in modifications.iter().enumerate() {
            let outcome = self.validator.validate(modification, &current);

            if !outcome.accepted {
                warn!(
                    "Rejected modification {} ({} {}): {} - {}",
                    position + 1,
                    modification.operation,
                    modification.target_field,
                    outcome
                        .rejection_reason
                        .map(|r| r.code())
                        .unwrap_or_default(),
                    outcome.detail.as_deref().unwrap_or_default()
                );
                rejected.push(outcome);
                continue;
            }

            let (next, change) =
                mutator::apply(modification, outcome.match_result.as_ref(), &current)?;
            debug!(
                "Applied modification {} ({} {} at {}): {:?} -> {:?}",
                position + 1,
                change.operation,
                change.field,
                change.index,
                change.before,
                change.after
            );
            accepted.push(change);
            current = next;
        }

        info!(
            "Applied {} of {} modifications ({} rejected)",
            accepted.len(),
            modifications.len(),
            rejected.len()
        );

        Ok(BatchOutcome {
            final_recipe: current,
            accepted,
            rejected,
        })
    }
}
