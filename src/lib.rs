//! Enhance structured recipes with the changes reviewers describe.
//!
//! Candidate modifications extracted from a single review are validated
//! against the recipe with fuzzy text matching, applied in order, and
//! packaged with a full record of which edits were accepted or rejected.
//!
//! # Example
//! ```
//! use recipe_enhancer::{apply_modifications, Modification, Recipe, TargetField};
//!
//! let recipe = Recipe::new(
//!     "pancakes",
//!     "Pancakes",
//!     vec!["1 cup flour".to_string(), "2 eggs".to_string()],
//!     vec!["Whisk everything together.".to_string()],
//! );
//! let modifications = vec![Modification::replace(
//!     TargetField::Ingredient,
//!     "cup of flour",
//!     "1.5 cups flour",
//! )];
//!
//! let enhanced = apply_modifications(&recipe, &modifications, "review-1").unwrap();
//! assert_eq!(enhanced.final_recipe.ingredients[0], "1.5 cups flour");
//! ```

pub mod builder;
pub mod config;
pub mod enhance;
pub mod error;
pub mod extraction;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod review;

pub use builder::{ModificationSource, RecipeEnhancer, RecipeEnhancerBuilder};
pub use config::{EnhancerConfig, MatchingConfig};
pub use enhance::{
    BatchApplier, BatchOutcome, ChangeRecord, EnhancedRecipe, EnhancementSummary, MatchMethod,
    MatchResult, ModificationValidator, RejectionReason, TextLocator, ValidationOutcome,
};
pub use error::EnhanceError;
pub use model::{Modification, Operation, Recipe, Review, TargetField};
pub use providers::ProviderKind;

/// Apply `modifications` taken from review `source_review_id` to `recipe`
/// using the default matching threshold.
pub fn apply_modifications(
    recipe: &Recipe,
    modifications: &[Modification],
    source_review_id: &str,
) -> Result<EnhancedRecipe, EnhanceError> {
    enhance::enhance(
        &BatchApplier::default(),
        recipe,
        modifications,
        source_review_id,
    )
}

/// Select the best review, extract its modifications with the configured
/// LLM provider and apply them to `recipe`.
///
/// Configuration comes from `config.toml` and `RECIPE_ENHANCER__*`
/// environment variables.
pub async fn enhance_from_reviews(
    recipe: Recipe,
    reviews: Vec<Review>,
) -> Result<EnhancedRecipe, EnhanceError> {
    RecipeEnhancer::builder()
        .recipe(recipe)
        .reviews(reviews)
        .build()
        .await
}
