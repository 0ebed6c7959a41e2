use crate::config::{EnhancerConfig, MatchingConfig};
use crate::enhance::{self, BatchApplier, EnhancedRecipe};
use crate::extraction::TweakExtractor;
use crate::model::{Modification, Recipe, Review};
use crate::pipeline::EnhancementPipeline;
use crate::providers::{ProviderFactory, ProviderKind, ProviderOverrides};
use crate::EnhanceError;

/// Where the modifications for a run come from
#[derive(Debug, Clone)]
pub enum ModificationSource {
    /// Select a review and extract modifications from it with an LLM
    Reviews(Vec<Review>),
    /// Use already extracted modifications attributed to `review_id`
    Modifications {
        modifications: Vec<Modification>,
        review_id: String,
    },
}

/// Builder for configuring and executing a recipe enhancement
#[derive(Debug, Default)]
pub struct RecipeEnhancerBuilder {
    recipe: Option<Recipe>,
    source: Option<ModificationSource>,
    overrides: ProviderOverrides,
    similarity_threshold: Option<f64>,
    config: Option<EnhancerConfig>,
}

impl RecipeEnhancerBuilder {
    /// Set the recipe to enhance
    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    /// Enhance from the best of these reviews
    ///
    /// # Example
    /// ```
    /// use recipe_enhancer::{RecipeEnhancer, Review};
    ///
    /// let builder = RecipeEnhancer::builder().reviews(vec![Review {
    ///     review_id: "r-1".to_string(),
    ///     text: "I used brown sugar instead of white.".to_string(),
    ///     rating: Some(5),
    ///     has_modification: true,
    /// }]);
    /// ```
    pub fn reviews(mut self, reviews: Vec<Review>) -> Self {
        self.source = Some(ModificationSource::Reviews(reviews));
        self
    }

    /// Apply already extracted modifications, skipping review selection and the LLM
    ///
    /// # Example
    /// ```
    /// use recipe_enhancer::{Modification, RecipeEnhancer, TargetField};
    ///
    /// let builder = RecipeEnhancer::builder().modifications(
    ///     vec![Modification::add(TargetField::Instruction, "Let rest for 10 minutes.")],
    ///     "review-42",
    /// );
    /// ```
    pub fn modifications(
        mut self,
        modifications: Vec<Modification>,
        review_id: impl Into<String>,
    ) -> Self {
        self.source = Some(ModificationSource::Modifications {
            modifications,
            review_id: review_id.into(),
        });
        self
    }

    /// Set the LLM provider used for extraction
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.overrides.kind = Some(provider);
        self
    }

    /// Set the API key for the LLM provider
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.overrides.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.overrides.model = Some(model.into());
        self
    }

    /// Override the fuzzy match threshold (0.0-1.0)
    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }

    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: EnhancerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build and execute the enhancement
    ///
    /// # Errors
    /// Returns `EnhanceError` if:
    /// - No recipe or modification source was specified
    /// - No review describes modifications
    /// - The provider cannot be created
    /// - The review id is empty
    ///
    /// Modifications that cannot be applied are not errors; they are listed
    /// in `EnhancedRecipe::rejected_changes`.
    pub async fn build(self) -> Result<EnhancedRecipe, EnhanceError> {
        let recipe = self.recipe.clone().ok_or_else(|| {
            EnhanceError::BuilderError("No recipe specified. Use .recipe()".to_string())
        })?;
        let source = self.source.clone().ok_or_else(|| {
            EnhanceError::BuilderError(
                "No modification source specified. Use .reviews() or .modifications()".to_string(),
            )
        })?;

        match source {
            ModificationSource::Modifications {
                modifications,
                review_id,
            } => {
                let matching = match (self.similarity_threshold, &self.config) {
                    (Some(threshold), _) => MatchingConfig::new(threshold),
                    (None, Some(config)) => config.matching,
                    (None, None) => MatchingConfig::default(),
                };
                enhance::enhance(
                    &BatchApplier::new(&matching),
                    &recipe,
                    &modifications,
                    &review_id,
                )
            }
            ModificationSource::Reviews(reviews) => {
                let mut config = match self.config.clone() {
                    Some(config) => config,
                    None => EnhancerConfig::load()?,
                };
                if let Some(threshold) = self.similarity_threshold {
                    config.matching = MatchingConfig::new(threshold);
                }

                let provider = ProviderFactory::extraction_provider(&config, &self.overrides)?;
                let pipeline = EnhancementPipeline::new(
                    TweakExtractor::new(provider, &config.extraction),
                    BatchApplier::new(&config.matching),
                );
                pipeline.run(&recipe, &reviews).await
            }
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeEnhancer;

impl RecipeEnhancer {
    /// Creates a new builder for enhancing a recipe
    ///
    /// # Example
    /// ```
    /// use recipe_enhancer::RecipeEnhancer;
    ///
    /// let builder = RecipeEnhancer::builder();
    /// ```
    pub fn builder() -> RecipeEnhancerBuilder {
        RecipeEnhancerBuilder::default()
    }
}
