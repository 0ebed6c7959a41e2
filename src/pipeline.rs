//! End-to-end enhancement: review selection, extraction, application and
//! attribution.

use log::info;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::enhance::{self, BatchApplier, EnhancedRecipe};
use crate::error::EnhanceError;
use crate::extraction::TweakExtractor;
use crate::model::{Recipe, Review};
use crate::review::{reviews_with_modifications, select_review};

pub struct EnhancementPipeline {
    extractor: TweakExtractor,
    applier: BatchApplier,
}

impl EnhancementPipeline {
    pub fn new(extractor: TweakExtractor, applier: BatchApplier) -> Self {
        EnhancementPipeline { extractor, applier }
    }

    /// Enhance `recipe` from the best review among `reviews`
    pub async fn run(&self, recipe: &Recipe, reviews: &[Review]) -> Result<EnhancedRecipe, EnhanceError> {
        let candidates = reviews_with_modifications(reviews);
        info!(
            "Recipe {}: {} of {} reviews describe modifications",
            recipe.recipe_id,
            candidates.len(),
            reviews.len()
        );
        let review = select_review(&candidates).ok_or(EnhanceError::NoReviewSelected)?;
        // attribution needs the id, so fail before paying for extraction
        if review.review_id.trim().is_empty() {
            return Err(EnhanceError::MissingReviewId);
        }

        let modifications = self.extractor.extract_modifications(review, recipe).await;
        enhance::enhance(&self.applier, recipe, &modifications, &review.review_id)
    }

    /// Run independent enhancements concurrently, at most `max_concurrent`
    /// at a time. Results come back in the order of `jobs`.
    pub async fn run_many(
        self: Arc<Self>,
        jobs: Vec<(Recipe, Vec<Review>)>,
        max_concurrent: usize,
    ) -> Vec<Result<EnhancedRecipe, EnhanceError>> {
        let limiter = Arc::new(Semaphore::new(max_concurrent.max(1)));

        let handles: Vec<_> = jobs
            .into_iter()
            .map(|(recipe, reviews)| {
                let pipeline = Arc::clone(&self);
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    let _permit = limiter
                        .acquire_owned()
                        .await
                        .map_err(|e| EnhanceError::TaskFailed(e.to_string()))?;
                    pipeline.run(&recipe, &reviews).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(match handle.await {
                Ok(result) => result,
                Err(e) => Err(EnhanceError::TaskFailed(e.to_string())),
            });
        }
        results
    }
}
