//! Turns review text into candidate modifications with an LLM.

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::config::ExtractionConfig;
use crate::model::{Modification, Recipe, Review};
use crate::providers::{build_extraction_prompt, LlmProvider, TWEAK_EXTRACTION_PROMPT};

pub struct TweakExtractor {
    provider: Box<dyn LlmProvider>,
    max_retries: u32,
}

impl TweakExtractor {
    pub fn new(provider: Box<dyn LlmProvider>, config: &ExtractionConfig) -> Self {
        info!(
            "Initialized TweakExtractor with provider: {}",
            provider.provider_name()
        );
        TweakExtractor {
            provider,
            max_retries: config.max_retries,
        }
    }

    /// Extract every modification described by `review` against `recipe`.
    ///
    /// Unparseable replies are retried; once retries run out an empty list
    /// is returned and the failure is logged.
    pub async fn extract_modifications(&self, review: &Review, recipe: &Recipe) -> Vec<Modification> {
        let prompt = build_extraction_prompt(
            &recipe.title,
            &recipe.ingredients,
            &recipe.instructions,
            &review.text,
        );
        debug!(
            "Extracting modifications from review: {}...",
            review.text.chars().take(100).collect::<String>()
        );

        let attempts = self.max_retries + 1;
        for attempt in 1..=attempts {
            let raw = match self.provider.complete(TWEAK_EXTRACTION_PROMPT, &prompt).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Attempt {}: provider error: {}", attempt, e);
                    continue;
                }
            };
            debug!("LLM raw output: {}", raw);

            match parse_modifications(&raw) {
                Ok(modifications) => {
                    info!(
                        "Extracted {} modifications from review {}",
                        modifications.len(),
                        review.review_id
                    );
                    for (i, m) in modifications.iter().enumerate() {
                        info!(
                            "  Modification {}: {} {} - {}",
                            i + 1,
                            m.operation,
                            m.target_field,
                            m.rationale.as_deref().unwrap_or("no rationale")
                        );
                    }
                    return modifications;
                }
                Err(e) => {
                    warn!("Attempt {}: {}", attempt, e);
                    if attempt == attempts {
                        error!("Max retries reached. Raw output: {}", raw);
                    }
                }
            }
        }

        warn!("Failed to extract modifications from review {}", review.review_id);
        Vec::new()
    }
}

/// Parse an LLM reply of the form `{"modifications": [...]}`.
///
/// A lone object under `modifications` is treated as a one-element list,
/// and a surrounding markdown code fence is tolerated.
pub fn parse_modifications(raw: &str) -> Result<Vec<Modification>, String> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err("Empty response from LLM".to_string());
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| format!("Failed to parse JSON: {}", e))?;

    let items = match value.get("modifications") {
        Some(Value::Array(items)) => items.clone(),
        Some(item @ Value::Object(_)) => vec![item.clone()],
        Some(other) => return Err(format!("'modifications' is not a list: {}", other)),
        None => return Err("Response has no 'modifications' key".to_string()),
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<Modification>(item)
                .map_err(|e| format!("Validation error: {}", e))
        })
        .collect()
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}
