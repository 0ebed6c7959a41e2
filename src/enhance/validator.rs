//! Accept/reject decisions for individual modifications.

use serde::Serialize;
use std::fmt;

use super::locator::{MatchResult, TextLocator};
use crate::config::MatchingConfig;
use crate::model::{Modification, Operation, Recipe};

/// Why a modification was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The operation is missing text it needs
    IncompleteFields,
    /// Nothing in the target field resembles `target_text`
    TargetNotFound,
    /// A match exists but its confidence is under the threshold
    LowConfidenceMatch,
}

impl RejectionReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::IncompleteFields => "incomplete_fields",
            RejectionReason::TargetNotFound => "target_not_found",
            RejectionReason::LowConfidenceMatch => "low_confidence_match",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Verdict for one modification. Exactly one is produced per input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub accepted: bool,
    pub modification: Modification,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<RejectionReason>,
    /// Human-readable explanation accompanying a rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ValidationOutcome {
    fn accept(modification: &Modification, match_result: Option<MatchResult>) -> Self {
        ValidationOutcome {
            accepted: true,
            modification: modification.clone(),
            match_result,
            rejection_reason: None,
            detail: None,
        }
    }

    fn reject(
        modification: &Modification,
        match_result: Option<MatchResult>,
        reason: RejectionReason,
        detail: String,
    ) -> Self {
        ValidationOutcome {
            accepted: false,
            modification: modification.clone(),
            match_result,
            rejection_reason: Some(reason),
            detail: Some(detail),
        }
    }
}

fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, |t| t.trim().is_empty())
}

/// Decides whether a modification can be safely applied to a recipe
#[derive(Debug, Clone, Copy)]
pub struct ModificationValidator {
    locator: TextLocator,
    threshold: f64,
}

impl Default for ModificationValidator {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

impl ModificationValidator {
    pub fn new(config: &MatchingConfig) -> Self {
        ModificationValidator {
            locator: TextLocator::new(config),
            threshold: config.threshold(),
        }
    }

    /// Use an independently configured locator while keeping this
    /// validator's own confidence floor.
    pub fn with_locator(locator: TextLocator, config: &MatchingConfig) -> Self {
        ModificationValidator {
            locator,
            threshold: config.threshold(),
        }
    }

    /// Validate `modification` against the current `recipe` state
    pub fn validate(&self, modification: &Modification, recipe: &Recipe) -> ValidationOutcome {
        if let Some(detail) = missing_fields(modification) {
            return ValidationOutcome::reject(
                modification,
                None,
                RejectionReason::IncompleteFields,
                detail,
            );
        }

        match modification.operation {
            // appends need no existing line
            Operation::Add => ValidationOutcome::accept(modification, None),
            Operation::Replace | Operation::Remove => {
                let lines = recipe.lines(modification.target_field);
                let match_result = self.locator.locate(&modification.target_text, lines);
                self.assess_match(modification, match_result)
            }
        }
    }

    /// Judge a locator result for `modification`.
    ///
    /// The confidence floor is checked here as well as in the locator, since
    /// a result may come from a differently configured locator or a cache.
    pub fn assess_match(
        &self,
        modification: &Modification,
        match_result: MatchResult,
    ) -> ValidationOutcome {
        if !match_result.found || match_result.matched_index.is_none() {
            let detail = format!(
                "no {} line matches '{}' (best similarity {:.2})",
                modification.target_field, modification.target_text, match_result.confidence
            );
            return ValidationOutcome::reject(
                modification,
                Some(match_result),
                RejectionReason::TargetNotFound,
                detail,
            );
        }

        // NaN fails the floor
        if !(match_result.confidence >= self.threshold) {
            let detail = format!(
                "match '{}' for '{}' has confidence {:.2}, below {:.2}",
                match_result.matched_text.as_deref().unwrap_or_default(),
                modification.target_text,
                match_result.confidence,
                self.threshold
            );
            return ValidationOutcome::reject(
                modification,
                Some(match_result),
                RejectionReason::LowConfidenceMatch,
                detail,
            );
        }

        ValidationOutcome::accept(modification, Some(match_result))
    }
}

fn missing_fields(modification: &Modification) -> Option<String> {
    let op = modification.operation;
    let needs_target = matches!(op, Operation::Replace | Operation::Remove);
    let needs_replacement = matches!(op, Operation::Replace | Operation::Add);

    if needs_target && is_blank(Some(&modification.target_text)) {
        return Some(format!("{} requires a non-empty target_text", op));
    }
    if needs_replacement && is_blank(modification.replacement_text.as_deref()) {
        return Some(format!("{} requires a non-empty replacement_text", op));
    }
    None
}
