//! Finds the recipe line an imprecise target text refers to.

use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::MatchingConfig;

/// How a match was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    ExactSubstring,
    Fuzzy,
}

/// Result of locating a target text within a list of lines.
///
/// When `found` is false, `confidence` still carries the best score seen so
/// failures can be logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub found: bool,
    pub matched_text: Option<String>,
    pub matched_index: Option<usize>,
    pub confidence: f64,
    pub method: MatchMethod,
}

impl MatchResult {
    fn not_found(confidence: f64) -> Self {
        MatchResult {
            found: false,
            matched_text: None,
            matched_index: None,
            confidence,
            method: MatchMethod::Fuzzy,
        }
    }
}

/// Pure, stateless text locator parameterised by a similarity threshold
#[derive(Debug, Clone, Copy)]
pub struct TextLocator {
    threshold: f64,
}

impl Default for TextLocator {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

impl TextLocator {
    pub fn new(config: &MatchingConfig) -> Self {
        TextLocator {
            threshold: config.threshold(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Locate `target_text` among `candidate_lines`.
    ///
    /// Exact (case-insensitive, whitespace-normalized) containment wins
    /// outright; otherwise the highest token-set similarity is used and must
    /// reach the threshold. Ties go to the lowest index.
    pub fn locate(&self, target_text: &str, candidate_lines: &[String]) -> MatchResult {
        let target = normalize(target_text);
        if target.is_empty() || candidate_lines.is_empty() {
            return MatchResult::not_found(0.0);
        }

        if let Some((index, line)) = candidate_lines
            .iter()
            .enumerate()
            .find(|(_, line)| normalize(line).contains(&target))
        {
            return MatchResult {
                found: true,
                matched_text: Some(line.clone()),
                matched_index: Some(index),
                confidence: 1.0,
                method: MatchMethod::ExactSubstring,
            };
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, line) in candidate_lines.iter().enumerate() {
            let score = similarity(target_text, line);
            // strict comparison keeps the earliest line on ties
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score >= self.threshold => MatchResult {
                found: true,
                matched_text: Some(candidate_lines[index].clone()),
                matched_index: Some(index),
                confidence: score,
                method: MatchMethod::Fuzzy,
            },
            Some((index, score)) => {
                debug!(
                    "No match for '{}' (best {:.3} at line {}, threshold {:.2})",
                    target_text, score, index, self.threshold
                );
                MatchResult::not_found(score)
            }
            None => MatchResult::not_found(0.0),
        }
    }
}

/// Lowercase and collapse runs of whitespace
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokens(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b)
}

/// Token-set similarity of `line` to `target`, in `[0, 1]`.
///
/// Both texts are tokenized into sorted sets and the shared tokens are
/// compared against each side's shared-plus-remaining tokens. Those shared
/// scores are scaled by the fraction of `target` tokens the line covers, so
/// a short line made only of target words ("Bake.") cannot outscore the line
/// the target describes. Word order and repeated words do not affect the
/// score.
pub fn similarity(target: &str, line: &str) -> f64 {
    let target_tokens = tokens(target);
    let line_tokens = tokens(line);
    if target_tokens.is_empty() || line_tokens.is_empty() {
        return 0.0;
    }

    let shared: Vec<&String> = target_tokens.intersection(&line_tokens).collect();
    let coverage = shared.len() as f64 / target_tokens.len() as f64;

    let common = join_tokens(shared.into_iter());
    let only_target = join_tokens(target_tokens.difference(&line_tokens));
    let only_line = join_tokens(line_tokens.difference(&target_tokens));

    let combine = |rest: &str| match (common.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => common.clone(),
        (false, false) => format!("{} {}", common, rest),
    };
    let with_target = combine(&only_target);
    let with_line = combine(&only_line);

    let partial = ratio(&common, &with_target).max(ratio(&common, &with_line)) * coverage;
    partial.max(ratio(&with_target, &with_line))
}
