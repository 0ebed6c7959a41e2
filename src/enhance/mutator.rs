//! Produces the next recipe state for an accepted modification.

use serde::Serialize;

use super::locator::MatchResult;
use crate::error::EnhanceError;
use crate::model::{Modification, Operation, Recipe, TargetField};

/// Before/after record of one applied modification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub field: TargetField,
    pub operation: Operation,
    /// Position in `field` the change touched; for additions, where the line landed
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    pub source_modification: Modification,
}

/// Apply an accepted `modification` to `recipe`, returning the new recipe and
/// the change it made. The input recipe is left as it was.
///
/// `match_result` must come from validating against this same `recipe`;
/// it is ignored for additions.
pub fn apply(
    modification: &Modification,
    match_result: Option<&MatchResult>,
    recipe: &Recipe,
) -> Result<(Recipe, ChangeRecord), EnhanceError> {
    let field = modification.target_field;
    let mut lines = recipe.lines(field).to_vec();
    let replacement = modification.replacement_text.clone().unwrap_or_default();

    let (index, before, after) = match modification.operation {
        Operation::Add => {
            lines.push(replacement.clone());
            (lines.len() - 1, None, Some(replacement))
        }
        Operation::Replace => {
            let index = matched_index(field, match_result, lines.len())?;
            let before = std::mem::replace(&mut lines[index], replacement.clone());
            (index, Some(before), Some(replacement))
        }
        Operation::Remove => {
            let index = matched_index(field, match_result, lines.len())?;
            let before = lines.remove(index);
            (index, Some(before), None)
        }
    };

    let record = ChangeRecord {
        field,
        operation: modification.operation,
        index,
        before,
        after,
        source_modification: modification.clone(),
    };
    Ok((recipe.with_lines(field, lines), record))
}

fn matched_index(
    field: TargetField,
    match_result: Option<&MatchResult>,
    len: usize,
) -> Result<usize, EnhanceError> {
    let index = match_result
        .filter(|m| m.found)
        .and_then(|m| m.matched_index)
        .ok_or(EnhanceError::MatchOutOfRange {
            field,
            index: usize::MAX,
            len,
        })?;
    if index >= len {
        return Err(EnhanceError::MatchOutOfRange { field, index, len });
    }
    Ok(index)
}

/// Re-apply `changes` in order starting from `original`.
///
/// Every record's `before` must equal the line it addresses, so a replay
/// against the wrong starting recipe fails instead of drifting.
pub fn replay(original: &Recipe, changes: &[ChangeRecord]) -> Result<Recipe, EnhanceError> {
    let mut current = original.clone();

    for (position, change) in changes.iter().enumerate() {
        let mut lines = current.lines(change.field).to_vec();
        let mismatch = |message: String| EnhanceError::ReplayMismatch { position, message };

        match change.operation {
            Operation::Add => {
                if change.index != lines.len() {
                    return Err(mismatch(format!(
                        "addition expected at {} but {} has {} lines",
                        change.index,
                        change.field,
                        lines.len()
                    )));
                }
                lines.push(change.after.clone().unwrap_or_default());
            }
            Operation::Replace | Operation::Remove => {
                let existing = lines.get(change.index);
                if existing != change.before.as_ref() {
                    return Err(mismatch(format!(
                        "{} line {} is {:?}, expected {:?}",
                        change.field, change.index, existing, change.before
                    )));
                }
                if change.operation == Operation::Replace {
                    lines[change.index] = change.after.clone().unwrap_or_default();
                } else {
                    lines.remove(change.index);
                }
            }
        }

        current = current.with_lines(change.field, lines);
    }

    Ok(current)
}
