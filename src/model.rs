use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which line sequence of a recipe a modification targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    #[serde(alias = "ingredients")]
    Ingredient,
    #[serde(alias = "instructions", alias = "step", alias = "steps")]
    Instruction,
}

impl TargetField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::Ingredient => "ingredient",
            TargetField::Instruction => "instruction",
        }
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of edit a modification performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Replace,
    Add,
    Remove,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Replace => "replace",
            Operation::Add => "add",
            Operation::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured recipe: title, ordered ingredient and instruction lines
/// and free-form metadata.
///
/// Enhancement never mutates a recipe in place. Every applied edit produces
/// a new value via [`Recipe::with_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub recipe_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Recipe {
    pub fn new(
        recipe_id: impl Into<String>,
        title: impl Into<String>,
        ingredients: Vec<String>,
        instructions: Vec<String>,
    ) -> Self {
        Recipe {
            recipe_id: recipe_id.into(),
            title: title.into(),
            ingredients,
            instructions,
            metadata: BTreeMap::new(),
        }
    }

    /// Lines of the given field, in order
    pub fn lines(&self, field: TargetField) -> &[String] {
        match field {
            TargetField::Ingredient => &self.ingredients,
            TargetField::Instruction => &self.instructions,
        }
    }

    /// Copy of this recipe with `field` replaced by `lines`
    pub fn with_lines(&self, field: TargetField, lines: Vec<String>) -> Recipe {
        let mut next = self.clone();
        match field {
            TargetField::Ingredient => next.ingredients = lines,
            TargetField::Instruction => next.instructions = lines,
        }
        next
    }
}

/// A candidate edit extracted from review text.
///
/// This is untrusted input: `target_text` may reference text that does not
/// exist and required fields may be missing or blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub operation: Operation,
    pub target_field: TargetField,
    #[serde(default)]
    pub target_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_text: Option<String>,
    #[serde(default, alias = "reasoning", skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Modification {
    pub fn replace(
        field: TargetField,
        target_text: impl Into<String>,
        replacement_text: impl Into<String>,
    ) -> Self {
        Modification {
            operation: Operation::Replace,
            target_field: field,
            target_text: target_text.into(),
            replacement_text: Some(replacement_text.into()),
            rationale: None,
        }
    }

    pub fn add(field: TargetField, text: impl Into<String>) -> Self {
        Modification {
            operation: Operation::Add,
            target_field: field,
            target_text: String::new(),
            replacement_text: Some(text.into()),
            rationale: None,
        }
    }

    pub fn remove(field: TargetField, target_text: impl Into<String>) -> Self {
        Modification {
            operation: Operation::Remove,
            target_field: field,
            target_text: target_text.into(),
            replacement_text: None,
            rationale: None,
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
}

/// A user review of a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub review_id: String,
    pub text: String,
    #[serde(default)]
    pub rating: Option<u8>,
    /// Set upstream when the review describes changes the reviewer made
    #[serde(default)]
    pub has_modification: bool,
}
