use std::fmt::Write;

/// The system prompt used for extracting modifications from a review.
///
/// Loaded from `prompt.txt` at compile time so it can be edited without
/// dealing with Rust string syntax. It contains a worked few-shot example.
pub const TWEAK_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// Build the user prompt presenting the recipe and the review text.
///
/// Lines are numbered so the model can quote them back accurately.
pub fn build_extraction_prompt(
    title: &str,
    ingredients: &[String],
    instructions: &[String],
    review_text: &str,
) -> String {
    let mut prompt = String::new();

    if !title.trim().is_empty() {
        let _ = writeln!(prompt, "Recipe: {}\n", title.trim());
    }

    prompt.push_str("Recipe ingredients:\n");
    for (i, line) in ingredients.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", i + 1, line);
    }

    prompt.push_str("\nRecipe instructions:\n");
    for (i, line) in instructions.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", i + 1, line);
    }

    let _ = write!(prompt, "\nReview: \"{}\"", review_text.trim());
    prompt
}
