use log::info;
use std::env;
use std::path::Path;
use std::process::ExitCode;

use recipe_enhancer::{
    EnhanceError, EnhancedRecipe, Modification, Recipe, RecipeEnhancer, Review,
};

const USAGE: &str = "Usage:
  recipe-enhancer <recipe.json> <reviews.json>
  recipe-enhancer apply <recipe.json> <modifications.json> <review-id>";

async fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, EnhanceError> {
    let content = tokio::fs::read_to_string(Path::new(path)).await?;
    Ok(serde_json::from_str(&content)?)
}

async fn run(args: &[String]) -> Result<EnhancedRecipe, EnhanceError> {
    match args {
        [cmd, recipe, modifications, review_id] if cmd == "apply" => {
            let recipe: Recipe = read_json(recipe).await?;
            let modifications: Vec<Modification> = read_json(modifications).await?;
            RecipeEnhancer::builder()
                .recipe(recipe)
                .modifications(modifications, review_id.clone())
                .build()
                .await
        }
        [recipe, reviews] => {
            let recipe: Recipe = read_json(recipe).await?;
            let reviews: Vec<Review> = read_json(reviews).await?;
            info!(
                "Enhancing '{}' from {} reviews",
                recipe.title,
                reviews.len()
            );
            RecipeEnhancer::builder()
                .recipe(recipe)
                .reviews(reviews)
                .build()
                .await
        }
        _ => Err(EnhanceError::BuilderError(USAGE.to_string())),
    }
}

/// Run the command and render the enhanced recipe as pretty JSON
async fn render(args: &[String]) -> Result<String, EnhanceError> {
    let enhanced = run(args).await?;
    Ok(serde_json::to_string_pretty(&enhanced)?)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match render(&args).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
