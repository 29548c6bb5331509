use std::process::ExitCode;

use anyhow::{Context, Result};
use pantry_chef::api_connection::GeminiClient;
use pantry_chef::cli::{parse_args, Command, FavoritesCommand};
use pantry_chef::config::{favorites_path, ModelConfig};
use pantry_chef::envelope::ApiResponse;
use pantry_chef::favorites::{FavoriteStore, JsonFileStore};
use pantry_chef::ingredients::IngredientInput;
use pantry_chef::recipe::RecipeSuggestion;
use pantry_chef::suggestion_service::{SuggestionError, SuggestionService};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

async fn run_suggest(ingredients: Vec<String>) -> Result<ExitCode> {
    // Each argument may hold several ingredients.
    let joined = IngredientInput::Text(ingredients.join("\n"));

    let result = match ModelConfig::from_env() {
        Ok(config) => {
            let service = SuggestionService::new(GeminiClient::new(config));
            service.generate_suggestions(joined).await
        }
        Err(e) => Err(SuggestionError::from(e)),
    };

    if let Err(e) = &result {
        error!(status = %e.http_status(), "Suggestion request failed: {e}");
        if e.is_retryable() {
            eprintln!("This is usually temporary; running the same command again may succeed.");
        }
    }

    let response = ApiResponse::from_result(result);
    let rendered = serde_json::to_string_pretty(&response).context("Failed to render response")?;
    println!("{rendered}");

    Ok(if response.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run_favorites(store: &JsonFileStore, command: FavoritesCommand) -> Result<ExitCode> {
    match command {
        FavoritesCommand::Save { owner, recipe } => {
            let recipe: RecipeSuggestion =
                serde_json::from_str(&recipe).context("Recipe must be a JSON object with a title")?;
            let saved = store
                .save(&owner, recipe)
                .await
                .with_context(|| format!("Failed to save favorite to '{}'", store.path().display()))?;
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        FavoritesCommand::List { owner } => {
            let saved = store
                .list(&owner)
                .await
                .with_context(|| format!("Failed to read favorites from '{}'", store.path().display()))?;
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        FavoritesCommand::Remove { owner, id } => {
            let removed = store
                .remove(&owner, id)
                .await
                .with_context(|| format!("Failed to update '{}'", store.path().display()))?;
            if !removed {
                eprintln!("No favorite with id {id} for {owner}");
                return Ok(ExitCode::FAILURE);
            }
            println!("Removed favorite {id}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();
    match cli.command {
        Command::Suggest { ingredients } => run_suggest(ingredients).await,
        Command::Favorites(command) => {
            let store = JsonFileStore::new(favorites_path(cli.store));
            run_favorites(&store, command).await
        }
    }
}
