pub mod api_connection;
pub mod cli;
pub mod config;
pub mod envelope;
pub mod favorites;
pub mod ingredients;
pub mod json_extract;
pub mod prompt;
pub mod recipe;
pub mod suggestion_service;
pub mod validate;

pub use api_connection::{ApiConnectionError, GeminiClient, GenerationOptions, ModelClient};
pub use config::ModelConfig;
pub use envelope::ApiResponse;
pub use favorites::{FavoriteStore, JsonFileStore, SavedRecipe, StoreError};
pub use ingredients::{IngredientInput, IngredientList};
pub use recipe::{Difficulty, RecipeSuggestion, SuggestionResult};
pub use suggestion_service::{SuggestionError, SuggestionService};
