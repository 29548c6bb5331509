use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::api_connection::connection::{ApiConnectionError, ModelClient};
use crate::api_connection::endpoints::GenerationOptions;
use crate::ingredients::{IngredientInput, IngredientList};
use crate::json_extract::extract;
use crate::prompt::{build_repair_prompt, build_suggestion_prompt};
use crate::recipe::SuggestionResult;
use crate::validate::{check_recipes, RecipeShape};

pub const PRIMARY_OPTIONS: GenerationOptions = GenerationOptions::new(0.4, 1400);
pub const REPAIR_OPTIONS: GenerationOptions = GenerationOptions::new(0.0, 1400);

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("No ingredients provided.")]
    BadInput,
    #[error("Model is not configured: {0}")]
    Configuration(String),
    #[error("Model API error ({status}): {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("Model request failed: {0}")]
    Transport(String),
    #[error("Model returned non-JSON output. Try again.")]
    UpstreamFormat,
}

impl SuggestionError {
    /// Status a presentation layer should answer with.
    pub fn http_status(&self) -> StatusCode {
        match self {
            SuggestionError::BadInput => StatusCode::BAD_REQUEST,
            SuggestionError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SuggestionError::Upstream { .. }
            | SuggestionError::Transport(_)
            | SuggestionError::UpstreamFormat => StatusCode::BAD_GATEWAY,
        }
    }

    /// `UpstreamFormat` and transport hiccups are worth resubmitting as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SuggestionError::UpstreamFormat | SuggestionError::Transport(_))
    }
}

impl From<ApiConnectionError> for SuggestionError {
    fn from(err: ApiConnectionError) -> Self {
        match err {
            ApiConnectionError::MissingApiKey(name) => {
                SuggestionError::Configuration(format!("{name} is missing"))
            }
            ApiConnectionError::ApiError { status, error_body } => SuggestionError::Upstream {
                status,
                body: error_body,
            },
            ApiConnectionError::NetworkError(e) => SuggestionError::Transport(e.to_string()),
            ApiConnectionError::SerializationError(e) => {
                SuggestionError::Transport(format!("unreadable response envelope: {e}"))
            }
        }
    }
}

/// Turns an ingredient list into validated recipe suggestions.
///
/// One request makes the primary model call and, only if its output does not
/// pass the shape gate, a single deterministic repair call. The service holds
/// no per-request state, so one instance can serve concurrent requests.
pub struct SuggestionService<C> {
    client: C,
}

impl<C: ModelClient> SuggestionService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn generate_suggestions(
        &self,
        input: impl Into<IngredientInput>,
    ) -> Result<SuggestionResult, SuggestionError> {
        let ingredients = IngredientList::normalize(&input.into());
        if ingredients.is_empty() {
            return Err(SuggestionError::BadInput);
        }
        info!(count = ingredients.len(), "Generating recipe suggestions");

        let prompt = build_suggestion_prompt(&ingredients);
        let primary = self.client.generate(&prompt, PRIMARY_OPTIONS).await?;
        debug!(raw = %primary, "Primary completion");

        if let RecipeShape::Recipes(values) = shape_of(&primary) {
            let result = SuggestionResult::from_recipe_values(&values);
            info!(recipes = result.recipes.len(), "Primary completion accepted");
            return Ok(result);
        }

        warn!("Primary completion failed validation, requesting repair");
        let repair_prompt = build_repair_prompt(&primary);
        let repaired = self.client.generate(&repair_prompt, REPAIR_OPTIONS).await?;
        debug!(raw = %repaired, "Repair completion");

        match shape_of(&repaired) {
            RecipeShape::Recipes(values) => {
                let result = SuggestionResult::from_recipe_values(&values);
                info!(recipes = result.recipes.len(), "Repaired completion accepted");
                Ok(result)
            }
            // Parsed JSON without a `recipes` array means the model found nothing to offer.
            RecipeShape::WrongShape => {
                warn!("Repaired completion has no recipes, returning an empty list");
                Ok(SuggestionResult::default())
            }
            RecipeShape::Unparsable => Err(SuggestionError::UpstreamFormat),
        }
    }
}

fn shape_of(raw: &str) -> RecipeShape {
    let candidate = extract(raw);
    check_recipes(&candidate, raw)
}
