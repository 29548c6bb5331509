use std::env;
use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV_VAR: &str = "GEMINI_BASE_URL";
pub const FAVORITES_ENV_VAR: &str = "PANTRY_CHEF_FAVORITES";
pub const DEFAULT_FAVORITES_PATH: &str = "favorites.json";

/// Credentials and endpoint for the text-generation model.
///
/// Only constructible with a non-empty API key, so a client holding one never
/// has to re-check its configuration.
#[derive(Clone)]
pub struct ModelConfig {
    api_key: String,
    model: String,
    base_url: String,
}

impl ModelConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ApiConnectionError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ApiConnectionError::MissingApiKey(API_KEY_ENV_VAR.to_string()));
        }
        let model = model.into().trim().to_string();
        Ok(Self {
            api_key,
            model: if model.is_empty() { DEFAULT_MODEL.to_string() } else { model },
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Reads `GEMINI_API_KEY`, `GEMINI_MODEL` and `GEMINI_BASE_URL`.
    /// Call `dotenv::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ApiConnectionError> {
        let api_key = env::var(API_KEY_ENV_VAR)
            .map_err(|_| ApiConnectionError::MissingApiKey(API_KEY_ENV_VAR.to_string()))?;
        let model = load_or_default(MODEL_ENV_VAR, DEFAULT_MODEL);
        let base_url = load_or_default(BASE_URL_ENV_VAR, DEFAULT_BASE_URL);
        Ok(Self::new(api_key, model)?.with_base_url(base_url))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generate_content_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Favorites file location: explicit override, then `PANTRY_CHEF_FAVORITES`, then the default.
pub fn favorites_path(cli_override: Option<PathBuf>) -> PathBuf {
    cli_override.unwrap_or_else(|| PathBuf::from(load_or_default(FAVORITES_ENV_VAR, DEFAULT_FAVORITES_PATH)))
}

fn load_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}
