use reqwest::StatusCode;
use serde::Serialize;

use crate::recipe::{RecipeSuggestion, SuggestionResult};
use crate::suggestion_service::SuggestionError;

/// Wire shape handed to whatever renders a suggestion request:
/// `{"ok": true, "recipes": [...]}` or `{"ok": false, "error": "..."}`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ApiResponse {
    Success { ok: bool, recipes: Vec<RecipeSuggestion> },
    Failure {
        ok: bool,
        error: String,
        #[serde(skip)]
        status: StatusCode,
    },
}

impl ApiResponse {
    pub fn from_result(result: Result<SuggestionResult, SuggestionError>) -> Self {
        match result {
            Ok(result) => ApiResponse::Success {
                ok: true,
                recipes: result.recipes,
            },
            Err(err) => ApiResponse::Failure {
                ok: false,
                error: err.to_string(),
                status: err.http_status(),
            },
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            ApiResponse::Success { .. } => StatusCode::OK,
            ApiResponse::Failure { status, .. } => *status,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }
}
