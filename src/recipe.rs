use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive; anything else is `None`.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeSuggestion {
    pub title: String,
    #[serde(default)]
    pub why_it_fits: String,
    #[serde(default)]
    pub missing_ingredients: Vec<String>,
    #[serde(default)]
    pub estimated_time_minutes: u32,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub optional_additions: Vec<String>,
}

impl RecipeSuggestion {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            why_it_fits: String::new(),
            missing_ingredients: Vec::new(),
            estimated_time_minutes: 0,
            difficulty: None,
            steps: Vec::new(),
            optional_additions: Vec::new(),
        }
    }

    /// Coerces one loosely-typed recipe object from model output.
    ///
    /// Returns `None` when `value` is not an object or has no usable title.
    /// Every other field falls back to its empty value when absent or of the
    /// wrong type.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let title = object.get("title").and_then(Value::as_str)?.trim();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            why_it_fits: coerce_string(object.get("why_it_fits")),
            missing_ingredients: coerce_string_list(object.get("missing_ingredients")),
            estimated_time_minutes: coerce_minutes(object.get("estimated_time_minutes")),
            difficulty: object
                .get("difficulty")
                .and_then(Value::as_str)
                .and_then(Difficulty::parse_lenient),
            steps: coerce_string_list(object.get("steps")),
            optional_additions: coerce_string_list(object.get("optional_additions")),
        })
    }
}

/// The per-request output. `recipes` is always present, possibly empty.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SuggestionResult {
    #[serde(default)]
    pub recipes: Vec<RecipeSuggestion>,
}

impl SuggestionResult {
    /// Builds a result from the `recipes` array that passed the shape gate,
    /// dropping entries that cannot be coerced.
    pub fn from_recipe_values(values: &[Value]) -> Self {
        let recipes: Vec<RecipeSuggestion> = values.iter().filter_map(RecipeSuggestion::from_value).collect();
        let dropped = values.len() - recipes.len();
        if dropped > 0 {
            warn!(dropped, kept = recipes.len(), "Dropped recipe entries without a usable title");
        }
        Self { recipes }
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| coerce_string(Some(item)))
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn coerce_minutes(value: Option<&Value>) -> u32 {
    let minutes = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_number(s),
        _ => None,
    };
    match minutes {
        Some(m) if m.is_finite() && m > 0.0 => m.round().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

/// `"25"`, `"25 minutes"` and `" 7.5min"` all yield a number.
fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
