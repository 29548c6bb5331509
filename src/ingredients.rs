use serde::{Deserialize, Serialize};

/// Raw ingredient input as a caller may supply it: either a list of entries
/// or one free-text blob separated by commas and/or newlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientInput {
    List(Vec<String>),
    Text(String),
}

impl From<Vec<String>> for IngredientInput {
    fn from(items: Vec<String>) -> Self {
        IngredientInput::List(items)
    }
}

impl From<&[&str]> for IngredientInput {
    fn from(items: &[&str]) -> Self {
        IngredientInput::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<String> for IngredientInput {
    fn from(text: String) -> Self {
        IngredientInput::Text(text)
    }
}

impl From<&str> for IngredientInput {
    fn from(text: &str) -> Self {
        IngredientInput::Text(text.to_string())
    }
}

/// Ordered, trimmed, non-empty ingredient names. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    /// List entries are trimmed as-is; free text is split on `,` and `\n` first.
    /// Blank entries are dropped in both cases.
    pub fn normalize(input: &IngredientInput) -> Self {
        let items = match input {
            IngredientInput::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            IngredientInput::Text(text) => split_delimited(text),
        };
        IngredientList(items)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

fn split_delimited(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
