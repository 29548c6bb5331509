//! Saved recipes, keyed by owner.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::recipe::RecipeSuggestion;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),
    #[error("Owner must not be empty")]
    MissingOwner,
    #[error("Favorites file I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Favorites file is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SavedRecipe {
    pub id: u64,
    pub owner: String,
    pub recipe: RecipeSuggestion,
    /// Unix seconds.
    pub created_at: u64,
}

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn save(&self, owner: &str, recipe: RecipeSuggestion) -> Result<SavedRecipe, StoreError>;
    /// Oldest first.
    async fn list(&self, owner: &str) -> Result<Vec<SavedRecipe>, StoreError>;
    /// `false` when `id` does not exist or belongs to another owner.
    async fn remove(&self, owner: &str, id: u64) -> Result<bool, StoreError>;
}

/// Checks applied before anything is persisted. The trimmed title replaces
/// the original.
pub fn validate_recipe(mut recipe: RecipeSuggestion) -> Result<RecipeSuggestion, StoreError> {
    let title = recipe.title.trim();
    if title.is_empty() {
        return Err(StoreError::InvalidRecipe("title is required".to_string()));
    }
    recipe.title = title.to_string();
    Ok(recipe)
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
struct StoreState {
    next_id: u64,
    recipes: Vec<SavedRecipe>,
}

/// A single JSON file holding every owner's favorites.
///
/// The file is read lazily on first use and rewritten in full after each
/// change, through a sibling temp file so a crash never leaves it half written.
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<Option<StoreState>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoreState, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(StoreState::default()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No favorites file yet, starting empty");
                Ok(StoreState::default())
            }
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn loaded<'a>(
        &self,
        slot: &'a mut Option<StoreState>,
    ) -> Result<&'a mut StoreState, StoreError> {
        if slot.is_none() {
            *slot = Some(self.load().await?);
        }
        Ok(slot.get_or_insert_with(StoreState::default))
    }

    async fn persist(&self, state: &StoreState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, json).await.map_err(io_err)?;
        if let Err(source) = fs::rename(&tmp, &self.path).await {
            if let Err(e) = fs::remove_file(&tmp).await {
                warn!(path = %tmp.display(), error = %e, "Failed to remove temp favorites file");
            }
            return Err(io_err(source));
        }
        debug!(path = %self.path.display(), count = state.recipes.len(), "Favorites written");
        Ok(())
    }
}

fn require_owner(owner: &str) -> Result<&str, StoreError> {
    let owner = owner.trim();
    if owner.is_empty() {
        Err(StoreError::MissingOwner)
    } else {
        Ok(owner)
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[async_trait]
impl FavoriteStore for JsonFileStore {
    async fn save(&self, owner: &str, recipe: RecipeSuggestion) -> Result<SavedRecipe, StoreError> {
        let owner = require_owner(owner)?;
        let recipe = validate_recipe(recipe)?;

        let mut guard = self.state.lock().await;
        let state = self.loaded(&mut guard).await?;

        // Edit a copy so the cache only changes once the file has.
        let mut next = state.clone();
        next.next_id += 1;
        let saved = SavedRecipe {
            id: next.next_id,
            owner: owner.to_string(),
            recipe,
            created_at: now_unix(),
        };
        next.recipes.push(saved.clone());
        self.persist(&next).await?;
        *state = next;
        info!(owner, id = saved.id, title = %saved.recipe.title, "Saved favorite");
        Ok(saved)
    }

    async fn list(&self, owner: &str) -> Result<Vec<SavedRecipe>, StoreError> {
        let owner = require_owner(owner)?;
        let mut guard = self.state.lock().await;
        let state = self.loaded(&mut guard).await?;
        Ok(state
            .recipes
            .iter()
            .filter(|saved| saved.owner == owner)
            .cloned()
            .collect())
    }

    async fn remove(&self, owner: &str, id: u64) -> Result<bool, StoreError> {
        let owner = require_owner(owner)?;
        let mut guard = self.state.lock().await;
        let state = self.loaded(&mut guard).await?;

        if !state.recipes.iter().any(|saved| saved.id == id && saved.owner == owner) {
            return Ok(false);
        }
        let mut next = state.clone();
        next.recipes.retain(|saved| !(saved.id == id && saved.owner == owner));
        self.persist(&next).await?;
        *state = next;
        info!(owner, id, "Removed favorite");
        Ok(true)
    }
}
