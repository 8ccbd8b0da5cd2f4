//! Client-side cache of the full recipe collection
//!
//! Many views independently want "all recipes"; the cache answers them all
//! from one time-boxed fetch. It is an explicit object constructed with its
//! source and TTL, so embedders share one instance and tests control time.

use async_trait::async_trait;
use log::error;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use crate::api::recipes;
use crate::error::Error;
use crate::models::Recipe;
use crate::ResepiClient;

/// How long a fetched collection stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Where the cache gets recipes from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch the full recipe collection
    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error>;

    /// Fetch one recipe by id; a missing row is `Ok(None)`
    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Recipe>, Error>;
}

#[async_trait]
impl RecipeSource for ResepiClient {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error> {
        recipes::list_recipes(self).await
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Recipe>, Error> {
        recipes::get_recipe_by_id(self, id).await
    }
}

struct Slot {
    recipes: Vec<Recipe>,
    fetched_at: Instant,
}

/// Time-boxed cache of the full recipe collection
///
/// On any fetch failure the slot is cleared, never left stale-but-wrong; a
/// caller that already received the previous collection is unaffected.
pub struct RecipeCache<S> {
    source: S,
    ttl: Duration,
    slot: Mutex<Option<Slot>>,
}

impl<S: RecipeSource> RecipeCache<S> {
    /// Create a cache with the default five-minute TTL
    pub fn new(source: S) -> Self {
        Self::with_ttl(source, DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL
    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the recipe collection, fetching only when the cache is empty
    /// or past its TTL
    pub async fn get(&self) -> Result<Vec<Recipe>, Error> {
        self.load(false).await
    }

    /// Return the recipe collection, bypassing the freshness check
    pub async fn refresh(&self) -> Result<Vec<Recipe>, Error> {
        self.load(true).await
    }

    /// Look up one recipe, serving it from the cached collection when
    /// present to avoid a network round trip
    ///
    /// A cache miss issues a dedicated single-record fetch; it does not
    /// populate the collection slot.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, Error> {
        {
            let slot = self.slot.lock().unwrap();
            if let Some(slot) = slot.as_ref() {
                if let Some(recipe) = slot.recipes.iter().find(|r| r.id == id) {
                    return Ok(Some(recipe.clone()));
                }
            }
        }

        self.source.get_recipe_by_id(id).await
    }

    /// Discard the cached collection
    pub fn reset(&self) {
        *self.slot.lock().unwrap() = None;
    }

    /// Whether a fetched collection is currently held, fresh or not
    pub fn is_populated(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    async fn load(&self, force: bool) -> Result<Vec<Recipe>, Error> {
        if !force {
            let slot = self.slot.lock().unwrap();
            if let Some(slot) = slot.as_ref() {
                if slot.fetched_at.elapsed() < self.ttl {
                    return Ok(slot.recipes.clone());
                }
            }
        }

        // The lock is not held across the fetch. Two concurrent misses may
        // both fetch and both write the slot; last writer wins, and both
        // write equivalent data.
        match self.source.list_recipes().await {
            Ok(recipes) => {
                *self.slot.lock().unwrap() = Some(Slot {
                    recipes: recipes.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(recipes)
            }
            Err(e) => {
                error!("error loading recipes: {}", e);
                *self.slot.lock().unwrap() = None;
                Err(e)
            }
        }
    }
}
