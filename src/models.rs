//! Domain types for the Resepi Land catalog

use serde::{Deserialize, Serialize};
use std::fmt;

/// A content author who publishes recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    /// Derived once from the Instagram handle at creation time, immutable after
    pub id: String,
    pub name: String,
    pub image: String,
    pub cover_image: String,
    pub description: String,
    pub instagram: String,
    /// Display string, e.g. "120k"
    pub followers: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopee: Option<String>,
    /// Embedded recipes, present only on reads that ask for them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Recipe>>,
}

/// The creator columns embedded into recipe reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// A dish record with ingredients and instructions, owned by one creator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub image: String,
    pub cook_time: String,
    pub servings: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Embedded creator, present only on reads that ask for it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<CreatorSummary>,
}

/// A user's bookmark of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub creator_id: String,
    pub created_at: String,
}

/// The recipe columns embedded into shopping-list reads, used for linking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRef {
    pub id: String,
    pub creator_id: String,
}

/// One ingredient line a user is tracking, tied to the recipe it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub recipe_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    pub ingredient: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeRef>,
}

/// Payload for creating a creator; `id` is derived from the Instagram handle
#[derive(Debug, Clone, Serialize)]
pub struct NewCreator {
    pub name: String,
    pub image: String,
    pub cover_image: String,
    pub description: String,
    pub instagram: String,
    pub followers: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopee: Option<String>,
}

/// Partial update of a creator; the id itself is never updatable
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopee: Option<String>,
}

/// Payload for creating a recipe
#[derive(Debug, Clone, Serialize)]
pub struct NewRecipe {
    pub creator_id: String,
    pub title: String,
    pub image: String,
    pub cook_time: String,
    pub servings: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Partial update of a recipe
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecipeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
}

/// A shopping-list entry as the caller describes it, before the user id and
/// server-assigned fields are attached
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingItemDraft {
    pub recipe_id: String,
    pub recipe_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    pub ingredient: String,
}

/// Insert payload for one shopping-list row
#[derive(Debug, Clone, Serialize)]
pub struct NewShoppingListItem {
    pub user_id: String,
    pub recipe_id: String,
    pub recipe_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    pub ingredient: String,
}

impl NewShoppingListItem {
    /// Attach a user id to a draft
    pub fn from_draft(user_id: &str, draft: ShoppingItemDraft) -> Self {
        Self {
            user_id: user_id.to_string(),
            recipe_id: draft.recipe_id,
            recipe_name: draft.recipe_name,
            creator_name: draft.creator_name,
            ingredient: draft.ingredient,
        }
    }
}

/// Insert payload for one saved-recipe row
#[derive(Debug, Clone, Serialize)]
pub struct NewSavedRecipe {
    pub user_id: String,
    pub recipe_id: String,
    pub creator_id: String,
}

/// The fixed category set recipes are filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Rice,
    Meat,
    Noodles,
    Curries,
    DrinksAndDesserts,
    Vegetable,
    Fish,
    Seafood,
    SnackAndAppetizers,
}

impl Category {
    /// Every category, in catalog display order
    pub const ALL: [Category; 9] = [
        Category::Rice,
        Category::Meat,
        Category::Noodles,
        Category::Curries,
        Category::DrinksAndDesserts,
        Category::Vegetable,
        Category::Fish,
        Category::Seafood,
        Category::SnackAndAppetizers,
    ];

    /// The stored identifier, as it appears in recipe rows
    pub fn id(&self) -> &'static str {
        match self {
            Category::Rice => "rice",
            Category::Meat => "meat",
            Category::Noodles => "noodles",
            Category::Curries => "curries",
            Category::DrinksAndDesserts => "drinks and desserts",
            Category::Vegetable => "vegetable",
            Category::Fish => "fish",
            Category::Seafood => "seafood",
            Category::SnackAndAppetizers => "snack and appetizers",
        }
    }

    /// The human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Rice => "Rice",
            Category::Meat => "Meat",
            Category::Noodles => "Noodles",
            Category::Curries => "Curries",
            Category::DrinksAndDesserts => "Drinks and Desserts",
            Category::Vegetable => "Vegetables",
            Category::Fish => "Fish",
            Category::Seafood => "Seafood",
            Category::SnackAndAppetizers => "Snack and Appetizers",
        }
    }

    /// Resolve a category from a route id, where `-` stands in for a space
    pub fn from_route_id(route_id: &str) -> Option<Category> {
        let normalized = route_id.to_lowercase().replace('-', " ");
        let normalized = normalized.trim();
        Category::ALL.iter().copied().find(|c| c.id() == normalized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
