//! Derived view logic
//!
//! Pure functions over the in-memory collections: search matching,
//! category filtering, and shopping-list grouping. No I/O.

use crate::models::{Recipe, ShoppingListItem};

/// Result cap for the global quick-search dropdown
pub const QUICK_SEARCH_LIMIT: usize = 5;

/// Sentinel category filter meaning "no filter"
pub const CATEGORY_ALL: &str = "all";

fn matches_query(recipe: &Recipe, query: &str) -> bool {
    recipe.title.to_lowercase().contains(query)
        || recipe.description.to_lowercase().contains(query)
        || recipe.category.to_lowercase().contains(query)
        || recipe
            .creator
            .as_ref()
            .map(|c| c.name.to_lowercase().contains(query))
            .unwrap_or(false)
}

/// Global quick-search: case-insensitive substring match against title,
/// description, category, and creator name, capped at
/// [`QUICK_SEARCH_LIMIT`] results
///
/// An empty or whitespace-only query yields no results.
pub fn quick_search<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    recipes
        .iter()
        .filter(|r| matches_query(r, &query))
        .take(QUICK_SEARCH_LIMIT)
        .collect()
}

/// Page-level search: same matching as [`quick_search`], unbounded
///
/// An empty or whitespace-only query leaves the collection unfiltered.
pub fn search_recipes<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return recipes.iter().collect();
    }

    recipes.iter().filter(|r| matches_query(r, &query)).collect()
}

/// Filter recipes by category
///
/// [`CATEGORY_ALL`] returns the full unfiltered set. Any other value must
/// match the recipe's category exactly after normalization: both sides are
/// trimmed and lowercased, and `-` in the filter stands in for a space so
/// route ids like `drinks-and-desserts` compare equal to the stored
/// category.
pub fn filter_by_category<'a>(recipes: &'a [Recipe], filter: &str) -> Vec<&'a Recipe> {
    if filter == CATEGORY_ALL {
        return recipes.iter().collect();
    }

    let filter = filter.to_lowercase().replace('-', " ");
    let filter = filter.trim();

    recipes
        .iter()
        .filter(|r| r.category.to_lowercase().trim() == filter)
        .collect()
}

/// The category filter options for a recipe collection: [`CATEGORY_ALL`]
/// followed by each distinct category in first-seen order
pub fn category_options(recipes: &[Recipe]) -> Vec<String> {
    let mut options = vec![CATEGORY_ALL.to_string()];
    for recipe in recipes {
        if !options[1..].contains(&recipe.category) {
            options.push(recipe.category.clone());
        }
    }
    options
}

/// One recipe's worth of shopping-list items
#[derive(Debug, Clone)]
pub struct ShoppingGroup {
    pub recipe_id: String,
    /// Display name, taken from the group's first item
    pub recipe_name: String,
    /// Creator id from the embedded recipe relation, for linking
    pub creator_id: Option<String>,
    pub creator_name: Option<String>,
    pub items: Vec<ShoppingListItem>,
}

/// Partition a flat shopping list into per-recipe groups
///
/// Groups appear in the order their recipe is first seen; items within a
/// group keep their original relative order.
pub fn group_shopping_items(items: &[ShoppingListItem]) -> Vec<ShoppingGroup> {
    let mut groups: Vec<ShoppingGroup> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|g| g.recipe_id == item.recipe_id) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(ShoppingGroup {
                recipe_id: item.recipe_id.clone(),
                recipe_name: item.recipe_name.clone(),
                creator_id: item.recipe.as_ref().map(|r| r.creator_id.clone()),
                creator_name: item.creator_name.clone(),
                items: vec![item.clone()],
            }),
        }
    }

    groups
}
