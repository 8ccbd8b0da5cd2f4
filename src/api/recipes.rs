//! Recipe resource access

use crate::error::Error;
use crate::models::{NewRecipe, Recipe, RecipeUpdate};
use crate::ResepiClient;

/// Columns fetched for recipe reads, with the creator embedded for display
/// and search
const RECIPE_COLUMNS: &str = "*, creator:creators(id,name,image)";

/// Fetch every recipe, with its creator embedded
pub async fn list_recipes(client: &ResepiClient) -> Result<Vec<Recipe>, Error> {
    client
        .from("recipes")
        .select(RECIPE_COLUMNS)
        .execute::<Recipe>()
        .await
}

/// Fetch one recipe by id; a missing row is `Ok(None)`
pub async fn get_recipe_by_id(client: &ResepiClient, id: &str) -> Result<Option<Recipe>, Error> {
    client
        .from("recipes")
        .select(RECIPE_COLUMNS)
        .eq("id", id)
        .execute_maybe_single::<Recipe>()
        .await
}

/// Create a recipe and return the persisted row
pub async fn create_recipe(client: &ResepiClient, recipe: NewRecipe) -> Result<Recipe, Error> {
    client
        .from("recipes")
        .insert(recipe)
        .execute_single::<Recipe>()
        .await
}

/// Update a recipe by id and return the updated row
pub async fn update_recipe(
    client: &ResepiClient,
    id: &str,
    updates: RecipeUpdate,
) -> Result<Recipe, Error> {
    client
        .from("recipes")
        .update(updates)
        .eq("id", id)
        .execute_single::<Recipe>()
        .await
}

/// Delete a recipe by id
pub async fn delete_recipe(client: &ResepiClient, id: &str) -> Result<(), Error> {
    client
        .from("recipes")
        .delete()
        .eq("id", id)
        .execute_no_return()
        .await
}
