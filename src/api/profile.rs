//! Saved-recipe and shopping-list resource access

use crate::error::Error;
use crate::models::{NewSavedRecipe, NewShoppingListItem, SavedRecipe, ShoppingListItem};
use crate::ResepiClient;

/// Fetch all of a user's saved recipes
pub async fn get_saved_recipes(
    client: &ResepiClient,
    user_id: &str,
) -> Result<Vec<SavedRecipe>, Error> {
    client
        .from("saved_recipes")
        .select("*")
        .eq("user_id", user_id)
        .execute::<SavedRecipe>()
        .await
}

/// Fetch a user's shopping list, with the owning recipe's id and creator
/// embedded for linking
pub async fn get_shopping_list(
    client: &ResepiClient,
    user_id: &str,
) -> Result<Vec<ShoppingListItem>, Error> {
    client
        .from("shopping_list")
        .select("*, recipe:recipes(id,creator_id)")
        .eq("user_id", user_id)
        .execute::<ShoppingListItem>()
        .await
}

/// Bookmark a recipe for a user and return the persisted row
pub async fn save_recipe(
    client: &ResepiClient,
    user_id: &str,
    recipe_id: &str,
    creator_id: &str,
) -> Result<SavedRecipe, Error> {
    client
        .from("saved_recipes")
        .insert(NewSavedRecipe {
            user_id: user_id.to_string(),
            recipe_id: recipe_id.to_string(),
            creator_id: creator_id.to_string(),
        })
        .execute_single::<SavedRecipe>()
        .await
}

/// Remove a user's bookmark of a recipe
///
/// Deleting a bookmark that does not exist is a no-op.
pub async fn unsave_recipe(
    client: &ResepiClient,
    user_id: &str,
    recipe_id: &str,
) -> Result<(), Error> {
    client
        .from("saved_recipes")
        .delete()
        .match_(&[("user_id", user_id), ("recipe_id", recipe_id)])
        .execute_no_return()
        .await
}

/// Add one shopping-list item and return the persisted row, including the
/// server-assigned id
pub async fn add_shopping_item(
    client: &ResepiClient,
    item: NewShoppingListItem,
) -> Result<ShoppingListItem, Error> {
    client
        .from("shopping_list")
        .insert(item)
        .execute_single::<ShoppingListItem>()
        .await
}

/// Add a batch of shopping-list items in one insert
pub async fn add_shopping_items(
    client: &ResepiClient,
    items: Vec<NewShoppingListItem>,
) -> Result<(), Error> {
    client
        .from("shopping_list")
        .insert(items)
        .execute_no_return()
        .await
}

/// Remove one shopping-list item by id
pub async fn remove_shopping_item(client: &ResepiClient, item_id: &str) -> Result<(), Error> {
    client
        .from("shopping_list")
        .delete()
        .eq("id", item_id)
        .execute_no_return()
        .await
}

/// Remove every shopping-list item a user holds for one recipe
pub async fn remove_shopping_items_for_recipe(
    client: &ResepiClient,
    user_id: &str,
    recipe_id: &str,
) -> Result<(), Error> {
    client
        .from("shopping_list")
        .delete()
        .match_(&[("user_id", user_id), ("recipe_id", recipe_id)])
        .execute_no_return()
        .await
}
