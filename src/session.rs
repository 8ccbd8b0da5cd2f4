//! Session/profile state container
//!
//! The single source of truth for "am I logged in, and what have I
//! saved/added". Owns the in-memory saved-recipe and shopping-list arrays
//! for the lifetime of a login session; both are discarded on logout.
//!
//! Local state is patched only after the remote call succeeds, so a failed
//! write leaves it untouched and the membership predicates always reflect
//! the last applied mutation or resync, never an in-flight one.

use log::error;
use std::sync::{Arc, Mutex};

use crate::api::profile;
use crate::auth::{AuthChange, AuthEvent, User};
use crate::error::Error;
use crate::models::{NewShoppingListItem, SavedRecipe, ShoppingItemDraft, ShoppingListItem};
use crate::ResepiClient;

#[derive(Default)]
struct ProfileInner {
    user: Option<User>,
    saved_recipes: Vec<SavedRecipe>,
    shopping_list: Vec<ShoppingListItem>,
}

/// Shared session and profile state
///
/// Locks guard only the in-memory collections and are never held across a
/// remote call.
pub struct ProfileState {
    client: Arc<ResepiClient>,
    inner: Mutex<ProfileInner>,
}

impl ProfileState {
    /// Create an empty, signed-out state bound to a client
    pub fn new(client: Arc<ResepiClient>) -> Self {
        Self {
            client,
            inner: Mutex::new(ProfileInner::default()),
        }
    }

    /// Sign in and load the user's saved recipes and shopping list
    ///
    /// On failure the error propagates and state is unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), Error> {
        let session = self.client.auth.sign_in(email, password).await?;
        self.signed_in(session.user).await;
        Ok(())
    }

    /// Sign up and load the (empty) user-scoped data for the new account
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<(), Error> {
        let session = self.client.auth.sign_up(email, password, name).await?;
        self.signed_in(session.user).await;
        Ok(())
    }

    /// Sign out, clearing saved recipes and the shopping list immediately
    ///
    /// Logout is always a resetting operation; it does not wait for any
    /// in-flight load from a prior login.
    pub async fn logout(&self) -> Result<(), Error> {
        self.client.auth.sign_out().await?;
        self.clear();
        Ok(())
    }

    /// React to a session transition from [`crate::auth::Auth::on_state_change`]
    ///
    /// Sign-in and token refresh load the user's data; sign-out clears it.
    pub async fn apply_auth_change(&self, change: AuthChange) {
        match (change.event, change.session) {
            (AuthEvent::SignedIn, Some(session)) | (AuthEvent::TokenRefreshed, Some(session)) => {
                self.signed_in(session.user).await;
            }
            _ => self.clear(),
        }
    }

    /// The signed-in user, if any
    pub fn user(&self) -> Option<User> {
        self.inner.lock().unwrap().user.clone()
    }

    /// Snapshot of the user's saved recipes
    pub fn saved_recipes(&self) -> Vec<SavedRecipe> {
        self.inner.lock().unwrap().saved_recipes.clone()
    }

    /// Snapshot of the user's shopping list
    pub fn shopping_list(&self) -> Vec<ShoppingListItem> {
        self.inner.lock().unwrap().shopping_list.clone()
    }

    /// Whether the signed-in user's email matches the configured admin email
    ///
    /// Cosmetic gating of admin links only; authorization is enforced by the
    /// backend.
    pub fn is_admin(&self) -> bool {
        let admin_email = match &self.client.admin_email {
            Some(email) => email.clone(),
            None => return false,
        };
        self.inner
            .lock()
            .unwrap()
            .user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .map(|email| email == admin_email)
            .unwrap_or(false)
    }

    /// Whether the user has bookmarked a recipe; no I/O
    pub fn is_recipe_saved(&self, recipe_id: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .saved_recipes
            .iter()
            .any(|r| r.recipe_id == recipe_id)
    }

    /// Whether one ingredient of a recipe is on the shopping list; no I/O
    pub fn is_in_shopping_list(&self, recipe_id: &str, ingredient: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .shopping_list
            .iter()
            .any(|i| i.recipe_id == recipe_id && i.ingredient == ingredient)
    }

    /// Bookmark a recipe, appending the persisted row locally on success
    pub async fn save_recipe(&self, recipe_id: &str, creator_id: &str) -> Result<(), Error> {
        let user_id = match self.user_id() {
            Some(id) => id,
            None => return Ok(()),
        };

        let saved = profile::save_recipe(&self.client, &user_id, recipe_id, creator_id).await?;
        self.inner.lock().unwrap().saved_recipes.push(saved);
        Ok(())
    }

    /// Remove a bookmark; removing one that is absent is a no-op end to end
    pub async fn unsave_recipe(&self, recipe_id: &str) -> Result<(), Error> {
        let user_id = match self.user_id() {
            Some(id) => id,
            None => return Ok(()),
        };

        profile::unsave_recipe(&self.client, &user_id, recipe_id).await?;
        self.inner
            .lock()
            .unwrap()
            .saved_recipes
            .retain(|r| r.recipe_id != recipe_id);
        Ok(())
    }

    /// Add one ingredient, appending the persisted row locally on success
    pub async fn add_to_shopping_list(&self, item: ShoppingItemDraft) -> Result<(), Error> {
        let user_id = match self.user_id() {
            Some(id) => id,
            None => return Ok(()),
        };

        let added =
            profile::add_shopping_item(&self.client, NewShoppingListItem::from_draft(&user_id, item))
                .await?;
        self.inner.lock().unwrap().shopping_list.push(added);
        Ok(())
    }

    /// Add a batch of ingredients in one insert, then resynchronize
    ///
    /// The backend assigns the new row ids, which the client must learn
    /// before any single-item removal can target them, so the whole
    /// shopping list and saved-recipe set are reloaded rather than merged.
    pub async fn add_many_to_shopping_list(
        &self,
        items: Vec<ShoppingItemDraft>,
    ) -> Result<(), Error> {
        let user_id = match self.user_id() {
            Some(id) => id,
            None => return Ok(()),
        };
        if items.is_empty() {
            return Ok(());
        }

        let rows = items
            .into_iter()
            .map(|item| NewShoppingListItem::from_draft(&user_id, item))
            .collect();
        profile::add_shopping_items(&self.client, rows).await?;
        self.load_user_data(&user_id).await;
        Ok(())
    }

    /// Remove one ingredient, filtering it out locally on success
    pub async fn remove_from_shopping_list(&self, item_id: &str) -> Result<(), Error> {
        if self.user_id().is_none() {
            return Ok(());
        }

        profile::remove_shopping_item(&self.client, item_id).await?;
        self.inner
            .lock()
            .unwrap()
            .shopping_list
            .retain(|i| i.id != item_id);
        Ok(())
    }

    /// Remove every ingredient of one recipe in a single delete
    pub async fn remove_many_from_shopping_list(&self, recipe_id: &str) -> Result<(), Error> {
        let user_id = match self.user_id() {
            Some(id) => id,
            None => return Ok(()),
        };

        profile::remove_shopping_items_for_recipe(&self.client, &user_id, recipe_id).await?;
        self.inner
            .lock()
            .unwrap()
            .shopping_list
            .retain(|i| i.recipe_id != recipe_id);
        Ok(())
    }

    /// Membership-driven toggle of one ingredient: on the list removes it,
    /// off the list adds it
    pub async fn toggle_shopping_item(&self, item: ShoppingItemDraft) -> Result<(), Error> {
        let existing_id = self
            .inner
            .lock()
            .unwrap()
            .shopping_list
            .iter()
            .find(|i| i.recipe_id == item.recipe_id && i.ingredient == item.ingredient)
            .map(|i| i.id.clone());

        match existing_id {
            Some(id) => self.remove_from_shopping_list(&id).await,
            None => self.add_to_shopping_list(item).await,
        }
    }

    fn user_id(&self) -> Option<String> {
        self.inner.lock().unwrap().user.as_ref().map(|u| u.id.clone())
    }

    async fn signed_in(&self, user: User) {
        let user_id = user.id.clone();
        self.inner.lock().unwrap().user = Some(user);
        self.load_user_data(&user_id).await;
    }

    fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.user = None;
        inner.saved_recipes.clear();
        inner.shopping_list.clear();
    }

    /// Full resynchronization of the user-scoped collections; failures are
    /// logged and leave the previous state in place
    async fn load_user_data(&self, user_id: &str) {
        let (saved, list) = tokio::join!(
            profile::get_saved_recipes(&self.client, user_id),
            profile::get_shopping_list(&self.client, user_id),
        );

        match (saved, list) {
            (Ok(saved), Ok(list)) => {
                let mut inner = self.inner.lock().unwrap();
                inner.saved_recipes = saved;
                inner.shopping_list = list;
            }
            (Err(e), _) | (_, Err(e)) => error!("error loading user data: {}", e),
        }
    }
}
