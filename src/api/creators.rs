//! Creator resource access

use log::error;
use serde::Serialize;

use crate::error::Error;
use crate::models::{Creator, CreatorUpdate, NewCreator};
use crate::ResepiClient;

/// Insert payload with the derived id attached
#[derive(Serialize)]
struct CreatorInsert {
    id: String,
    #[serde(flatten)]
    creator: NewCreator,
}

/// The creator id is the normalized Instagram handle: lowercased, with the
/// conventional `@` prefix stripped. Derived once at creation time and
/// immutable thereafter.
pub fn creator_id_from_handle(instagram: &str) -> String {
    instagram.trim().to_lowercase().replace('@', "")
}

/// Fetch every creator, ordered by name
pub async fn list_creators(client: &ResepiClient) -> Result<Vec<Creator>, Error> {
    client
        .from("creators")
        .select("*")
        .order("name", true)
        .execute::<Creator>()
        .await
}

/// Fetch one creator by id; a missing row is `Ok(None)`
pub async fn get_creator_by_id(client: &ResepiClient, id: &str) -> Result<Option<Creator>, Error> {
    client
        .from("creators")
        .select("*")
        .eq("id", id)
        .execute_maybe_single::<Creator>()
        .await
}

/// Fetch one creator with all their recipes embedded; a missing row is
/// `Ok(None)`
pub async fn get_creator_with_recipes(
    client: &ResepiClient,
    id: &str,
) -> Result<Option<Creator>, Error> {
    client
        .from("creators")
        .select("*, recipes(*)")
        .eq("id", id)
        .execute_maybe_single::<Creator>()
        .await
}

/// Create a creator and return the persisted row
///
/// The Instagram handle is required; the creator id is derived from it.
pub async fn create_creator(client: &ResepiClient, creator: NewCreator) -> Result<Creator, Error> {
    let id = creator_id_from_handle(&creator.instagram);
    if id.is_empty() {
        return Err(Error::validation("Instagram handle is required"));
    }

    client
        .from("creators")
        .insert(CreatorInsert { id, creator })
        .execute_single::<Creator>()
        .await
}

/// Update a creator by id and return the updated row
pub async fn update_creator(
    client: &ResepiClient,
    id: &str,
    updates: CreatorUpdate,
) -> Result<Creator, Error> {
    client
        .from("creators")
        .update(updates)
        .eq("id", id)
        .execute_single::<Creator>()
        .await
}

/// Delete a creator by id
///
/// Existence is checked first so a missing creator yields a clear
/// not-found error instead of the backend's silent no-op delete.
pub async fn delete_creator(client: &ResepiClient, id: &str) -> Result<(), Error> {
    let existing = client
        .from("creators")
        .select("id")
        .eq("id", id)
        .execute_maybe_single::<serde_json::Value>()
        .await?;

    if existing.is_none() {
        return Err(Error::not_found("Creator not found"));
    }

    client
        .from("creators")
        .delete()
        .eq("id", id)
        .execute_no_return()
        .await
        .map_err(|e| {
            error!("error deleting creator {}: {}", id, e);
            e
        })
}
