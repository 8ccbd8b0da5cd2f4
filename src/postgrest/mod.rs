//! Row-based database access through the PostgREST API
//!
//! Each [`PostgrestClient`] is scoped to one table and hands out builders
//! for the four row operations the backend contract exposes: select
//! (optionally with embedded relations), insert (single or batch),
//! update-by-filter, and delete-by-filter.

mod query;

use reqwest::Client;
use serde::Serialize;

pub use query::*;

/// Client for row operations on a single table
pub struct PostgrestClient {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// The table or view name
    table: String,

    /// Access token of the current session, if any
    token: Option<String>,

    /// HTTP client
    client: Client,
}

impl PostgrestClient {
    /// Create a new PostgrestClient
    pub(crate) fn new(
        url: &str,
        key: &str,
        table: &str,
        token: Option<String>,
        client: Client,
    ) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            table: table.to_string(),
            token,
            client,
        }
    }

    fn get_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            key: self.key.clone(),
            token: self.token.clone(),
        }
    }

    /// Select columns from the table
    ///
    /// Embedded relations use the PostgREST column syntax, e.g.
    /// `"*, creator:creators(id,name,image)"`.
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(self.get_url(), self.credentials(), columns, self.client.clone())
    }

    /// Insert one row or a batch of rows into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(self.get_url(), self.credentials(), values, self.client.clone())
    }

    /// Update rows matching the filters added on the returned builder
    pub fn update<T: Serialize>(&self, values: T) -> UpdateBuilder<T> {
        UpdateBuilder::new(self.get_url(), self.credentials(), values, self.client.clone())
    }

    /// Delete rows matching the filters added on the returned builder
    ///
    /// A delete whose filters match no rows is a no-op, not an error.
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self.get_url(), self.credentials(), self.client.clone())
    }
}
