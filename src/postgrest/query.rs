//! Query builders for PostgrestClient

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};

/// API key plus optional session token attached to every table request
#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub key: String,
    pub token: Option<String>,
}

impl Credentials {
    fn apply<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        let fetch = fetch.apikey(&self.key);
        match &self.token {
            Some(token) => fetch.bearer_auth(token),
            None => fetch,
        }
    }
}

/// Accumulates PostgREST query parameters
#[derive(Debug, Clone, Default)]
struct QueryBuilder {
    params: HashMap<String, String>,
}

impl QueryBuilder {
    fn new() -> Self {
        Self {
            params: HashMap::new(),
        }
    }

    fn add_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    fn eq<T: ToString>(&mut self, column: &str, value: T) {
        self.add_param(column, &format!("eq.{}", value.to_string()));
    }

    fn params(&self) -> HashMap<String, String> {
        self.params.clone()
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    url: String,
    credentials: Credentials,
    client: Client,
    query: QueryBuilder,
}

impl SelectBuilder {
    pub(crate) fn new(url: String, credentials: Credentials, columns: &str, client: Client) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);

        Self {
            url,
            credentials,
            client,
            query,
        }
    }

    /// Keep rows where column equals a value
    pub fn eq<T: ToString>(mut self, column: &str, value: T) -> Self {
        self.query.eq(column, value);
        self
    }

    /// Keep rows where every listed column equals its value
    pub fn match_<T: ToString>(mut self, filters: &[(&str, T)]) -> Self {
        for (column, value) in filters {
            self.query.eq(column, value.to_string());
        }
        self
    }

    /// Order the results by a column
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.query
            .add_param("order", &format!("{}.{}", column, direction));
        self
    }

    /// Limit the number of rows returned
    pub fn limit(mut self, count: i32) -> Self {
        self.query.add_param("limit", &count.to_string());
        self
    }

    /// Execute the query and return all matching rows
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>, Error> {
        let fetch = self
            .credentials
            .apply(Fetch::get(&self.client, &self.url))
            .query(self.query.params());

        fetch.execute::<Vec<T>>().await
    }

    /// Execute the query and return exactly one row, or an error when absent
    pub async fn execute_single<T: DeserializeOwned>(self) -> Result<T, Error> {
        let url = self.url.clone();
        self.execute_maybe_single::<T>()
            .await?
            .ok_or_else(|| Error::database(format!("no rows returned from {}", url)))
    }

    /// Execute the query and return the first row, if any
    ///
    /// Absence of a row is a normal empty result, not an error.
    pub async fn execute_maybe_single<T: DeserializeOwned>(mut self) -> Result<Option<T>, Error> {
        self.query.add_param("limit", "1");

        let fetch = self
            .credentials
            .apply(Fetch::get(&self.client, &self.url))
            .query(self.query.params());

        let rows = fetch.execute::<Vec<T>>().await?;
        Ok(rows.into_iter().next())
    }
}

/// Builder for INSERT queries, single row or batch
pub struct InsertBuilder<T: Serialize> {
    url: String,
    credentials: Credentials,
    values: T,
    client: Client,
}

impl<T: Serialize> InsertBuilder<T> {
    pub(crate) fn new(url: String, credentials: Credentials, values: T, client: Client) -> Self {
        Self {
            url,
            credentials,
            values,
            client,
        }
    }

    /// Execute the insert and return the persisted rows, including
    /// server-assigned fields
    pub async fn execute<R: DeserializeOwned>(self) -> Result<Vec<R>, Error> {
        let fetch = self
            .credentials
            .apply(Fetch::post(&self.client, &self.url))
            .header("Prefer", "return=representation")
            .json(&self.values)?;

        fetch.execute::<Vec<R>>().await
    }

    /// Execute the insert and return the single persisted row
    pub async fn execute_single<R: DeserializeOwned>(self) -> Result<R, Error> {
        let url = self.url.clone();
        let rows = self.execute::<R>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database(format!("insert into {} returned no rows", url)))
    }

    /// Execute the insert without returning the inserted data
    pub async fn execute_no_return(self) -> Result<(), Error> {
        let fetch = self
            .credentials
            .apply(Fetch::post(&self.client, &self.url))
            .header("Prefer", "return=minimal")
            .json(&self.values)?;

        fetch.execute_no_content().await
    }
}

/// Builder for UPDATE queries
pub struct UpdateBuilder<T: Serialize> {
    url: String,
    credentials: Credentials,
    values: T,
    client: Client,
    query: QueryBuilder,
}

impl<T: Serialize> UpdateBuilder<T> {
    pub(crate) fn new(url: String, credentials: Credentials, values: T, client: Client) -> Self {
        Self {
            url,
            credentials,
            values,
            client,
            query: QueryBuilder::new(),
        }
    }

    /// Update only rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        self.query.eq(column, value);
        self
    }

    /// Execute the update and return the updated rows
    pub async fn execute<R: DeserializeOwned>(self) -> Result<Vec<R>, Error> {
        let fetch = self
            .credentials
            .apply(Fetch::patch(&self.client, &self.url))
            .header("Prefer", "return=representation")
            .query(self.query.params())
            .json(&self.values)?;

        fetch.execute::<Vec<R>>().await
    }

    /// Execute the update and return the single updated row
    pub async fn execute_single<R: DeserializeOwned>(self) -> Result<R, Error> {
        let url = self.url.clone();
        let rows = self.execute::<R>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database(format!("update of {} matched no rows", url)))
    }

    /// Execute the update without returning the updated data
    pub async fn execute_no_return(self) -> Result<(), Error> {
        let fetch = self
            .credentials
            .apply(Fetch::patch(&self.client, &self.url))
            .header("Prefer", "return=minimal")
            .query(self.query.params())
            .json(&self.values)?;

        fetch.execute_no_content().await
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    url: String,
    credentials: Credentials,
    client: Client,
    query: QueryBuilder,
}

impl DeleteBuilder {
    pub(crate) fn new(url: String, credentials: Credentials, client: Client) -> Self {
        Self {
            url,
            credentials,
            client,
            query: QueryBuilder::new(),
        }
    }

    /// Delete only rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        self.query.eq(column, value);
        self
    }

    /// Delete only rows where every listed column equals its value
    pub fn match_<V: ToString>(mut self, filters: &[(&str, V)]) -> Self {
        for (column, value) in filters {
            self.query.eq(column, value.to_string());
        }
        self
    }

    /// Execute the delete without returning the deleted data
    pub async fn execute_no_return(self) -> Result<(), Error> {
        let fetch = self
            .credentials
            .apply(Fetch::delete(&self.client, &self.url))
            .header("Prefer", "return=minimal")
            .query(self.query.params());

        fetch.execute_no_content().await
    }
}
