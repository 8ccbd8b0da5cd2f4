//! Resepi Land client core
//!
//! The non-presentational core of the Resepi Land recipe catalog: typed
//! access to the hosted backend (database rows, auth sessions, image
//! storage), a time-boxed recipe cache, the session/profile state
//! container, and the pure view logic for search, category filtering, and
//! shopping-list grouping.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod postgrest;
pub mod session;
pub mod storage;
pub mod views;

use reqwest::Client;

use crate::auth::Auth;
use crate::config::{ClientOptions, Config};
use crate::postgrest::PostgrestClient;
use crate::storage::StorageClient;

/// The main entry point for the Resepi Land client
pub struct ResepiClient {
    /// The base URL for the Supabase project
    pub url: String,
    /// The anonymous API key for the Supabase project
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for user management and authentication
    pub auth: Auth,
    /// Email whose sessions see admin affordances; cosmetic gating only
    pub admin_email: Option<String>,
    /// Client options
    pub options: ClientOptions,
}

impl ResepiClient {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use resepi_land::ResepiClient;
    ///
    /// let client = ResepiClient::new("https://your-project.supabase.co", "your-anon-key");
    /// ```
    pub fn new(supabase_url: &str, supabase_key: &str) -> Self {
        Self::new_with_options(supabase_url, supabase_key, ClientOptions::default())
    }

    /// Create a new client with custom options
    pub fn new_with_options(
        supabase_url: &str,
        supabase_key: &str,
        options: ClientOptions,
    ) -> Self {
        let http_client = Client::new();

        let auth = Auth::new(supabase_url, supabase_key, http_client.clone(), options.clone());

        Self {
            url: supabase_url.to_string(),
            key: supabase_key.to_string(),
            http_client,
            auth,
            admin_email: None,
            options,
        }
    }

    /// Create a new client from environment configuration
    pub fn from_config(config: &Config) -> Self {
        let mut client = Self::new(&config.supabase_url, &config.supabase_anon_key);
        client.admin_email = config.admin_email.clone();
        client
    }

    /// Set the admin email used for cosmetic admin gating
    pub fn with_admin_email(mut self, email: &str) -> Self {
        self.admin_email = Some(email.to_string());
        self
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a table-scoped database client
    ///
    /// When a session is active its access token is attached, so row-level
    /// security sees the signed-in user.
    pub fn from(&self, table: &str) -> PostgrestClient {
        let token = self.auth.get_session().map(|s| s.access_token);
        PostgrestClient::new(&self.url, &self.key, table, token, self.http_client.clone())
    }

    /// Get a storage client for file operations
    pub fn storage(&self) -> StorageClient {
        StorageClient::new(&self.url, &self.key, self.http_client.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::cache::RecipeCache;
    pub use crate::config::{ClientOptions, Config};
    pub use crate::error::Error;
    pub use crate::session::ProfileState;
    pub use crate::ResepiClient;
}
