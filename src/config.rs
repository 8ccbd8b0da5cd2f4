//! Configuration for the Resepi Land client

use crate::error::Error;
use std::env;
use std::time::Duration;

/// Environment variable naming the Supabase project URL.
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
/// Environment variable naming the anonymous API key.
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
/// Environment variable naming the administrator email.
///
/// Matching a session against this email only gates admin UI affordances.
/// Real authorization is enforced by backend row-level security.
pub const ENV_ADMIN_EMAIL: &str = "ADMIN_EMAIL";

/// Application configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// The base URL for the Supabase project
    pub supabase_url: String,

    /// The anonymous API key for the Supabase project
    pub supabase_anon_key: String,

    /// Email address whose sessions see admin affordances
    pub admin_email: Option<String>,
}

impl Config {
    /// Read the configuration from the environment
    pub fn from_env() -> Result<Self, Error> {
        let supabase_url = env::var(ENV_SUPABASE_URL)
            .map_err(|_| Error::config(format!("{} must be set", ENV_SUPABASE_URL)))?;
        let supabase_anon_key = env::var(ENV_SUPABASE_ANON_KEY)
            .map_err(|_| Error::config(format!("{} must be set", ENV_SUPABASE_ANON_KEY)))?;

        if supabase_url.trim().is_empty() || supabase_anon_key.trim().is_empty() {
            return Err(Error::config("missing Supabase environment variables"));
        }

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            admin_email: env::var(ENV_ADMIN_EMAIL).ok().filter(|v| !v.is_empty()),
        })
    }
}

/// Options for the Resepi Land client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether to automatically refresh the auth token
    pub auto_refresh_token: bool,

    /// Whether the session should be persisted by the embedding application
    pub persist_session: bool,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Storage key under which the embedding application persists the session
    pub session_storage_key: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            auto_refresh_token: true,
            persist_session: true,
            request_timeout: Some(Duration::from_secs(30)),
            session_storage_key: "resepi-land-auth".to_string(),
        }
    }
}

impl ClientOptions {
    /// Set whether to automatically refresh the token
    pub fn with_auto_refresh_token(mut self, value: bool) -> Self {
        self.auto_refresh_token = value;
        self
    }

    /// Set whether to persist the session
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the session storage key
    pub fn with_session_storage_key(mut self, value: &str) -> Self {
        self.session_storage_key = value.to_string();
        self
    }
}
