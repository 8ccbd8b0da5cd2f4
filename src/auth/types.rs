//! Types for authentication and session management

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// User data as owned by the auth provider and mirrored by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: String,

    /// The user's email address
    pub email: Option<String>,

    /// Free-form metadata; sign-up stores the display name under `name`
    #[serde(default)]
    pub user_metadata: serde_json::Value,

    /// The creation time
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// The display name from `user_metadata`, if one was set at sign-up
    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata.get("name").and_then(|v| v.as_str())
    }
}

/// An authenticated session as returned by the auth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    pub refresh_token: String,

    /// The token type
    pub token_type: String,

    /// The expiry time in seconds
    pub expires_in: i64,

    /// The expiry timestamp
    #[serde(default)]
    pub expires_at: Option<i64>,

    /// The user the session belongs to
    pub user: User,
}

impl Session {
    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::from_secs(0))
                .as_secs() as i64;

            now >= expires_at
        } else {
            false
        }
    }
}

/// The kind of session transition that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// A session transition, delivered to state-change subscribers
#[derive(Debug, Clone)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}
