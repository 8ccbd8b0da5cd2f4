//! Authentication against the hosted auth provider
//!
//! The provider owns the session lifecycle; this client mirrors the current
//! session and notifies subscribers whenever it changes (sign-in, sign-out,
//! token refresh) so user-scoped state can be reloaded or cleared.

mod types;

use reqwest::Client;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

/// Client for the auth provider
pub struct Auth {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// Mirror of the provider-owned session
    session: Arc<Mutex<Option<Session>>>,

    /// State-change subscribers
    events: broadcast::Sender<AuthChange>,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        let (events, _) = broadcast::channel(16);

        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            session: Arc::new(Mutex::new(None)),
            events,
            options,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    /// Sign up a new user with email, password, and display name
    ///
    /// The name is stored in the user's metadata under `name`.
    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<Session, Error> {
        let url = self.get_auth_url("/signup");

        let body = json!({
            "email": email,
            "password": password,
            "data": { "name": name },
        });

        let response = Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .json(&body)?
            .execute_raw()
            .await?;

        let session = Self::parse_session_response(response).await?;
        self.store_session(session.clone(), AuthEvent::SignedIn);

        Ok(session)
    }

    /// Sign in a user with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let url = self.get_auth_url("/token?grant_type=password");

        let body = json!({
            "email": email,
            "password": password,
        });

        let response = Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .json(&body)?
            .execute_raw()
            .await?;

        let session = Self::parse_session_response(response).await?;
        self.store_session(session.clone(), AuthEvent::SignedIn);

        Ok(session)
    }

    /// Sign out the current user and discard the mirrored session
    pub async fn sign_out(&self) -> Result<(), Error> {
        let url = self.get_auth_url("/logout");

        let token = {
            let current_session = self.session.lock().unwrap();
            match *current_session {
                Some(ref session) => session.access_token.clone(),
                None => return Err(Error::auth("Not logged in")),
            }
        };

        Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .bearer_auth(&token)
            .execute_raw()
            .await?;

        {
            let mut current_session = self.session.lock().unwrap();
            *current_session = None;
        }
        self.notify(AuthEvent::SignedOut, None);

        Ok(())
    }

    /// Exchange the refresh token for a new session
    pub async fn refresh_session(&self) -> Result<Session, Error> {
        let url = self.get_auth_url("/token?grant_type=refresh_token");

        let refresh_token = {
            let current_session = self.session.lock().unwrap();
            match *current_session {
                Some(ref session) => session.refresh_token.clone(),
                None => return Err(Error::auth("Not logged in")),
            }
        };

        let body = json!({ "refresh_token": refresh_token });

        let response = Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .json(&body)?
            .execute_raw()
            .await?;

        let session = Self::parse_session_response(response).await?;
        self.store_session(session.clone(), AuthEvent::TokenRefreshed);

        Ok(session)
    }

    /// Get the current session
    pub fn get_session(&self) -> Option<Session> {
        let current_session = self.session.lock().unwrap();
        current_session.clone()
    }

    /// The user of the current session, if any
    pub fn current_user(&self) -> Option<User> {
        let current_session = self.session.lock().unwrap();
        current_session.as_ref().map(|s| s.user.clone())
    }

    /// Restore a session persisted by the embedding application
    pub fn set_session(&self, session: Session) {
        self.store_session(session, AuthEvent::SignedIn);
    }

    /// Subscribe to session transitions
    ///
    /// Every sign-in, sign-out, and token refresh is delivered to all
    /// subscribers as an [`AuthChange`].
    pub fn on_state_change(&self) -> broadcast::Receiver<AuthChange> {
        self.events.subscribe()
    }

    /// Whether automatic token refresh was requested in the client options
    pub fn auto_refresh_enabled(&self) -> bool {
        self.options.auto_refresh_token
    }

    fn store_session(&self, session: Session, event: AuthEvent) {
        {
            let mut current_session = self.session.lock().unwrap();
            *current_session = Some(session.clone());
        }
        self.notify(event, Some(session));
    }

    fn notify(&self, event: AuthEvent, session: Option<Session>) {
        // Delivery is best-effort; no subscribers is not an error.
        let _ = self.events.send(AuthChange { event, session });
    }

    /// Decode a provider response into a session, surfacing the provider's
    /// own message on failure
    async fn parse_session_response(response: reqwest::Response) -> Result<Session, Error> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::auth(Self::provider_message(&text, status)));
        }

        let mut session: Session = serde_json::from_str(&text)?;
        if session.expires_at.is_none() {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or(std::time::Duration::from_secs(0))
                .as_secs() as i64;
            session.expires_at = Some(now + session.expires_in);
        }

        Ok(session)
    }

    fn provider_message(body: &str, status: reqwest::StatusCode) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["error_description", "msg", "message", "error"]
                    .iter()
                    .find_map(|k| v.get(k).and_then(|m| m.as_str()).map(str::to_string))
            })
            .unwrap_or_else(|| format!("auth request failed with status {}", status))
    }
}
