//! Authentication state machine for a single client.
//!
//! A [`SessionContext`] starts unauthenticated and moves to either a guest
//! or a registered session through one of the `authenticate_*` calls. It
//! must be explicitly deauthenticated before authenticating again. Headers
//! for outgoing requests are derived from the current state on every call.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::{
    ApiClient, GuestRegistrationRequest, GuestRegistrationResponse, TokenExchangeRequest,
    TokenExchangeResponse, GUEST_REGISTRATION_PATH, TOKEN_EXCHANGE_PATH,
};
use crate::core::error::ClientError;

mod headers;

pub use headers::{
    HeaderSet, AUTHORIZATION_HEADER, CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Unauthenticated,
    Guest,
    Registered,
}

/// Snapshot of a session's authentication state.
///
/// Through the transition API the token is present exactly when the mode
/// is not [`AuthMode::Unauthenticated`]. The force-set operations on
/// [`SessionContext`] can break that pairing; keeping it consistent is then
/// up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub auth_mode: AuthMode,
    #[serde(default)]
    pub token: Option<String>,
}

impl SessionState {
    pub fn guest(token: String) -> Self {
        Self {
            auth_mode: AuthMode::Guest,
            token: Some(token),
        }
    }

    pub fn registered(token: String) -> Self {
        Self {
            auth_mode: AuthMode::Registered,
            token: Some(token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_mode != AuthMode::Unauthenticated
    }
}

pub struct SessionContext {
    api: ApiClient,
    state: SessionState,
}

impl SessionContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: SessionState::default(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.state.auth_mode
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn is_guest(&self) -> bool {
        self.state.auth_mode == AuthMode::Guest
    }

    /// Headers for the next request. Authenticated sessions get an
    /// `authorization: Token <token>` header in addition to the content type.
    pub fn headers(&self) -> HeaderSet {
        if self.is_authenticated() {
            HeaderSet::authorized(self.token().unwrap_or_default())
        } else {
            HeaderSet::unauthenticated()
        }
    }

    pub(crate) fn require_authenticated(&self) -> Result<(), ClientError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::Precondition(
                "You must be authenticated to do this.",
            ))
        }
    }

    fn require_unauthenticated(&self) -> Result<(), ClientError> {
        if self.is_authenticated() {
            Err(ClientError::Precondition("Already authenticated"))
        } else {
            Ok(())
        }
    }

    /// Exchange an external access token for a service session key and
    /// become a registered session. Returns the stored session key.
    pub async fn authenticate_with_token(
        &mut self,
        external_token: &str,
    ) -> Result<String, ClientError> {
        self.require_unauthenticated()?;
        if external_token.is_empty() {
            return Err(ClientError::Validation(
                "an access token is required".to_string(),
            ));
        }

        let response = self
            .api
            .post_json(
                TOKEN_EXCHANGE_PATH,
                &HeaderSet::unauthenticated(),
                &TokenExchangeRequest {
                    access_token: external_token,
                },
            )
            .send()
            .await
            .map_err(|err| ClientError::auth_transport("token exchange request failed", err))?;

        let status = response.status();
        debug!(%status, "token exchange response");
        if status != StatusCode::OK {
            return Err(ClientError::auth(format!(
                "token is invalid (status {status})"
            )));
        }

        let body: TokenExchangeResponse = response.json().await.map_err(|err| {
            ClientError::auth_transport("token exchange response could not be decoded", err)
        })?;
        let key = body
            .key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ClientError::auth("token exchange response has no session key"))?;

        self.state = SessionState::registered(key.clone());
        debug!("session is now registered");
        Ok(key)
    }

    /// Register an anonymous guest session. A fresh UUID is generated for
    /// the registration request and discarded afterwards.
    pub async fn authenticate_as_guest(&mut self) -> Result<String, ClientError> {
        self.require_unauthenticated()?;

        let lazy_uuid = Uuid::new_v4().to_string();

        let response = self
            .api
            .post_json(
                GUEST_REGISTRATION_PATH,
                &HeaderSet::unauthenticated(),
                &GuestRegistrationRequest {
                    lazy_uuid: &lazy_uuid,
                },
            )
            .send()
            .await
            .map_err(|err| ClientError::auth_transport("Failed to fetch a lazy token", err))?;

        let status = response.status();
        debug!(%status, "guest registration response");
        if status != StatusCode::OK {
            return Err(ClientError::auth(format!(
                "Failed to fetch a lazy token (status {status})"
            )));
        }

        let body: GuestRegistrationResponse = response.json().await.map_err(|err| {
            ClientError::auth_transport("guest registration response could not be decoded", err)
        })?;

        // A 200 alone is not success for this endpoint.
        if body.success != Some(true) {
            return Err(ClientError::auth("Registering failed"));
        }
        let token = body
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::auth("guest registration returned no token"))?;

        self.state = SessionState::guest(token.clone());
        debug!("session is now a guest session");
        Ok(token)
    }

    /// Drop the current session. Does nothing when already signed out.
    pub fn deauthenticate(&mut self) {
        if self.is_authenticated() {
            self.state = SessionState::default();
            debug!("session deauthenticated");
        }
    }

    /// Replace the token without any state checks. Intended for token
    /// refresh and for restoring a session saved elsewhere.
    pub fn force_token(&mut self, token: Option<String>) {
        self.state.token = token;
    }

    /// Replace the authentication mode without any state checks.
    pub fn force_auth_mode(&mut self, auth_mode: AuthMode) {
        self.state.auth_mode = auth_mode;
    }

    /// Replace the whole state without any state checks.
    pub fn restore(&mut self, state: SessionState) {
        debug!(auth_mode = ?state.auth_mode, "session state restored");
        self.state = state;
    }
}
