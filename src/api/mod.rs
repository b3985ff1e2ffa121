use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::data::Config;
use crate::core::error::ClientError;
use crate::core::session::HeaderSet;
use crate::utils::url::construct_api_url;

pub mod catalog;

pub const TOKEN_EXCHANGE_PATH: &str = "/dj-rest-auth/auth0/";
pub const GUEST_REGISTRATION_PATH: &str = "/chat/auth/lazy/";
pub const CONTINUE_HISTORY_PATH: &str = "/chat/history/continue/";
pub const CREATE_HISTORY_PATH: &str = "/chat/history/create/";

#[derive(Serialize)]
pub struct TokenExchangeRequest<'a> {
    pub access_token: &'a str,
}

#[derive(Deserialize)]
pub struct TokenExchangeResponse {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Serialize)]
pub struct GuestRegistrationRequest<'a> {
    pub lazy_uuid: &'a str,
}

#[derive(Deserialize)]
pub struct GuestRegistrationResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Body shared by the continue and create history endpoints. An absent
/// history id is sent as an explicit `null`.
#[derive(Serialize)]
pub struct HistoryRequest<'a> {
    pub character_external_id: &'a str,
    pub history_external_id: Option<&'a str>,
}

/// HTTP transport bound to the service base URL.
///
/// Cloning is cheap; the underlying `reqwest::Client` shares its
/// connection pool between clones.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    /// Build a transport with the timeout and user agent from `config`.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .user_agent(config.user_agent())
            .build()?;
        Ok(Self::new(http, config.base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        construct_api_url(&self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str, headers: &HeaderSet) -> reqwest::RequestBuilder {
        let url = self.endpoint_url(path);
        debug!(%url, "GET");
        headers.apply(self.http.get(url))
    }

    pub(crate) fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        headers: &HeaderSet,
        body: &T,
    ) -> reqwest::RequestBuilder {
        let url = self.endpoint_url(path);
        debug!(%url, "POST");
        headers.apply(self.http.post(url)).json(body)
    }
}
