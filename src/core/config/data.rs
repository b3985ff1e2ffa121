use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://beta.character.ai";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_PROFILE: &str = "default";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service root, e.g. "https://beta.character.ai"
    pub base_url: Option<String>,
    /// Upper bound for every request, in seconds
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    /// Save the session to the system keyring and restore it on startup
    pub persist_session: Option<bool>,
    /// Keyring account the session is saved under
    pub session_profile: Option<String>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("charsession/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn persist_session(&self) -> bool {
        self.persist_session.unwrap_or(false)
    }

    pub fn session_profile(&self) -> &str {
        self.session_profile
            .as_deref()
            .filter(|profile| !profile.trim().is_empty())
            .unwrap_or(DEFAULT_SESSION_PROFILE)
    }
}

pub fn path_display(path: &Path) -> String {
    path.display().to_string()
}
