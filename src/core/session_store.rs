use crate::core::config::data::{Config, DEFAULT_SESSION_PROFILE};
use crate::core::keyring::KeyringAccessError;
use crate::core::session::SessionState;
use keyring::Entry;
use tracing::debug;

const KEYRING_SERVICE: &str = "charsession";

/// Saves a [`SessionState`] in the system keyring so a later process can
/// restore it with [`crate::core::session::SessionContext::restore`].
///
/// With the keyring disabled every operation is a no-op.
#[derive(Debug, Clone)]
pub struct SessionStore {
    profile: String,
    use_keyring: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_PROFILE)
    }
}

impl SessionStore {
    pub fn new(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            use_keyring: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            profile: DEFAULT_SESSION_PROFILE.to_string(),
            use_keyring: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            profile: config.session_profile().to_string(),
            use_keyring: config.persist_session(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn is_enabled(&self) -> bool {
        self.use_keyring
    }

    fn entry(&self) -> Result<Entry, KeyringAccessError> {
        Ok(Entry::new(KEYRING_SERVICE, &self.profile)?)
    }

    pub fn load(&self) -> Result<Option<SessionState>, Box<dyn std::error::Error>> {
        if !self.use_keyring {
            return Ok(None);
        }

        let raw = match self.entry()?.get_password() {
            Ok(raw) => raw,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(err) => return Err(Box::new(KeyringAccessError::from(err))),
        };
        let state: SessionState = serde_json::from_str(&raw)?;
        debug!(profile = %self.profile, auth_mode = ?state.auth_mode, "loaded saved session");
        Ok(Some(state))
    }

    /// Save `state`. An unauthenticated state removes the saved entry.
    pub fn save(&self, state: &SessionState) -> Result<(), Box<dyn std::error::Error>> {
        if !self.use_keyring {
            return Ok(());
        }
        if !state.is_authenticated() {
            self.clear()?;
            return Ok(());
        }

        let raw = serde_json::to_string(state)?;
        self.entry()?
            .set_password(&raw)
            .map_err(|err| Box::new(KeyringAccessError::from(err)) as Box<dyn std::error::Error>)?;
        debug!(profile = %self.profile, "saved session");
        Ok(())
    }

    /// Remove the saved session. Returns whether an entry existed.
    pub fn clear(&self) -> Result<bool, Box<dyn std::error::Error>> {
        if !self.use_keyring {
            return Ok(false);
        }

        match self.entry()?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(err) => Err(Box::new(KeyringAccessError::from(err))),
        }
    }
}
