use serde_json::Value;
use tracing::debug;

use crate::api::{catalog, ApiClient};
use crate::chat::{ChatResolver, ConversationHandle, ConversationReference};
use crate::core::config::Config;
use crate::core::error::ClientError;
use crate::core::session::SessionContext;
use crate::core::session_store::SessionStore;

/// Entry point for talking to the service.
///
/// A `Client` owns exactly one [`SessionContext`]. Authentication calls
/// take `&mut self`; resolution and catalog calls take `&self` and can run
/// concurrently.
pub struct Client {
    session: SessionContext,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let api = ApiClient::from_config(config)?;
        debug!(base_url = %api.base_url(), "client created");
        Ok(Self::with_api(api))
    }

    pub fn with_api(api: ApiClient) -> Self {
        Self {
            session: SessionContext::new(api),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionContext {
        &mut self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_guest(&self) -> bool {
        self.session.is_guest()
    }

    pub async fn authenticate_with_token(&mut self, token: &str) -> Result<String, ClientError> {
        self.session.authenticate_with_token(token).await
    }

    pub async fn authenticate_as_guest(&mut self) -> Result<String, ClientError> {
        self.session.authenticate_as_guest().await
    }

    pub fn deauthenticate(&mut self) {
        self.session.deauthenticate();
    }

    /// Continue the history with `character_id`, or start one when the
    /// service has none. `external_id` picks a specific prior history.
    pub async fn create_or_continue_chat(
        &self,
        character_id: &str,
        external_id: Option<&str>,
    ) -> Result<ConversationHandle, ClientError> {
        let reference = ConversationReference {
            character_id: character_id.to_string(),
            external_conversation_id: external_id.map(str::to_string),
        };
        ChatResolver::new(&self.session).resolve(reference).await
    }

    pub async fn fetch_categories(&self) -> Result<Value, ClientError> {
        catalog::fetch_categories(&self.session).await
    }

    pub async fn fetch_user_config(&self) -> Result<Value, ClientError> {
        catalog::fetch_user_config(&self.session).await
    }

    pub async fn fetch_user(&self) -> Result<Value, ClientError> {
        catalog::fetch_user(&self.session).await
    }

    pub async fn fetch_featured_characters(&self) -> Result<Value, ClientError> {
        catalog::fetch_featured_characters(&self.session).await
    }

    pub async fn fetch_characters_by_category(&self, curated: bool) -> Result<Value, ClientError> {
        catalog::fetch_characters_by_category(&self.session, curated).await
    }

    pub async fn fetch_character_info(&self, character_id: &str) -> Result<Value, ClientError> {
        catalog::fetch_character_info(&self.session, character_id).await
    }

    pub async fn search_characters(&self, query: &str) -> Result<Value, ClientError> {
        catalog::search_characters(&self.session, query).await
    }

    pub async fn recent_conversations(&self) -> Result<Value, ClientError> {
        catalog::recent_conversations(&self.session).await
    }

    /// Replace the session with the one saved in `store`, if any. Returns
    /// whether a saved session was found.
    pub fn restore_session(
        &mut self,
        store: &SessionStore,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        match store.load()? {
            Some(state) => {
                self.session.restore(state);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn persist_session(&self, store: &SessionStore) -> Result<(), Box<dyn std::error::Error>> {
        store.save(self.session.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ConversationPayload;
    use crate::core::session::AuthMode;
    use crate::utils::test_utils::{MockResponse, MockServer};
    use serde_json::json;

    #[tokio::test]
    async fn guest_flow_resolves_a_new_chat() {
        let server = MockServer::start(vec![
            MockResponse::json(200, json!({"success": true, "token": "guest-token"})),
            MockResponse::text(404, "No Such History"),
            MockResponse::json(200, json!({"external_id": "hist-9"})),
        ])
        .await;
        let mut client = Client::with_api(server.api_client());

        client
            .authenticate_as_guest()
            .await
            .expect("guest auth should succeed");
        assert!(client.is_guest());

        let handle = client
            .create_or_continue_chat("char-1", None)
            .await
            .expect("chat should resolve");
        assert_eq!(handle.history_external_id(), Some("hist-9"));

        let requests = server.finish().await;
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[1].header("authorization"),
            Some("Token guest-token")
        );
    }

    #[tokio::test]
    async fn chat_requires_authentication() {
        let server = MockServer::start(Vec::new()).await;
        let client = Client::with_api(server.api_client());

        let err = client
            .create_or_continue_chat("char-1", Some("hist"))
            .await
            .expect_err("unauthenticated chat should fail");
        assert!(err.is_precondition());
        assert!(server.requests().await.is_empty());
    }

    #[tokio::test]
    async fn reauthentication_after_deauthenticate_is_allowed() {
        let server = MockServer::start(vec![MockResponse::json(
            200,
            json!({"key": "fresh-key"}),
        )])
        .await;
        let mut client = Client::with_api(server.api_client());
        client
            .session_mut()
            .restore(crate::core::session::SessionState::guest("old".to_string()));

        client.deauthenticate();
        client
            .authenticate_with_token("external")
            .await
            .expect("exchange should succeed");

        assert_eq!(client.session().auth_mode(), AuthMode::Registered);
        assert_eq!(client.session().token(), Some("fresh-key"));
    }

    #[tokio::test]
    async fn resolved_text_payload_is_exposed() {
        let server = MockServer::start(vec![MockResponse::text(200, "plainvalue")]).await;
        let mut client = Client::with_api(server.api_client());
        client.session_mut().force_auth_mode(AuthMode::Registered);
        client.session_mut().force_token(Some("tok".to_string()));

        let handle = client
            .create_or_continue_chat("char-2", None)
            .await
            .expect("chat should resolve");
        assert_eq!(
            handle.payload,
            ConversationPayload::Text("plainvalue".to_string())
        );
    }

    #[test]
    fn disabled_store_leaves_session_untouched() {
        let mut client = Client::with_api(ApiClient::new(
            reqwest::Client::new(),
            "https://example.com",
        ));
        let store = SessionStore::disabled();

        assert!(!client.restore_session(&store).expect("restore should work"));
        client
            .persist_session(&store)
            .expect("persist should be a no-op");
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn configured_timeout_applies_to_requests() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");
        let silent = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("connection should arrive");
            tokio::time::sleep(std::time::Duration::from_secs(10)).await;
            drop(stream);
        });

        let config = Config {
            base_url: Some(format!("http://{addr}")),
            request_timeout_secs: Some(1),
            ..Default::default()
        };
        let client = Client::new(&config).expect("client should build");

        let err = client
            .fetch_categories()
            .await
            .expect_err("a silent server should time out");
        match err {
            ClientError::Http(source) => assert!(source.is_timeout()),
            other => panic!("expected a timed out HTTP error, got {other:?}"),
        }
        silent.abort();
    }

    #[test]
    fn new_uses_configured_base_url() {
        let config = Config {
            base_url: Some("https://staging.example.com/".to_string()),
            ..Default::default()
        };
        let client = Client::new(&config).expect("client should build");
        assert_eq!(
            client.session().api().endpoint_url("/chat/user/"),
            "https://staging.example.com/chat/user/"
        );
    }
}
