use reqwest::StatusCode;
use tracing::debug;

use super::{ConversationHandle, ConversationPayload, ConversationReference};
use crate::api::{HistoryRequest, CONTINUE_HISTORY_PATH, CREATE_HISTORY_PATH};
use crate::core::error::{ClientError, ResolutionStage};
use crate::core::session::SessionContext;

/// Bodies the continue endpoint uses to say there is no history yet. They
/// arrive with either a 404 or a 200 status and must match exactly.
pub const NO_HISTORY_SENTINELS: [&str; 2] = [
    "No Such History",
    "there is no history between user and character",
];

fn is_no_history_sentinel(body: &str) -> bool {
    NO_HISTORY_SENTINELS.iter().any(|sentinel| *sentinel == body)
}

/// Resolves conversations using the headers of a borrowed session.
///
/// The resolver never mutates the session, so several resolutions may run
/// at once against the same context.
pub struct ChatResolver<'a> {
    session: &'a SessionContext,
}

impl<'a> ChatResolver<'a> {
    pub fn new(session: &'a SessionContext) -> Self {
        Self { session }
    }

    pub async fn resolve(
        &self,
        reference: ConversationReference,
    ) -> Result<ConversationHandle, ClientError> {
        self.session.require_authenticated()?;
        if reference.character_id.is_empty() {
            return Err(ClientError::Validation(
                "a character id is required".to_string(),
            ));
        }

        let body = self.probe(&reference).await?;
        let body = if is_no_history_sentinel(&body) {
            debug!(character_id = %reference.character_id, "no history found, creating one");
            self.create(&reference.character_id).await?
        } else {
            body
        };

        Ok(ConversationHandle {
            payload: ConversationPayload::from_body(body),
            character_id: reference.character_id,
            external_conversation_id: reference.external_conversation_id,
        })
    }

    async fn probe(&self, reference: &ConversationReference) -> Result<String, ClientError> {
        let request = HistoryRequest {
            character_external_id: &reference.character_id,
            history_external_id: reference.external_conversation_id.as_deref(),
        };
        let response = self
            .session
            .api()
            .post_json(CONTINUE_HISTORY_PATH, &self.session.headers(), &request)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, character_id = %reference.character_id, "continue history response");
        if status != StatusCode::OK && status != StatusCode::NOT_FOUND {
            return Err(ClientError::Resolution {
                stage: ResolutionStage::Probe,
                status,
            });
        }

        Ok(response.text().await?)
    }

    async fn create(&self, character_id: &str) -> Result<String, ClientError> {
        let request = HistoryRequest {
            character_external_id: character_id,
            history_external_id: None,
        };
        let response = self
            .session
            .api()
            .post_json(CREATE_HISTORY_PATH, &self.session.headers(), &request)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, %character_id, "create history response");
        if status != StatusCode::OK {
            return Err(ClientError::Resolution {
                stage: ResolutionStage::Create,
                status,
            });
        }

        Ok(response.text().await?)
    }
}
