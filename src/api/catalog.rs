//! Plain fetch endpoints: categories, characters, user data.
//!
//! Each call is a single GET that must answer 200. Anything else is
//! reported as [`ClientError::Transport`] with the offending status.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::core::error::ClientError;
use crate::core::session::{HeaderSet, SessionContext};

pub const CATEGORIES_PATH: &str = "/chat/character/categories/";
pub const USER_CONFIG_PATH: &str = "/chat/config/";
pub const USER_PATH: &str = "/chat/user/";
pub const FEATURED_CHARACTERS_PATH: &str = "/chat/characters/featured_v2/";
pub const CHARACTERS_BY_CATEGORY_PATH: &str = "/chat/categories/characters/";
pub const CHARACTERS_BY_CURATED_CATEGORY_PATH: &str = "/chat/curated_categories/characters/";
pub const CHARACTER_SEARCH_PATH: &str = "/chat/characters/search/";
pub const RECENT_CONVERSATIONS_PATH: &str = "/chat/characters/recent/";

pub fn character_info_path(character_id: &str) -> String {
    format!("/chat/character/info-cached/{character_id}/")
}

async fn send_for_json(
    request: reqwest::RequestBuilder,
    operation: &'static str,
) -> Result<Value, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    debug!(operation, %status, "catalog response");
    if status != StatusCode::OK {
        return Err(ClientError::Transport { operation, status });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ClientError::MalformedResponse {
        operation,
        detail: err.to_string(),
    })
}

fn take_field(
    mut value: Value,
    field: &str,
    operation: &'static str,
) -> Result<Value, ClientError> {
    value
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ClientError::MalformedResponse {
            operation,
            detail: format!("missing `{field}`"),
        })
}

fn require_non_empty(value: &str, what: &str) -> Result<(), ClientError> {
    if value.is_empty() {
        Err(ClientError::Validation(format!("{what} must not be empty")))
    } else {
        Ok(())
    }
}

pub async fn fetch_categories(session: &SessionContext) -> Result<Value, ClientError> {
    let request = session
        .api()
        .get(CATEGORIES_PATH, &HeaderSet::unauthenticated());
    send_for_json(request, "Fetching categories").await
}

pub async fn fetch_user_config(session: &SessionContext) -> Result<Value, ClientError> {
    let request = session
        .api()
        .get(USER_CONFIG_PATH, &HeaderSet::unauthenticated());
    send_for_json(request, "Fetching user configuration").await
}

pub async fn fetch_user(session: &SessionContext) -> Result<Value, ClientError> {
    session.require_authenticated()?;
    let request = session.api().get(USER_PATH, &session.headers());
    send_for_json(request, "Fetching user").await
}

pub async fn fetch_featured_characters(session: &SessionContext) -> Result<Value, ClientError> {
    session.require_authenticated()?;
    let request = session
        .api()
        .get(FEATURED_CHARACTERS_PATH, &session.headers());
    send_for_json(request, "Fetching featured characters").await
}

/// Characters grouped by category. `curated` selects the curated
/// category listing instead of the regular one.
pub async fn fetch_characters_by_category(
    session: &SessionContext,
    curated: bool,
) -> Result<Value, ClientError> {
    let (path, field) = if curated {
        (
            CHARACTERS_BY_CURATED_CATEGORY_PATH,
            "characters_by_curated_category",
        )
    } else {
        (CHARACTERS_BY_CATEGORY_PATH, "characters_by_category")
    };
    let operation = "Fetching characters by category";
    let request = session.api().get(path, &HeaderSet::unauthenticated());
    let body = send_for_json(request, operation).await?;
    take_field(body, field, operation)
}

pub async fn fetch_character_info(
    session: &SessionContext,
    character_id: &str,
) -> Result<Value, ClientError> {
    session.require_authenticated()?;
    require_non_empty(character_id, "character id")?;

    let operation = "Fetching character information";
    let request = session
        .api()
        .get(&character_info_path(character_id), &session.headers());
    let body = send_for_json(request, operation).await?;
    take_field(body, "character", operation)
}

/// Search characters by name. Not available to guest sessions.
pub async fn search_characters(
    session: &SessionContext,
    query: &str,
) -> Result<Value, ClientError> {
    session.require_authenticated()?;
    if session.is_guest() {
        return Err(ClientError::Precondition(
            "Guest accounts cannot use the search feature.",
        ));
    }
    require_non_empty(query, "search query")?;

    let request = session
        .api()
        .get(CHARACTER_SEARCH_PATH, &session.headers())
        .query(&[("query", query)]);
    send_for_json(request, "Searching characters").await
}

pub async fn recent_conversations(session: &SessionContext) -> Result<Value, ClientError> {
    session.require_authenticated()?;
    let request = session
        .api()
        .get(RECENT_CONVERSATIONS_PATH, &session.headers());
    send_for_json(request, "Fetching recent conversations").await
}
