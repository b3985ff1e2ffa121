//! Joining the configured base URL with endpoint paths.
//!
//! Base URLs come from configuration and may or may not end in a slash;
//! endpoint paths are written with a leading slash. These helpers make sure
//! the two meet with exactly one slash, whether the base URL is a bare host
//! or sits behind a path prefix such as a proxy mount.

/// Strip trailing slashes from a base URL.
///
/// # Examples
///
/// ```
/// use charsession::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://beta.character.ai"), "https://beta.character.ai");
/// assert_eq!(normalize_base_url("https://beta.character.ai/"), "https://beta.character.ai");
/// assert_eq!(normalize_base_url("https://proxy.example.com/cai//"), "https://proxy.example.com/cai");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between
/// them.
///
/// Trailing slashes on the endpoint are kept; the service requires them.
///
/// # Examples
///
/// ```
/// use charsession::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://beta.character.ai/", "/chat/history/continue/"),
///     "https://beta.character.ai/chat/history/continue/"
/// );
/// assert_eq!(
///     construct_api_url("https://beta.character.ai", "chat/auth/lazy/"),
///     "https://beta.character.ai/chat/auth/lazy/"
/// );
/// assert_eq!(
///     construct_api_url("https://proxy.example.com/cai/", "/chat/user/"),
///     "https://proxy.example.com/cai/chat/user/"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalize_base_url(base_url), endpoint)
}
