pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const AUTHORIZATION_HEADER: &str = "authorization";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Headers attached to a request, derived from the session state at the
/// moment of the call.
///
/// A `HeaderSet` is never stored on the session; callers ask for a fresh
/// one per request so that token changes are observed immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(&'static str, String)>,
}

impl HeaderSet {
    /// Headers for requests made without a session.
    pub fn unauthenticated() -> Self {
        Self {
            entries: vec![(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE.to_string())],
        }
    }

    /// Headers for requests made on behalf of an authenticated session.
    pub fn authorized(token: &str) -> Self {
        let mut headers = Self::unauthenticated();
        headers
            .entries
            .push((AUTHORIZATION_HEADER, format!("Token {token}")));
        headers
    }

    /// Look up a header value; names compare case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach every header to `request`. An unencodable value surfaces as
    /// an error when the request is sent.
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        self.iter()
            .fold(request, |request, (name, value)| request.header(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_headers_only_set_content_type() {
        let headers = HeaderSet::unauthenticated();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("content-type"), Some(JSON_CONTENT_TYPE));
        assert!(!headers.contains(AUTHORIZATION_HEADER));
    }

    #[test]
    fn authorized_headers_embed_token() {
        let headers = HeaderSet::authorized("abc123");
        assert_eq!(headers.get("Authorization"), Some("Token abc123"));
        assert_eq!(headers.get(CONTENT_TYPE_HEADER), Some(JSON_CONTENT_TYPE));
    }

    #[test]
    fn apply_sets_headers_on_request() {
        let client = reqwest::Client::new();
        let request = HeaderSet::authorized("xyz")
            .apply(client.get("https://example.com"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION_HEADER).unwrap(),
            "Token xyz"
        );
    }
}
