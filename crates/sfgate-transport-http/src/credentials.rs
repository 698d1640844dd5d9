//! Reads the Salesforce credential headers off an HTTP request.

use axum::http::HeaderMap;

use sfgate_salesforce::credentials::{
    LOGIN_URL_HEADER, PASSWORD_HEADER, SECURITY_TOKEN_HEADER, USERNAME_HEADER,
};
use sfgate_salesforce::CredentialHeaders;

/// Collects the raw `x-sf-*` header values. Validation happens later, in
/// [`CredentialHeaders::parse`].
pub(crate) fn credential_headers(headers: &HeaderMap) -> CredentialHeaders {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    CredentialHeaders {
        username: read(USERNAME_HEADER),
        password: read(PASSWORD_HEADER),
        security_token: read(SECURITY_TOKEN_HEADER),
        login_url: read(LOGIN_URL_HEADER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_present_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USERNAME_HEADER, HeaderValue::from_static("user@example.com"));
        headers.insert(LOGIN_URL_HEADER, HeaderValue::from_static("https://test.salesforce.com"));

        let raw = credential_headers(&headers);
        assert_eq!(raw.username.as_deref(), Some("user@example.com"));
        assert_eq!(raw.login_url.as_deref(), Some("https://test.salesforce.com"));
        assert!(raw.password.is_none());
        assert!(raw.security_token.is_none());
    }
}
