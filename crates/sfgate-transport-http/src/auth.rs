//! Shared-secret authentication for `tools/call`.

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Header carrying the shared secret.
pub const SECRET_HEADER: &str = "x-secret-key";

/// How `tools/call` requests are authorised.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretPolicy {
    /// No secret required.
    Disabled,
    /// A secret is required but none is configured; every call is allowed
    /// and a warning is logged.
    Permissive,
    /// `x-secret-key` must equal this value.
    Enforced(String),
}

impl SecretPolicy {
    /// Builds the policy from the `require_auth` flag and configured secret.
    pub fn new(require_auth: bool, secret_key: &str) -> Self {
        match (require_auth, secret_key.is_empty()) {
            (false, _) => Self::Disabled,
            (true, true) => Self::Permissive,
            (true, false) => Self::Enforced(secret_key.to_string()),
        }
    }
}

impl std::fmt::Debug for SecretPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Permissive => f.write_str("Permissive"),
            Self::Enforced(_) => f.write_str("Enforced(<redacted>)"),
        }
    }
}

/// Why a shared-secret check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("Missing x-secret-key header")]
    Missing,
    #[error("Invalid secret key")]
    Mismatch,
}

/// Validates the `x-secret-key` header against `expected`.
///
/// # Errors
///
/// Returns [`SecretError::Missing`] if the header is absent or empty and
/// [`SecretError::Mismatch`] if it does not equal `expected`.
pub(crate) fn validate_secret(headers: &HeaderMap, expected: &str) -> Result<(), SecretError> {
    let provided = headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(SecretError::Missing)?;

    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(SecretError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    fn with_secret(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_HEADER, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn valid_secret_passes() {
        assert!(validate_secret(&with_secret("secret123"), "secret123").is_ok());
    }

    #[test]
    fn wrong_secret_rejected() {
        assert_eq!(
            validate_secret(&with_secret("wrong"), "secret123"),
            Err(SecretError::Mismatch)
        );
    }

    #[test]
    fn prefix_or_extension_of_secret_rejected() {
        for candidate in ["secret12", "secret1234", "Secret123"] {
            let mut headers = HeaderMap::new();
            headers.insert(SECRET_HEADER, HeaderValue::from_static(candidate));
            assert_eq!(
                validate_secret(&headers, "secret123"),
                Err(SecretError::Mismatch),
                "{candidate} must not match"
            );
        }
    }

    #[test]
    fn missing_or_empty_header_rejected() {
        assert_eq!(
            validate_secret(&HeaderMap::new(), "secret123"),
            Err(SecretError::Missing)
        );
        assert_eq!(
            validate_secret(&with_secret(""), "secret123"),
            Err(SecretError::Missing)
        );
    }

    #[test]
    fn policy_from_settings() {
        assert_eq!(SecretPolicy::new(false, "abc"), SecretPolicy::Disabled);
        assert_eq!(SecretPolicy::new(true, ""), SecretPolicy::Permissive);
        assert_eq!(
            SecretPolicy::new(true, "abc"),
            SecretPolicy::Enforced("abc".into())
        );
    }

    #[test]
    fn debug_hides_secret() {
        let shown = format!("{:?}", SecretPolicy::new(true, "hunter2"));
        assert!(!shown.contains("hunter2"));
    }
}
