//! Errors raised while talking to Salesforce.

use thiserror::Error;

/// Errors from login or remote API calls.
///
/// The `Display` text always carries the remote message so callers can
/// surface it unchanged.
#[derive(Debug, Error)]
pub enum SalesforceError {
    /// The HTTP exchange itself failed (connect, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The SOAP login call returned a fault.
    #[error("Salesforce login failed: {message}")]
    LoginFault {
        /// The fault string reported by Salesforce.
        message: String,
    },
    /// The login response could not be interpreted.
    #[error("unexpected login response: {0}")]
    InvalidLoginResponse(String),
    /// A URL supplied by the caller or by Salesforce is unusable.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A REST call returned a non-success status.
    #[error("Salesforce API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error codes and messages reported by Salesforce.
        message: String,
    },
}
