//! Per-request Salesforce credential set.
//!
//! Credentials arrive as HTTP headers on every `tools/call`, are parsed into
//! a [`Credentials`] value, used for exactly one login, and dropped with the
//! request. Neither type's `Debug` output contains the password or token.

use std::fmt;

use thiserror::Error;

/// Header carrying the Salesforce username.
pub const USERNAME_HEADER: &str = "x-sf-username";
/// Header carrying the Salesforce password.
pub const PASSWORD_HEADER: &str = "x-sf-password";
/// Header carrying the Salesforce security token.
pub const SECURITY_TOKEN_HEADER: &str = "x-sf-security-token";
/// Optional header overriding the login host.
pub const LOGIN_URL_HEADER: &str = "x-sf-login-url";

/// Errors from credential parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// One or more required headers were absent or empty.
    #[error("Missing Salesforce credentials. Required headers: {}", .missing.join(", "))]
    Missing {
        /// Names of the missing headers.
        missing: Vec<&'static str>,
    },
}

/// Raw, unvalidated credential values as read from the transport.
#[derive(Clone, Default)]
pub struct CredentialHeaders {
    /// Value of `x-sf-username`.
    pub username: Option<String>,
    /// Value of `x-sf-password`.
    pub password: Option<String>,
    /// Value of `x-sf-security-token`.
    pub security_token: Option<String>,
    /// Value of `x-sf-login-url`.
    pub login_url: Option<String>,
}

/// A complete credential set, valid for a single login.
#[derive(Clone)]
pub struct Credentials {
    /// Salesforce username.
    pub username: String,
    /// Salesforce password.
    pub password: String,
    /// Security token appended to the password on login.
    pub security_token: String,
    /// Login host, e.g. `https://login.salesforce.com`.
    pub login_url: String,
}

impl CredentialHeaders {
    /// Validates the raw values into a [`Credentials`] set.
    ///
    /// Empty strings count as missing. `default_login_url` is used when no
    /// login URL header was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Missing`] listing every absent header.
    pub fn parse(&self, default_login_url: &str) -> Result<Credentials, CredentialError> {
        let username = non_empty(&self.username);
        let password = non_empty(&self.password);
        let security_token = non_empty(&self.security_token);

        match (username, password, security_token) {
            (Some(username), Some(password), Some(security_token)) => Ok(Credentials {
                username: username.to_string(),
                password: password.to_string(),
                security_token: security_token.to_string(),
                login_url: non_empty(&self.login_url)
                    .unwrap_or(default_login_url)
                    .to_string(),
            }),
            (username, password, security_token) => {
                let missing = [
                    (username.is_none(), USERNAME_HEADER),
                    (password.is_none(), PASSWORD_HEADER),
                    (security_token.is_none(), SECURITY_TOKEN_HEADER),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();
                Err(CredentialError::Missing { missing })
            }
        }
    }
}

impl Credentials {
    /// The secret presented to the SOAP login call: password followed by
    /// the security token.
    pub fn login_secret(&self) -> String {
        format!("{}{}", self.password, self.security_token)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Debug for CredentialHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHeaders")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "security_token",
                &self.security_token.as_ref().map(|_| "<redacted>"),
            )
            .field("login_url", &self.login_url)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("security_token", &"<redacted>")
            .field("login_url", &self.login_url)
            .finish()
    }
}
