//! # sfgate-salesforce
//!
//! Salesforce access for the gateway: per-request credentials, the
//! connector/session capability traits, and a `reqwest` implementation that
//! logs in through the SOAP partner API and then speaks REST.
//!
//! ```no_run
//! use sfgate_salesforce::{ClientSettings, CredentialHeaders, RestConnector, SalesforceConnector};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = RestConnector::new(ClientSettings::default())?;
//! let credentials = CredentialHeaders {
//!     username: Some("user@example.com".into()),
//!     password: Some("hunter2".into()),
//!     security_token: Some("abc123".into()),
//!     login_url: None,
//! }
//! .parse(sfgate_salesforce::DEFAULT_LOGIN_URL)?;
//!
//! let session = connector.login(&credentials).await?;
//! let rows = session.query("SELECT Id FROM Account LIMIT 1").await?;
//! println!("{rows:#}");
//! # Ok(())
//! # }
//! ```

/// Default Salesforce API version used for SOAP login and REST calls.
pub const DEFAULT_API_VERSION: &str = "62.0";

/// Production login host.
pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default connection timeout for outbound requests (15 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;

/// Default request timeout for outbound requests (120 seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub mod client;
pub mod connector;
pub mod credentials;
mod error;
pub mod metadata;
mod soap;

pub use client::{ClientSettings, RestConnector, RestSession};
pub use connector::{SalesforceConnector, SalesforceSession};
pub use credentials::{CredentialError, CredentialHeaders, Credentials};
pub use error::SalesforceError;
pub use metadata::MetadataType;
