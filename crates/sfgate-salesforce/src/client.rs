//! `reqwest`-backed connector: SOAP login, REST data and Tooling calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::connector::{SalesforceConnector, SalesforceSession};
use crate::credentials::Credentials;
use crate::error::SalesforceError;
use crate::soap;

/// Outbound HTTP settings shared by every session.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API version, e.g. "62.0".
    pub api_version: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_version: crate::DEFAULT_API_VERSION.to_string(),
            connect_timeout: Duration::from_secs(crate::DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(crate::DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Connector that logs in over SOAP and returns REST-speaking sessions.
///
/// Holds only a connection pool; no credentials or session ids are kept
/// between logins.
#[derive(Debug, Clone)]
pub struct RestConnector {
    http: reqwest::Client,
    api_version: String,
}

impl RestConnector {
    /// Creates a connector with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`SalesforceError::Http`] if the HTTP client cannot be built.
    pub fn new(settings: ClientSettings) -> Result<Self, SalesforceError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            http,
            api_version: settings.api_version,
        })
    }

    fn login_endpoint(&self, login_url: &str) -> String {
        format!(
            "{}/services/Soap/u/{}",
            login_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

#[async_trait]
impl SalesforceConnector for RestConnector {
    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn SalesforceSession>, SalesforceError> {
        let endpoint = self.login_endpoint(&credentials.login_url);
        tracing::debug!(%endpoint, username = %credentials.username, "logging in to Salesforce");

        let response = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .body(soap::login_envelope(
                &credentials.username,
                &credentials.login_secret(),
            ))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let login = match soap::parse_login_response(&body) {
            Ok(login) => login,
            Err(SalesforceError::InvalidLoginResponse(_)) if !status.is_success() => {
                return Err(SalesforceError::LoginFault {
                    message: format!("login endpoint returned HTTP {status}"),
                });
            }
            Err(e) => return Err(e),
        };

        let instance_url = instance_origin(&login.server_url)?;
        tracing::debug!(%instance_url, "Salesforce session established");

        Ok(Box::new(RestSession::new(
            self.http.clone(),
            instance_url,
            login.session_id,
            self.api_version.clone(),
        )?))
    }
}

/// A logged-in session addressing one org's REST API.
pub struct RestSession {
    http: reqwest::Client,
    instance_url: Url,
    session_id: String,
    api_version: String,
}

impl RestSession {
    /// Creates a session from an already-obtained session id.
    ///
    /// # Errors
    ///
    /// Returns [`SalesforceError::InvalidUrl`] if `instance_url` is not an
    /// absolute http(s) URL.
    pub fn new(
        http: reqwest::Client,
        instance_url: String,
        session_id: String,
        api_version: String,
    ) -> Result<Self, SalesforceError> {
        let parsed = Url::parse(&instance_url).map_err(|e| SalesforceError::InvalidUrl {
            url: instance_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(SalesforceError::InvalidUrl {
                url: instance_url,
                reason: "not a base URL".into(),
            });
        }
        Ok(Self {
            http,
            instance_url: parsed,
            session_id,
            api_version,
        })
    }

    /// Builds `{instance}/services/data/v{version}/{segments...}`.
    pub(crate) fn data_url(&self, segments: &[&str]) -> Url {
        let version = format!("v{}", self.api_version);
        let mut url = self.instance_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear()
                .extend(["services", "data", version.as_str()])
                .extend(segments);
        }
        url
    }

    async fn get_json(&self, url: Url, soql: Option<&str>) -> Result<Value, SalesforceError> {
        let mut request = self
            .http
            .get(url)
            .bearer_auth(&self.session_id)
            .header(ACCEPT, "application/json");
        if let Some(q) = soql {
            request = request.query(&[("q", q)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SalesforceError::Api {
            status: status.as_u16(),
            message: api_error_message(&body)
                .unwrap_or_else(|| format!("HTTP {status}")),
        })
    }
}

#[async_trait]
impl SalesforceSession for RestSession {
    async fn query(&self, soql: &str) -> Result<Value, SalesforceError> {
        self.get_json(self.data_url(&["query"]), Some(soql)).await
    }

    async fn tooling_query(&self, soql: &str) -> Result<Value, SalesforceError> {
        self.get_json(self.data_url(&["tooling", "query"]), Some(soql))
            .await
    }

    async fn describe_object(&self, object_name: &str) -> Result<Value, SalesforceError> {
        self.get_json(
            self.data_url(&["sobjects", object_name, "describe"]),
            None,
        )
        .await
    }
}

/// Reduces a SOAP `serverUrl` to the instance origin, e.g.
/// `https://acme.my.salesforce.com`.
fn instance_origin(server_url: &str) -> Result<String, SalesforceError> {
    let url = Url::parse(server_url).map_err(|e| SalesforceError::InvalidUrl {
        url: server_url.to_string(),
        reason: e.to_string(),
    })?;
    match url.origin() {
        origin @ url::Origin::Tuple(..) => Ok(origin.ascii_serialization()),
        url::Origin::Opaque(_) => Err(SalesforceError::InvalidUrl {
            url: server_url.to_string(),
            reason: "server URL has no origin".into(),
        }),
    }
}

/// Formats a REST error body (`[{"errorCode": .., "message": ..}]`).
fn api_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let Ok(parsed) = serde_json::from_str::<Value>(trimmed) else {
        return (!trimmed.is_empty()).then(|| trimmed.to_string());
    };
    let entries = match &parsed {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(&parsed),
        _ => return Some(trimmed.to_string()),
    };

    let messages: Vec<String> = entries
        .iter()
        .filter_map(|entry| {
            let message = entry.get("message").and_then(Value::as_str)?;
            Some(match entry.get("errorCode").and_then(Value::as_str) {
                Some(code) => format!("{code}: {message}"),
                None => message.to_string(),
            })
        })
        .collect();

    if messages.is_empty() {
        Some(trimmed.to_string())
    } else {
        Some(messages.join("; "))
    }
}
