//! SOAP partner `login` envelope and response parsing.
//!
//! Only the handful of elements the gateway needs are read (`sessionId`,
//! `serverUrl`, `faultstring`), so a tag scanner is enough here.

use crate::error::SalesforceError;

/// Session details returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoginResult {
    pub(crate) session_id: String,
    pub(crate) server_url: String,
}

/// Builds the SOAP body for the partner API `login` call.
pub(crate) fn login_envelope(username: &str, secret: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">"#,
            r#"<env:Body><n1:login xmlns:n1="urn:partner.soap.sforce.com">"#,
            "<n1:username>{}</n1:username><n1:password>{}</n1:password>",
            "</n1:login></env:Body></env:Envelope>"
        ),
        escape(username),
        escape(secret)
    )
}

/// Extracts the session from a login response body.
pub(crate) fn parse_login_response(body: &str) -> Result<LoginResult, SalesforceError> {
    if let Some(message) = element_text(body, "faultstring") {
        return Err(SalesforceError::LoginFault { message });
    }

    let session_id = element_text(body, "sessionId")
        .ok_or_else(|| SalesforceError::InvalidLoginResponse("missing sessionId".into()))?;
    let server_url = element_text(body, "serverUrl")
        .ok_or_else(|| SalesforceError::InvalidLoginResponse("missing serverUrl".into()))?;

    Ok(LoginResult {
        session_id,
        server_url,
    })
}

/// Returns the text of the first element whose local name is `local_name`,
/// ignoring any namespace prefix.
pub(crate) fn element_text(xml: &str, local_name: &str) -> Option<String> {
    let mut rest = xml;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>')?;
        let tag = &after[..end];
        rest = &after[end + 1..];

        if tag.starts_with(['/', '?', '!']) || tag.ends_with('/') {
            continue;
        }
        let name = tag.split_whitespace().next().unwrap_or_default();
        let local = name.rsplit(':').next().unwrap_or(name);
        if local == local_name {
            let close = rest.find("</")?;
            return Some(unescape(&rest[..close]));
        }
    }
    None
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
