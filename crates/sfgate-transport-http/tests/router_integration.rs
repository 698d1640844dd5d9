//! Integration tests for the HTTP router.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use http::Request;
use serde_json::{json, Value};
use tower::ServiceExt;

use sfgate_mcp::McpHandler;
use sfgate_salesforce::{Credentials, SalesforceConnector, SalesforceError, SalesforceSession};
use sfgate_transport_http::{build_router, AppState, SecretPolicy};

#[derive(Default)]
struct CountingConnector {
    logins: AtomicUsize,
}

#[async_trait]
impl SalesforceConnector for CountingConnector {
    async fn login(&self, _: &Credentials) -> Result<Box<dyn SalesforceSession>, SalesforceError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StaticSession))
    }
}

struct StaticSession;

#[async_trait]
impl SalesforceSession for StaticSession {
    async fn query(&self, _: &str) -> Result<Value, SalesforceError> {
        Ok(json!({"totalSize": 1, "done": true, "records": [{"Id": "001"}]}))
    }

    async fn tooling_query(&self, _: &str) -> Result<Value, SalesforceError> {
        Ok(json!({"records": []}))
    }

    async fn describe_object(&self, name: &str) -> Result<Value, SalesforceError> {
        Ok(json!({"name": name}))
    }
}

fn make_state(policy: SecretPolicy) -> (AppState, Arc<CountingConnector>) {
    let connector = Arc::new(CountingConnector::default());
    let handler = McpHandler::new(connector.clone(), sfgate_salesforce::DEFAULT_LOGIN_URL);
    (
        AppState {
            handler: Arc::new(handler),
            policy,
        },
        connector,
    )
}

fn app(policy: SecretPolicy) -> axum::Router {
    build_router(make_state(policy).0)
}

fn post_mcp() -> http::request::Builder {
    Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
}

fn with_sf_headers(builder: http::request::Builder) -> http::request::Builder {
    builder
        .header("x-sf-username", "user@example.com")
        .header("x-sf-password", "pw")
        .header("x-sf-security-token", "tok")
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

const QUERY_CALL: &str = r#"{"jsonrpc":"2.0","id":"abc","method":"tools/call","params":{"name":"query","arguments":{"query":"SELECT Id FROM Account"}}}"#;

#[tokio::test]
async fn health_reports_service() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("req");
    let resp = app(SecretPolicy::Disabled).oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mcp-salesforce-server");
}

#[tokio::test]
async fn descriptor_lists_headers() {
    let req = Request::builder().uri("/").body(Body::empty()).expect("req");
    let resp = app(SecretPolicy::Disabled).oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["requiredHeaders"].as_array().expect("arr").len(), 3);
    assert!(body["optionalHeaders"]
        .as_array()
        .expect("arr")
        .contains(&json!("x-secret-key")));
}

#[tokio::test]
async fn tools_endpoint_lists_four_tools() {
    let req = Request::builder()
        .uri("/tools")
        .body(Body::empty())
        .expect("req");
    let resp = app(SecretPolicy::Disabled).oneshot(req).await.expect("resp");
    let body = body_json(resp).await;
    assert_eq!(body["tools"].as_array().expect("tools").len(), 4);
}

#[tokio::test]
async fn mcp_parse_error_has_null_id() {
    let req = post_mcp()
        .body(Body::from("not json"))
        .expect("req");
    let resp = app(SecretPolicy::Disabled).oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["id"].is_null());
}

#[tokio::test]
async fn mcp_invalid_request_echoes_id() {
    let req = post_mcp()
        .body(Body::from(r#"{"jsonrpc":"2.0","id":5}"#))
        .expect("req");
    let resp = app(SecretPolicy::Disabled).oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["id"], 5);
}

#[tokio::test]
async fn fractional_and_unsigned_ids_are_echoed() {
    for (raw, expected) in [
        ("1.5", json!(1.5)),
        ("18446744073709551615", json!(u64::MAX)),
    ] {
        let body = format!(r#"{{"jsonrpc":"2.0","id":{raw},"method":"initialize"}}"#);
        let req = post_mcp().body(Body::from(body)).expect("req");
        let resp = app(SecretPolicy::Disabled).oneshot(req).await.expect("resp");
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        assert_eq!(body["id"], expected);
        assert!(body.get("result").is_some(), "id {raw} should not be rejected");
    }
}

#[tokio::test]
async fn initialize_without_id_answers_with_null_id() {
    let req = post_mcp()
        .body(Body::from(r#"{"method":"initialize"}"#))
        .expect("req");
    let resp = app(SecretPolicy::Enforced("s3cret".into()))
        .oneshot(req)
        .await
        .expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["jsonrpc"], "2.0");
    assert!(body["id"].is_null());
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn tools_list_skips_secret_check() {
    let req = post_mcp()
        .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#))
        .expect("req");
    let resp = app(SecretPolicy::Enforced("s3cret".into()))
        .oneshot(req)
        .await
        .expect("resp");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn tools_call_missing_secret_is_401() {
    let (state, connector) = make_state(SecretPolicy::Enforced("s3cret".into()));
    let req = with_sf_headers(post_mcp())
        .body(Body::from(QUERY_CALL))
        .expect("req");
    let resp = build_router(state).oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 401);
    let body = body_json(resp).await;
    assert_eq!(body["id"], "abc");
    assert_eq!(body["error"]["code"], -32001);
    assert_eq!(body["error"]["message"], "Missing x-secret-key header");
    assert_eq!(connector.logins.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn tools_call_wrong_secret_is_401() {
    let req = with_sf_headers(post_mcp())
        .header("x-secret-key", "guess")
        .body(Body::from(QUERY_CALL))
        .expect("req");
    let resp = app(SecretPolicy::Enforced("s3cret".into()))
        .oneshot(req)
        .await
        .expect("resp");
    assert_eq!(resp.status(), 401);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["message"], "Invalid secret key");
}

#[tokio::test]
async fn tools_call_with_secret_returns_pretty_result() {
    let (state, connector) = make_state(SecretPolicy::Enforced("s3cret".into()));
    let req = with_sf_headers(post_mcp())
        .header("x-secret-key", "s3cret")
        .body(Body::from(QUERY_CALL))
        .expect("req");
    let resp = build_router(state).oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["id"], "abc");
    assert_eq!(body["result"]["isError"], false);
    let text = body["result"]["content"][0]["text"].as_str().expect("text");
    assert!(text.contains("\n  \"done\": true"));
    assert_eq!(connector.logins.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn permissive_policy_allows_tools_call() {
    let req = with_sf_headers(post_mcp())
        .body(Body::from(QUERY_CALL))
        .expect("req");
    let resp = app(SecretPolicy::Permissive).oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert!(body.get("result").is_some());
}

#[tokio::test]
async fn tools_call_without_sf_headers_is_invalid_params() {
    let (state, connector) = make_state(SecretPolicy::Disabled);
    let req = post_mcp()
        .header("x-sf-username", "user@example.com")
        .body(Body::from(QUERY_CALL))
        .expect("req");
    let resp = build_router(state).oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], -32602);
    assert_eq!(connector.logins.load(Ordering::SeqCst), 0);
}
