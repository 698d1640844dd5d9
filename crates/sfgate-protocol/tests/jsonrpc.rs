//! Integration tests for JSON-RPC 2.0 envelope types.

use sfgate_protocol::{
    error_codes, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse, RequestId,
};
use serde_json::json;

#[test]
fn request_serialization() {
    let req = JsonRpcRequest::new(RequestId::Number(1.into()), "tools/list", None);
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("\"jsonrpc\":\"2.0\""));
    assert!(json.contains("\"method\":\"tools/list\""));
}

#[test]
fn response_roundtrip() {
    let resp = JsonRpcResponse::success(
        RequestId::String("abc".into()),
        serde_json::json!({"tools": []}),
    );
    let json = serde_json::to_string(&resp).unwrap();
    let back: JsonRpcResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, RequestId::String("abc".into()));
}

#[test]
fn error_response_structure() {
    let err = JsonRpcErrorResponse::error(
        RequestId::Number(1.into()),
        error_codes::METHOD_NOT_FOUND,
        "method not found",
    );
    assert_eq!(err.error.code, -32601);
    assert_eq!(err.error.message, "method not found");
    assert!(err.error.data.is_none());
}

#[test]
fn error_data_omitted_from_wire() {
    let err = JsonRpcErrorResponse::error(RequestId::Null, error_codes::AUTH_ERROR, "nope");
    let v = serde_json::to_value(&err).expect("ser");
    assert!(v["error"].get("data").is_none());
    assert!(v["id"].is_null());
}

#[test]
fn all_error_codes_are_negative() {
    for code in [
        error_codes::PARSE_ERROR,
        error_codes::INVALID_REQUEST,
        error_codes::METHOD_NOT_FOUND,
        error_codes::INVALID_PARAMS,
        error_codes::INTERNAL_ERROR,
        error_codes::AUTH_ERROR,
    ] {
        assert!(code < 0, "{code} must be negative");
    }
}

#[test]
fn request_without_version_or_id_is_accepted() {
    let req: JsonRpcRequest =
        serde_json::from_value(json!({"method": "tools/list", "params": {}})).expect("de");
    assert_eq!(req.jsonrpc, "2.0");
    assert_eq!(req.id, RequestId::Null);
}

#[test]
fn explicit_null_id_is_null() {
    let req: JsonRpcRequest =
        serde_json::from_value(json!({"id": null, "method": "initialize"})).expect("de");
    assert_eq!(req.id, RequestId::Null);
}

#[test]
fn request_id_number_vs_string() {
    assert_ne!(RequestId::Number(1.into()), RequestId::String("1".into()));
    assert_eq!(RequestId::Number(42.into()), RequestId::Number(42.into()));
}
