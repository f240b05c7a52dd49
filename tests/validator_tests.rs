#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use specguard::contract::{parse_contract, Contract, DocFormat};
use specguard::runtime_config::RuntimeConfig;
use specguard::server::{HandlerResponse, ParsedRequest};
use specguard::validator::{
    select_response_schema, validate_request, validate_response_type, ValidationError,
};
use std::collections::HashMap;
use std::mem::discriminant;

const DOC: &str = r#"swagger: "2.0"
info:
  title: Widget API
  version: "1.0.0"
schemes:
  - https
paths:
  /widgets:
    put:
      responses:
        "200": { description: OK }
    get:
      produces:
        - application/json
      parameters:
        - name: limit
          in: query
          type: integer
      responses:
        "200":
          description: OK
          schema: { type: object }
    delete:
      responses:
        "204": { description: Gone }
  /widgets/special:
    get:
      produces:
        - application/json
        - text/csv
      responses:
        "200": { description: OK }
        "404": { description: Missing }
        default:
          description: Fallback
          schema: { type: object }
"#;

fn contract() -> Contract {
    parse_contract(DOC, DocFormat::Yaml).unwrap()
}

fn https_get(path: &str) -> ParsedRequest {
    ParsedRequest {
        method: "GET".to_string(),
        path: path.to_string(),
        secure: true,
        ..ParsedRequest::default()
    }
}

#[test]
fn test_unknown_path_is_route_not_found() {
    let doc = contract();
    let err = validate_request(&doc, &https_get("/gadgets"), &RuntimeConfig::strict()).unwrap_err();
    match &err {
        ValidationError::RouteNotFound { path } => assert_eq!(path, "/gadgets"),
        other => panic!("expected RouteNotFound, got {other:?}"),
    }
    assert_eq!(err.status_code(), 404);
    assert!(err.message().contains("/gadgets"));
}

#[test]
fn test_unknown_method_lists_declared_methods_in_order() {
    let doc = contract();
    let req = ParsedRequest {
        method: "PATCH".to_string(),
        ..https_get("/widgets")
    };
    let err = validate_request(&doc, &req, &RuntimeConfig::strict()).unwrap_err();
    match &err {
        ValidationError::MethodNotAllowed { method, allowed } => {
            assert_eq!(method, "patch");
            assert_eq!(allowed, &vec!["put".to_string(), "get".to_string(), "delete".to_string()]);
        }
        other => panic!("expected MethodNotAllowed, got {other:?}"),
    }
    assert_eq!(err.status_code(), 405);
}

#[test]
fn test_scheme_mismatch_rejected_only_in_strict_mode() {
    let doc = contract();
    let plain = ParsedRequest {
        secure: false,
        ..https_get("/widgets")
    };

    let err = validate_request(&doc, &plain, &RuntimeConfig::strict()).unwrap_err();
    match &err {
        ValidationError::InvalidProtocol { scheme, allowed } => {
            assert_eq!(scheme, "http");
            assert_eq!(allowed, &vec!["https".to_string()]);
        }
        other => panic!("expected InvalidProtocol, got {other:?}"),
    }
    assert_eq!(err.status_code(), 403);

    // the same request proceeds past the scheme check in permissive mode
    assert!(validate_request(&doc, &plain, &RuntimeConfig::permissive()).is_ok());
}

#[test]
fn test_forwarded_proto_counts_as_https() {
    let doc = contract();
    let mut headers = HashMap::new();
    headers.insert("x-forwarded-proto".to_string(), "https".to_string());
    let req = ParsedRequest {
        secure: false,
        headers,
        ..https_get("/widgets")
    };
    assert!(validate_request(&doc, &req, &RuntimeConfig::strict()).is_ok());
}

#[test]
fn test_conformant_request_returns_operation() {
    let doc = contract();
    let mut req = https_get("/widgets");
    req.query_params.insert("limit".to_string(), "10".to_string());
    let op = validate_request(&doc, &req, &RuntimeConfig::strict()).unwrap();
    assert_eq!(op.produces, vec!["application/json"]);
}

#[test]
fn test_response_content_type_outside_produces() {
    let doc = contract();
    let op = validate_request(&doc, &https_get("/widgets"), &RuntimeConfig::strict()).unwrap();

    let ok = HandlerResponse::json(200, json!({}));
    assert!(validate_response_type(op, &ok).is_ok());

    let with_params = HandlerResponse::new(200)
        .with_header("Content-Type", "application/json; charset=utf-8");
    assert!(validate_response_type(op, &with_params).is_ok());

    let html = HandlerResponse::new(200).with_header("Content-Type", "text/html");
    let err = validate_response_type(op, &html).unwrap_err();
    match &err {
        ValidationError::InvalidContentType { content_type } => {
            assert_eq!(content_type, "text/html")
        }
        other => panic!("expected InvalidContentType, got {other:?}"),
    }
    assert_eq!(err.status_code(), 500);

    let headerless = HandlerResponse::new(200);
    assert!(validate_response_type(op, &headerless).is_err());
}

#[test]
fn test_empty_produces_is_unconstrained() {
    let doc = contract();
    let req = ParsedRequest {
        method: "PUT".to_string(),
        ..https_get("/widgets")
    };
    let op = validate_request(&doc, &req, &RuntimeConfig::strict()).unwrap();
    let html = HandlerResponse::new(200).with_header("Content-Type", "text/html");
    assert!(validate_response_type(op, &html).is_ok());
}

#[test]
fn test_response_schema_selection() {
    let doc = contract();
    let op = validate_request(&doc, &https_get("/widgets/special"), &RuntimeConfig::strict())
        .unwrap();

    // exact status wins
    let exact = select_response_schema(op, 404).unwrap();
    assert_eq!(exact.description.as_deref(), Some("Missing"));

    // unknown status falls back to default
    let fallback = select_response_schema(op, 503).unwrap();
    assert_eq!(fallback.description.as_deref(), Some("Fallback"));

    // no exact match and no default is a diagnostic, not a failure
    let plain_op = validate_request(&doc, &https_get("/widgets"), &RuntimeConfig::strict())
        .unwrap();
    assert!(select_response_schema(plain_op, 503).is_none());
}

#[test]
fn test_validation_is_idempotent() {
    let doc = contract();
    let req = ParsedRequest {
        method: "PATCH".to_string(),
        ..https_get("/widgets")
    };
    let config = RuntimeConfig::strict();
    let first = validate_request(&doc, &req, &config).unwrap_err();
    let second = validate_request(&doc, &req, &config).unwrap_err();
    assert_eq!(discriminant(&first), discriminant(&second));
    assert_eq!(first.status_code(), second.status_code());
    assert_eq!(first, second);
}
