#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use specguard::contract::{parse_contract, DocFormat, FileSource, StaticSource};
use specguard::runtime_config::RuntimeConfig;
use specguard::server::{ContractService, HandlerResponse, ParsedRequest};
use specguard::validator::{EnforcementError, ValidationError};
use std::sync::Arc;

const DOC: &str = r#"swagger: "2.0"
info:
  title: Hello API
  version: "1.0.0"
schemes:
  - http
  - https
paths:
  /hello:
    get:
      produces:
        - application/json
      parameters:
        - name: name
          in: query
          required: true
          type: string
          minLength: 1
      responses:
        "200":
          description: OK
          schema:
            type: object
            required: [hello]
            properties:
              hello: { type: string }
"#;

type Handler = fn(&ParsedRequest) -> anyhow::Result<HandlerResponse>;

fn service(handler: Handler) -> ContractService<Handler> {
    let contract = parse_contract(DOC, DocFormat::Yaml).unwrap();
    ContractService::new(
        Arc::new(StaticSource::new(contract)),
        handler,
        RuntimeConfig::permissive(),
    )
}

fn hello_request(name: Option<&str>) -> ParsedRequest {
    let mut req = ParsedRequest {
        method: "GET".to_string(),
        path: "/hello".to_string(),
        ..ParsedRequest::default()
    };
    if let Some(name) = name {
        req.query_params.insert("name".to_string(), name.to_string());
    }
    req
}

fn hello(req: &ParsedRequest) -> anyhow::Result<HandlerResponse> {
    let name = req.query_param("name").unwrap_or("world");
    Ok(HandlerResponse::json(200, json!({ "hello": name })))
}

#[test]
fn test_conformant_exchange_passes_through_unchanged() {
    let svc = service(hello);
    let response = svc.enforce(&hello_request(Some("alice"))).unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({ "hello": "alice" }));
    assert_eq!(response.header("content-type"), Some("application/json"));
}

#[test]
fn test_missing_parameter_never_reaches_handler() {
    fn explode(_req: &ParsedRequest) -> anyhow::Result<HandlerResponse> {
        panic!("handler must not run on an invalid request");
    }
    let svc = service(explode);
    let err = svc.enforce(&hello_request(None)).unwrap_err();
    assert_eq!(err.status_code(), 400);
    let body = err.to_body();
    assert_eq!(body["message"], "Request has invalid parameter(s)");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["name"], "name");
}

#[test]
fn test_unknown_route_and_method_error_bodies() {
    let svc = service(hello);

    let mut missing = hello_request(Some("alice"));
    missing.path = "/nope".to_string();
    let err = svc.enforce(&missing).unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_body()["message"], "Route /nope not found");

    let mut wrong_method = hello_request(Some("alice"));
    wrong_method.method = "POST".to_string();
    let err = svc.enforce(&wrong_method).unwrap_err();
    assert_eq!(err.status_code(), 405);
    assert_eq!(err.to_body()["allowedMethods"], json!(["get"]));
}

#[test]
fn test_handler_content_type_violation_is_500() {
    fn csv(_req: &ParsedRequest) -> anyhow::Result<HandlerResponse> {
        Ok(HandlerResponse::new(200).with_header("Content-Type", "text/csv"))
    }
    let svc = service(csv);
    let err = svc.enforce(&hello_request(Some("alice"))).unwrap_err();
    assert_eq!(err.status_code(), 500);
    match err {
        EnforcementError::Validation(ValidationError::InvalidContentType { content_type }) => {
            assert_eq!(content_type, "text/csv");
        }
        other => panic!("expected InvalidContentType, got {other:?}"),
    }
}

#[test]
fn test_handler_error_becomes_generic_500() {
    fn failing(_req: &ParsedRequest) -> anyhow::Result<HandlerResponse> {
        Err(anyhow::anyhow!("backend exploded"))
    }
    let svc = service(failing);
    let err = svc.enforce(&hello_request(Some("alice"))).unwrap_err();
    assert_eq!(err.status_code(), 500);
    let body = err.to_body();
    assert_eq!(body["message"], "Service failed while producing a response");
    assert!(body["detail"].as_str().unwrap().contains("backend exploded"));
}

#[test]
fn test_handler_panic_becomes_generic_500() {
    fn panicking(_req: &ParsedRequest) -> anyhow::Result<HandlerResponse> {
        panic!("boom");
    }
    let svc = service(panicking);
    let err = svc.enforce(&hello_request(Some("alice"))).unwrap_err();
    assert!(matches!(err, EnforcementError::Handler(_)));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn test_unresolvable_contract_source_is_500() {
    let svc = ContractService::new(
        Arc::new(FileSource::new("/does/not/exist.yaml")),
        hello as Handler,
        RuntimeConfig::permissive(),
    );
    let err = svc.enforce(&hello_request(Some("alice"))).unwrap_err();
    assert!(matches!(err, EnforcementError::SchemaResolution(_)));
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_body()["message"], "Failed to resolve contract document");
}

#[test]
fn test_strict_mode_scheme_rejection_through_pipeline() {
    let contract = parse_contract(
        r#"swagger: "2.0"
info: { title: Locked API, version: "1.0.0" }
schemes: [https]
paths:
  /hello:
    get:
      responses:
        "200": { description: OK }
"#,
        DocFormat::Yaml,
    )
    .unwrap();
    let svc = ContractService::new(
        Arc::new(StaticSource::new(contract)),
        hello as Handler,
        RuntimeConfig::strict(),
    );
    let err = svc.enforce(&hello_request(Some("alice"))).unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert_eq!(err.to_body()["allowedSchemes"], json!(["https"]));
}
