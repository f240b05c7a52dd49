//! # specguard
//!
//! **specguard** is an OpenAPI/Swagger-driven contract enforcement layer
//! for `may`-based HTTP services: it wraps a handler and verifies that
//! every exchange conforms to a declared contract document, before and
//! after the handler runs.
//!
//! ## Overview
//!
//! A contract document declares the paths, methods, parameters, allowed
//! transport schemes and producible content types of an API. For each
//! request, the enforcer:
//!
//! 1. resolves the contract from its [`SchemaSource`](contract::SchemaSource)
//! 2. checks the effective scheme against the declared `schemes`
//! 3. matches the path (exact string equality, no templating)
//! 4. resolves the method to an operation
//! 5. validates the declared query and header parameters
//! 6. invokes the wrapped handler
//! 7. checks the emitted content type against the operation's `produces`
//! 8. selects the declared response for the status code (advisory only)
//!
//! Any failure short-circuits to a structured JSON error: 404 for unknown
//! routes, 405 for unknown methods, 403 for scheme violations in strict
//! mode, 400 for bad parameters, 500 when the handler itself broke the
//! contract. Conforming responses are delivered unchanged.
//!
//! ## Modules
//!
//! - **[`contract`]** - document model, loading, dereferencing, sources
//! - **[`validator`]** - the validation pipeline and error taxonomy
//! - **[`server`]** - `may_minihttp` service, request/response types
//! - **[`handler`]** - the wrapped-handler trait
//! - **[`runtime_config`]** - strict vs permissive enforcement
//!
//! ## Quick Start
//!
//! ```no_run
//! use specguard::contract::FileSource;
//! use specguard::runtime_config::RuntimeConfig;
//! use specguard::server::{ContractService, HandlerResponse, HttpServer, ParsedRequest};
//! use std::sync::Arc;
//!
//! fn hello(req: &ParsedRequest) -> anyhow::Result<HandlerResponse> {
//!     let name = req.query_param("name").unwrap_or("world");
//!     Ok(HandlerResponse::json(200, serde_json::json!({ "hello": name })))
//! }
//!
//! let source = Arc::new(FileSource::new("doc/hello.yaml"));
//! let service = ContractService::new(source, hello, RuntimeConfig::from_env());
//! let handle = HttpServer(service).start("0.0.0.0:8080").unwrap();
//! handle.join().unwrap();
//! ```
//!
//! ## Scope
//!
//! Path matching is literal: `/users/{id}` templates are not expanded.
//! Response bodies are never inspected by the core; the
//! [`ResponseBodyChecker`](validator::ResponseBodyChecker) trait is the
//! attachment point for an external checker, and its verdict is advisory.
//! The baseline [`FileSource`](contract::FileSource) re-reads the document
//! per request; wrap it in [`CachedSource`](contract::CachedSource) when
//! that matters.

pub mod contract;
pub mod handler;
pub mod runtime_config;
pub mod server;
pub mod validator;

pub use contract::{
    load_contract, CachedSource, Contract, FileSource, SchemaSource, StaticSource, UrlSource,
};
pub use handler::ContractHandler;
pub use runtime_config::{EnforcementMode, RuntimeConfig};
pub use server::{ContractService, HandlerResponse, HttpServer, ParsedRequest, ServerHandle};
pub use validator::{EnforcementError, ParameterError, ResponseBodyChecker, ValidationError};
