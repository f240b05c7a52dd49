use super::request::{parse_request, ParsedRequest};
use super::response::{write_enforcement_error, write_handler_response, HandlerResponse};
use crate::contract::SchemaSource;
use crate::handler::ContractHandler;
use crate::runtime_config::RuntimeConfig;
use crate::validator::{self, EnforcementError, ResponseBodyChecker};
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Wraps a handler and enforces a contract around every exchange.
///
/// Request-side validation runs before the handler; content-type and
/// response-declaration checks run after it. The contract document comes
/// from a [`SchemaSource`] on every request, so the source decides the
/// caching story.
pub struct ContractService<H> {
    source: Arc<dyn SchemaSource>,
    handler: Arc<H>,
    config: RuntimeConfig,
    body_checker: Option<Arc<dyn ResponseBodyChecker>>,
}

impl<H> Clone for ContractService<H> {
    fn clone(&self) -> Self {
        ContractService {
            source: self.source.clone(),
            handler: self.handler.clone(),
            config: self.config,
            body_checker: self.body_checker.clone(),
        }
    }
}

impl<H: ContractHandler> ContractService<H> {
    pub fn new(source: Arc<dyn SchemaSource>, handler: H, config: RuntimeConfig) -> Self {
        ContractService {
            source,
            handler: Arc::new(handler),
            config,
            body_checker: None,
        }
    }

    /// Attach a response body checker. Its verdict is logged, never fatal:
    /// by the time a response exists the handler's side effects have
    /// already happened.
    pub fn with_body_checker(mut self, checker: Arc<dyn ResponseBodyChecker>) -> Self {
        self.body_checker = Some(checker);
        self
    }

    /// Run the full pipeline for one parsed request.
    ///
    /// Resolve the contract, validate the request side, invoke the handler,
    /// then validate the response side. Any failure short-circuits out; the
    /// caller hands it to the error responder.
    pub fn enforce(&self, req: &ParsedRequest) -> Result<HandlerResponse, EnforcementError> {
        let contract = self
            .source
            .resolve()
            .map_err(EnforcementError::SchemaResolution)?;
        let operation = validator::validate_request(&contract, req, &self.config)?;
        let response = invoke(self.handler.as_ref(), req)?;
        validator::validate_response_type(operation, &response)?;
        if let Some(selected) = validator::select_response_schema(operation, response.status) {
            if let (Some(checker), Some(schema)) = (&self.body_checker, &selected.schema) {
                if let Err(err) = checker.check(schema, &response.body) {
                    warn!(
                        status = response.status,
                        error = %err,
                        "response body does not match its declared schema"
                    );
                }
            }
        }
        Ok(response)
    }
}

/// Call the wrapped handler once request-side validation has passed.
///
/// No timeout, no retry. An `Err` or a panic becomes a generic server
/// error on the same responder path as every other failure.
fn invoke<H: ContractHandler>(
    handler: &H,
    req: &ParsedRequest,
) -> Result<HandlerResponse, EnforcementError> {
    match catch_unwind(AssertUnwindSafe(|| handler.handle(req))) {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => Err(EnforcementError::Handler(err)),
        Err(_) => Err(EnforcementError::Handler(anyhow::anyhow!(
            "handler panicked"
        ))),
    }
}

impl<H: ContractHandler> HttpService for ContractService<H> {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        debug!(method = %parsed.method, path = %parsed.path, "enforcing contract");
        match self.enforce(&parsed) {
            Ok(response) => write_handler_response(res, &response),
            Err(err) => write_enforcement_error(res, &err),
        }
        Ok(())
    }
}
