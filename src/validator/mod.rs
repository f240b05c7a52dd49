//! The validation engine: request-side checks in pipeline order, the
//! response-side checks that run after the handler, and the error taxonomy
//! both report through.

mod error;
mod params;
mod response;
mod route;
mod scheme;

pub use error::{EnforcementError, ParameterError, ValidationError};
pub use params::{decode_param_value, validate_parameters};
pub use response::{
    base_content_type, select_response_schema, validate_response_type, ResponseBodyChecker,
};
pub use route::{match_path, resolve_method};
pub use scheme::validate_scheme;

use crate::contract::{Contract, Operation};
use crate::runtime_config::RuntimeConfig;
use crate::server::ParsedRequest;

/// Run the request-side pipeline: scheme, path, method, parameters.
///
/// Fails fast with the first applicable error; on success returns the
/// matched operation so response validation can run against the same
/// declaration. No stage mutates the request, so validating the same
/// request twice yields the same verdict.
pub fn validate_request<'c>(
    contract: &'c Contract,
    req: &ParsedRequest,
    config: &RuntimeConfig,
) -> Result<&'c Operation, ValidationError> {
    validate_scheme(contract, req, config)?;
    let item = match_path(contract, &req.path)?;
    let operation = resolve_method(item, &req.method)?;
    validate_parameters(&operation.parameters, req)?;
    Ok(operation)
}
