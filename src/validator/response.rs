use super::error::ValidationError;
use crate::contract::{Operation, ResponseSpec};
use crate::server::HandlerResponse;
use serde_json::Value;
use tracing::{debug, warn};

/// The base media type of a content-type header value: parameters after
/// `;` dropped, whitespace trimmed, lowercased.
pub fn base_content_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Check the handler's emitted content type against the operation's
/// `produces` set.
///
/// A violation is a handler bug, not a client mistake, so it reports as a
/// 500. An empty `produces` set leaves the content type unconstrained.
pub fn validate_response_type(
    operation: &Operation,
    response: &HandlerResponse,
) -> Result<(), ValidationError> {
    if operation.produces.is_empty() {
        debug!("operation declares no produces set, skipping content type check");
        return Ok(());
    }
    let actual = response
        .header("content-type")
        .map(base_content_type)
        .unwrap_or_default();
    let allowed = operation
        .produces
        .iter()
        .any(|p| base_content_type(p) == actual);
    if allowed {
        Ok(())
    } else {
        Err(ValidationError::invalid_content_type(actual))
    }
}

/// Select the declared response for a status code, falling back to
/// `default`.
///
/// A status no declaration covers is a gap in the document, not a bad
/// exchange: it is logged and the request succeeds. The handler has already
/// run by this point, so everything here is observational.
pub fn select_response_schema<'o>(operation: &'o Operation, status: u16) -> Option<&'o ResponseSpec> {
    let key = status.to_string();
    if let Some(spec) = operation.responses.get(key.as_str()) {
        return Some(spec);
    }
    if let Some(spec) = operation.responses.get("default") {
        debug!(status, "no exact response declaration, using default");
        return Some(spec);
    }
    warn!(status, "no response declaration covers this status code");
    None
}

/// Attachment point for response body checking.
///
/// The enforcer selects the schema but does not inspect bodies itself; an
/// attached checker's verdict is logged and never fails the request.
pub trait ResponseBodyChecker: Send + Sync {
    fn check(&self, schema: &Value, body: &Value) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_content_type() {
        assert_eq!(base_content_type("application/json; charset=utf-8"), "application/json");
        assert_eq!(base_content_type("Text/HTML"), "text/html");
        assert_eq!(base_content_type(""), "");
    }
}
