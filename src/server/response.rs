use crate::validator::EnforcementError;
use may_minihttp::Response;
use serde_json::Value;
use std::collections::HashMap;

/// What a wrapped handler produces: status, headers and a JSON body.
///
/// The enforcer delivers it to the wire unchanged when the exchange
/// validates; it never rewrites a conforming response.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl HandlerResponse {
    pub fn new(status: u16) -> Self {
        HandlerResponse {
            status,
            headers: HashMap::new(),
            body: Value::Null,
        }
    }

    /// A JSON response with the content type already set.
    pub fn json(status: u16, body: Value) -> Self {
        HandlerResponse {
            status,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Get a header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a handler's response onto the wire.
pub fn write_handler_response(res: &mut Response, hr: &HandlerResponse) {
    res.status_code(hr.status as usize, status_reason(hr.status));
    let mut has_content_type = false;
    for (name, value) in &hr.headers {
        if name.eq_ignore_ascii_case("content-type") {
            has_content_type = true;
        }
        // may_minihttp takes header lines by 'static reference
        let line = format!("{name}: {value}").into_boxed_str();
        res.header(Box::leak(line));
    }
    match &hr.body {
        Value::String(s) => {
            if !has_content_type {
                res.header("Content-Type: text/plain");
            }
            res.body_vec(s.clone().into_bytes());
        }
        other => {
            if !has_content_type {
                res.header("Content-Type: application/json");
            }
            res.body_vec(serde_json::to_vec(other).unwrap_or_default());
        }
    }
}

/// Write a JSON error body with the given status.
pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

/// The single error-to-wire translation point.
///
/// Every pipeline failure, whatever stage raised it, reaches the client
/// through here; no validation stage writes to the response directly.
pub fn write_enforcement_error(res: &mut Response, err: &EnforcementError) {
    write_json_error(res, err.status_code(), err.to_body());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(405), "Method Not Allowed");
        assert_eq!(status_reason(418), "OK");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let hr = HandlerResponse::json(200, json!({}));
        assert_eq!(hr.header("content-type"), Some("application/json"));
        assert_eq!(hr.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(hr.header("x-missing"), None);
    }
}
