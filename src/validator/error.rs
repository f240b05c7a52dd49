use serde::Serialize;
use serde_json::{json, Value};

/// One failed parameter check, reported inside a 400 body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterError {
    pub name: String,
    pub location: String,
    pub message: String,
}

/// The closed set of contract violations a request or response can commit.
///
/// Values are immutable once constructed; build them through the factory
/// functions below. Each variant carries exactly the detail its wire body
/// needs.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    RouteNotFound {
        path: String,
    },
    MethodNotAllowed {
        method: String,
        allowed: Vec<String>,
    },
    InvalidProtocol {
        scheme: String,
        allowed: Vec<String>,
    },
    InvalidParameter {
        errors: Vec<ParameterError>,
    },
    InvalidContentType {
        content_type: String,
    },
}

impl ValidationError {
    pub fn route_not_found(path: impl Into<String>) -> Self {
        ValidationError::RouteNotFound { path: path.into() }
    }

    pub fn method_not_allowed(method: impl Into<String>, allowed: Vec<String>) -> Self {
        ValidationError::MethodNotAllowed {
            method: method.into(),
            allowed,
        }
    }

    pub fn invalid_protocol(scheme: impl Into<String>, allowed: Vec<String>) -> Self {
        ValidationError::InvalidProtocol {
            scheme: scheme.into(),
            allowed,
        }
    }

    pub fn invalid_parameter(errors: Vec<ParameterError>) -> Self {
        ValidationError::InvalidParameter { errors }
    }

    pub fn invalid_content_type(content_type: impl Into<String>) -> Self {
        ValidationError::InvalidContentType {
            content_type: content_type.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ValidationError::RouteNotFound { .. } => 404,
            ValidationError::MethodNotAllowed { .. } => 405,
            ValidationError::InvalidProtocol { .. } => 403,
            ValidationError::InvalidParameter { .. } => 400,
            ValidationError::InvalidContentType { .. } => 500,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationError::RouteNotFound { path } => format!("Route {path} not found"),
            ValidationError::MethodNotAllowed { method, allowed } => format!(
                "Method {method} not allowed. Allowed methods: {}.",
                allowed.join(", ")
            ),
            ValidationError::InvalidProtocol { scheme, allowed } => format!(
                "Protocol {scheme} not allowed. Allowed protocols: {}.",
                allowed.join(", ")
            ),
            ValidationError::InvalidParameter { .. } => "Request has invalid parameter(s)".to_string(),
            ValidationError::InvalidContentType { content_type } => {
                format!("Service produced an invalid content type ({content_type})")
            }
        }
    }

    /// The JSON body the error responder serializes onto the wire.
    pub fn to_body(&self) -> Value {
        match self {
            ValidationError::MethodNotAllowed { allowed, .. } => json!({
                "message": self.message(),
                "allowedMethods": allowed,
            }),
            ValidationError::InvalidProtocol { allowed, .. } => json!({
                "message": self.message(),
                "allowedSchemes": allowed,
            }),
            ValidationError::InvalidParameter { errors } => json!({
                "message": self.message(),
                "errors": errors,
            }),
            _ => json!({ "message": self.message() }),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Everything the pipeline can fail with.
///
/// Contract violations keep their taxonomy statuses; resolution and handler
/// failures are not part of the taxonomy and surface as generic 500s. All
/// three reach the wire through the single error responder.
#[derive(Debug)]
pub enum EnforcementError {
    Validation(ValidationError),
    SchemaResolution(anyhow::Error),
    Handler(anyhow::Error),
}

impl From<ValidationError> for EnforcementError {
    fn from(err: ValidationError) -> Self {
        EnforcementError::Validation(err)
    }
}

impl EnforcementError {
    pub fn status_code(&self) -> u16 {
        match self {
            EnforcementError::Validation(err) => err.status_code(),
            EnforcementError::SchemaResolution(_) | EnforcementError::Handler(_) => 500,
        }
    }

    pub fn to_body(&self) -> Value {
        match self {
            EnforcementError::Validation(err) => err.to_body(),
            EnforcementError::SchemaResolution(err) => json!({
                "message": "Failed to resolve contract document",
                "detail": err.to_string(),
            }),
            EnforcementError::Handler(err) => json!({
                "message": "Service failed while producing a response",
                "detail": err.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EnforcementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnforcementError::Validation(err) => write!(f, "{err}"),
            EnforcementError::SchemaResolution(err) => {
                write!(f, "failed to resolve contract document: {err}")
            }
            EnforcementError::Handler(err) => write!(f, "handler failed: {err}"),
        }
    }
}

impl std::error::Error for EnforcementError {}
