use super::error::{ParameterError, ValidationError};
use crate::contract::{ParameterLocation, ParameterMeta};
use crate::server::ParsedRequest;
use serde_json::Value;
use tracing::debug;

/// Validate every declared parameter against the request.
///
/// All failures are collected before reporting: a request with three bad
/// parameters gets one 400 carrying three entries, never a partial verdict.
/// Path-located parameters are skipped — literal path matching produces no
/// captures to validate against.
pub fn validate_parameters(
    params: &[ParameterMeta],
    req: &ParsedRequest,
) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    for param in params {
        let raw = match param.location {
            ParameterLocation::Query => req.query_param(&param.name),
            ParameterLocation::Header => req.header(&param.name),
            ParameterLocation::Path => {
                debug!(name = %param.name, "no captures under literal path matching, skipping");
                continue;
            }
        };
        match raw {
            None => {
                if param.required {
                    errors.push(ParameterError {
                        name: param.name.clone(),
                        location: param.location.to_string(),
                        message: format!("required {} parameter is missing", param.location),
                    });
                }
            }
            Some(raw) => {
                let schema = param.schema();
                let value = decode_param_value(raw, schema.as_ref(), param.collection_format());
                if let Some(schema) = &schema {
                    check_against_schema(param, schema, &value, &mut errors);
                }
            }
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::invalid_parameter(errors))
    }
}

fn check_against_schema(
    param: &ParameterMeta,
    schema: &Value,
    value: &Value,
    errors: &mut Vec<ParameterError>,
) {
    let validator = match jsonschema::validator_for(schema) {
        Ok(v) => v,
        Err(err) => {
            errors.push(ParameterError {
                name: param.name.clone(),
                location: param.location.to_string(),
                message: format!("parameter declaration is not a valid schema: {err}"),
            });
            return;
        }
    };
    for err in validator.iter_errors(value) {
        errors.push(ParameterError {
            name: param.name.clone(),
            location: param.location.to_string(),
            message: err.to_string(),
        });
    }
}

/// Coerce a raw parameter string into the JSON type its schema declares.
///
/// Values arrive as strings; the schema decides whether `"42"` means the
/// number 42. Arrays are split by the declared `collectionFormat` (`csv`
/// default, `ssv`, `tsv`, `pipes`) with each element coerced by the `items`
/// schema. Anything that fails to coerce stays a string so schema
/// validation reports the mismatch.
pub fn decode_param_value(
    value: &str,
    schema: Option<&Value>,
    collection_format: Option<&str>,
) -> Value {
    fn convert_primitive(val: &str, schema: Option<&Value>) -> Value {
        if let Some(ty) = schema.and_then(|s| s.get("type").and_then(Value::as_str)) {
            match ty {
                "integer" => val
                    .parse::<i64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                "number" => val
                    .parse::<f64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                "boolean" => val
                    .parse::<bool>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                _ => Value::String(val.to_string()),
            }
        } else {
            Value::String(val.to_string())
        }
    }

    match schema.and_then(|s| s.get("type").and_then(Value::as_str)) {
        Some("array") => {
            let items_schema = schema.and_then(|s| s.get("items"));
            let delim = match collection_format.unwrap_or("csv") {
                "ssv" => ' ',
                "tsv" => '\t',
                "pipes" => '|',
                _ => ',',
            };
            let parts = value
                .split(delim)
                .filter(|s| !s.is_empty())
                .map(|p| convert_primitive(p.trim(), items_schema))
                .collect::<Vec<_>>();
            Value::Array(parts)
        }
        Some("object") => serde_json::from_str(value).unwrap_or(Value::String(value.to_string())),
        _ => convert_primitive(value, schema),
    }
}
