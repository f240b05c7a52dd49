use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a declared parameter is carried on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Header => write!(f, "header"),
        }
    }
}

/// One declared parameter of an operation.
///
/// Everything beyond name, location and required-ness is captured verbatim
/// into `constraints` so the declaration doubles as the JSON Schema fragment
/// the value is validated against (`type`, `format`, `enum`, bounds, and the
/// `collectionFormat` delimiter hint all live there).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterMeta {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub constraints: Map<String, Value>,
}

impl ParameterMeta {
    /// The JSON Schema fragment for this parameter's value.
    ///
    /// Declarations that nest their constraints under a `schema` key are
    /// honored; otherwise the inline constraint keywords are the schema.
    pub fn schema(&self) -> Option<Value> {
        if let Some(nested @ Value::Object(_)) = self.constraints.get("schema") {
            return Some(nested.clone());
        }
        if self.constraints.is_empty() {
            None
        } else {
            Some(Value::Object(self.constraints.clone()))
        }
    }

    /// Delimiter hint for array-valued parameters (`csv`, `ssv`, `tsv`, `pipes`).
    pub fn collection_format(&self) -> Option<&str> {
        self.constraints.get("collectionFormat").and_then(Value::as_str)
    }
}

/// The declared response for one status code (or `default`).
///
/// `schema` describes the expected body shape. It is selected and handed to
/// an attached body checker; the core itself never inspects bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseSpec {
    pub description: Option<String>,
    pub schema: Option<Value>,
}

/// One HTTP method on one path: its parameters, the content types it may
/// produce, and its responses keyed by status-code string or `default`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub parameters: Vec<ParameterMeta>,
    pub produces: Vec<String>,
    pub responses: IndexMap<String, ResponseSpec>,
}

/// Lowercase HTTP method name to operation, in declaration order.
pub type PathItem = IndexMap<String, Operation>;

/// A fully dereferenced contract document.
///
/// By the time a `Contract` exists, every internal `$ref` has been expanded
/// and path items hold nothing but operations, so all nested structure is
/// directly inspectable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contract {
    pub schemes: Vec<String>,
    pub paths: IndexMap<String, PathItem>,
}

impl Contract {
    pub fn path_item(&self, path: &str) -> Option<&PathItem> {
        self.paths.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_constraints_are_the_schema() {
        let param: ParameterMeta = serde_json::from_value(json!({
            "name": "limit",
            "in": "query",
            "required": true,
            "type": "integer",
            "minimum": 1
        }))
        .unwrap();
        assert_eq!(param.name, "limit");
        assert_eq!(param.location, ParameterLocation::Query);
        assert!(param.required);
        let schema = param.schema().unwrap();
        assert_eq!(schema["type"], "integer");
        assert_eq!(schema["minimum"], 1);
    }

    #[test]
    fn test_nested_schema_key_wins() {
        let param: ParameterMeta = serde_json::from_value(json!({
            "name": "id",
            "in": "path",
            "schema": { "type": "string" }
        }))
        .unwrap();
        assert_eq!(param.schema().unwrap(), json!({ "type": "string" }));
        assert!(!param.required);
    }
}
