use super::deref::expand_refs;
use super::types::Contract;
use anyhow::Context;
use std::path::Path;

const METHODS: [&str; 8] = ["get", "post", "put", "delete", "patch", "options", "head", "trace"];

/// Serialization of a contract document on disk or over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Yaml,
    Json,
}

impl DocFormat {
    /// Pick the format from a file path or URL, defaulting to YAML.
    pub fn from_path(path: &str) -> Self {
        if path.ends_with(".json") {
            DocFormat::Json
        } else {
            DocFormat::Yaml
        }
    }
}

/// Drop every path-item key that is not an HTTP method.
///
/// Path items may carry `summary`, `description`, or vendor extensions next
/// to their operations; only methods survive into the typed model, so a 405
/// allowed-methods listing never names a documentation key. Method keys are
/// normalized to lowercase, keeping declaration order.
fn scrub_path_items(doc: &mut serde_json::Value) {
    let Some(serde_json::Value::Object(paths)) = doc.get_mut("paths") else {
        return;
    };
    for item in paths.values_mut() {
        if let serde_json::Value::Object(obj) = item {
            let methods: Vec<(String, serde_json::Value)> = obj
                .iter()
                .filter(|(k, _)| METHODS.contains(&k.to_ascii_lowercase().as_str()))
                .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
                .collect();
            *obj = methods.into_iter().collect();
        }
    }
}

/// Parse contract text into a fully dereferenced [`Contract`].
pub fn parse_contract(content: &str, format: DocFormat) -> anyhow::Result<Contract> {
    let mut doc: serde_json::Value = match format {
        DocFormat::Yaml => serde_yaml::from_str(content)?,
        DocFormat::Json => serde_json::from_str(content)?,
    };
    scrub_path_items(&mut doc);
    expand_refs(&mut doc);
    let contract = serde_json::from_value(doc)?;
    Ok(contract)
}

/// Load a contract document from a file, choosing YAML or JSON by extension.
pub fn load_contract(path: impl AsRef<Path>) -> anyhow::Result<Contract> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read contract document {}", path.display()))?;
    let format = DocFormat::from_path(&path.to_string_lossy());
    parse_contract(&content, format)
        .with_context(|| format!("failed to parse contract document {}", path.display()))
}
