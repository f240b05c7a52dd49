use serde_json::Value;
use tracing::warn;

/// Cycle guard for self-referential definitions.
const MAX_REF_DEPTH: usize = 16;

/// Expand every internal `$ref` in a raw document value in place.
///
/// References are same-document JSON pointers (`#/definitions/Greeting`,
/// `#/components/schemas/Pet`, or any other fragment). Targets are expanded
/// recursively before substitution so no unresolved internal reference
/// survives. A dangling pointer is left untouched and logged; resolving
/// references across documents belongs to an external dereferencer.
pub fn expand_refs(doc: &mut Value) {
    let root = doc.clone();
    expand_in_place(doc, &root, 0);
}

fn expand_in_place(value: &mut Value, root: &Value, depth: usize) {
    if depth > MAX_REF_DEPTH {
        return;
    }
    match value {
        Value::Object(obj) => {
            if let Some(ref_path) = obj.get("$ref").and_then(Value::as_str) {
                match lookup(root, ref_path) {
                    Some(target) => {
                        let mut resolved = target.clone();
                        expand_in_place(&mut resolved, root, depth + 1);
                        *value = resolved;
                        return;
                    }
                    None => {
                        warn!(reference = %ref_path, "unresolvable reference left in document");
                    }
                }
            }
            for child in obj.values_mut() {
                expand_in_place(child, root, depth);
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                expand_in_place(child, root, depth);
            }
        }
        _ => {}
    }
}

fn lookup<'a>(root: &'a Value, ref_path: &str) -> Option<&'a Value> {
    let pointer = ref_path.strip_prefix('#')?;
    root.pointer(pointer)
}
