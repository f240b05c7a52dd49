use super::error::ValidationError;
use crate::contract::{Contract, Operation, PathItem};

/// Resolve the request path to its path item by exact string equality.
///
/// No template expansion is performed: `/users/42` does not match a
/// declared `/users/{id}`. Literal matching is the contract this enforcer
/// implements; templated routing belongs to a router, not to it.
pub fn match_path<'c>(contract: &'c Contract, path: &str) -> Result<&'c PathItem, ValidationError> {
    contract
        .path_item(path)
        .ok_or_else(|| ValidationError::route_not_found(path))
}

/// Resolve the request method (lowercased) to an operation.
///
/// The 405 allowed-methods list reports the path item's keys in their
/// declaration order.
pub fn resolve_method<'c>(item: &'c PathItem, method: &str) -> Result<&'c Operation, ValidationError> {
    let method = method.to_ascii_lowercase();
    item.get(method.as_str()).ok_or_else(|| {
        ValidationError::method_not_allowed(method, item.keys().cloned().collect())
    })
}
