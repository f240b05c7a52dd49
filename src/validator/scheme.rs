use super::error::ValidationError;
use crate::contract::Contract;
use crate::runtime_config::{EnforcementMode, RuntimeConfig};
use crate::server::ParsedRequest;
use tracing::debug;

/// Check the request's effective scheme against the contract's declared set.
///
/// An empty `schemes` list means the document does not constrain transport
/// and the check is skipped. Mismatches only reject under strict mode; in
/// permissive mode they are logged and allowed, which is what local
/// plain-HTTP development wants.
pub fn validate_scheme(
    contract: &Contract,
    req: &ParsedRequest,
    config: &RuntimeConfig,
) -> Result<(), ValidationError> {
    if contract.schemes.is_empty() {
        debug!("contract declares no schemes, skipping scheme check");
        return Ok(());
    }
    let scheme = req.effective_scheme();
    if contract.schemes.iter().any(|s| s == scheme) {
        return Ok(());
    }
    match config.mode {
        EnforcementMode::Strict => Err(ValidationError::invalid_protocol(
            scheme,
            contract.schemes.clone(),
        )),
        EnforcementMode::Permissive => {
            debug!(scheme, "scheme not declared by contract, permissive mode allows it");
            Ok(())
        }
    }
}
