//! Enforcement-mode configuration.
//!
//! Scheme enforcement is the one behavior that differs between deployments:
//! in production a request arriving over a scheme the contract does not
//! declare is rejected, while local development (plain-HTTP servers behind
//! no proxy) would find that rejection useless. The mode is an explicit
//! value threaded into the pipeline at construction time; nothing in the
//! pipeline reads the environment on its own.
//!
//! `RuntimeConfig::from_env()` exists for binaries that want the
//! conventional `SPECGUARD_MODE=strict|permissive` switch.

use std::env;
use std::str::FromStr;

/// Whether scheme mismatches are rejected or merely logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnforcementMode {
    /// Reject requests whose effective scheme the contract does not declare.
    Strict,
    /// Log scheme mismatches and let the request proceed.
    #[default]
    Permissive,
}

impl FromStr for EnforcementMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" | "production" => Ok(EnforcementMode::Strict),
            "permissive" | "development" => Ok(EnforcementMode::Permissive),
            other => Err(format!("unknown enforcement mode `{other}`")),
        }
    }
}

impl std::fmt::Display for EnforcementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnforcementMode::Strict => write!(f, "strict"),
            EnforcementMode::Permissive => write!(f, "permissive"),
        }
    }
}

/// Configuration handed to the validation pipeline at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeConfig {
    pub mode: EnforcementMode,
}

impl RuntimeConfig {
    pub fn strict() -> Self {
        RuntimeConfig {
            mode: EnforcementMode::Strict,
        }
    }

    pub fn permissive() -> Self {
        RuntimeConfig {
            mode: EnforcementMode::Permissive,
        }
    }

    /// Read `SPECGUARD_MODE` from the environment, defaulting to permissive.
    pub fn from_env() -> Self {
        let mode = env::var("SPECGUARD_MODE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        RuntimeConfig { mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("strict".parse::<EnforcementMode>().unwrap(), EnforcementMode::Strict);
        assert_eq!("Production".parse::<EnforcementMode>().unwrap(), EnforcementMode::Strict);
        assert_eq!("permissive".parse::<EnforcementMode>().unwrap(), EnforcementMode::Permissive);
        assert!("sideways".parse::<EnforcementMode>().is_err());
    }
}
