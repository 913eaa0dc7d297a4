use std::fmt;

use crate::config::ConfigError;
use crate::ledger::LedgerImportError;

/// Aggregate error for binary callers composing the engine with file
/// loading. The scoring engine itself never fails; these arise only at
/// the loading boundary.
#[derive(Debug)]
pub enum TrustCoreError {
    Config(ConfigError),
    Import(LedgerImportError),
    Io(std::io::Error),
}

impl fmt::Display for TrustCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustCoreError::Config(err) => write!(f, "configuration error: {}", err),
            TrustCoreError::Import(err) => write!(f, "ledger import error: {}", err),
            TrustCoreError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for TrustCoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrustCoreError::Config(err) => Some(err),
            TrustCoreError::Import(err) => Some(err),
            TrustCoreError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for TrustCoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LedgerImportError> for TrustCoreError {
    fn from(value: LedgerImportError) -> Self {
        Self::Import(value)
    }
}

impl From<std::io::Error> for TrustCoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
