use std::fmt;

use crate::telemetry::TelemetryError;
use trust_core::error::TrustCoreError;

#[derive(Debug)]
pub enum AppError {
    Core(TrustCoreError),
    Telemetry(TelemetryError),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Core(err) => write!(f, "engine error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Core(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Io(err) => Some(err),
        }
    }
}

impl From<TrustCoreError> for AppError {
    fn from(value: TrustCoreError) -> Self {
        Self::Core(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<trust_core::config::ConfigError> for AppError {
    fn from(value: trust_core::config::ConfigError) -> Self {
        Self::Core(TrustCoreError::Config(value))
    }
}

impl From<trust_core::ledger::LedgerImportError> for AppError {
    fn from(value: trust_core::ledger::LedgerImportError) -> Self {
        Self::Core(TrustCoreError::Import(value))
    }
}
