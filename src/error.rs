use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::Symbol;

/// Main error type for the dashboard backend
#[derive(Error, Debug)]
pub enum PulseError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Snapshot errors
    #[error("Missing asset data: {0} is absent from the snapshot")]
    MissingAssetData(Symbol),

    #[error("Invalid snapshot value: {0}")]
    InvalidSnapshotValue(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    // Snapshot generation errors
    #[error("Snapshot feed unavailable: {0}")]
    Feed(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PulseError {
    /// Stable tag used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            PulseError::Config(_) => "config",
            PulseError::MissingAssetData(_) => "missing_asset_data",
            PulseError::InvalidSnapshotValue(_) => "invalid_snapshot_value",
            PulseError::UnknownSymbol(_) => "unknown_symbol",
            PulseError::Feed(_) => "feed_unavailable",
            PulseError::Json(_) => "json",
            PulseError::Io(_) => "io",
            PulseError::Internal(_) => "internal",
        }
    }

    /// HTTP status the api layer reports for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PulseError::MissingAssetData(_)
            | PulseError::InvalidSnapshotValue(_)
            | PulseError::UnknownSymbol(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PulseError::Feed(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias for PulseError
pub type Result<T> = std::result::Result<T, PulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_errors_are_client_errors() {
        let missing = PulseError::MissingAssetData(Symbol::Tlt);
        assert_eq!(missing.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(missing.kind(), "missing_asset_data");
        assert!(missing.to_string().contains("TLT"));

        let invalid = PulseError::InvalidSnapshotValue("GLD price is NaN".to_string());
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn feed_and_internal_errors_are_server_errors() {
        assert_eq!(
            PulseError::Feed("no quotes".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            PulseError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
