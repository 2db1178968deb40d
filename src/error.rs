//! Error types for the framelog tracking core.

use crate::types::SessionId;
use thiserror::Error;

/// Errors raised by tracking, value and session operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot decode value: {0}")]
    Decode(String),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TrackError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TrackError::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        TrackError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TrackError {
    fn from(err: config::ConfigError) -> Self {
        TrackError::ConfigError(err.to_string())
    }
}
