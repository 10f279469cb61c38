/// Error types for Tab Pilot
use thiserror::Error;

use crate::tab_data::TabId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TabError {
    #[error("{operation} failed: {message}")]
    Browser {
        operation: &'static str,
        message: String,
    },

    #[error("tab {0} no longer exists")]
    Missing(TabId),

    #[error("failed to decode tab data: {0}")]
    Decode(String),
}

impl TabError {
    pub fn browser(operation: &'static str, message: impl Into<String>) -> Self {
        TabError::Browser {
            operation,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SuggestionError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0} ms")]
    Timeout(u32),

    #[error("response could not be parsed: {0}")]
    Parse(String),

    #[error("response had no completion text")]
    EmptyCompletion,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("storage access failed: {0}")]
    Storage(String),

    #[error("stored settings are invalid: {0}")]
    Decode(String),

    #[error("{field} must be a whole number of milliseconds")]
    InvalidNumber { field: &'static str },
}
