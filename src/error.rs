//! Error types and handling for the MiniMate application

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Machine-readable classification of API failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The remote service could not be reached or answered with a server error
    ApiNetworkError,
    /// The response body did not match the expected schema
    ApiInvalidResponse,
    /// Too many requests, locally or reported by the server
    ApiRateLimit,
    /// The requested location does not exist
    ApiLocationNotFound,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::ApiNetworkError => "API_NETWORK_ERROR",
            ErrorCode::ApiInvalidResponse => "API_INVALID_RESPONSE",
            ErrorCode::ApiRateLimit => "API_RATE_LIMIT",
            ErrorCode::ApiLocationNotFound => "API_LOCATION_NOT_FOUND",
        };
        f.write_str(code)
    }
}

/// Main error type for the MiniMate application
#[derive(Error, Debug)]
pub enum MiniMateError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error [{code}]: {message}")]
    Api {
        message: String,
        code: ErrorCode,
        context: HashMap<String, String>,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Cache and profile store errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl MiniMateError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error without context
    pub fn api<S: Into<String>>(message: S, code: ErrorCode) -> Self {
        Self::api_with_context(message, code, HashMap::new())
    }

    /// Create a new API error carrying request context (coordinates, status, ...)
    pub fn api_with_context<S: Into<String>>(
        message: S,
        code: ErrorCode,
        context: HashMap<String, String>,
    ) -> Self {
        Self::Api {
            message: message.into(),
            code,
            context,
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// API error code, if this is an API error
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            MiniMateError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MiniMateError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            MiniMateError::Api { code, .. } => match code {
                ErrorCode::ApiLocationNotFound => {
                    "Location not found. Please check the coordinates or location name."
                        .to_string()
                }
                ErrorCode::ApiRateLimit => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ErrorCode::ApiInvalidResponse => {
                    "The weather service returned unexpected data. Please try again later."
                        .to_string()
                }
                ErrorCode::ApiNetworkError => {
                    "Unable to connect to external services. Please check your internet connection."
                        .to_string()
                }
            },
            MiniMateError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            MiniMateError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            MiniMateError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            MiniMateError::General { message } => message.clone(),
        }
    }
}
