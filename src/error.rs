// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for courier
//!
//! Configuration mistakes are reported by the builder call that made them.
//! Status rejections carry the whole response so callers can still read the
//! body and headers of a refused reply.

use thiserror::Error;

use crate::http::Response;

/// Result type alias for courier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for courier
#[derive(Error, Debug)]
pub enum Error {
    /// Builder configuration rejected at the offending call
    #[error("Invalid request configuration: {0}")]
    Validation(String),

    /// Response status outside the request's status policy
    #[error("Unexpected HTTP status {} from {}", .0.status, .0.url)]
    UnexpectedStatus(Box<Response>),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport failure not covered by reqwest
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Check if this is a configuration error raised by the builder
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if the response was refused by the status policy
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, Error::UnexpectedStatus(_))
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http(_))
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus(response) => Some(response.status_code()),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the rejected response, if any
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::UnexpectedStatus(response) => Some(response),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::UnexpectedStatus(response) => Some(response.url_str()),
            Error::Timeout { url: Some(u), .. } => Some(u),
            _ => None,
        }
    }
}
