//! Error types for the Fitbit API client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use fitbit_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the OAuth 2.0 Client ID of your Fitbit application.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the Client Secret of your Fitbit application.")]
    EmptyClientSecret,

    /// Redirect URL is invalid.
    #[error("Invalid redirect URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://myapp.example.com/callback').")]
    InvalidRedirectUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// Locale tag is not one the Fitbit API supports.
    #[error("Unsupported locale '{locale}'. Expected one of: en_AU, fr_FR, de_DE, ja_JP, en_NZ, es_ES, en_GB, en_US.")]
    UnsupportedLocale {
        /// The locale tag that was provided.
        locale: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
