//! Error types and handling for `TravelGuide`

use thiserror::Error;

/// Main error type for the `TravelGuide` library
#[derive(Error, Debug)]
pub enum TravelGuideError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Remote data provider errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A requested record does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },
}

impl TravelGuideError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error for a resource kind and identifier
    pub fn not_found<S: Into<String>>(resource: &'static str, id: S) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelGuideError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TravelGuideError::Api { .. } => {
                "Some real-time information could not be loaded.".to_string()
            }
            TravelGuideError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TravelGuideError::NotFound { resource, .. } => {
                format!("We couldn't find the {resource} you're looking for.")
            }
        }
    }

    /// Whether the error is a missing record rather than a failure
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, TravelGuideError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TravelGuideError::config("missing API key");
        assert!(matches!(config_err, TravelGuideError::Config { .. }));

        let api_err = TravelGuideError::api("connection failed");
        assert!(matches!(api_err, TravelGuideError::Api { .. }));

        let validation_err = TravelGuideError::validation("invalid coordinates");
        assert!(matches!(validation_err, TravelGuideError::Validation { .. }));

        let missing = TravelGuideError::not_found("destination", "atlantis");
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "destination not found: atlantis");
    }

    #[test]
    fn test_user_messages() {
        let config_err = TravelGuideError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = TravelGuideError::api("test");
        assert!(api_err.user_message().contains("could not be loaded"));

        let validation_err = TravelGuideError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let missing = TravelGuideError::not_found("destination", "atlantis");
        assert_eq!(
            missing.user_message(),
            "We couldn't find the destination you're looking for."
        );
    }
}
