//! Error types for the pricolor library

use thiserror::Error;

/// Result type alias for pricolor operations
pub type Result<T> = std::result::Result<T, PickError>;

/// Errors surfaced at the boundary of the picking pipeline.
///
/// Both variants are detected before any histogram work begins. Once the
/// core has a decoded buffer and a validated configuration it always
/// produces a result; an image whose pixels are all filtered out resolves
/// through the selection fallbacks, not through an error.
#[derive(Error, Debug)]
pub enum PickError {
    /// Input bytes could not be decoded into a pixel buffer, the file is
    /// oversized, or the buffer is empty after decode/crop
    #[error("failed to decode image: {message}")]
    ImageDecode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A numeric option is outside its documented valid range
    #[error("invalid parameter: {parameter} = {value} ({reason})")]
    Configuration {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl PickError {
    /// Create an image decode error with an underlying cause
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageDecode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an image decode error without an underlying cause
    pub fn decode_msg(message: impl Into<String>) -> Self {
        Self::ImageDecode {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error for one named parameter
    pub fn config(
        parameter: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            PickError::ImageDecode { .. } => {
                "Could not read the image. Please check the file format and try again."
                    .to_string()
            }
            PickError::Configuration { parameter, reason, .. } => {
                format!("Option '{}' is out of range: {}.", parameter, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = PickError::decode_msg("empty input");
        assert_eq!(err.to_string(), "failed to decode image: empty input");
    }

    #[test]
    fn test_config_error_display() {
        let err = PickError::config("clip_ratio", 1.5, "must be within [0, 0.9]");
        assert_eq!(
            err.to_string(),
            "invalid parameter: clip_ratio = 1.5 (must be within [0, 0.9])"
        );
    }

    #[test]
    fn test_user_messages_are_nonempty() {
        assert!(!PickError::decode_msg("x").user_message().is_empty());
        assert!(!PickError::config("d", 9, "too deep").user_message().is_empty());
    }
}
