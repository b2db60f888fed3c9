use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImagineError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ImagineError {
    /// Rejections of the caller's input, as opposed to failures on our side.
    pub fn is_validation(&self) -> bool {
        matches!(self, ImagineError::ValidationError(_))
    }
}

impl From<serde_json::Error> for ImagineError {
    fn from(e: serde_json::Error) -> Self {
        ImagineError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImagineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(ImagineError::ValidationError("empty".into()).is_validation());
        assert!(!ImagineError::ProviderError("down".into()).is_validation());
    }

    #[test]
    fn test_display_prefixes() {
        let err = ImagineError::ProviderError("status 500".into());
        assert_eq!(err.to_string(), "Provider error: status 500");
    }
}
