use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP connection failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl FetchError {
    /// Network and filesystem faults, as opposed to a bad configuration.
    pub fn is_io_fault(&self) -> bool {
        matches!(self, FetchError::IoError(_) | FetchError::HttpError(_))
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FetchError::IoError(e) => format!("Could not fetch the resource: {}", e),
            FetchError::HttpError(e) => format!("The HTTP connection failed: {}", e),
            FetchError::UrlError(e) => format!("The target URL is not valid: {}", e),
            FetchError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            FetchError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for {}: {}", value, field, reason),
            FetchError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FetchError::IoError(_) | FetchError::HttpError(_) => {
                "Check that the host is reachable and the port is open, then run again"
            }
            FetchError::UrlError(_) => "Use an absolute URL such as http://example.com/",
            FetchError::ConfigValidationError { .. } => "Check the configuration file syntax",
            FetchError::InvalidConfigValueError { .. } => "Correct the value and run again",
            FetchError::MissingConfigError { .. } => "Add the missing field to the configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_fault_classification() {
        let refused = FetchError::from(std::io::Error::from(std::io::ErrorKind::ConnectionRefused));
        assert!(refused.is_io_fault());

        let missing = FetchError::MissingConfigError {
            field: "target.url".to_string(),
        };
        assert!(!missing.is_io_fault());
        assert!(missing.user_friendly_message().contains("target.url"));
    }

    #[test]
    fn test_url_error_conversion() {
        let err: FetchError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, FetchError::UrlError(_)));
        assert!(err.to_string().starts_with("Invalid URL"));
    }
}
