use std::fmt;

use shelfmark_types::ValidationError;

/// Result type for shelfmark-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the fetch primitive.
///
/// Always retryable: the controller keeps its last good items and offers
/// `retry()`, which re-dispatches with a fresh request token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection-level failure (DNS, reset, offline)
    Network(String),

    /// The fetch primitive gave up waiting
    Timeout,

    /// The backend answered with a non-success status
    Status(u16),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "Network error: {}", msg),
            TransportError::Timeout => write!(f, "Request timed out"),
            TransportError::Status(code) => write!(f, "Backend returned status {}", code),
        }
    }
}

impl std::error::Error for TransportError {}

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Fetch primitive failure (retryable)
    Transport(TransportError),

    /// Rejected at the call boundary, nothing changed
    Validation(ValidationError),

    /// Configuration error
    Config(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "Transport error: {}", err),
            Error::Validation(err) => write!(f, "Validation error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Validation(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Transport(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_errors_are_retryable() {
        assert!(Error::from(TransportError::Timeout).is_retryable());
        assert!(!Error::from(ValidationError::InvalidPageSize(0)).is_retryable());
        assert!(!Error::Config("bad".to_string()).is_retryable());
    }

    #[test]
    fn test_transport_error_message() {
        let err = Error::from(TransportError::Status(503));
        assert_eq!(err.to_string(), "Transport error: Backend returned status 503");
    }
}
