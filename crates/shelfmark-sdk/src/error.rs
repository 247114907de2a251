use std::fmt;

use shelfmark_types::{SchemaError, ValidationError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound(String),
    InvalidInput(String),
    Runtime(shelfmark_runtime::Error),
    Internal(anyhow::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Runtime(err) => write!(f, "{}", err),
            Error::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Runtime(err) => Some(err),
            Error::Internal(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<shelfmark_runtime::Error> for Error {
    fn from(err: shelfmark_runtime::Error) -> Self {
        Error::Runtime(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Runtime(shelfmark_runtime::Error::Validation(err))
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Runtime(shelfmark_runtime::Error::Io(err))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err)
    }
}

impl Error {
    /// The validation failure behind this error, if that is what it is
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Runtime(shelfmark_runtime::Error::Validation(err)) => Some(err),
            _ => None,
        }
    }
}
