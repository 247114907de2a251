use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result type for shelfmark-types operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Rejections raised synchronously at a call boundary.
///
/// A `ValidationError` never mutates state: the operation that produced it
/// leaves every snapshot, store and controller exactly as it found them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `min_duration` is greater than `max_duration`
    DurationRangeInverted { min: u32, max: u32 },

    /// Both date bounds are set and `start` is after `end`
    DateRangeInverted {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The same tag id appears more than once in a tag selection
    DuplicateTag(String),

    /// A tag id is empty or whitespace
    EmptyTag,

    /// Page size must be at least one
    InvalidPageSize(usize),

    /// Preset name is empty after trimming
    EmptyPresetName,

    /// Another preset already uses this name (case-insensitive)
    DuplicatePresetName(String),

    /// Two presets share one id
    DuplicatePresetId(Uuid),

    /// Default presets cannot be deleted
    DefaultPresetNotDeletable(Uuid),

    /// No preset with this id exists in the store
    PresetNotFound(Uuid),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DurationRangeInverted { min, max } => write!(
                f,
                "Invalid duration range: min {} is greater than max {}",
                min, max
            ),
            ValidationError::DateRangeInverted { start, end } => write!(
                f,
                "Invalid date range: start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            ),
            ValidationError::DuplicateTag(id) => write!(f, "Duplicate tag id: {}", id),
            ValidationError::EmptyTag => write!(f, "Tag id must not be empty"),
            ValidationError::InvalidPageSize(size) => {
                write!(f, "Invalid page size: {} (must be at least 1)", size)
            }
            ValidationError::EmptyPresetName => write!(f, "Preset name must not be empty"),
            ValidationError::DuplicatePresetName(name) => {
                write!(f, "A preset named '{}' already exists", name)
            }
            ValidationError::DuplicatePresetId(id) => {
                write!(f, "More than one preset has id {}", id)
            }
            ValidationError::DefaultPresetNotDeletable(id) => {
                write!(f, "Preset {} is a default preset and cannot be deleted", id)
            }
            ValidationError::PresetNotFound(id) => write!(f, "Preset not found: {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure to accept externally supplied JSON (import, persisted state).
#[derive(Debug)]
pub enum SchemaError {
    /// Top-level value is not a JSON object
    NotAnObject,

    /// Envelope version this build does not understand
    UnsupportedVersion(u64),

    /// Missing field, wrong type, or unknown field
    Malformed(serde_json::Error),

    /// Well-formed, but violates a domain invariant
    Invalid(ValidationError),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::NotAnObject => write!(f, "Schema error: expected a JSON object"),
            SchemaError::UnsupportedVersion(v) => {
                write!(f, "Schema error: unsupported version {}", v)
            }
            SchemaError::Malformed(err) => write!(f, "Schema error: {}", err),
            SchemaError::Invalid(err) => write!(f, "Schema error: {}", err),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Malformed(err) => Some(err),
            SchemaError::Invalid(err) => Some(err),
            SchemaError::NotAnObject | SchemaError::UnsupportedVersion(_) => None,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Malformed(err)
    }
}

impl From<ValidationError> for SchemaError {
    fn from(err: ValidationError) -> Self {
        SchemaError::Invalid(err)
    }
}
