pub mod criteria;
pub mod domain;
pub mod error;
pub mod preset;
pub mod schema;
pub mod sort;

pub use criteria::*;
pub use domain::*;
pub use error::{Result, SchemaError, ValidationError};
pub use preset::{FilterPreset, PresetStore};
pub use schema::{CriteriaRecord, EXPORT_VERSION, FiltersExport};
pub use sort::*;
