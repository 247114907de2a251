//! JSON boundary for criteria and presets.
//!
//! Everything that crosses into the engine from outside (imports, persisted
//! files) goes through a strict wire shape: every field is required, unknown
//! fields are rejected, and domain invariants are checked before a typed
//! value is handed back. Failures come back as `SchemaError`, never as a
//! partially built value.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::criteria::{DatePreset, DateRange, FilterCriteria, StatusFilter, TagOperator};
use crate::error::{SchemaError, ValidationError};
use crate::preset::{FilterPreset, stage};
use crate::sort::{SortDirection, SortField};

/// Current export envelope version
pub const EXPORT_VERSION: u64 = 1;

/// Wire shape of a `FilterCriteria`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriteriaRecord {
    pub selected_tag_ids: Vec<String>,
    pub tag_operator: TagOperator,
    pub date_range: DateRange,
    pub date_preset: DatePreset,
    pub reading_status: StatusFilter,
    pub favorites_only: bool,
    pub search_query: String,
    pub min_duration: u32,
    pub max_duration: u32,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl From<FilterCriteria> for CriteriaRecord {
    fn from(criteria: FilterCriteria) -> Self {
        Self {
            selected_tag_ids: criteria.selected_tag_ids.into_iter().collect(),
            tag_operator: criteria.tag_operator,
            date_range: criteria.date_range,
            date_preset: criteria.date_preset,
            reading_status: criteria.reading_status,
            favorites_only: criteria.favorites_only,
            search_query: criteria.search_query,
            min_duration: criteria.min_duration,
            max_duration: criteria.max_duration,
            sort_field: criteria.sort_field,
            sort_direction: criteria.sort_direction,
        }
    }
}

impl TryFrom<CriteriaRecord> for FilterCriteria {
    type Error = ValidationError;

    fn try_from(record: CriteriaRecord) -> Result<Self, Self::Error> {
        let mut selected_tag_ids = BTreeSet::new();
        for id in record.selected_tag_ids {
            if selected_tag_ids.contains(&id) {
                return Err(ValidationError::DuplicateTag(id));
            }
            selected_tag_ids.insert(id);
        }

        let criteria = FilterCriteria {
            selected_tag_ids,
            tag_operator: record.tag_operator,
            date_range: record.date_range,
            date_preset: record.date_preset,
            reading_status: record.reading_status,
            favorites_only: record.favorites_only,
            search_query: record.search_query,
            min_duration: record.min_duration,
            max_duration: record.max_duration,
            sort_field: record.sort_field,
            sort_direction: record.sort_direction,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}

impl FilterCriteria {
    /// Plain JSON form for persistence or export
    pub fn to_json(&self) -> Value {
        serde_json::to_value(CriteriaRecord::from(self.clone())).unwrap_or(Value::Null)
    }

    /// Validate and convert a JSON value produced by `to_json` (or by a host)
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::NotAnObject);
        }
        let record = CriteriaRecord::deserialize(value)?;
        Ok(FilterCriteria::try_from(record)?)
    }
}

impl FilterPreset {
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::NotAnObject);
        }
        let preset = FilterPreset::deserialize(value)?;
        preset.validate()?;
        Ok(preset)
    }
}

/// Versioned document a host writes when exporting a view's filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersExport {
    pub version: u64,
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub presets: Vec<FilterPreset>,
}

impl FiltersExport {
    pub fn new(criteria: FilterCriteria, presets: Vec<FilterPreset>) -> Self {
        Self {
            version: EXPORT_VERSION,
            criteria,
            presets,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Parse and fully validate an export document.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        let Some(object) = value.as_object() else {
            return Err(SchemaError::NotAnObject);
        };
        if let Some(version) = object.get("version").and_then(Value::as_u64)
            && version != EXPORT_VERSION
        {
            return Err(SchemaError::UnsupportedVersion(version));
        }

        let export = FiltersExport::deserialize(value)?;
        stage(Vec::new(), export.presets.clone())?;
        Ok(export)
    }
}
