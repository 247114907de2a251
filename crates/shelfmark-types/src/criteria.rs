use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::ReadingStatus;
use crate::error::{Result, ValidationError};
use crate::schema::CriteriaRecord;
use crate::sort::{SortDirection, SortField, SortSpec};

/// Upper bound of the default (inactive) duration range, in minutes
pub const MAX_DURATION_MINUTES: u32 = u32::MAX;

/// How multiple selected tags combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagOperator {
    /// Every selected tag must be present
    And,
    /// At least one selected tag must be present
    Or,
}

impl Default for TagOperator {
    fn default() -> Self {
        Self::Or
    }
}

/// Inclusive timestamp bounds; an unset bound is always satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn since(start: DateTime<Utc>) -> Self {
        Self::new(Some(start), None)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            return Err(ValidationError::DateRangeInverted { start, end });
        }
        Ok(())
    }
}

/// Named date windows offered next to a custom range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePreset {
    AllTime,
    Today,
    Last7Days,
    Last30Days,
    ThisYear,
    Custom,
}

impl Default for DatePreset {
    fn default() -> Self {
        Self::AllTime
    }
}

impl DatePreset {
    /// Concrete range for this preset relative to `now`.
    ///
    /// Returns `None` for `Custom`, whose range is whatever the user set.
    pub fn resolve(&self, now: DateTime<Utc>) -> Option<DateRange> {
        match self {
            DatePreset::AllTime => Some(DateRange::default()),
            DatePreset::Today => {
                let midnight = Utc
                    .with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
                    .single()
                    .unwrap_or(now);
                Some(DateRange::since(midnight))
            }
            DatePreset::Last7Days => Some(DateRange::since(now - Duration::days(7))),
            DatePreset::Last30Days => Some(DateRange::since(now - Duration::days(30))),
            DatePreset::ThisYear => {
                let new_year = Utc
                    .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
                    .single()
                    .unwrap_or(now);
                Some(DateRange::since(new_year))
            }
            DatePreset::Custom => None,
        }
    }
}

/// Reading-status filter; `All` bypasses the check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    All,
    Unread,
    Reading,
    Completed,
    Archived,
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::All
    }
}

impl StatusFilter {
    pub fn accepts(&self, status: ReadingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Unread => status == ReadingStatus::Unread,
            StatusFilter::Reading => status == ReadingStatus::Reading,
            StatusFilter::Completed => status == ReadingStatus::Completed,
            StatusFilter::Archived => status == ReadingStatus::Archived,
        }
    }
}

impl From<ReadingStatus> for StatusFilter {
    fn from(status: ReadingStatus) -> Self {
        match status {
            ReadingStatus::Unread => StatusFilter::Unread,
            ReadingStatus::Reading => StatusFilter::Reading,
            ReadingStatus::Completed => StatusFilter::Completed,
            ReadingStatus::Archived => StatusFilter::Archived,
        }
    }
}

/// Stable digest of a criteria snapshot (including its sort)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable snapshot of every active filter and sort parameter.
///
/// Fields are private: each setter consumes the snapshot and returns a new
/// one, so a value held by the history stack or an in-flight request can
/// never change underneath its holder. Setters that could break an
/// invariant return `Result` and leave nothing half-applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CriteriaRecord", into = "CriteriaRecord")]
pub struct FilterCriteria {
    pub(crate) selected_tag_ids: BTreeSet<String>,
    pub(crate) tag_operator: TagOperator,
    pub(crate) date_range: DateRange,
    pub(crate) date_preset: DatePreset,
    pub(crate) reading_status: StatusFilter,
    pub(crate) favorites_only: bool,
    pub(crate) search_query: String,
    pub(crate) min_duration: u32,
    pub(crate) max_duration: u32,
    pub(crate) sort_field: SortField,
    pub(crate) sort_direction: SortDirection,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            selected_tag_ids: BTreeSet::new(),
            tag_operator: TagOperator::default(),
            date_range: DateRange::default(),
            date_preset: DatePreset::default(),
            reading_status: StatusFilter::default(),
            favorites_only: false,
            search_query: String::new(),
            min_duration: 0,
            max_duration: MAX_DURATION_MINUTES,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tag_ids(&self) -> &BTreeSet<String> {
        &self.selected_tag_ids
    }

    pub fn tag_operator(&self) -> TagOperator {
        self.tag_operator
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn date_preset(&self) -> DatePreset {
        self.date_preset
    }

    pub fn reading_status(&self) -> StatusFilter {
        self.reading_status
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn min_duration(&self) -> u32 {
        self.min_duration
    }

    pub fn max_duration(&self) -> u32 {
        self.max_duration
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.sort_field, self.sort_direction)
    }

    /// Replace the tag selection. Repeated ids collapse into one.
    pub fn with_tags<I, S>(mut self, tag_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected = BTreeSet::new();
        for id in tag_ids {
            let id = id.into();
            if id.trim().is_empty() {
                return Err(ValidationError::EmptyTag);
            }
            selected.insert(id);
        }
        self.selected_tag_ids = selected;
        Ok(self)
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(mut self, tag_id: impl Into<String>) -> Result<Self> {
        let tag_id = tag_id.into();
        if tag_id.trim().is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        if !self.selected_tag_ids.remove(&tag_id) {
            self.selected_tag_ids.insert(tag_id);
        }
        Ok(self)
    }

    pub fn with_tag_operator(mut self, operator: TagOperator) -> Self {
        self.tag_operator = operator;
        self
    }

    /// Set explicit bounds; the preset becomes `Custom`.
    pub fn with_date_range(mut self, range: DateRange) -> Result<Self> {
        range.validate()?;
        self.date_range = range;
        self.date_preset = if range.is_unbounded() {
            DatePreset::AllTime
        } else {
            DatePreset::Custom
        };
        Ok(self)
    }

    /// Select a named preset, resolving it against the caller's clock.
    pub fn with_date_preset(mut self, preset: DatePreset, now: DateTime<Utc>) -> Self {
        if let Some(range) = preset.resolve(now) {
            self.date_range = range;
        }
        self.date_preset = preset;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.reading_status = status;
        self
    }

    pub fn with_favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_duration_range(mut self, min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(ValidationError::DurationRangeInverted { min, max });
        }
        self.min_duration = min;
        self.max_duration = max;
        Ok(self)
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort_field = sort.field;
        self.sort_direction = sort.direction;
        self
    }

    pub fn has_default_duration(&self) -> bool {
        self.min_duration == 0 && self.max_duration == MAX_DURATION_MINUTES
    }

    /// Check every invariant. Snapshots built through the setters always
    /// pass; this guards values assembled field by field.
    pub fn validate(&self) -> Result<()> {
        if self.min_duration > self.max_duration {
            return Err(ValidationError::DurationRangeInverted {
                min: self.min_duration,
                max: self.max_duration,
            });
        }
        self.date_range.validate()?;
        if self.selected_tag_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ValidationError::EmptyTag);
        }
        Ok(())
    }

    /// Number of sub-predicates that currently narrow the result set
    pub fn active_filter_count(&self) -> usize {
        [
            !self.selected_tag_ids.is_empty(),
            !self.date_range.is_unbounded(),
            self.reading_status != StatusFilter::All,
            self.favorites_only,
            !self.search_query.trim().is_empty(),
            !self.has_default_duration(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Digest of the canonical serialized form.
    ///
    /// Tag ids are held in a sorted set, so two snapshots that differ only in
    /// selection order share a fingerprint.
    pub fn fingerprint(&self) -> Fingerprint {
        let canonical = serde_json::to_string(&CriteriaRecord::from(self.clone()))
            .unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Fingerprint(format!("{:x}", hasher.finalize()))
    }
}
