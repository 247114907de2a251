use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::criteria::FilterCriteria;
use crate::domain::OwnerContext;
use crate::error::{Result, ValidationError};

/// A named, persisted criteria snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterPreset {
    pub id: Uuid,
    pub name: String,
    pub criteria: FilterCriteria,
    pub created_at: DateTime<Utc>,
    pub is_default: bool,
}

impl FilterPreset {
    pub fn new(name: impl Into<String>, criteria: FilterCriteria, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            criteria,
            created_at,
            is_default: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyPresetName);
        }
        self.criteria.validate()
    }

    fn same_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Presets belonging to one owner.
///
/// Names are unique case-insensitively within the store, and default
/// presets survive `delete`. Mutations either fully apply or return an
/// error with the store untouched.
#[derive(Debug, Clone)]
pub struct PresetStore {
    context: OwnerContext,
    presets: Vec<FilterPreset>,
}

impl PresetStore {
    pub fn new(context: OwnerContext) -> Self {
        Self {
            context,
            presets: Vec::new(),
        }
    }

    /// Rebuild a store from persisted presets, rejecting name collisions.
    pub fn from_presets(context: OwnerContext, presets: Vec<FilterPreset>) -> Result<Self> {
        let mut store = Self::new(context);
        store.replace_all(presets)?;
        Ok(store)
    }

    pub fn context(&self) -> &OwnerContext {
        &self.context
    }

    pub fn list(&self) -> &[FilterPreset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&FilterPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&FilterPreset> {
        self.presets.iter().find(|p| p.same_name(name))
    }

    /// Save a user preset under a new, unique name
    pub fn save(
        &mut self,
        name: &str,
        criteria: FilterCriteria,
        now: DateTime<Utc>,
    ) -> Result<&FilterPreset> {
        self.insert(FilterPreset::new(name, criteria, now))
    }

    /// Save a preset that `delete` refuses to remove
    pub fn save_default(
        &mut self,
        name: &str,
        criteria: FilterCriteria,
        now: DateTime<Utc>,
    ) -> Result<&FilterPreset> {
        let mut preset = FilterPreset::new(name, criteria, now);
        preset.is_default = true;
        self.insert(preset)
    }

    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyPresetName);
        }
        if self.presets.iter().any(|p| p.id != id && p.same_name(name)) {
            return Err(ValidationError::DuplicatePresetName(name.trim().to_string()));
        }
        let preset = self
            .presets
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ValidationError::PresetNotFound(id))?;
        preset.name = name.trim().to_string();
        Ok(())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<FilterPreset> {
        let index = self
            .presets
            .iter()
            .position(|p| p.id == id)
            .ok_or(ValidationError::PresetNotFound(id))?;
        if self.presets[index].is_default {
            return Err(ValidationError::DefaultPresetNotDeletable(id));
        }
        Ok(self.presets.remove(index))
    }

    /// Swap in a whole new preset list, all-or-nothing.
    pub fn replace_all(&mut self, presets: Vec<FilterPreset>) -> Result<()> {
        self.presets = stage(Vec::new(), presets)?;
        Ok(())
    }

    /// Replace the user presets with `presets`, keeping every default.
    ///
    /// An incoming preset with the id of a kept default is that default and
    /// is skipped; any other clash with a default's name or id rejects the
    /// whole import.
    pub fn import(&mut self, presets: Vec<FilterPreset>) -> Result<()> {
        let defaults: Vec<FilterPreset> =
            self.presets.iter().filter(|p| p.is_default).cloned().collect();
        let incoming = presets
            .into_iter()
            .filter(|p| !defaults.iter().any(|d| d.id == p.id))
            .collect();
        self.presets = stage(defaults, incoming)?;
        Ok(())
    }

    fn insert(&mut self, preset: FilterPreset) -> Result<&FilterPreset> {
        preset.validate()?;
        if self.find_by_name(&preset.name).is_some() {
            return Err(ValidationError::DuplicatePresetName(preset.name));
        }
        self.presets.push(preset);
        let index = self.presets.len() - 1;
        Ok(&self.presets[index])
    }
}

/// Append `incoming` to `staged`, enforcing unique ids and names.
pub(crate) fn stage(
    mut staged: Vec<FilterPreset>,
    incoming: Vec<FilterPreset>,
) -> Result<Vec<FilterPreset>> {
    for preset in incoming {
        preset.validate()?;
        if staged.iter().any(|p| p.id == preset.id) {
            return Err(ValidationError::DuplicatePresetId(preset.id));
        }
        if staged.iter().any(|p| p.same_name(&preset.name)) {
            return Err(ValidationError::DuplicatePresetName(preset.name));
        }
        staged.push(preset);
    }
    Ok(staged)
}
