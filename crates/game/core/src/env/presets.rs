//! Field object presets and the catalog that owns them.
//!
//! Presets are immutable templates. The engine only ever reads them: a live
//! [`FieldObject`] is a value clone taken at creation time.

use crate::action::{AutoAction, Skill, SkillList};
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{FieldObject, ObjectId, StatusEntry};

/// Immutable named template for field objects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldObjectPreset {
    pub id: String,
    pub max_life_points: u32,
    pub armor_points: u32,
    pub shield_points: u32,
    pub counterattack_points: u32,
    pub can_retreat: bool,
    pub auto_action: Option<AutoAction>,
    pub skills: SkillList,
    /// Status entries every instance starts with.
    pub statuses: Vec<StatusEntry>,
}

impl FieldObjectPreset {
    /// A preset with 1 max life point that can retreat and does nothing else.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_life_points: 1,
            armor_points: 0,
            shield_points: 0,
            counterattack_points: 0,
            can_retreat: true,
            auto_action: None,
            skills: SkillList::new(),
            statuses: Vec::new(),
        }
    }

    pub fn with_max_life_points(mut self, points: u32) -> Self {
        self.max_life_points = points;
        self
    }

    pub fn with_armor_points(mut self, points: u32) -> Self {
        self.armor_points = points;
        self
    }

    pub fn with_shield_points(mut self, points: u32) -> Self {
        self.shield_points = points;
        self
    }

    pub fn with_counterattack_points(mut self, points: u32) -> Self {
        self.counterattack_points = points;
        self
    }

    pub fn with_can_retreat(mut self, can_retreat: bool) -> Self {
        self.can_retreat = can_retreat;
        self
    }

    pub fn with_auto_action(mut self, auto_action: AutoAction) -> Self {
        self.auto_action = Some(auto_action);
        self
    }

    /// # Panics
    ///
    /// Panics if the preset already carries [`crate::BattleConfig::MAX_SKILLS`] skills.
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_status(mut self, status: StatusEntry) -> Self {
        self.statuses.push(status);
        self
    }
}

impl Default for FieldObjectPreset {
    fn default() -> Self {
        Self::new("")
    }
}

/// Errors raised while looking up presets.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("preset '{preset_id}' not found in catalog")]
    NotFound { preset_id: String },

    #[error("preset '{preset_id}' is defined more than once")]
    DuplicatePreset { preset_id: String },
}

impl BattleError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        // Both point at broken content data.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "CATALOG_PRESET_NOT_FOUND",
            Self::DuplicatePreset { .. } => "CATALOG_DUPLICATE_PRESET",
        }
    }
}

/// Read-only source of presets.
pub trait PresetOracle: Send + Sync {
    fn preset(&self, preset_id: &str) -> Option<&FieldObjectPreset>;

    /// Clones the preset's base values into a new instance.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `preset_id` is not known.
    fn instantiate(&self, preset_id: &str, id: ObjectId) -> Result<FieldObject, CatalogError> {
        self.preset(preset_id)
            .map(|preset| FieldObject::from_preset(preset, id))
            .ok_or_else(|| CatalogError::NotFound {
                preset_id: preset_id.to_owned(),
            })
    }
}

/// Process-wide preset list, built once and borrowed by every engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PresetCatalog {
    presets: Vec<FieldObjectPreset>,
}

impl PresetCatalog {
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicatePreset`] if two presets share an id.
    pub fn new(presets: Vec<FieldObjectPreset>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for preset in presets {
            catalog.insert(preset)?;
        }
        Ok(catalog)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicatePreset`] if the id is already taken.
    pub fn insert(&mut self, preset: FieldObjectPreset) -> Result<(), CatalogError> {
        if self.preset(&preset.id).is_some() {
            return Err(CatalogError::DuplicatePreset {
                preset_id: preset.id,
            });
        }
        self.presets.push(preset);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldObjectPreset> {
        self.presets.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|preset| preset.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl PresetOracle for PresetCatalog {
    fn preset(&self, preset_id: &str) -> Option<&FieldObjectPreset> {
        self.presets.iter().find(|preset| preset.id == preset_id)
    }
}
