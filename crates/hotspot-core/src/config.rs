//! Question-level configuration and its resolution against defaults.
//!
//! Defaults live in one table ([`SettingKey::default_value`]); every settings
//! change goes through [`resolve_settings`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MINIMUM_CORRECT_HOTSPOTS: u32 = 1;
pub const DEFAULT_DROP_ZONE_OPACITY: u8 = 50;
pub const DEFAULT_SNAP_TO_PLACE_DISTANCE: f64 = 15.0;
pub const DEFAULT_PARTIAL_SCORING: bool = true;

/// Recognised configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    MinimumCorrectHotspots,
    DropZoneOpacity,
    SnapToPlaceDistance,
    PartialScoring,
}

/// A typed setting value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Count(u32),
    Percent(u8),
    Pixels(f64),
    Flag(bool),
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::MinimumCorrectHotspots,
        SettingKey::DropZoneOpacity,
        SettingKey::SnapToPlaceDistance,
        SettingKey::PartialScoring,
    ];

    /// Name used in serialized configuration.
    pub fn name(self) -> &'static str {
        match self {
            SettingKey::MinimumCorrectHotspots => "minimumCorrectHotspots",
            SettingKey::DropZoneOpacity => "dropZoneOpacity",
            SettingKey::SnapToPlaceDistance => "snapToPlaceDistance",
            SettingKey::PartialScoring => "partialScoring",
        }
    }

    pub fn default_value(self) -> SettingValue {
        match self {
            SettingKey::MinimumCorrectHotspots => SettingValue::Count(DEFAULT_MINIMUM_CORRECT_HOTSPOTS),
            SettingKey::DropZoneOpacity => SettingValue::Percent(DEFAULT_DROP_ZONE_OPACITY),
            SettingKey::SnapToPlaceDistance => SettingValue::Pixels(DEFAULT_SNAP_TO_PLACE_DISTANCE),
            SettingKey::PartialScoring => SettingValue::Flag(DEFAULT_PARTIAL_SCORING),
        }
    }

    /// Whether the option belongs to the labeling-mode block.
    pub fn is_labeling(self) -> bool {
        !matches!(self, SettingKey::MinimumCorrectHotspots)
    }
}

/// Labeling-mode block, created the first time a hotspot becomes a drop zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelingSettings {
    /// Drop zone fill opacity, 0..=100.
    pub drop_zone_opacity: u8,
    /// Distance in pixels within which a dragged label snaps onto a zone.
    pub snap_to_place_distance: f64,
    /// Award points per correctly placed definition.
    pub partial_scoring: bool,
}

impl Default for LabelingSettings {
    fn default() -> Self {
        Self {
            drop_zone_opacity: DEFAULT_DROP_ZONE_OPACITY,
            snap_to_place_distance: DEFAULT_SNAP_TO_PLACE_DISTANCE,
            partial_scoring: DEFAULT_PARTIAL_SCORING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotSettings {
    /// How many correct hotspots a respondent must select to pass.
    pub minimum_correct_hotspots: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labeling: Option<LabelingSettings>,
}

impl Default for HotspotSettings {
    fn default() -> Self {
        Self {
            minimum_correct_hotspots: DEFAULT_MINIMUM_CORRECT_HOTSPOTS,
            labeling: None,
        }
    }
}

impl HotspotSettings {
    /// Current value of `key`, `None` for labeling keys before the block exists.
    pub fn value(&self, key: SettingKey) -> Option<SettingValue> {
        match key {
            SettingKey::MinimumCorrectHotspots => Some(SettingValue::Count(self.minimum_correct_hotspots)),
            SettingKey::DropZoneOpacity => self
                .labeling
                .as_ref()
                .map(|l| SettingValue::Percent(l.drop_zone_opacity)),
            SettingKey::SnapToPlaceDistance => self
                .labeling
                .as_ref()
                .map(|l| SettingValue::Pixels(l.snap_to_place_distance)),
            SettingKey::PartialScoring => self
                .labeling
                .as_ref()
                .map(|l| SettingValue::Flag(l.partial_scoring)),
        }
    }

    /// Copy with the labeling block present. An existing block is kept as is.
    pub fn with_labeling_initialized(&self) -> Self {
        let mut next = self.clone();
        if next.labeling.is_none() {
            log::debug!("Initializing labeling settings with defaults");
            next.labeling = Some(LabelingSettings::default());
        }
        next
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum_correct_hotspots < 1 {
            return Err(ConfigError::MinimumCorrectHotspots(self.minimum_correct_hotspots));
        }
        if let Some(labeling) = &self.labeling {
            if labeling.drop_zone_opacity > 100 {
                return Err(ConfigError::DropZoneOpacity(labeling.drop_zone_opacity));
            }
            let snap = labeling.snap_to_place_distance;
            if !snap.is_finite() || snap < 0.0 {
                return Err(ConfigError::SnapDistance(snap));
            }
        }
        Ok(())
    }
}

/// Partial settings update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    #[serde(default)]
    pub minimum_correct_hotspots: Option<u32>,
    #[serde(default)]
    pub drop_zone_opacity: Option<u8>,
    #[serde(default)]
    pub snap_to_place_distance: Option<f64>,
    #[serde(default)]
    pub partial_scoring: Option<bool>,
}

impl SettingsOverrides {
    /// Set one option from a typed value. Mismatched types are ignored.
    pub fn set(mut self, key: SettingKey, value: SettingValue) -> Self {
        match (key, value) {
            (SettingKey::MinimumCorrectHotspots, SettingValue::Count(v)) => self.minimum_correct_hotspots = Some(v),
            (SettingKey::DropZoneOpacity, SettingValue::Percent(v)) => self.drop_zone_opacity = Some(v),
            (SettingKey::SnapToPlaceDistance, SettingValue::Pixels(v)) => self.snap_to_place_distance = Some(v),
            (SettingKey::PartialScoring, SettingValue::Flag(v)) => self.partial_scoring = Some(v),
            (key, value) => log::warn!("Ignoring {:?} for setting {}", value, key.name()),
        }
        self
    }

    /// The override for `key`, if one is set.
    pub fn get(&self, key: SettingKey) -> Option<SettingValue> {
        match key {
            SettingKey::MinimumCorrectHotspots => self.minimum_correct_hotspots.map(SettingValue::Count),
            SettingKey::DropZoneOpacity => self.drop_zone_opacity.map(SettingValue::Percent),
            SettingKey::SnapToPlaceDistance => self.snap_to_place_distance.map(SettingValue::Pixels),
            SettingKey::PartialScoring => self.partial_scoring.map(SettingValue::Flag),
        }
    }

    fn touches_labeling(&self) -> bool {
        SettingKey::ALL
            .into_iter()
            .any(|key| key.is_labeling() && self.get(key).is_some())
    }
}

/// Apply `overrides` on top of `current`. A missing labeling block is
/// created from defaults when any labeling option is overridden. The result
/// is validated as a whole.
pub fn resolve_settings(
    current: &HotspotSettings,
    overrides: &SettingsOverrides,
) -> Result<HotspotSettings, ConfigError> {
    let mut resolved = current.clone();

    if let Some(minimum) = overrides.minimum_correct_hotspots {
        resolved.minimum_correct_hotspots = minimum;
    }

    if overrides.touches_labeling() {
        let labeling = resolved.labeling.get_or_insert_with(LabelingSettings::default);
        if let Some(opacity) = overrides.drop_zone_opacity {
            labeling.drop_zone_opacity = opacity;
        }
        if let Some(distance) = overrides.snap_to_place_distance {
            labeling.snap_to_place_distance = distance;
        }
        if let Some(partial) = overrides.partial_scoring {
            labeling.partial_scoring = partial;
        }
    }

    if let Err(err) = resolved.validate() {
        log::warn!("Rejected settings update: {}", err);
        return Err(err);
    }
    Ok(resolved)
}
