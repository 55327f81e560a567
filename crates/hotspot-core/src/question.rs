//! The hotspot question: image, hotspots, definitions and settings.
//!
//! A `HotspotQuestion` is a value. Every operation borrows the current
//! question and returns a new one; the old value is never modified, so the
//! owner can keep it for undo or diffing.

use crate::config::{resolve_settings, HotspotSettings, SettingsOverrides};
use crate::definition::{self, Definition, DefinitionId, DefinitionTarget};
use crate::error::{EditorError, EditorResult, ValidationIssue};
use crate::hotspot::{Hotspot, HotspotId};
use crate::input::ImageBounds;
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotQuestion {
    /// Unique question identifier.
    pub id: Uuid,
    /// Displayed size of the bound image. Hotspots are expressed in this
    /// pixel space.
    #[serde(default)]
    image: Option<ImageBounds>,
    /// Hotspots in drawing order (back to front).
    #[serde(default)]
    hotspots: Vec<Hotspot>,
    #[serde(default)]
    definitions: Vec<Definition>,
    #[serde(default)]
    settings: HotspotSettings,
}

impl Default for HotspotQuestion {
    fn default() -> Self {
        Self::new()
    }
}

impl HotspotQuestion {
    /// Create a new empty question.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            image: None,
            hotspots: Vec::new(),
            definitions: Vec::new(),
            settings: HotspotSettings::default(),
        }
    }

    pub fn image(&self) -> Option<ImageBounds> {
        self.image
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn settings(&self) -> &HotspotSettings {
        &self.settings
    }

    /// Get a hotspot by ID.
    pub fn hotspot(&self, id: HotspotId) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id() == id)
    }

    /// Get a definition by ID.
    pub fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.id() == id)
    }

    /// Hotspots a definition may target.
    pub fn drop_zone_candidates(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter().filter(|h| h.is_drop_zone)
    }

    pub fn correct_hotspots(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter().filter(|h| h.is_correct)
    }

    /// Resolve where `definition` points. Dangling targets are unassigned.
    pub fn definition_target(&self, definition: &Definition) -> DefinitionTarget<'_> {
        definition::resolve_target(definition, &self.hotspots)
    }

    /// Bind a different image (or none).
    pub fn with_image(&self, image: Option<ImageBounds>) -> Self {
        Self {
            image,
            ..self.clone()
        }
    }

    /// Replace the hotspot collection.
    pub(crate) fn with_hotspots(&self, hotspots: Vec<Hotspot>) -> Self {
        Self {
            hotspots,
            ..self.clone()
        }
    }

    fn with_definitions(&self, definitions: Vec<Definition>) -> Self {
        Self {
            definitions,
            ..self.clone()
        }
    }

    /// Append a hotspot for `shape`, named after its position in the list.
    pub fn add_hotspot(&self, shape: Shape) -> (Self, HotspotId) {
        let hotspot = Hotspot::new(format!("Hotspot {}", self.hotspots.len() + 1), shape);
        let id = hotspot.id();
        let mut hotspots = self.hotspots.clone();
        hotspots.push(hotspot);
        (self.with_hotspots(hotspots), id)
    }

    /// Remove a hotspot. Definitions targeting it keep the now dangling id.
    pub fn remove_hotspot(&self, id: HotspotId) -> EditorResult<Self> {
        if self.hotspot(id).is_none() {
            return Err(EditorError::HotspotNotFound(id));
        }
        let hotspots = self.hotspots.iter().filter(|h| h.id() != id).cloned().collect();
        Ok(self.with_hotspots(hotspots))
    }

    /// Edit a hotspot's properties. Geometry and id are not reachable from
    /// outside the crate.
    pub fn update_hotspot(&self, id: HotspotId, update: impl FnOnce(&mut Hotspot)) -> EditorResult<Self> {
        let index = self
            .hotspots
            .iter()
            .position(|h| h.id() == id)
            .ok_or(EditorError::HotspotNotFound(id))?;
        let mut hotspots = self.hotspots.clone();
        update(&mut hotspots[index]);
        Ok(self.with_hotspots(hotspots))
    }

    /// Flip a hotspot's drop-zone flag. The first time any hotspot becomes a
    /// drop zone the labeling block is created with defaults; an existing
    /// block is left alone.
    pub fn toggle_drop_zone(&self, id: HotspotId) -> EditorResult<Self> {
        let mut next = self.update_hotspot(id, |h| h.is_drop_zone = !h.is_drop_zone)?;
        if next.hotspot(id).is_some_and(|h| h.is_drop_zone) {
            next.settings = next.settings.with_labeling_initialized();
        }
        Ok(next)
    }

    /// Append a placeholder definition.
    pub fn add_definition(&self) -> (Self, DefinitionId) {
        let definitions = definition::add_definition(&self.definitions);
        let id = definitions
            .last()
            .map(Definition::id)
            .unwrap_or_default();
        (self.with_definitions(definitions), id)
    }

    /// Remove a definition and renumber the rest.
    pub fn delete_definition(&self, id: DefinitionId) -> EditorResult<Self> {
        if self.definition(id).is_none() {
            return Err(EditorError::DefinitionNotFound(id));
        }
        Ok(self.with_definitions(definition::delete_definition(&self.definitions, id)))
    }

    /// Edit a definition's text or feedback. The number is reassigned
    /// afterwards so it stays dense.
    pub fn update_definition(&self, id: DefinitionId, update: impl FnOnce(&mut Definition)) -> EditorResult<Self> {
        let definitions = definition::update_definition(&self.definitions, id, update)
            .ok_or(EditorError::DefinitionNotFound(id))?;
        Ok(self.with_definitions(definition::resequence(definitions)))
    }

    /// Point a definition at a hotspot. Not checked against the drop-zone
    /// flag; the editor only offers [`Self::drop_zone_candidates`].
    pub fn assign_definition_target(
        &self,
        id: DefinitionId,
        target: Option<HotspotId>,
    ) -> EditorResult<Self> {
        if let Some(target) = target {
            if !self.hotspot(target).is_some_and(|h| h.is_drop_zone) {
                log::warn!("Definition {} assigned to {} which is not a drop zone", id, target);
            }
        }
        self.update_definition(id, |d| d.correct_hotspot_id = target)
    }

    /// Apply a settings update.
    pub fn with_settings(&self, overrides: &SettingsOverrides) -> EditorResult<Self> {
        let settings = resolve_settings(&self.settings, overrides)?;
        Ok(Self {
            settings,
            ..self.clone()
        })
    }

    /// Everything that keeps the question from being publishable.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.image.is_none() {
            issues.push(ValidationIssue::MissingImage);
        }

        let required = self.settings.minimum_correct_hotspots;
        let available = self.correct_hotspots().count() as u32;
        if available < required {
            issues.push(ValidationIssue::NotEnoughCorrectHotspots { required, available });
        }

        for definition in &self.definitions {
            if !self.definition_target(definition).is_assigned() {
                issues.push(ValidationIssue::UnassignedDefinition {
                    number: definition.number,
                });
            }
        }
        issues
    }

    /// Reject geometry the drawing tools could not have produced, and
    /// repeated ids.
    fn check_hotspots(&self) -> EditorResult<()> {
        let mut seen = HashSet::new();
        for hotspot in &self.hotspots {
            hotspot
                .shape()
                .validate()
                .map_err(|source| EditorError::InvalidShape {
                    id: hotspot.id(),
                    source,
                })?;
            if !seen.insert(hotspot.id()) {
                return Err(EditorError::DuplicateHotspot(hotspot.id()));
            }
        }
        Ok(())
    }

    /// Serialize the question to JSON.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a question from JSON. Geometry and settings are validated
    /// and definition numbers re-sequenced.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let mut question: Self = serde_json::from_str(json)?;
        question.check_hotspots()?;
        question.settings.validate()?;
        question.definitions = definition::resequence(question.definitions);
        Ok(question)
    }
}
