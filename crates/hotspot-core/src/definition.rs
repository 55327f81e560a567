//! Definitions: text items a respondent matches to drop-zone hotspots.
//!
//! Every function here takes the current list and returns a new one. Numbers
//! are kept dense (`1..=N`) in list order.

use crate::hotspot::{Hotspot, HotspotId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for definitions.
pub type DefinitionId = Uuid;

/// Placeholder text of a freshly added definition.
pub const DEFAULT_DEFINITION_TEXT: &str = "New definition";

/// Feedback pair shown after a definition is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionFeedback {
    pub correct: String,
    pub incorrect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub(crate) id: DefinitionId,
    /// 1-based position, re-sequenced on deletion.
    pub number: u32,
    pub text: String,
    /// Target drop zone. May dangle after the hotspot is deleted or stops
    /// being a drop zone.
    #[serde(default)]
    pub correct_hotspot_id: Option<HotspotId>,
    #[serde(default)]
    pub feedback: Option<DefinitionFeedback>,
}

impl Definition {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            text: text.into(),
            correct_hotspot_id: None,
            feedback: None,
        }
    }

    pub fn id(&self) -> DefinitionId {
        self.id
    }
}

/// What a definition's target resolves to against the current hotspots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefinitionTarget<'a> {
    Assigned(&'a Hotspot),
    Unassigned,
}

impl DefinitionTarget<'_> {
    pub fn is_assigned(&self) -> bool {
        matches!(self, DefinitionTarget::Assigned(_))
    }
}

impl fmt::Display for DefinitionTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionTarget::Assigned(hotspot) => write!(f, "{}", hotspot.name),
            DefinitionTarget::Unassigned => write!(f, "unassigned"),
        }
    }
}

/// Resolve the target of `definition`. Missing ids and hotspots that are no
/// longer drop zones resolve to [`DefinitionTarget::Unassigned`].
pub fn resolve_target<'a>(definition: &Definition, hotspots: &'a [Hotspot]) -> DefinitionTarget<'a> {
    definition
        .correct_hotspot_id
        .and_then(|id| hotspots.iter().find(|h| h.id() == id))
        .filter(|h| h.is_drop_zone)
        .map_or(DefinitionTarget::Unassigned, DefinitionTarget::Assigned)
}

/// Append a placeholder definition numbered after the existing ones.
pub fn add_definition(definitions: &[Definition]) -> Vec<Definition> {
    let mut next = definitions.to_vec();
    next.push(Definition::new(
        definitions.len() as u32 + 1,
        DEFAULT_DEFINITION_TEXT,
    ));
    next
}

/// Remove `id` and re-sequence the rest.
pub fn delete_definition(definitions: &[Definition], id: DefinitionId) -> Vec<Definition> {
    resequence(
        definitions
            .iter()
            .filter(|d| d.id != id)
            .cloned()
            .collect(),
    )
}

/// Renumber `1..=N` in list order.
pub fn resequence(mut definitions: Vec<Definition>) -> Vec<Definition> {
    for (index, definition) in definitions.iter_mut().enumerate() {
        definition.number = index as u32 + 1;
    }
    definitions
}

/// Apply `update` to the definition with `id`. Returns `None` if absent.
pub fn update_definition(
    definitions: &[Definition],
    id: DefinitionId,
    update: impl FnOnce(&mut Definition),
) -> Option<Vec<Definition>> {
    let index = definitions.iter().position(|d| d.id == id)?;
    let mut next = definitions.to_vec();
    update(&mut next[index]);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::synthesize_point;
    use kurbo::Point;

    fn three() -> Vec<Definition> {
        let defs = add_definition(&[]);
        let defs = add_definition(&defs);
        add_definition(&defs)
    }

    #[test]
    fn test_add_numbers_sequentially() {
        let defs = three();
        let numbers: Vec<u32> = defs.iter().map(|d| d.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(defs.iter().all(|d| d.text == DEFAULT_DEFINITION_TEXT));
        assert!(defs.iter().all(|d| d.correct_hotspot_id.is_none()));
    }

    #[test]
    fn test_delete_resequences_preserving_order() {
        let defs = three();
        let (first, last) = (defs[0].id(), defs[2].id());

        let after = delete_definition(&defs, defs[1].id());
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].id(), first);
        assert_eq!(after[1].id(), last);
        assert_eq!(after.iter().map(|d| d.number).collect::<Vec<_>>(), vec![1, 2]);

        let after = delete_definition(&after, first);
        assert_eq!(after[0].number, 1);
        assert_eq!(after[0].id(), last);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let defs = three();
        let after = delete_definition(&defs, Uuid::new_v4());
        assert_eq!(after, defs);
    }

    #[test]
    fn test_resolve_target() {
        let mut zone = Hotspot::new("Zone", synthesize_point(Point::new(0.0, 0.0)));
        zone.is_drop_zone = true;
        let hotspots = vec![zone.clone()];

        let mut def = Definition::new(1, "Capital");
        assert_eq!(resolve_target(&def, &hotspots), DefinitionTarget::Unassigned);

        def.correct_hotspot_id = Some(zone.id());
        assert!(resolve_target(&def, &hotspots).is_assigned());
        assert_eq!(resolve_target(&def, &hotspots).to_string(), "Zone");

        // Flag cleared: the id dangles.
        zone.is_drop_zone = false;
        assert_eq!(resolve_target(&def, &[zone]), DefinitionTarget::Unassigned);

        // Hotspot gone.
        assert_eq!(resolve_target(&def, &[]).to_string(), "unassigned");
    }

    #[test]
    fn test_update_definition() {
        let defs = three();
        let id = defs[1].id();
        let next = update_definition(&defs, id, |d| d.text = "Photosynthesis".into()).unwrap();
        assert_eq!(next[1].text, "Photosynthesis");
        assert_eq!(defs[1].text, DEFAULT_DEFINITION_TEXT);
        assert!(update_definition(&defs, Uuid::new_v4(), |_| {}).is_none());
    }
}
