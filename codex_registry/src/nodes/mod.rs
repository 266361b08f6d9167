//! Codex node definitions.

mod metadata;

pub use metadata::*;

use serde::{Deserialize, Serialize};

use crate::attributes::{Color, Element, GeometryForm};

/// Unique identifier for a codex node within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A codex node: a named station with a base frequency, element, geometric
/// form, color, and four optional metadata bags.
///
/// Invariant: `frequency_hz` must be positive. The registry enforces this at
/// construction so downstream ratio analysis never divides by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodexNode {
    pub id: NodeId,
    pub name: String,
    pub element: Element,
    pub frequency_hz: f64,
    pub geometry: GeometryForm,
    pub color: Color,

    #[serde(default)]
    pub narrative: Option<NarrativeMeta>,
    #[serde(default)]
    pub game_design: Option<GameMeta>,
    #[serde(default)]
    pub architecture: Option<ArchitectureMeta>,
    #[serde(default)]
    pub symbolism: Option<SymbolismMeta>,
}

impl CodexNode {
    /// Create a node with the required attributes and no metadata bags.
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        element: Element,
        frequency_hz: f64,
        geometry: GeometryForm,
        color: Color,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            element,
            frequency_hz,
            geometry,
            color,
            narrative: None,
            game_design: None,
            architecture: None,
            symbolism: None,
        }
    }

    /// Attach narrative metadata.
    pub fn with_narrative(mut self, narrative: NarrativeMeta) -> Self {
        self.narrative = Some(narrative);
        self
    }

    /// Attach game-design metadata.
    pub fn with_game_design(mut self, game_design: GameMeta) -> Self {
        self.game_design = Some(game_design);
        self
    }

    /// Attach architecture metadata.
    pub fn with_architecture(mut self, architecture: ArchitectureMeta) -> Self {
        self.architecture = Some(architecture);
        self
    }

    /// Attach symbolism metadata.
    pub fn with_symbolism(mut self, symbolism: SymbolismMeta) -> Self {
        self.symbolism = Some(symbolism);
        self
    }

    // --- Narrative accessors (defaults documented on `NarrativeMeta`) ---

    /// The node's theme, or the default theme.
    pub fn theme(&self) -> &str {
        self.narrative
            .as_ref()
            .and_then(|m| m.theme.as_deref())
            .unwrap_or(NarrativeMeta::DEFAULT_THEME)
    }

    /// The node's theme if it carries one.
    pub fn theme_opt(&self) -> Option<&str> {
        self.narrative.as_ref().and_then(|m| m.theme.as_deref())
    }

    /// The node's archetype, or the default archetype.
    pub fn archetype(&self) -> &str {
        self.narrative
            .as_ref()
            .and_then(|m| m.archetype.as_deref())
            .unwrap_or(NarrativeMeta::DEFAULT_ARCHETYPE)
    }

    /// The node's archetype if it carries one.
    pub fn archetype_opt(&self) -> Option<&str> {
        self.narrative.as_ref().and_then(|m| m.archetype.as_deref())
    }

    /// Narrative keywords, empty when the bag is absent.
    pub fn keywords(&self) -> &[String] {
        self.narrative.as_ref().map(|m| m.keywords.as_slice()).unwrap_or(&[])
    }

    /// Story beats, empty when the bag is absent.
    pub fn story_beats(&self) -> &[String] {
        self.narrative
            .as_ref()
            .map(|m| m.story_beats.as_slice())
            .unwrap_or(&[])
    }

    // --- Game-design accessors ---

    /// Game mechanics, empty when the bag is absent.
    pub fn mechanics(&self) -> &[String] {
        self.game_design
            .as_ref()
            .map(|m| m.mechanics.as_slice())
            .unwrap_or(&[])
    }

    /// Quest type if the node carries one.
    pub fn quest_type(&self) -> Option<&str> {
        self.game_design.as_ref().and_then(|m| m.quest_type.as_deref())
    }

    /// Ability type, or the default.
    pub fn ability_type(&self) -> &str {
        self.game_design
            .as_ref()
            .and_then(|m| m.ability_type.as_deref())
            .unwrap_or(GameMeta::DEFAULT_ABILITY_TYPE)
    }

    /// Environment effect if the node carries one.
    pub fn environment_effect(&self) -> Option<&str> {
        self.game_design
            .as_ref()
            .and_then(|m| m.environment_effect.as_deref())
    }

    /// Enemy affinity if the node carries one.
    pub fn enemy_affinity(&self) -> Option<&str> {
        self.game_design
            .as_ref()
            .and_then(|m| m.enemy_affinity.as_deref())
    }

    /// Reward style, or the default.
    pub fn reward_style(&self) -> &str {
        self.game_design
            .as_ref()
            .and_then(|m| m.reward_style.as_deref())
            .unwrap_or(GameMeta::DEFAULT_REWARD_STYLE)
    }

    // --- Architecture accessors ---

    /// Room type if the node carries one. Consumers substitute their own
    /// documented default (`ArchitectureMeta::DEFAULT_*`).
    pub fn room_type(&self) -> Option<&str> {
        self.architecture.as_ref().and_then(|m| m.room_type.as_deref())
    }

    /// Architectural materials, empty when the bag is absent.
    pub fn materials(&self) -> &[String] {
        self.architecture
            .as_ref()
            .map(|m| m.materials.as_slice())
            .unwrap_or(&[])
    }

    /// Lighting quality if the node carries one.
    pub fn lighting(&self) -> Option<&str> {
        self.architecture.as_ref().and_then(|m| m.lighting.as_deref())
    }

    /// Ambient sound if the node carries one.
    pub fn ambience(&self) -> Option<&str> {
        self.architecture.as_ref().and_then(|m| m.ambience.as_deref())
    }

    /// Symbol orientation, or the default.
    pub fn symbol_placement(&self) -> &str {
        self.architecture
            .as_ref()
            .and_then(|m| m.symbol_placement.as_deref())
            .unwrap_or(ArchitectureMeta::DEFAULT_SYMBOL_PLACEMENT)
    }

    // --- Symbolism accessors ---

    /// Primary symbol if the node carries one.
    pub fn primary_symbol(&self) -> Option<&str> {
        self.symbolism
            .as_ref()
            .and_then(|m| m.primary_symbol.as_deref())
    }

    /// Geometric pattern if the node carries one.
    pub fn geometric_pattern(&self) -> Option<&str> {
        self.symbolism
            .as_ref()
            .and_then(|m| m.geometric_pattern.as_deref())
    }
}
