//! Optional metadata bags carried by codex nodes.
//!
//! Every bag and every field inside a bag is optional. The documented
//! default for each field lives here as an associated constant, so the
//! substitution policy is auditable in one place per bag type.

use serde::{Deserialize, Serialize};

/// Story metadata: theme, archetype, and raw narrative material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NarrativeMeta {
    pub theme: Option<String>,
    pub archetype: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub story_beats: Vec<String>,
}

impl NarrativeMeta {
    /// Theme substituted when a node carries none.
    pub const DEFAULT_THEME: &'static str = "Mystery";
    /// Archetype substituted when a node carries none.
    pub const DEFAULT_ARCHETYPE: &'static str = "The Seeker";

    /// Create a metadata bag with a theme and archetype.
    pub fn new(theme: impl Into<String>, archetype: impl Into<String>) -> Self {
        Self {
            theme: Some(theme.into()),
            archetype: Some(archetype.into()),
            keywords: Vec::new(),
            story_beats: Vec::new(),
        }
    }

    /// Add keywords to this bag.
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Add story beats to this bag.
    pub fn with_story_beats(
        mut self,
        beats: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.story_beats.extend(beats.into_iter().map(Into::into));
        self
    }
}

/// Game-design metadata: mechanics and quest/ability/reward tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameMeta {
    #[serde(default)]
    pub mechanics: Vec<String>,
    pub quest_type: Option<String>,
    pub ability_type: Option<String>,
    pub environment_effect: Option<String>,
    pub enemy_affinity: Option<String>,
    pub reward_style: Option<String>,
}

impl GameMeta {
    /// Ability type substituted when a node carries none.
    pub const DEFAULT_ABILITY_TYPE: &'static str = "Passive";
    /// Ability effect substituted when a node lists no mechanics.
    pub const DEFAULT_ABILITY_EFFECT: &'static str = "Unknown effect";
    /// Reward style substituted when a node carries none.
    pub const DEFAULT_REWARD_STYLE: &'static str = "Artifact";
    /// Objective requirement substituted when a node has no environment effect.
    pub const DEFAULT_REQUIREMENT: &'static str = "none";
    /// Phase-transition effect substituted when a node has no environment effect.
    pub const DEFAULT_TRANSITION_EFFECT: &'static str = "Environmental change";

    /// Add mechanics to this bag.
    pub fn with_mechanics(mut self, mechanics: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.mechanics.extend(mechanics.into_iter().map(Into::into));
        self
    }

    /// Set the quest type.
    pub fn with_quest_type(mut self, quest_type: impl Into<String>) -> Self {
        self.quest_type = Some(quest_type.into());
        self
    }

    /// Set the ability type.
    pub fn with_ability_type(mut self, ability_type: impl Into<String>) -> Self {
        self.ability_type = Some(ability_type.into());
        self
    }

    /// Set the environment effect.
    pub fn with_environment_effect(mut self, effect: impl Into<String>) -> Self {
        self.environment_effect = Some(effect.into());
        self
    }

    /// Set the enemy affinity.
    pub fn with_enemy_affinity(mut self, affinity: impl Into<String>) -> Self {
        self.enemy_affinity = Some(affinity.into());
        self
    }

    /// Set the reward style.
    pub fn with_reward_style(mut self, style: impl Into<String>) -> Self {
        self.reward_style = Some(style.into());
        self
    }
}

/// Architecture metadata: the physical space a node implies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ArchitectureMeta {
    pub room_type: Option<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    pub lighting: Option<String>,
    pub ambience: Option<String>,
    pub symbol_placement: Option<String>,
}

impl ArchitectureMeta {
    /// Setting used in story openings when a node names no room.
    pub const DEFAULT_OPENING_SETTING: &'static str = "ancient chamber";
    /// Objective location used when a node names no room.
    pub const DEFAULT_OBJECTIVE_LOCATION: &'static str = "sacred chamber";
    /// Station feature used when a node names no room.
    pub const DEFAULT_STATION_FEATURE: &'static str = "Altar";
    /// Lighting quality substituted when a node carries none.
    pub const DEFAULT_LIGHTING: &'static str = "Ethereal, shifting";
    /// Per-source lighting effect substituted when a node carries none.
    pub const DEFAULT_LIGHT_EFFECT: &'static str = "Steady glow";
    /// Carving material substituted when a node lists none.
    pub const DEFAULT_CARVING_MATERIAL: &'static str = "stone";
    /// Symbol orientation substituted when a node carries none.
    pub const DEFAULT_SYMBOL_PLACEMENT: &'static str = "Facing center";

    /// Create a metadata bag with a room type.
    pub fn new(room_type: impl Into<String>) -> Self {
        Self {
            room_type: Some(room_type.into()),
            ..Default::default()
        }
    }

    /// Add materials to this bag.
    pub fn with_materials(mut self, materials: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.materials.extend(materials.into_iter().map(Into::into));
        self
    }

    /// Set the lighting quality.
    pub fn with_lighting(mut self, lighting: impl Into<String>) -> Self {
        self.lighting = Some(lighting.into());
        self
    }

    /// Set the ambient sound.
    pub fn with_ambience(mut self, ambience: impl Into<String>) -> Self {
        self.ambience = Some(ambience.into());
        self
    }

    /// Set the symbol placement.
    pub fn with_symbol_placement(mut self, placement: impl Into<String>) -> Self {
        self.symbol_placement = Some(placement.into());
        self
    }
}

/// Symbolism metadata: glyph and pattern tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SymbolismMeta {
    pub primary_symbol: Option<String>,
    pub geometric_pattern: Option<String>,
}

impl SymbolismMeta {
    /// Glyph substituted when a node carries none.
    pub const DEFAULT_SYMBOL: &'static str = "◯";
    /// Glyph name used in ability visuals when a node carries none.
    pub const DEFAULT_GLYPH_NAME: &'static str = "glyph";
    /// Texture pattern substituted when a node carries none.
    pub const DEFAULT_PATTERN: &'static str = "Smooth";

    /// Create a metadata bag with a primary symbol.
    pub fn new(primary_symbol: impl Into<String>) -> Self {
        Self {
            primary_symbol: Some(primary_symbol.into()),
            geometric_pattern: None,
        }
    }

    /// Set the geometric pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.geometric_pattern = Some(pattern.into());
        self
    }
}
