//! # Creative Engine
//!
//! The Creative Combination Engine. Given a set of codex nodes from
//! `codex_registry`, it derives a harmonic analysis and feeds that analysis
//! to four independent generators.
//!
//! ## Core Components
//!
//! - **harmony**: Pairwise frequency-ratio analysis, interval classification,
//!   and elemental/geometric balance scoring
//! - **narrative**: Four-part story assembly from node themes and story beats
//! - **game**: Quest, encounter, ability, and reward design
//! - **spatial**: Ritual-chamber layout, lighting, materials, and acoustics
//! - **symbol**: Color blending, pattern merging, and SVG symbol fusion
//! - **engine**: The facade that resolves node ids and assembles the combined
//!   result
//!
//! ## Design Philosophy
//!
//! - **Pure derivation**: Every analyzer and generator is a pure function of
//!   its arguments; results are allocated fresh per call and never mutated
//! - **One-directional flow**: Generators consume the harmony result
//!   independently; all coordination lives in the facade
//! - **Defaults over failures**: Missing metadata bags substitute documented
//!   defaults; only invalid input (empty sets, unknown ids) is an error

pub mod engine;
pub mod game;
pub mod harmony;
pub mod narrative;
pub mod spatial;
pub mod symbol;

pub use engine::{CombinationId, CombinedResult, CreativeEngine, EngineError, Intent};
pub use game::{
    Ability, Cooldown, Difficulty, Encounter, GameResult, Objective, PhaseTransition, RewardItem,
    Rewards,
};
pub use harmony::{
    analyze_harmony, simplify_ratio, ElementalBalance, FrequencyRatio, GeometricCompatibility,
    HarmonyResult, IntervalType, Relationship,
};
pub use narrative::{NarrativeResult, StorySections};
pub use spatial::{
    Acoustics, Atmosphere, LightingPlan, MaterialPalette, PlacedSymbol, RoomLayout, SpaceResult,
    Station, Temperature,
};
pub use symbol::{ColorScheme, FusionMeaning, PatternFusion, SymbolResult};
