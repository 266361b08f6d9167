//! The engine facade - resolves node ids against the registry, runs the
//! harmonic analysis, and fans out to the four generators.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use codex_registry::{CodexNode, NodeId, NodeRegistry};

use crate::game::{self, GameResult};
use crate::harmony::{analyze_harmony, HarmonyResult};
use crate::narrative::{self, NarrativeResult};
use crate::spatial::{self, SpaceResult};
use crate::symbol::{self, SymbolResult};

/// Errors raised by the engine before any generation runs.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The resolved node list is empty; there is nothing to combine.
    #[error("empty node set: at least one node id is required")]
    EmptyNodeSet,

    /// A requested id is not present in the registry.
    #[error("unknown node id {0}")]
    UnknownNode(NodeId),
}

/// The declared purpose of a combination. Recorded on the result; it also
/// seeds the narrative title selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Intent {
    #[default]
    Balanced,
    Narrative,
    Game,
    Architecture,
    Symbolic,
    Custom(String),
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Balanced => write!(f, "balanced"),
            Intent::Narrative => write!(f, "narrative"),
            Intent::Game => write!(f, "game"),
            Intent::Architecture => write!(f, "architecture"),
            Intent::Symbolic => write!(f, "symbolic"),
            Intent::Custom(s) => write!(f, "{}", s),
        }
    }
}

/// Unique identifier for one combination result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombinationId(pub Uuid);

impl CombinationId {
    /// Create a new random combination ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombinationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CombinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything one combination call produces. A plain aggregate with no
/// lifecycle beyond the call; sub-results never reference each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedResult {
    pub id: CombinationId,
    pub intent: Intent,
    pub harmony: HarmonyResult,
    pub narrative: NarrativeResult,
    pub game: GameResult,
    pub architecture: SpaceResult,
    pub symbol: SymbolResult,
}

/// The Creative Combination Engine.
///
/// Holds the injected registry and nothing else; every operation is a pure
/// function of its arguments and the registry contents, so concurrent calls
/// need no coordination.
#[derive(Debug, Clone)]
pub struct CreativeEngine {
    registry: NodeRegistry,
}

impl CreativeEngine {
    /// Create an engine over a node registry.
    pub fn new(registry: NodeRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine draws from.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Combine a set of nodes under an intent.
    ///
    /// Fails fast on an empty id list or an id the registry does not hold;
    /// no partial results are produced.
    pub fn combine_nodes(
        &self,
        node_ids: &[NodeId],
        intent: Intent,
    ) -> Result<CombinedResult, EngineError> {
        let nodes = self.resolve(node_ids)?;
        tracing::debug!(node_count = nodes.len(), %intent, "combining codex nodes");

        let harmony = analyze_harmony(&nodes);
        let narrative = narrative::generate(&nodes, &harmony, &intent);
        let game = game::design(&nodes, &harmony, &intent);
        let architecture = spatial::design(&nodes, &harmony);
        let symbol = symbol::fuse(&nodes, &harmony);

        Ok(CombinedResult {
            id: CombinationId::new(),
            intent,
            harmony,
            narrative,
            game,
            architecture,
            symbol,
        })
    }

    /// Generate a story from a node combination.
    pub fn generate_story(&self, node_ids: &[NodeId]) -> Result<NarrativeResult, EngineError> {
        self.combine_nodes(node_ids, Intent::Narrative)
            .map(|result| result.narrative)
    }

    /// Design a quest or encounter from a node combination.
    pub fn design_quest(&self, node_ids: &[NodeId]) -> Result<GameResult, EngineError> {
        self.combine_nodes(node_ids, Intent::Game)
            .map(|result| result.game)
    }

    /// Design a ritual chamber from a node combination.
    pub fn design_space(&self, node_ids: &[NodeId]) -> Result<SpaceResult, EngineError> {
        self.combine_nodes(node_ids, Intent::Architecture)
            .map(|result| result.architecture)
    }

    /// Fuse the symbols of a node combination.
    pub fn fuse_symbols(&self, node_ids: &[NodeId]) -> Result<SymbolResult, EngineError> {
        self.combine_nodes(node_ids, Intent::Symbolic)
            .map(|result| result.symbol)
    }

    fn resolve(&self, node_ids: &[NodeId]) -> Result<Vec<&CodexNode>, EngineError> {
        if node_ids.is_empty() {
            return Err(EngineError::EmptyNodeSet);
        }
        node_ids
            .iter()
            .map(|&id| self.registry.find(id).ok_or(EngineError::UnknownNode(id)))
            .collect()
    }
}
