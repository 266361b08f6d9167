//! Node registry - the ordered, read-only collection the engine draws from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::nodes::{CodexNode, NodeId};

/// Errors raised while constructing or loading a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two nodes share the same id.
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),

    /// A node's frequency is zero or negative; ratio analysis is undefined.
    #[error("node {id} has non-positive frequency {frequency_hz} Hz")]
    NonPositiveFrequency { id: NodeId, frequency_hz: f64 },

    /// The TOML document could not be parsed.
    #[error("failed to parse TOML registry: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON document could not be parsed.
    #[error("failed to parse JSON registry: {0}")]
    Json(#[from] serde_json::Error),
}

/// Document shape for registry files: a top-level `nodes` list.
#[derive(Debug, Serialize, Deserialize)]
struct RegistryDoc {
    nodes: Vec<CodexNode>,
}

/// An ordered collection of codex nodes with id lookup.
///
/// The registry is immutable after construction; the engine only ever reads
/// from it. Construction validates id uniqueness and positive frequencies so
/// every node handed to the analyzers satisfies the frequency invariant.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Vec<CodexNode>,
    by_id: HashMap<NodeId, usize>,
}

impl NodeRegistry {
    /// Build a registry from a list of nodes, preserving input order.
    pub fn from_nodes(nodes: Vec<CodexNode>) -> Result<Self, RegistryError> {
        let mut by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if node.frequency_hz <= 0.0 {
                return Err(RegistryError::NonPositiveFrequency {
                    id: node.id,
                    frequency_hz: node.frequency_hz,
                });
            }
            if by_id.insert(node.id, index).is_some() {
                return Err(RegistryError::DuplicateId(node.id));
            }
        }
        Ok(Self { nodes, by_id })
    }

    /// Load a registry from a TOML document with a `[[nodes]]` array.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let doc: RegistryDoc = toml::from_str(toml_str)?;
        Self::from_nodes(doc.nodes)
    }

    /// Load a registry from a JSON document with a top-level `nodes` array.
    pub fn from_json_str(json_str: &str) -> Result<Self, RegistryError> {
        let doc: RegistryDoc = serde_json::from_str(json_str)?;
        Self::from_nodes(doc.nodes)
    }

    /// Look up a node by id.
    pub fn find(&self, id: NodeId) -> Option<&CodexNode> {
        self.by_id.get(&id).map(|&index| &self.nodes[index])
    }

    /// Iterate over all nodes in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &CodexNode> {
        self.nodes.iter()
    }

    /// Number of nodes in the registry.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
