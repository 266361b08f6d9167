//! Harmonic analysis - the shared upstream of every generator.
//!
//! Given an ordered set of nodes, the analysis derives:
//! 1. **Ratios**: every unordered pair's frequency ratio, classified into a
//!    named musical interval
//! 2. **Consonance**: the mean interval weight, banded into a relationship
//! 3. **Elemental balance**: element counts, dominance, diversity, evenness
//! 4. **Geometric compatibility**: distinct form tags and Platonic coverage
//! 5. **Overall harmony**: a weighted blend of consonance and evenness

mod interval;

pub use interval::*;

use serde::{Deserialize, Serialize};

use codex_registry::{CodexNode, Element, GeometryForm, ELEMENT_COUNT};

/// Consonance score assigned to a single-node set, which has no pairs to
/// average. A lone node is trivially self-consonant.
pub const NEUTRAL_CONSONANCE: f64 = 10.0;

/// Element distribution across a node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementalBalance {
    /// Element counts in first-seen order.
    pub counts: Vec<(Element, usize)>,
    /// Element with the highest count; first seen wins ties.
    pub dominant: Element,
    /// Distinct elements over the size of the element set.
    pub diversity: f64,
    /// `1 - (max_count/total - 0.2) * 5`. Deliberately unclamped; a
    /// single-element set scores negative.
    pub evenness: f64,
}

impl ElementalBalance {
    /// Count for a specific element, zero if absent.
    pub fn count_of(&self, element: Element) -> usize {
        self.counts
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Whether the element appears at all.
    pub fn has(&self, element: Element) -> bool {
        self.count_of(element) > 0
    }
}

/// Geometry distribution across a node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricCompatibility {
    /// Distinct form tags in first-seen order.
    pub types: Vec<GeometryForm>,
    /// Distinct forms over node count.
    pub diversity: f64,
    /// How many distinct forms are Platonic solids.
    pub platonic_count: usize,
}

/// The complete harmonic analysis of a node set. Computed fresh per call and
/// consumed read-only by all generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyResult {
    /// One entry per unordered pair (i < j), in enumeration order.
    pub freq_ratios: Vec<FrequencyRatio>,
    pub consonance_score: f64,
    pub relationship: Relationship,
    pub elemental_balance: ElementalBalance,
    pub geometric_compatibility: GeometricCompatibility,
    /// `consonance*0.6 + evenness*10*0.4`, formatted to 2 decimal places.
    pub overall_harmony: String,
}

impl HarmonyResult {
    /// The overall harmony parsed back to a number.
    pub fn overall_harmony_value(&self) -> f64 {
        self.overall_harmony.parse().unwrap_or(0.0)
    }
}

/// Analyze the harmony of an ordered node set.
///
/// Requires at least one node; the facade guarantees this. With a single
/// node there are no pairs, `freq_ratios` is empty, and the consonance
/// score defaults to [`NEUTRAL_CONSONANCE`].
pub fn analyze_harmony(nodes: &[&CodexNode]) -> HarmonyResult {
    let freq_ratios = calculate_ratios(nodes);
    let consonance_score = measure_consonance(&freq_ratios);
    let relationship = Relationship::from_score(consonance_score);
    let elemental_balance = elemental_balance(nodes);
    let geometric_compatibility = geometry_check(nodes);
    let overall_harmony = format!(
        "{:.2}",
        consonance_score * 0.6 + elemental_balance.evenness * 10.0 * 0.4
    );

    HarmonyResult {
        freq_ratios,
        consonance_score,
        relationship,
        elemental_balance,
        geometric_compatibility,
        overall_harmony,
    }
}

/// Pairwise ratios, later index over earlier, in (i ascending, j ascending)
/// order.
fn calculate_ratios(nodes: &[&CodexNode]) -> Vec<FrequencyRatio> {
    let mut ratios = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            ratios.push(FrequencyRatio::from_ratio(
                nodes[j].frequency_hz / nodes[i].frequency_hz,
            ));
        }
    }
    ratios
}

fn measure_consonance(ratios: &[FrequencyRatio]) -> f64 {
    if ratios.is_empty() {
        return NEUTRAL_CONSONANCE;
    }
    let total: f64 = ratios.iter().map(|r| r.interval.consonance_weight()).sum();
    total / ratios.len() as f64
}

fn elemental_balance(nodes: &[&CodexNode]) -> ElementalBalance {
    let mut counts: Vec<(Element, usize)> = Vec::new();
    for node in nodes {
        match counts.iter_mut().find(|(e, _)| *e == node.element) {
            Some((_, count)) => *count += 1,
            None => counts.push((node.element, 1)),
        }
    }

    let total = nodes.len() as f64;
    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let dominant = counts
        .iter()
        .find(|(_, c)| *c == max_count)
        .map(|(e, _)| *e)
        .unwrap_or(Element::Aether);

    ElementalBalance {
        diversity: counts.len() as f64 / ELEMENT_COUNT as f64,
        evenness: 1.0 - (max_count as f64 / total - 0.2) * 5.0,
        dominant,
        counts,
    }
}

fn geometry_check(nodes: &[&CodexNode]) -> GeometricCompatibility {
    let mut types: Vec<GeometryForm> = Vec::new();
    for node in nodes {
        if !types.contains(&node.geometry) {
            types.push(node.geometry.clone());
        }
    }

    GeometricCompatibility {
        diversity: types.len() as f64 / nodes.len() as f64,
        platonic_count: types.iter().filter(|g| g.is_platonic()).count(),
        types,
    }
}
