//! Narrative generation - a four-part story assembled from node metadata and
//! the harmony classification.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use codex_registry::{ArchitectureMeta, CodexNode};

use crate::engine::Intent;
use crate::harmony::{HarmonyResult, Relationship};

/// The four story sections in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySections {
    pub opening: String,
    pub development: String,
    pub climax: String,
    pub resolution: String,
}

/// A generated short narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeResult {
    pub title: String,
    /// Themes present on the nodes, in input order.
    pub themes: Vec<String>,
    /// Archetypes present on the nodes, in input order.
    pub archetypes: Vec<String>,
    /// Story structure named by the harmony relationship.
    pub structure: String,
    pub story: StorySections,
    /// All four sections joined with blank lines.
    pub full_text: String,
    /// Keywords flattened across all nodes, order preserved.
    pub keywords: Vec<String>,
}

/// Generate a narrative from a node set and its harmony.
///
/// Title selection among the three fixed patterns is deterministic, seeded
/// by the node ids and the intent, so repeated calls reproduce their output.
pub fn generate(nodes: &[&CodexNode], harmony: &HarmonyResult, intent: &Intent) -> NarrativeResult {
    let themes: Vec<String> = nodes
        .iter()
        .filter_map(|n| n.theme_opt().map(String::from))
        .collect();
    let archetypes: Vec<String> = nodes
        .iter()
        .filter_map(|n| n.archetype_opt().map(String::from))
        .collect();
    let keywords: Vec<String> = nodes.iter().flat_map(|n| n.keywords().to_vec()).collect();

    let title = generate_title(nodes, &themes, &keywords, intent);
    let opening = generate_opening(nodes[0], harmony);
    let development = generate_development(nodes);
    let climax = generate_climax(nodes, harmony);
    let resolution = generate_resolution(nodes, harmony);

    let full_text = format!(
        "{}\n\n{}\n\n{}\n\n{}",
        opening, development, climax, resolution
    );

    NarrativeResult {
        title,
        themes,
        archetypes,
        structure: structure_for(harmony.relationship).to_string(),
        story: StorySections {
            opening,
            development,
            climax,
            resolution,
        },
        full_text,
        keywords,
    }
}

/// Fixed lookup from harmony relationship to a named story structure.
pub fn structure_for(relationship: Relationship) -> &'static str {
    match relationship {
        Relationship::PerfectHarmony => "Hero's Journey (Classic)",
        Relationship::Consonant => "Three-Act Structure",
        Relationship::Balanced => "Five-Act (Freytag's Pyramid)",
        Relationship::Tension => "Conflict-Resolution Arc",
        Relationship::Dissonant => "Tragedy or Dark Journey",
    }
}

fn generate_title(
    nodes: &[&CodexNode],
    themes: &[String],
    keywords: &[String],
    intent: &Intent,
) -> String {
    let keyword = |i: usize, default: &str| -> String {
        keywords.get(i).cloned().unwrap_or_else(|| default.to_string())
    };
    let theme = |i: usize, default: &str| -> String {
        themes.get(i).cloned().unwrap_or_else(|| default.to_string())
    };

    let patterns = [
        format!("The {} of {}", keyword(0, "Hidden"), keyword(1, "Mystery")),
        format!("{}: A Tale of {}", theme(0, "Mystery"), theme(1, "Mystery")),
        format!("Beyond the {}", keyword(2, "Veil")),
    ];

    let mut hasher = DefaultHasher::new();
    for node in nodes {
        node.id.hash(&mut hasher);
    }
    intent.hash(&mut hasher);
    patterns[(hasher.finish() % patterns.len() as u64) as usize].clone()
}

fn generate_opening(first: &CodexNode, harmony: &HarmonyResult) -> String {
    let setting = first
        .room_type()
        .unwrap_or(ArchitectureMeta::DEFAULT_OPENING_SETTING);
    format!(
        "In the depths of a {}, where {} whispers through stone, {} begins their journey. \
         The air hums with a frequency of {} Hz, resonating with {} energy.",
        setting,
        first.theme().to_lowercase(),
        first.archetype(),
        first.frequency_hz,
        harmony.relationship.to_string().to_lowercase()
    )
}

/// Up to three story beats across all nodes, joined with ordinal connectors.
fn generate_development(nodes: &[&CodexNode]) -> String {
    nodes
        .iter()
        .flat_map(|n| n.story_beats())
        .take(3)
        .enumerate()
        .map(|(i, beat)| {
            let connector = match i {
                0 => "First",
                1 => "Then",
                _ => "Finally",
            };
            format!("{}, {}.", connector, beat.to_lowercase())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_climax(nodes: &[&CodexNode], harmony: &HarmonyResult) -> String {
    let tension = if harmony.consonance_score < 6.0 {
        "chaotic"
    } else {
        "harmonious"
    };
    let final_beat = nodes
        .last()
        .and_then(|n| n.story_beats().first())
        .map(String::as_str)
        .unwrap_or("The path becomes clear");
    format!(
        "At the moment of truth, all forces converge in {} unity. {}.",
        tension, final_beat
    )
}

fn generate_resolution(nodes: &[&CodexNode], harmony: &HarmonyResult) -> String {
    let outcome = match harmony.relationship {
        Relationship::PerfectHarmony => "finds peace and understanding",
        Relationship::Dissonant => "embraces the necessary discord",
        _ => "achieves hard-won balance",
    };
    format!(
        "The seeker {}, forever changed by the journey through {} sacred stations.",
        outcome,
        nodes.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::analyze_harmony;
    use codex_registry::{Element, GeometryForm, NarrativeMeta, NodeId};

    fn story_node(id: u32, frequency_hz: f64) -> CodexNode {
        CodexNode::new(
            NodeId(id),
            format!("Node {}", id),
            Element::Fire,
            frequency_hz,
            GeometryForm::Tetrahedron,
            "#FF4500".parse().unwrap(),
        )
        .with_narrative(
            NarrativeMeta::new("Transformation", "The Phoenix")
                .with_keywords(["Flame", "Rebirth", "Ash"])
                .with_story_beats(["The spark catches", "The blaze spreads"]),
        )
    }

    #[test]
    fn test_generate_full_story() {
        let a = story_node(1, 256.0);
        let b = story_node(2, 512.0);
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);

        let narrative = generate(&nodes, &harmony, &Intent::Narrative);

        assert_eq!(narrative.structure, "Hero's Journey (Classic)");
        assert_eq!(narrative.themes.len(), 2);
        assert_eq!(narrative.archetypes, vec!["The Phoenix", "The Phoenix"]);
        assert_eq!(narrative.keywords.len(), 6);
        assert!(narrative.story.opening.contains("256 Hz"));
        assert!(narrative.story.opening.contains("perfect harmony energy"));
        assert!(narrative.story.development.starts_with("First, the spark catches."));
        assert!(narrative.story.development.contains("Then,"));
        assert!(narrative.story.climax.contains("harmonious unity"));
        assert!(narrative
            .story
            .resolution
            .contains("journey through 2 sacred stations"));
        assert_eq!(
            narrative.full_text,
            format!(
                "{}\n\n{}\n\n{}\n\n{}",
                narrative.story.opening,
                narrative.story.development,
                narrative.story.climax,
                narrative.story.resolution
            )
        );
    }

    #[test]
    fn test_title_is_deterministic() {
        let a = story_node(1, 256.0);
        let b = story_node(2, 512.0);
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);

        let first = generate(&nodes, &harmony, &Intent::Narrative);
        let second = generate(&nodes, &harmony, &Intent::Narrative);
        assert_eq!(first.title, second.title);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bare_nodes_use_defaults() {
        let a = CodexNode::new(
            NodeId(1),
            "Bare",
            Element::Water,
            417.0,
            GeometryForm::Cube,
            "#1E90FF".parse().unwrap(),
        );
        let nodes = vec![&a];
        let harmony = analyze_harmony(&nodes);

        let narrative = generate(&nodes, &harmony, &Intent::Balanced);

        assert!(narrative.themes.is_empty());
        assert!(narrative.keywords.is_empty());
        assert!(narrative.story.opening.contains("ancient chamber"));
        assert!(narrative.story.opening.contains("mystery whispers"));
        assert!(narrative.story.opening.contains("The Seeker"));
        // No beats anywhere: development is empty, climax falls back
        assert!(narrative.story.development.is_empty());
        assert!(narrative.story.climax.contains("The path becomes clear"));
    }

    #[test]
    fn test_dissonant_resolution() {
        // 283/200 = 1.415 is a tritone (weight 3), landing in the Dissonant band
        let mut a = story_node(1, 200.0);
        a.narrative = None;
        let mut b = story_node(2, 283.0);
        b.narrative = None;
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);
        assert_eq!(harmony.relationship, Relationship::Dissonant);

        let narrative = generate(&nodes, &harmony, &Intent::Narrative);
        assert!(narrative
            .story
            .resolution
            .contains("embraces the necessary discord"));
        assert_eq!(narrative.structure, "Tragedy or Dark Journey");
    }
}
