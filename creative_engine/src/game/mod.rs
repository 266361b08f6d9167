//! Game design - quests, encounters, abilities, and rewards derived from a
//! node set and its harmony.

use serde::{Deserialize, Serialize};

use codex_registry::{ArchitectureMeta, CodexNode, GameMeta, SymbolismMeta};

use crate::engine::Intent;
use crate::harmony::{HarmonyResult, Relationship};

/// Difficulty bands over the overall harmony score. Lower harmony means a
/// harder encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Nightmare,
    Hard,
    Medium,
    Easy,
}

impl Difficulty {
    /// Band an overall harmony score.
    pub fn from_overall_harmony(score: f64) -> Difficulty {
        if score < 5.0 {
            Difficulty::Nightmare
        } else if score < 6.5 {
            Difficulty::Hard
        } else if score < 8.0 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Nightmare => "Nightmare",
            Difficulty::Hard => "Hard",
            Difficulty::Medium => "Medium",
            Difficulty::Easy => "Easy",
        };
        write!(f, "{}", name)
    }
}

/// Ability cooldown length, driven by the consonance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cooldown {
    Long,
    Medium,
}

impl std::fmt::Display for Cooldown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cooldown::Long => write!(f, "Long"),
            Cooldown::Medium => write!(f, "Medium"),
        }
    }
}

/// An ordered quest objective, one per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub order: usize,
    pub description: String,
    pub location: String,
    pub requirement: String,
}

/// A phase transition in the encounter, one per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub trigger: String,
    pub effect: String,
}

/// The encounter shape for the quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub enemy_count: usize,
    pub phases: usize,
    pub phase_transitions: Vec<PhaseTransition>,
    /// Enemy affinities across nodes where present.
    pub weaknesses: Vec<String>,
}

/// A player ability invoked from one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub ability_type: String,
    pub effect: String,
    /// `floor(frequency / 10)`.
    pub cost: u32,
    pub cooldown: Cooldown,
    pub visual_effect: String,
}

/// A reward item, one per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    pub name: String,
    pub kind: String,
    pub bonus: String,
}

/// The reward bundle for completing the quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    /// Sum of all node frequencies.
    pub experience: f64,
    pub items: Vec<RewardItem>,
    pub unlock: String,
}

/// A complete quest design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub quest_type: String,
    pub objectives: Vec<Objective>,
    pub encounter: Encounter,
    /// Deduplicated mechanics across all nodes, first-seen order.
    pub mechanics: Vec<String>,
    pub abilities: Vec<Ability>,
    pub rewards: Rewards,
    pub difficulty: Difficulty,
    /// Environment effects across nodes where present.
    pub environmental_hazards: Vec<String>,
}

/// Quest type forced by a dissonant relationship.
pub const BOSS_FIGHT: &str = "Boss Fight";
/// Quest type forced by a tense relationship.
pub const SURVIVAL_CHALLENGE: &str = "Survival Challenge";
/// Quest type used when no node declares one.
pub const DEFAULT_QUEST_TYPE: &str = "Exploration";

/// Design a quest from a node set and its harmony. The intent is recorded by
/// the facade but does not alter the design.
pub fn design(nodes: &[&CodexNode], harmony: &HarmonyResult, _intent: &Intent) -> GameResult {
    let quest_type = determine_quest_type(nodes, harmony);
    GameResult {
        objectives: generate_objectives(nodes, &quest_type),
        encounter: design_encounter(nodes, harmony),
        mechanics: merged_mechanics(nodes),
        abilities: create_abilities(nodes, harmony),
        rewards: generate_rewards(nodes),
        difficulty: Difficulty::from_overall_harmony(harmony.overall_harmony_value()),
        environmental_hazards: nodes
            .iter()
            .filter_map(|n| n.environment_effect().map(String::from))
            .collect(),
        quest_type,
    }
}

/// Dissonance forces a boss fight and tension a survival challenge;
/// otherwise the most frequent node quest type wins, first max on ties,
/// defaulting when no node declares one.
fn determine_quest_type(nodes: &[&CodexNode], harmony: &HarmonyResult) -> String {
    match harmony.relationship {
        Relationship::Dissonant => return BOSS_FIGHT.to_string(),
        Relationship::Tension => return SURVIVAL_CHALLENGE.to_string(),
        _ => {}
    }

    let types: Vec<Option<&str>> = nodes.iter().map(|n| n.quest_type()).collect();
    let count = |value: Option<&str>| types.iter().filter(|t| **t == value).count();
    let dominant = types
        .iter()
        .copied()
        .reduce(|a, b| if count(a) >= count(b) { a } else { b })
        .flatten();

    dominant.unwrap_or(DEFAULT_QUEST_TYPE).to_string()
}

fn generate_objectives(nodes: &[&CodexNode], quest_type: &str) -> Vec<Objective> {
    let action = match quest_type {
        BOSS_FIGHT => "Defeat",
        SURVIVAL_CHALLENGE => "Survive",
        _ => "Discover",
    };

    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| Objective {
            order: i + 1,
            description: format!(
                "{} the {} of {}",
                action,
                node.archetype_opt().unwrap_or("guardian"),
                node.name
            ),
            location: node
                .room_type()
                .unwrap_or(ArchitectureMeta::DEFAULT_OBJECTIVE_LOCATION)
                .to_string(),
            requirement: node
                .environment_effect()
                .unwrap_or(GameMeta::DEFAULT_REQUIREMENT)
                .to_string(),
        })
        .collect()
}

fn design_encounter(nodes: &[&CodexNode], harmony: &HarmonyResult) -> Encounter {
    let enemy_count =
        (nodes.len() as f64 * harmony.elemental_balance.diversity * 3.0).floor() as usize;

    Encounter {
        enemy_count,
        phases: nodes.len().div_ceil(2),
        phase_transitions: nodes
            .iter()
            .map(|node| PhaseTransition {
                trigger: format!("{} threshold reached", node.element),
                effect: node
                    .environment_effect()
                    .unwrap_or(GameMeta::DEFAULT_TRANSITION_EFFECT)
                    .to_string(),
            })
            .collect(),
        weaknesses: nodes
            .iter()
            .filter_map(|n| n.enemy_affinity().map(String::from))
            .collect(),
    }
}

fn merged_mechanics(nodes: &[&CodexNode]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for mechanic in nodes.iter().flat_map(|n| n.mechanics()) {
        if !merged.contains(mechanic) {
            merged.push(mechanic.clone());
        }
    }
    merged
}

fn create_abilities(nodes: &[&CodexNode], harmony: &HarmonyResult) -> Vec<Ability> {
    let cooldown = if harmony.consonance_score < 6.0 {
        Cooldown::Long
    } else {
        Cooldown::Medium
    };

    nodes
        .iter()
        .map(|node| Ability {
            name: format!("{} Invocation", node.name),
            ability_type: node.ability_type().to_string(),
            effect: node
                .mechanics()
                .first()
                .map(String::as_str)
                .unwrap_or(GameMeta::DEFAULT_ABILITY_EFFECT)
                .to_string(),
            cost: (node.frequency_hz / 10.0).floor() as u32,
            cooldown,
            visual_effect: format!(
                "{} {}",
                node.color,
                node.primary_symbol()
                    .unwrap_or(SymbolismMeta::DEFAULT_GLYPH_NAME)
            ),
        })
        .collect()
}

fn generate_rewards(nodes: &[&CodexNode]) -> Rewards {
    Rewards {
        experience: nodes.iter().map(|n| n.frequency_hz).sum(),
        items: nodes
            .iter()
            .map(|node| RewardItem {
                name: format!("{} Relic", node.element),
                kind: node.reward_style().to_string(),
                bonus: format!("+{} to {} affinity", node.id.0 % 10, node.element),
            })
            .collect(),
        unlock: nodes
            .last()
            .map(|n| format!("{} Path", n.name))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::analyze_harmony;
    use codex_registry::{Element, GeometryForm, NodeId};

    fn quest_node(id: u32, element: Element, frequency_hz: f64) -> CodexNode {
        CodexNode::new(
            NodeId(id),
            format!("Node {}", id),
            element,
            frequency_hz,
            GeometryForm::Tetrahedron,
            "#FF4500".parse().unwrap(),
        )
        .with_game_design(
            GameMeta::default()
                .with_mechanics(["Burn stacks", "Ignite"])
                .with_quest_type("Trial")
                .with_ability_type("Active")
                .with_environment_effect("Rising heat")
                .with_enemy_affinity("Ice")
                .with_reward_style("Talisman"),
        )
    }

    #[test]
    fn test_quest_type_from_nodes() {
        let a = quest_node(1, Element::Fire, 256.0);
        let b = quest_node(2, Element::Water, 512.0);
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);
        assert_eq!(harmony.relationship, Relationship::PerfectHarmony);

        let game = design(&nodes, &harmony, &Intent::Game);
        assert_eq!(game.quest_type, "Trial");
        assert_eq!(game.objectives[0].description, "Discover the guardian of Node 1");
    }

    #[test]
    fn test_dissonant_forces_boss_fight() {
        // 1.415 ratio is a tritone: consonance 3, Dissonant
        let a = quest_node(1, Element::Fire, 200.0);
        let b = quest_node(2, Element::Water, 283.0);
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);
        assert_eq!(harmony.relationship, Relationship::Dissonant);

        let game = design(&nodes, &harmony, &Intent::Game);
        assert_eq!(game.quest_type, "Boss Fight");
        assert!(game.objectives[0].description.starts_with("Defeat"));
        // Low consonance lengthens cooldowns
        assert_eq!(game.abilities[0].cooldown, Cooldown::Long);
    }

    #[test]
    fn test_quest_type_majority_wins() {
        let a = quest_node(1, Element::Fire, 256.0);
        let mut b = quest_node(2, Element::Water, 512.0);
        b.game_design = Some(GameMeta::default().with_quest_type("Pilgrimage"));
        let c = quest_node(3, Element::Earth, 1024.0);
        let nodes = vec![&a, &b, &c];
        let harmony = analyze_harmony(&nodes);

        let game = design(&nodes, &harmony, &Intent::Game);
        assert_eq!(game.quest_type, "Trial");
    }

    #[test]
    fn test_quest_type_defaults_without_metadata() {
        let mut a = quest_node(1, Element::Fire, 256.0);
        a.game_design = None;
        let mut b = quest_node(2, Element::Water, 512.0);
        b.game_design = None;
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);

        let game = design(&nodes, &harmony, &Intent::Game);
        assert_eq!(game.quest_type, "Exploration");
        assert_eq!(game.objectives[0].location, "sacred chamber");
        assert_eq!(game.objectives[0].requirement, "none");
        assert_eq!(game.abilities[0].ability_type, "Passive");
        assert_eq!(game.abilities[0].effect, "Unknown effect");
        assert!(game.environmental_hazards.is_empty());
        assert!(game.encounter.weaknesses.is_empty());
    }

    #[test]
    fn test_encounter_scaling() {
        let a = quest_node(1, Element::Fire, 256.0);
        let b = quest_node(2, Element::Fire, 512.0);
        let c = quest_node(3, Element::Water, 1024.0);
        let nodes = vec![&a, &b, &c];
        let harmony = analyze_harmony(&nodes);

        let game = design(&nodes, &harmony, &Intent::Game);
        // 3 nodes * 0.4 diversity * 3 = 3.6 floored
        assert_eq!(game.encounter.enemy_count, 3);
        assert_eq!(game.encounter.phases, 2);
        assert_eq!(game.encounter.phase_transitions.len(), 3);
        assert_eq!(
            game.encounter.phase_transitions[0].trigger,
            "Fire threshold reached"
        );
        assert_eq!(game.encounter.weaknesses, vec!["Ice"; 3]);
    }

    #[test]
    fn test_mechanics_deduplicated() {
        let a = quest_node(1, Element::Fire, 256.0);
        let b = quest_node(2, Element::Water, 512.0);
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);

        let game = design(&nodes, &harmony, &Intent::Game);
        assert_eq!(game.mechanics, vec!["Burn stacks", "Ignite"]);
    }

    #[test]
    fn test_abilities_and_rewards() {
        let a = quest_node(7, Element::Fire, 417.0);
        let b = quest_node(12, Element::Water, 528.0);
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);

        let game = design(&nodes, &harmony, &Intent::Game);

        let ability = &game.abilities[0];
        assert_eq!(ability.name, "Node 7 Invocation");
        assert_eq!(ability.cost, 41);
        assert_eq!(ability.visual_effect, "#ff4500 glyph");

        assert_eq!(game.rewards.experience, 945.0);
        assert_eq!(game.rewards.items[0].name, "Fire Relic");
        assert_eq!(game.rewards.items[0].kind, "Talisman");
        assert_eq!(game.rewards.items[0].bonus, "+7 to Fire affinity");
        assert_eq!(game.rewards.items[1].bonus, "+2 to Water affinity");
        assert_eq!(game.rewards.unlock, "Node 12 Path");
    }

    #[test]
    fn test_difficulty_bands() {
        assert_eq!(Difficulty::from_overall_harmony(4.9), Difficulty::Nightmare);
        assert_eq!(Difficulty::from_overall_harmony(5.0), Difficulty::Hard);
        assert_eq!(Difficulty::from_overall_harmony(6.5), Difficulty::Medium);
        assert_eq!(Difficulty::from_overall_harmony(8.0), Difficulty::Easy);
    }
}
