//! Spatial design - a ritual chamber derived from a node set and its harmony.

use serde::{Deserialize, Serialize};

use codex_registry::{
    ArchitectureMeta, CodexNode, Color, Element, GeometryForm, SymbolismMeta,
};

use crate::harmony::{HarmonyResult, Relationship};

/// Distance of each node station from the chamber center, in meters.
pub const STATION_RADIUS: f64 = 5.0;

/// Default materials when the nodes declare fewer than three.
pub const DEFAULT_PRIMARY_MATERIAL: &str = "Stone";
pub const DEFAULT_SECONDARY_MATERIAL: &str = "Wood";
pub const DEFAULT_ACCENT_MATERIAL: &str = "Crystal";

/// A station position on the chamber circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationPosition {
    /// Degrees around the circle.
    pub angle: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub description: String,
}

/// One node's station in the chamber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub position: StationPosition,
    pub node: String,
    pub feature: String,
}

/// Chamber shape and station arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLayout {
    /// First geometry tag of the set, or Organic when unknown.
    pub shape: GeometryForm,
    pub description: String,
    pub dimensions: String,
    pub height: String,
    pub stations: Vec<Station>,
}

/// One light source per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    pub position: String,
    pub color: Color,
    /// `frequency / 1000` to 2 decimal places.
    pub intensity: String,
    pub effect: String,
}

/// Lighting scheme for the chamber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingPlan {
    pub primary: Color,
    pub scheme: String,
    pub colors: Vec<Color>,
    pub quality: String,
    pub sources: Vec<LightSource>,
}

/// Element texture for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSpec {
    pub element: Element,
    pub texture: String,
    pub pattern: String,
}

/// Material selection across the node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    /// Deduplicated union of node materials, first-seen order.
    pub all: Vec<String>,
    pub textures: Vec<TextureSpec>,
}

/// Chamber temperature band from the Fire/Water balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temperature {
    WarmToHot,
    CoolToCold,
    Temperate,
}

impl Temperature {
    /// Fire dominates at more than 1.5x the water count, and vice versa.
    pub fn from_counts(fire: usize, water: usize) -> Temperature {
        if fire as f64 > water as f64 * 1.5 {
            Temperature::WarmToHot
        } else if water as f64 > fire as f64 * 1.5 {
            Temperature::CoolToCold
        } else {
            Temperature::Temperate
        }
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Temperature::WarmToHot => "Warm to hot",
            Temperature::CoolToCold => "Cool to cold",
            Temperature::Temperate => "Temperate",
        };
        write!(f, "{}", name)
    }
}

/// Mood, sound, and air of the chamber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub mood: String,
    /// Ambient sounds across nodes where present.
    pub sounds: Vec<String>,
    pub temperature: Temperature,
    pub air_flow: String,
    pub scent: String,
}

/// Acoustic treatment driven by the harmony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acoustics {
    pub resonance: Relationship,
    pub reverb_time: String,
    pub frequency_emphasis: String,
    pub recommendation: String,
}

/// A symbol carved at one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSymbol {
    pub symbol: String,
    pub position: StationPosition,
    pub size: String,
    pub material: String,
    pub illumination: String,
    pub orientation: String,
}

/// A complete chamber design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceResult {
    pub layout: RoomLayout,
    pub lighting: LightingPlan,
    pub materials: MaterialPalette,
    pub atmosphere: Atmosphere,
    pub acoustics: Acoustics,
    pub symbol_placement: Vec<PlacedSymbol>,
}

/// Design a chamber from a node set and its harmony.
pub fn design(nodes: &[&CodexNode], harmony: &HarmonyResult) -> SpaceResult {
    let layout = generate_layout(nodes, harmony);
    let symbol_placement = place_symbols(nodes, &layout);

    SpaceResult {
        lighting: design_lighting(nodes),
        materials: select_materials(nodes),
        atmosphere: create_atmosphere(nodes, harmony),
        acoustics: design_acoustics(harmony),
        layout,
        symbol_placement,
    }
}

fn generate_layout(nodes: &[&CodexNode], harmony: &HarmonyResult) -> RoomLayout {
    let shape = harmony
        .geometric_compatibility
        .types
        .first()
        .cloned()
        .unwrap_or(GeometryForm::Other("Organic".to_string()));
    let node_count = nodes.len();

    RoomLayout {
        description: shape.chamber_description().to_string(),
        dimensions: format!("{}m diameter", node_count * 3),
        height: format!("{}m ceiling", node_count * 2),
        stations: nodes
            .iter()
            .enumerate()
            .map(|(i, node)| Station {
                position: calculate_position(i, node_count, &shape),
                node: node.name.clone(),
                feature: node
                    .room_type()
                    .unwrap_or(ArchitectureMeta::DEFAULT_STATION_FEATURE)
                    .to_string(),
            })
            .collect(),
        shape,
    }
}

/// Stations sit evenly on a circle of [`STATION_RADIUS`], starting at 0°.
fn calculate_position(index: usize, total: usize, shape: &GeometryForm) -> StationPosition {
    let angle = (index as f64 / total as f64) * 360.0;
    StationPosition {
        angle,
        x: angle.to_radians().cos() * STATION_RADIUS,
        y: 0.0,
        z: angle.to_radians().sin() * STATION_RADIUS,
        description: format!("{}° around {} center", angle, shape),
    }
}

fn design_lighting(nodes: &[&CodexNode]) -> LightingPlan {
    LightingPlan {
        primary: nodes[0].color,
        scheme: "Gradient blend".to_string(),
        colors: nodes.iter().map(|n| n.color).collect(),
        quality: nodes
            .iter()
            .find_map(|n| n.lighting())
            .unwrap_or(ArchitectureMeta::DEFAULT_LIGHTING)
            .to_string(),
        sources: nodes
            .iter()
            .map(|node| LightSource {
                position: node.name.clone(),
                color: node.color,
                intensity: format!("{:.2}", node.frequency_hz / 1000.0),
                effect: node
                    .lighting()
                    .unwrap_or(ArchitectureMeta::DEFAULT_LIGHT_EFFECT)
                    .to_string(),
            })
            .collect(),
    }
}

fn select_materials(nodes: &[&CodexNode]) -> MaterialPalette {
    let mut all: Vec<String> = Vec::new();
    for material in nodes.iter().flat_map(|n| n.materials()) {
        if !all.contains(material) {
            all.push(material.clone());
        }
    }

    let pick = |i: usize, default: &str| -> String {
        all.get(i).cloned().unwrap_or_else(|| default.to_string())
    };

    MaterialPalette {
        primary: pick(0, DEFAULT_PRIMARY_MATERIAL),
        secondary: pick(1, DEFAULT_SECONDARY_MATERIAL),
        accent: pick(2, DEFAULT_ACCENT_MATERIAL),
        textures: nodes
            .iter()
            .map(|node| TextureSpec {
                element: node.element,
                texture: node.element.texture_description().to_string(),
                pattern: node
                    .geometric_pattern()
                    .unwrap_or(SymbolismMeta::DEFAULT_PATTERN)
                    .to_string(),
            })
            .collect(),
        all,
    }
}

fn create_atmosphere(nodes: &[&CodexNode], harmony: &HarmonyResult) -> Atmosphere {
    let mood = match harmony.relationship {
        Relationship::PerfectHarmony => "Peaceful, sacred",
        Relationship::Dissonant => "Tense, foreboding",
        _ => "Mysterious, contemplative",
    };

    let balance = &harmony.elemental_balance;
    let air_flow = if balance.has(Element::Air) {
        "Breezy, circulating"
    } else {
        "Still, heavy"
    };

    Atmosphere {
        mood: mood.to_string(),
        sounds: nodes
            .iter()
            .filter_map(|n| n.ambience().map(String::from))
            .collect(),
        temperature: Temperature::from_counts(
            balance.count_of(Element::Fire),
            balance.count_of(Element::Water),
        ),
        air_flow: air_flow.to_string(),
        scent: nodes[0].element.scent().to_string(),
    }
}

fn design_acoustics(harmony: &HarmonyResult) -> Acoustics {
    Acoustics {
        resonance: harmony.relationship,
        reverb_time: if harmony.consonance_score > 7.0 {
            "Long, cathedral-like"
        } else {
            "Short, focused"
        }
        .to_string(),
        frequency_emphasis: format!(
            "{} intervals enhanced",
            harmony
                .freq_ratios
                .first()
                .map(|r| r.interval.to_string())
                .unwrap_or_else(|| "Balanced".to_string())
        ),
        recommendation: if harmony.consonance_score > 8.0 {
            "Perfect for chanting"
        } else {
            "Good for meditation"
        }
        .to_string(),
    }
}

fn place_symbols(nodes: &[&CodexNode], layout: &RoomLayout) -> Vec<PlacedSymbol> {
    nodes
        .iter()
        .zip(&layout.stations)
        .map(|(node, station)| PlacedSymbol {
            symbol: node
                .primary_symbol()
                .unwrap_or(SymbolismMeta::DEFAULT_SYMBOL)
                .to_string(),
            position: station.position.clone(),
            size: format!("{}m", node.id.0 % 5 + 1),
            material: format!(
                "Carved into {}",
                node.materials()
                    .first()
                    .map(String::as_str)
                    .unwrap_or(ArchitectureMeta::DEFAULT_CARVING_MATERIAL)
            ),
            illumination: format!("Lit with {} light", node.color),
            orientation: node.symbol_placement().to_string(),
        })
        .collect()
}
