//! Symbol fusion - blended colors, merged patterns, and a fused glyph with
//! its SVG rendering.

use serde::{Deserialize, Serialize};

use codex_registry::{CodexNode, Color, SymbolismMeta};

use crate::harmony::{HarmonyResult, Relationship};

/// Blended palette across the node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Node colors in input order.
    pub original: Vec<Color>,
    /// Channel-wise floored average. Symmetric under input reordering.
    pub blended: Color,
    /// CSS-style gradient over the original colors.
    pub gradient: String,
    pub harmonic: String,
}

/// Merged geometric patterns across the node set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFusion {
    /// Distinct patterns in first-seen order.
    pub individual: Vec<String>,
    pub merged: String,
    pub complexity: String,
}

/// Interpretation of the fused symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionMeaning {
    pub synthesis: String,
    pub harmonic_meaning: String,
    pub usage: String,
}

/// A complete symbol fusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolResult {
    pub fused_symbol: String,
    pub color_scheme: ColorScheme,
    pub pattern: PatternFusion,
    pub meaning: FusionMeaning,
    pub svg_code: String,
}

/// Fuse the symbols of a node set under its harmony.
pub fn fuse(nodes: &[&CodexNode], harmony: &HarmonyResult) -> SymbolResult {
    let symbols: Vec<&str> = nodes.iter().filter_map(|n| n.primary_symbol()).collect();
    let colors: Vec<Color> = nodes.iter().map(|n| n.color).collect();
    let patterns: Vec<&str> = nodes.iter().filter_map(|n| n.geometric_pattern()).collect();

    SymbolResult {
        fused_symbol: create_fused_symbol(&symbols, harmony.relationship),
        color_scheme: blend_colors(&colors, harmony.relationship),
        pattern: merge_patterns(&patterns),
        meaning: interpret_fusion(nodes, harmony),
        svg_code: generate_svg(nodes),
    }
}

/// Join the node glyphs with a relationship-keyed separator and label.
fn create_fused_symbol(symbols: &[&str], relationship: Relationship) -> String {
    match relationship {
        Relationship::PerfectHarmony => {
            format!("⟨{}⟩ (Unified Mandala)", symbols.concat())
        }
        Relationship::Dissonant => {
            format!("⟨{}⟩ (Conflicting Duality)", symbols.join("⚡"))
        }
        _ => format!("⟨{}⟩ (Balanced Triad)", symbols.join("∴")),
    }
}

fn blend_colors(colors: &[Color], relationship: Relationship) -> ColorScheme {
    let gradient = format!(
        "linear-gradient({})",
        colors
            .iter()
            .map(Color::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    ColorScheme {
        original: colors.to_vec(),
        blended: Color::average(colors),
        gradient,
        harmonic: if relationship == Relationship::PerfectHarmony {
            "Seamless transition"
        } else {
            "Vibrant contrast"
        }
        .to_string(),
    }
}

fn merge_patterns(patterns: &[&str]) -> PatternFusion {
    let mut individual: Vec<String> = Vec::new();
    for pattern in patterns {
        if !individual.iter().any(|p| p == pattern) {
            individual.push(pattern.to_string());
        }
    }

    PatternFusion {
        merged: individual.join(" interwoven with "),
        complexity: if individual.len() > 2 {
            "Highly intricate"
        } else {
            "Clean, focused"
        }
        .to_string(),
        individual,
    }
}

fn interpret_fusion(nodes: &[&CodexNode], harmony: &HarmonyResult) -> FusionMeaning {
    let themes: Vec<&str> = nodes.iter().filter_map(|n| n.theme_opt()).collect();

    FusionMeaning {
        synthesis: format!(
            "The fusion of {} archetypes creates: {}",
            nodes.len(),
            themes.join(", ")
        ),
        harmonic_meaning: format!(
            "This {} combination suggests {}",
            harmony.relationship.to_string().to_lowercase(),
            harmonic_message(harmony.relationship)
        ),
        usage: format!("Use for {}", suggest_usage(harmony.overall_harmony_value())),
    }
}

fn harmonic_message(relationship: Relationship) -> &'static str {
    match relationship {
        Relationship::PerfectHarmony => "divine unity and transcendent synthesis",
        Relationship::Consonant => "cooperative balance and mutual enhancement",
        Relationship::Balanced => "dynamic equilibrium and creative tension",
        Relationship::Tension => "transformative conflict and necessary opposition",
        Relationship::Dissonant => "revolutionary change and breaking of boundaries",
    }
}

fn suggest_usage(score: f64) -> &'static str {
    if score > 8.0 {
        "Healing rituals, meditation, sacred ceremonies"
    } else if score > 6.0 {
        "Creative work, problem-solving, balanced manifestation"
    } else if score > 4.0 {
        "Shadow work, transformation, challenging growth"
    } else {
        "Alchemical transmutation, boundary dissolution"
    }
}

/// A minimal SVG: radial gradient over the node colors with evenly spaced
/// stops, and the concatenated glyphs as centered text.
fn generate_svg(nodes: &[&CodexNode]) -> String {
    let stops = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            format!(
                "<stop offset=\"{}%\" stop-color=\"{}\" />",
                i as f64 / nodes.len() as f64 * 100.0,
                node.color
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    let glyphs = nodes
        .iter()
        .map(|n| n.primary_symbol().unwrap_or(SymbolismMeta::DEFAULT_SYMBOL))
        .collect::<Vec<_>>()
        .concat();

    format!(
        "<svg width=\"200\" height=\"200\" xmlns=\"http://www.w3.org/2000/svg\">\n  \
         <defs>\n    <radialGradient id=\"fusion-gradient\">\n      {}\n    \
         </radialGradient>\n  </defs>\n  \
         <circle cx=\"100\" cy=\"100\" r=\"80\" fill=\"url(#fusion-gradient)\" opacity=\"0.8\"/>\n  \
         <text x=\"100\" y=\"110\" text-anchor=\"middle\" font-size=\"48\" fill=\"white\">\n    \
         {}\n  </text>\n</svg>",
        stops, glyphs
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::analyze_harmony;
    use codex_registry::{Element, GeometryForm, NarrativeMeta, NodeId};

    fn glyph_node(id: u32, frequency_hz: f64, color: &str, symbol: &str) -> CodexNode {
        CodexNode::new(
            NodeId(id),
            format!("Node {}", id),
            Element::Aether,
            frequency_hz,
            GeometryForm::Icosahedron,
            color.parse().unwrap(),
        )
        .with_symbolism(SymbolismMeta::new(symbol).with_pattern(format!("Pattern {}", id)))
        .with_narrative(NarrativeMeta::new(format!("Theme {}", id), "The Witness"))
    }

    #[test]
    fn test_blended_color_floors_average() {
        let a = glyph_node(1, 256.0, "#FF0000", "▲");
        let b = glyph_node(2, 512.0, "#0000FF", "▽");
        let nodes = vec![&a, &b];
        let harmony = analyze_harmony(&nodes);

        let fusion = fuse(&nodes, &harmony);
        assert_eq!(fusion.color_scheme.blended.to_string(), "#7f007f");
        assert_eq!(
            fusion.color_scheme.gradient,
            "linear-gradient(#ff0000, #0000ff)"
        );
    }

    #[test]
    fn test_blend_is_order_independent() {
        let a = glyph_node(1, 256.0, "#FF0000", "▲");
        let b = glyph_node(2, 512.0, "#0000FF", "▽");

        let forward = vec![&a, &b];
        let reverse = vec![&b, &a];
        let fused_forward = fuse(&forward, &analyze_harmony(&forward));
        let fused_reverse = fuse(&reverse, &analyze_harmony(&reverse));

        assert_eq!(
            fused_forward.color_scheme.blended,
            fused_reverse.color_scheme.blended
        );
        // The glyph ordering legitimately differs
        assert_ne!(fused_forward.fused_symbol, fused_reverse.fused_symbol);
    }

    #[test]
    fn test_fused_symbol_by_relationship() {
        // Octave: Perfect Harmony joins glyphs without a separator
        let a = glyph_node(1, 256.0, "#FF0000", "▲");
        let b = glyph_node(2, 512.0, "#0000FF", "▽");
        let nodes = vec![&a, &b];
        let fusion = fuse(&nodes, &analyze_harmony(&nodes));
        assert_eq!(fusion.fused_symbol, "⟨▲▽⟩ (Unified Mandala)");
        assert_eq!(fusion.color_scheme.harmonic, "Seamless transition");

        // Tritone: Dissonant separates with lightning
        let c = glyph_node(3, 200.0, "#FF0000", "▲");
        let d = glyph_node(4, 283.0, "#0000FF", "▽");
        let nodes = vec![&c, &d];
        let fusion = fuse(&nodes, &analyze_harmony(&nodes));
        assert_eq!(fusion.fused_symbol, "⟨▲⚡▽⟩ (Conflicting Duality)");
        assert_eq!(fusion.color_scheme.harmonic, "Vibrant contrast");
    }

    #[test]
    fn test_pattern_merge_and_complexity() {
        let a = glyph_node(1, 256.0, "#FF0000", "▲");
        let b = glyph_node(2, 512.0, "#00FF00", "■");
        let nodes = vec![&a, &b];
        let fusion = fuse(&nodes, &analyze_harmony(&nodes));

        assert_eq!(fusion.pattern.individual, vec!["Pattern 1", "Pattern 2"]);
        assert_eq!(
            fusion.pattern.merged,
            "Pattern 1 interwoven with Pattern 2"
        );
        assert_eq!(fusion.pattern.complexity, "Clean, focused");

        let c = glyph_node(3, 1024.0, "#0000FF", "●");
        let nodes = vec![&a, &b, &c];
        let fusion = fuse(&nodes, &analyze_harmony(&nodes));
        assert_eq!(fusion.pattern.complexity, "Highly intricate");
    }

    #[test]
    fn test_meaning_lists_themes() {
        let a = glyph_node(1, 256.0, "#FF0000", "▲");
        let b = glyph_node(2, 512.0, "#0000FF", "▽");
        let nodes = vec![&a, &b];
        let fusion = fuse(&nodes, &analyze_harmony(&nodes));

        assert_eq!(
            fusion.meaning.synthesis,
            "The fusion of 2 archetypes creates: Theme 1, Theme 2"
        );
        assert!(fusion
            .meaning
            .harmonic_meaning
            .starts_with("This perfect harmony combination suggests"));
        assert!(fusion.meaning.usage.starts_with("Use for"));
    }

    #[test]
    fn test_usage_thresholds() {
        assert_eq!(
            suggest_usage(8.5),
            "Healing rituals, meditation, sacred ceremonies"
        );
        assert_eq!(
            suggest_usage(7.0),
            "Creative work, problem-solving, balanced manifestation"
        );
        assert_eq!(
            suggest_usage(5.0),
            "Shadow work, transformation, challenging growth"
        );
        assert_eq!(
            suggest_usage(2.0),
            "Alchemical transmutation, boundary dissolution"
        );
    }

    #[test]
    fn test_svg_gradient_stops() {
        let a = glyph_node(1, 256.0, "#FF0000", "▲");
        let b = glyph_node(2, 512.0, "#0000FF", "▽");
        let nodes = vec![&a, &b];
        let fusion = fuse(&nodes, &analyze_harmony(&nodes));

        assert!(fusion
            .svg_code
            .contains("<stop offset=\"0%\" stop-color=\"#ff0000\" />"));
        assert!(fusion
            .svg_code
            .contains("<stop offset=\"50%\" stop-color=\"#0000ff\" />"));
        assert!(fusion.svg_code.contains("▲▽"));
        assert!(fusion.svg_code.starts_with("<svg width=\"200\""));
        assert!(fusion.svg_code.ends_with("</svg>"));
    }

    #[test]
    fn test_bagless_nodes_fall_back() {
        let a = CodexNode::new(
            NodeId(1),
            "Bare",
            Element::Earth,
            528.0,
            GeometryForm::Cube,
            "#228B22".parse().unwrap(),
        );
        let nodes = vec![&a];
        let fusion = fuse(&nodes, &analyze_harmony(&nodes));

        // No symbols, no patterns, no themes: everything degrades quietly
        assert_eq!(fusion.fused_symbol, "⟨⟩ (Unified Mandala)");
        assert!(fusion.pattern.individual.is_empty());
        assert_eq!(fusion.meaning.synthesis, "The fusion of 1 archetypes creates: ");
        // The SVG substitutes the default glyph
        assert!(fusion.svg_code.contains("◯"));
    }
}
