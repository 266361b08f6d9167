//! Node attribute vocabulary: elements, geometric forms, and colors.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The nine canonical solfeggio frequencies (Hz), lowest to highest.
/// Node frequencies usually come from this set but are not required to.
pub const SOLFEGGIO_FREQUENCIES: [f64; 9] = [
    174.0, 285.0, 396.0, 417.0, 528.0, 639.0, 741.0, 852.0, 963.0,
];

/// The five classical elements a node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Aether,
}

/// Number of elements in the closed set, used for diversity scoring.
pub const ELEMENT_COUNT: usize = 5;

impl Element {
    /// Surface texture associated with this element, used for material design.
    pub fn texture_description(&self) -> &'static str {
        match self {
            Element::Fire => "Rough, heat-marked, ash-dusted",
            Element::Water => "Smooth, reflective, rippled",
            Element::Earth => "Coarse, mineral-veined, crystalline",
            Element::Air => "Polished, light-catching, ethereal",
            Element::Aether => "Otherworldly, semi-transparent, shimmering",
        }
    }

    /// Ambient scent associated with this element.
    pub fn scent(&self) -> &'static str {
        match self {
            Element::Fire => "Smoke, burning cedar",
            Element::Water => "Misty, aquatic, clean",
            Element::Earth => "Loam, minerals, sage",
            Element::Air => "Fresh, ionized, crisp",
            Element::Aether => "Incense, otherworldly fragrance",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Aether => "Aether",
        };
        write!(f, "{}", name)
    }
}

/// Geometric form tag carried by a node. The five Platonic solids are
/// recognized by name; anything else is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeometryForm {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
    Other(String),
}

impl GeometryForm {
    /// Whether this form is one of the five Platonic solids.
    pub fn is_platonic(&self) -> bool {
        !matches!(self, GeometryForm::Other(_))
    }

    /// Fixed chamber description for spatial layout. Non-Platonic forms fall
    /// through to the organic description.
    pub fn chamber_description(&self) -> &'static str {
        match self {
            GeometryForm::Tetrahedron => "Pyramidal chamber with apex altar",
            GeometryForm::Cube => "Square room with four cardinal stations",
            GeometryForm::Octahedron => "Double pyramid meeting at center",
            GeometryForm::Dodecahedron => "Twelve-sided chamber with pentagonal floor",
            GeometryForm::Icosahedron => "Twenty-faced dome with triangular panels",
            GeometryForm::Other(_) => "Flowing, non-Euclidean space",
        }
    }
}

impl From<String> for GeometryForm {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Tetrahedron" => GeometryForm::Tetrahedron,
            "Cube" => GeometryForm::Cube,
            "Octahedron" => GeometryForm::Octahedron,
            "Dodecahedron" => GeometryForm::Dodecahedron,
            "Icosahedron" => GeometryForm::Icosahedron,
            _ => GeometryForm::Other(s),
        }
    }
}

impl From<GeometryForm> for String {
    fn from(form: GeometryForm) -> Self {
        form.to_string()
    }
}

impl std::fmt::Display for GeometryForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryForm::Tetrahedron => write!(f, "Tetrahedron"),
            GeometryForm::Cube => write!(f, "Cube"),
            GeometryForm::Octahedron => write!(f, "Octahedron"),
            GeometryForm::Dodecahedron => write!(f, "Dodecahedron"),
            GeometryForm::Icosahedron => write!(f, "Icosahedron"),
            GeometryForm::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Error raised when a color string is not 6-digit hex RGB.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color string '{0}': expected 6-digit hex RGB like #ff4500")]
pub struct ColorParseError(pub String);

/// An RGB color, parsed from and formatted as 6-digit `#rrggbb` hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from channel values.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise floored average of a set of colors.
    ///
    /// Returns black for an empty slice. Averaging is commutative, so the
    /// result is independent of input order.
    pub fn average(colors: &[Color]) -> Color {
        if colors.is_empty() {
            return Color::new(0, 0, 0);
        }
        let n = colors.len() as u32;
        let (r, g, b) = colors.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
            (r + c.r as u32, g + c.g as u32, b + c.b as u32)
        });
        Color::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse `#rrggbb` or `rrggbb`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let parse = |range| u8::from_str_radix(&hex[range], 16);
        match (parse(0..2), parse(2..4), parse(4..6)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Color::new(r, g, b)),
            _ => Err(ColorParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Color {
    /// Lowercase zero-padded hex, e.g. `#7f007f`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_textures() {
        assert_eq!(
            Element::Fire.texture_description(),
            "Rough, heat-marked, ash-dusted"
        );
        assert_eq!(Element::Water.scent(), "Misty, aquatic, clean");
    }

    #[test]
    fn test_geometry_platonic() {
        assert!(GeometryForm::Tetrahedron.is_platonic());
        assert!(GeometryForm::Icosahedron.is_platonic());
        assert!(!GeometryForm::Other("Spiral".into()).is_platonic());
    }

    #[test]
    fn test_geometry_from_string() {
        assert_eq!(GeometryForm::from("Cube".to_string()), GeometryForm::Cube);
        assert_eq!(
            GeometryForm::from("Torus".to_string()),
            GeometryForm::Other("Torus".into())
        );
    }

    #[test]
    fn test_geometry_chamber_fallback() {
        assert_eq!(
            GeometryForm::Other("Spiral".into()).chamber_description(),
            "Flowing, non-Euclidean space"
        );
    }

    #[test]
    fn test_color_parse_and_format() {
        let color: Color = "#FF4500".parse().unwrap();
        assert_eq!(color, Color::new(255, 69, 0));
        assert_eq!(color.to_string(), "#ff4500");

        // Leading '#' is optional
        let bare: Color = "ff4500".parse().unwrap();
        assert_eq!(bare, color);
    }

    #[test]
    fn test_color_parse_rejects_garbage() {
        assert!("#ff45".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("not-a-color".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_average() {
        let red: Color = "#FF0000".parse().unwrap();
        let blue: Color = "#0000FF".parse().unwrap();

        // 255/2 = 127.5 floored to 127 per channel
        let blended = Color::average(&[red, blue]);
        assert_eq!(blended.to_string(), "#7f007f");

        // Commutative under reordering
        assert_eq!(blended, Color::average(&[blue, red]));
    }

    #[test]
    fn test_solfeggio_table() {
        assert_eq!(SOLFEGGIO_FREQUENCIES.len(), 9);
        assert_eq!(SOLFEGGIO_FREQUENCIES[4], 528.0);
        assert!(SOLFEGGIO_FREQUENCIES.windows(2).all(|w| w[0] < w[1]));
    }
}
