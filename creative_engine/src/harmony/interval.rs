//! Musical interval classification and ratio simplification.

use serde::{Deserialize, Serialize};

/// Named musical intervals a frequency ratio can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalType {
    Unison,
    Octave,
    PerfectFifth,
    PerfectFourth,
    MajorThird,
    MinorSixth,
    /// The restless interval; recognized with a wider window than the rest.
    Tritone,
    /// Anything that matches no canonical ratio.
    Complex,
}

impl IntervalType {
    /// Classify a raw frequency ratio.
    ///
    /// Canonical ratios are checked in a fixed order with ±0.01 windows
    /// (±0.1 for the tritone). The windows can overlap at their edges, so
    /// the first match wins.
    pub fn classify(ratio: f64) -> IntervalType {
        if (ratio - 1.0).abs() < 0.01 {
            IntervalType::Unison
        } else if (ratio - 2.0).abs() < 0.01 {
            IntervalType::Octave
        } else if (ratio - 1.5).abs() < 0.01 {
            IntervalType::PerfectFifth
        } else if (ratio - 1.333).abs() < 0.01 {
            IntervalType::PerfectFourth
        } else if (ratio - 1.25).abs() < 0.01 {
            IntervalType::MajorThird
        } else if (ratio - 1.6).abs() < 0.01 {
            IntervalType::MinorSixth
        } else if (ratio - 1.414).abs() < 0.1 {
            IntervalType::Tritone
        } else {
            IntervalType::Complex
        }
    }

    /// Consonance weight used when averaging a pair set into a score.
    pub fn consonance_weight(&self) -> f64 {
        match self {
            IntervalType::Unison | IntervalType::Octave => 10.0,
            IntervalType::PerfectFifth => 9.0,
            IntervalType::PerfectFourth => 8.0,
            IntervalType::MajorThird => 7.0,
            IntervalType::MinorSixth => 6.0,
            IntervalType::Tritone => 3.0,
            IntervalType::Complex => 4.0,
        }
    }
}

impl std::fmt::Display for IntervalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IntervalType::Unison => "Unison",
            IntervalType::Octave => "Octave",
            IntervalType::PerfectFifth => "Perfect Fifth",
            IntervalType::PerfectFourth => "Perfect Fourth",
            IntervalType::MajorThird => "Major Third",
            IntervalType::MinorSixth => "Minor Sixth",
            IntervalType::Tritone => "Tritone (Tension)",
            IntervalType::Complex => "Complex",
        };
        write!(f, "{}", name)
    }
}

/// One pairwise frequency ratio with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRatio {
    /// Raw ratio `freq[j] / freq[i]` for the pair (i < j). Not normalized to
    /// be >= 1, so the orientation of the input order is preserved.
    pub ratio: f64,
    /// Nearest small fraction, e.g. "3/2", or the decimal to 3 places.
    pub simplified: String,
    pub interval: IntervalType,
}

impl FrequencyRatio {
    /// Build a ratio entry from a raw decimal ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            simplified: simplify_ratio(ratio),
            interval: IntervalType::classify(ratio),
        }
    }
}

/// Find the first fraction n/d (d up to 12, n up to 24) within 0.01 of the
/// decimal, trying denominators ascending and numerators ascending per
/// denominator. Falls back to the decimal formatted to 3 places.
pub fn simplify_ratio(decimal: f64) -> String {
    const TOLERANCE: f64 = 0.01;
    for denominator in 1..=12u32 {
        for numerator in 1..=24u32 {
            if (numerator as f64 / denominator as f64 - decimal).abs() < TOLERANCE {
                return format!("{}/{}", numerator, denominator);
            }
        }
    }
    format!("{:.3}", decimal)
}

/// Step classification of an averaged consonance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    PerfectHarmony,
    Consonant,
    Balanced,
    Tension,
    Dissonant,
}

impl Relationship {
    /// Classify a consonance score into a relationship band.
    pub fn from_score(score: f64) -> Relationship {
        if score >= 9.0 {
            Relationship::PerfectHarmony
        } else if score >= 7.5 {
            Relationship::Consonant
        } else if score >= 6.0 {
            Relationship::Balanced
        } else if score >= 4.0 {
            Relationship::Tension
        } else {
            Relationship::Dissonant
        }
    }

    /// Ordinal quality, Dissonant lowest. Monotonic in the consonance score.
    pub fn quality_rank(&self) -> u8 {
        match self {
            Relationship::Dissonant => 0,
            Relationship::Tension => 1,
            Relationship::Balanced => 2,
            Relationship::Consonant => 3,
            Relationship::PerfectHarmony => 4,
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Relationship::PerfectHarmony => "Perfect Harmony",
            Relationship::Consonant => "Consonant",
            Relationship::Balanced => "Balanced",
            Relationship::Tension => "Tension",
            Relationship::Dissonant => "Dissonant",
        };
        write!(f, "{}", name)
    }
}
