use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Categorical colour temperature shared by outfits and skin samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToneProfile {
    Warm,
    Cool,
    Neutral,
}

impl ToneProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToneProfile::Warm => "Warm",
            ToneProfile::Cool => "Cool",
            ToneProfile::Neutral => "Neutral",
        }
    }

    /// Case-insensitive comparison against a free-form tone hint
    pub fn matches_hint(&self, hint: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(hint.trim())
    }

    /// Resolves a free-form hint for keying purposes.
    ///
    /// Ranking treats a blank or unrecognized hint exactly like Neutral, so
    /// both resolve to it.
    pub fn from_hint(hint: &str) -> Self {
        hint.parse().unwrap_or(ToneProfile::Neutral)
    }

    /// Derives a tone from a dominant colour sample.
    ///
    /// Warm when both red and green exceed blue, Cool when blue exceeds
    /// both red and green, Neutral otherwise (including ties).
    pub fn from_dominant_color(red: f64, green: f64, blue: f64) -> Self {
        if red > blue && green > blue {
            ToneProfile::Warm
        } else if blue > red && blue > green {
            ToneProfile::Cool
        } else {
            ToneProfile::Neutral
        }
    }
}

impl Display for ToneProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ToneProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warm" => Ok(ToneProfile::Warm),
            "cool" => Ok(ToneProfile::Cool),
            "neutral" => Ok(ToneProfile::Neutral),
            other => Err(format!("Unknown tone profile: {}", other)),
        }
    }
}
