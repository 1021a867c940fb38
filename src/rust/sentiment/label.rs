use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Predictions scoring below this are reported as neutral.
pub const CONFIDENCE_FLOOR: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// Canonical sentiment for a raw model label, or `None` when the label is unknown.
    ///
    /// Understands full names, three-letter abbreviations and `LABEL_<n>` ids, in any case.
    pub fn from_model_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "POSITIVE" | "POS" | "LABEL_2" => Some(Self::Positive),
            "NEGATIVE" | "NEG" | "LABEL_0" => Some(Self::Negative),
            "NEUTRAL" | "NEU" | "LABEL_1" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sentiment: {0}")]
pub struct ParseSentimentError(String);

impl FromStr for Sentiment {
    type Err = ParseSentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" => Ok(Self::Positive),
            "NEGATIVE" => Ok(Self::Negative),
            "NEUTRAL" => Ok(Self::Neutral),
            _ => Err(ParseSentimentError(s.to_string())),
        }
    }
}

/// Maps a raw `(label, score)` pair onto a sentiment.
///
/// Unknown labels default to neutral, and any score under [`CONFIDENCE_FLOOR`] forces
/// neutral regardless of the label. The score is returned unchanged.
pub fn map_label(raw_label: &str, raw_score: f32) -> (Sentiment, f32) {
    let sentiment = Sentiment::from_model_label(raw_label).unwrap_or(Sentiment::Neutral);
    if raw_score < CONFIDENCE_FLOOR {
        return (Sentiment::Neutral, raw_score);
    }
    (sentiment, raw_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_schemes() {
        assert_eq!(map_label("LABEL_2", 0.91), (Sentiment::Positive, 0.91));
        assert_eq!(map_label("label_0", 0.8).0, Sentiment::Negative);
        assert_eq!(map_label("LABEL_1", 0.8).0, Sentiment::Neutral);
        assert_eq!(map_label("pos", 0.7).0, Sentiment::Positive);
        assert_eq!(map_label("Negative", 0.7).0, Sentiment::Negative);
        assert_eq!(map_label("neu", 0.7).0, Sentiment::Neutral);
    }

    #[test]
    fn test_confidence_floor() {
        assert_eq!(map_label("NEG", 0.42), (Sentiment::Neutral, 0.42));
        assert_eq!(map_label("POSITIVE", 0.4999), (Sentiment::Neutral, 0.4999));
        assert_eq!(map_label("POSITIVE", 0.5).0, Sentiment::Positive);
    }

    #[test]
    fn test_unknown_labels_are_neutral() {
        for label in ["", "LABEL_3", "joy", "??", "positive "] {
            assert_eq!(map_label(label, 0.99).0, Sentiment::Neutral);
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("negative".parse::<Sentiment>(), Ok(Sentiment::Negative));
        assert!("LABEL_0".parse::<Sentiment>().is_err());
        assert_eq!(Sentiment::Positive.to_string(), "POSITIVE");
    }

    #[test]
    fn test_serializes_uppercase() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Sentiment::Neutral)?, "\"NEUTRAL\"");
        Ok(())
    }
}
