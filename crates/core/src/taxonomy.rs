//! Manipulation Taxonomy
//!
//! The closed recommended category vocabulary, risk bands, and the
//! language/perspective enums shared across the workspace. The category set
//! is a recommendation to the provider, not a hard constraint on its output:
//! unknown identifiers are carried verbatim and formatted for display rather
//! than rejected.

use serde::{Deserialize, Serialize};

/// Whether the analyzed text was received by the user or written by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// The user received this message from someone else.
    Received,
    /// The user wrote or is about to send this message.
    SpokenByUser,
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Perspective::Received => write!(f, "received"),
            Perspective::SpokenByUser => write!(f, "spoken_by_user"),
        }
    }
}

/// Output language for all natural-language fields of a report.
///
/// Structural field names and category identifiers stay in the fixed
/// machine-readable vocabulary regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// Simplified Chinese
    Zh,
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Zh => write!(f, "zh"),
        }
    }
}

/// A manipulation category attributed to a message or evidence span.
///
/// Seven identifiers form the closed recommended set sent to the provider.
/// Anything else the provider returns is preserved as `Unknown` so it can be
/// displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ManipulationCategory {
    GuiltTripping,
    EmotionalBlackmail,
    PassiveAggression,
    DemeaningInvalidating,
    BlameShifting,
    Gaslighting,
    ControlDominance,
    /// An identifier outside the recommended vocabulary, carried verbatim.
    Unknown(String),
}

impl ManipulationCategory {
    /// The closed recommended set, in the order presented to the provider.
    pub const RECOMMENDED: [ManipulationCategory; 7] = [
        ManipulationCategory::GuiltTripping,
        ManipulationCategory::EmotionalBlackmail,
        ManipulationCategory::PassiveAggression,
        ManipulationCategory::DemeaningInvalidating,
        ManipulationCategory::BlameShifting,
        ManipulationCategory::Gaslighting,
        ManipulationCategory::ControlDominance,
    ];

    /// The snake_case wire identifier for this category.
    pub fn id(&self) -> &str {
        match self {
            ManipulationCategory::GuiltTripping => "guilt_tripping",
            ManipulationCategory::EmotionalBlackmail => "emotional_blackmail",
            ManipulationCategory::PassiveAggression => "passive_aggression",
            ManipulationCategory::DemeaningInvalidating => "demeaning_invalidating",
            ManipulationCategory::BlameShifting => "blame_shifting",
            ManipulationCategory::Gaslighting => "gaslighting",
            ManipulationCategory::ControlDominance => "control_dominance",
            ManipulationCategory::Unknown(id) => id,
        }
    }

    /// Whether this identifier belongs to the closed recommended set.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ManipulationCategory::Unknown(_))
    }

    /// Localized display label for this category.
    ///
    /// Unknown identifiers fall back to a generic formatted form of the raw
    /// identifier (underscores become spaces). Never fails.
    pub fn label(&self, language: Language) -> String {
        let known = match (self, language) {
            (ManipulationCategory::GuiltTripping, Language::En) => Some("Guilt-tripping"),
            (ManipulationCategory::EmotionalBlackmail, Language::En) => Some("Emotional blackmail"),
            (ManipulationCategory::PassiveAggression, Language::En) => Some("Passive aggression"),
            (ManipulationCategory::DemeaningInvalidating, Language::En) => {
                Some("Demeaning / invalidating")
            }
            (ManipulationCategory::BlameShifting, Language::En) => Some("Blame-shifting"),
            (ManipulationCategory::Gaslighting, Language::En) => Some("Gaslighting"),
            (ManipulationCategory::ControlDominance, Language::En) => Some("Control / dominance"),
            (ManipulationCategory::GuiltTripping, Language::Zh) => Some("内疚绑架"),
            (ManipulationCategory::EmotionalBlackmail, Language::Zh) => Some("情感勒索"),
            (ManipulationCategory::PassiveAggression, Language::Zh) => Some("被动攻击"),
            (ManipulationCategory::DemeaningInvalidating, Language::Zh) => Some("贬低与否定"),
            (ManipulationCategory::BlameShifting, Language::Zh) => Some("推卸责任"),
            (ManipulationCategory::Gaslighting, Language::Zh) => Some("煤气灯操纵"),
            (ManipulationCategory::ControlDominance, Language::Zh) => Some("控制与支配"),
            (ManipulationCategory::Unknown(_), _) => None,
        };

        match known {
            Some(label) => label.to_string(),
            None => self.id().replace('_', " "),
        }
    }
}

impl From<String> for ManipulationCategory {
    fn from(id: String) -> Self {
        match id.as_str() {
            "guilt_tripping" => ManipulationCategory::GuiltTripping,
            "emotional_blackmail" => ManipulationCategory::EmotionalBlackmail,
            "passive_aggression" => ManipulationCategory::PassiveAggression,
            "demeaning_invalidating" => ManipulationCategory::DemeaningInvalidating,
            "blame_shifting" => ManipulationCategory::BlameShifting,
            "gaslighting" => ManipulationCategory::Gaslighting,
            "control_dominance" => ManipulationCategory::ControlDominance,
            _ => ManipulationCategory::Unknown(id),
        }
    }
}

impl From<&str> for ManipulationCategory {
    fn from(id: &str) -> Self {
        ManipulationCategory::from(id.to_string())
    }
}

impl From<ManipulationCategory> for String {
    fn from(category: ManipulationCategory) -> String {
        category.id().to_string()
    }
}

impl std::fmt::Display for ManipulationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Severity tier derived from the numeric risk score.
///
/// Four contiguous, non-overlapping bands with inclusive bounds covering
/// exactly [0,100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// 0-20: healthy communication
    Healthy,
    /// 21-40: mildly unhealthy
    Mild,
    /// 41-70: moderately risky
    Moderate,
    /// 71-100: strong manipulation
    High,
}

impl RiskBand {
    /// Look up the band for a risk score. Scores are clamped into [0,100]
    /// upstream, so every u8 in range maps to exactly one band.
    pub fn for_score(score: u8) -> RiskBand {
        match score {
            0..=20 => RiskBand::Healthy,
            21..=40 => RiskBand::Mild,
            41..=70 => RiskBand::Moderate,
            _ => RiskBand::High,
        }
    }

    /// Inclusive (lower, upper) score bounds of this band.
    pub fn bounds(&self) -> (u8, u8) {
        match self {
            RiskBand::Healthy => (0, 20),
            RiskBand::Mild => (21, 40),
            RiskBand::Moderate => (41, 70),
            RiskBand::High => (71, 100),
        }
    }

    /// Localized display label for this band.
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (RiskBand::Healthy, Language::En) => "Healthy",
            (RiskBand::Mild, Language::En) => "Mildly unhealthy",
            (RiskBand::Moderate, Language::En) => "Moderately risky",
            (RiskBand::High, Language::En) => "Strong manipulation",
            (RiskBand::Healthy, Language::Zh) => "健康",
            (RiskBand::Mild, Language::Zh) => "轻度不健康",
            (RiskBand::Moderate, Language::Zh) => "中度风险",
            (RiskBand::High, Language::Zh) => "强烈操纵",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_exact() {
        assert_eq!(RiskBand::for_score(0), RiskBand::Healthy);
        assert_eq!(RiskBand::for_score(20), RiskBand::Healthy);
        assert_eq!(RiskBand::for_score(21), RiskBand::Mild);
        assert_eq!(RiskBand::for_score(40), RiskBand::Mild);
        assert_eq!(RiskBand::for_score(41), RiskBand::Moderate);
        assert_eq!(RiskBand::for_score(70), RiskBand::Moderate);
        assert_eq!(RiskBand::for_score(71), RiskBand::High);
        assert_eq!(RiskBand::for_score(100), RiskBand::High);
    }

    #[test]
    fn test_bands_contiguous_over_full_range() {
        let mut previous = RiskBand::for_score(0);
        for score in 1..=100u8 {
            let band = RiskBand::for_score(score);
            let (lower, upper) = band.bounds();
            assert!(lower <= score && score <= upper);
            // A band change must happen exactly at a lower bound
            if band != previous {
                assert_eq!(score, lower);
            }
            previous = band;
        }
    }

    #[test]
    fn test_category_round_trip() {
        for category in ManipulationCategory::RECOMMENDED {
            let id = category.id().to_string();
            assert_eq!(ManipulationCategory::from(id), category);
        }
    }

    #[test]
    fn test_unknown_category_preserved_verbatim() {
        let category = ManipulationCategory::from("love_bombing");
        assert_eq!(
            category,
            ManipulationCategory::Unknown("love_bombing".to_string())
        );
        assert!(!category.is_recognized());
        assert_eq!(category.id(), "love_bombing");
    }

    #[test]
    fn test_unknown_category_label_fallback() {
        let category = ManipulationCategory::from("love_bombing");
        assert_eq!(category.label(Language::En), "love bombing");
        assert_eq!(category.label(Language::Zh), "love bombing");
    }

    #[test]
    fn test_known_category_labels() {
        let category = ManipulationCategory::GuiltTripping;
        assert_eq!(category.label(Language::En), "Guilt-tripping");
        assert_eq!(category.label(Language::Zh), "内疚绑架");
    }

    #[test]
    fn test_category_serde_as_string() {
        let json = serde_json::to_string(&ManipulationCategory::Gaslighting).unwrap();
        assert_eq!(json, "\"gaslighting\"");

        let parsed: ManipulationCategory = serde_json::from_str("\"love_bombing\"").unwrap();
        assert_eq!(
            parsed,
            ManipulationCategory::Unknown("love_bombing".to_string())
        );
    }

    #[test]
    fn test_perspective_serialization() {
        let json = serde_json::to_string(&Perspective::SpokenByUser).unwrap();
        assert_eq!(json, "\"spoken_by_user\"");
        assert_eq!(Perspective::Received.to_string(), "received");
    }

    #[test]
    fn test_language_serialization() {
        let json = serde_json::to_string(&Language::Zh).unwrap();
        assert_eq!(json, "\"zh\"");
        assert_eq!(Language::default(), Language::En);
    }
}
