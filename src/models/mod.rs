use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub mod outfit;
pub mod tone;

pub use outfit::{
    Gender, Occasion, OutfitItem, OutfitRecord, RecommendedItem, RecommendedOutfit,
};
pub use tone::ToneProfile;

/// Number of outfits returned when the request does not say
pub const DEFAULT_OUTFIT_COUNT: usize = 3;
/// Upper bound on outfits per request
pub const MAX_OUTFIT_COUNT: usize = 10;

/// Label reported when no face or colour data could be extracted
pub const DETECTION_FAILED: &str = "Detection failed.";

// ============================================================================
// Outfit recommendation
// ============================================================================

/// Raw body of `POST /get-outfit`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRequest {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub skin_tone: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Validated outfit lookup parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitQuery {
    pub gender: String,
    pub skin_tone: String,
    pub occasion: String,
    pub count: usize,
}

impl OutfitRequest {
    /// Checks required fields and applies the count default and cap
    pub fn validate(self) -> AppResult<OutfitQuery> {
        let gender = required(self.gender, "gender")?;
        let occasion = required(self.occasion, "occasion")?;

        Ok(OutfitQuery {
            gender,
            skin_tone: self.skin_tone.unwrap_or_default().trim().to_string(),
            occasion,
            count: self
                .count
                .unwrap_or(DEFAULT_OUTFIT_COUNT)
                .min(MAX_OUTFIT_COUNT),
        })
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidInput(format!("Missing field: {}", field)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitResponse {
    pub success: bool,
    pub outfits: Vec<RecommendedOutfit>,
}

// ============================================================================
// Skin tone analysis
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkinAnalysisRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// Result of a completed classification exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinToneOutcome {
    Detected(ToneProfile),
    /// No face or no dominant colour in the image, or an unreadable reply
    DetectionFailed,
}

impl SkinToneOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SkinToneOutcome::Detected(tone) => tone.as_str(),
            SkinToneOutcome::DetectionFailed => DETECTION_FAILED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinAnalysisResponse {
    pub success: bool,
    pub tone: String,
}

impl From<SkinToneOutcome> for SkinAnalysisResponse {
    fn from(outcome: SkinToneOutcome) -> Self {
        Self {
            success: true,
            tone: outcome.label().to_string(),
        }
    }
}

// ============================================================================
// Coaching tips
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachTipRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachTipResponse {
    pub success: bool,
    pub tip: String,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub use_real_brain: bool,
    pub time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outfit_request_camel_case() {
        let json = r#"{"gender": "Men", "skinTone": "Warm", "occasion": "Date", "count": 2}"#;
        let request: OutfitRequest = serde_json::from_str(json).unwrap();
        let query = request.validate().unwrap();

        assert_eq!(
            query,
            OutfitQuery {
                gender: "Men".to_string(),
                skin_tone: "Warm".to_string(),
                occasion: "Date".to_string(),
                count: 2,
            }
        );
    }

    #[test]
    fn test_outfit_request_defaults_count_and_tone() {
        let json = r#"{"gender": "Women", "occasion": "Party"}"#;
        let query = serde_json::from_str::<OutfitRequest>(json)
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(query.count, DEFAULT_OUTFIT_COUNT);
        assert_eq!(query.skin_tone, "");
    }

    #[test]
    fn test_outfit_request_caps_count() {
        let request = OutfitRequest {
            gender: Some("Men".into()),
            occasion: Some("Date".into()),
            count: Some(500),
            ..Default::default()
        };
        assert_eq!(request.validate().unwrap().count, MAX_OUTFIT_COUNT);
    }

    #[test]
    fn test_outfit_request_missing_gender() {
        let request = OutfitRequest {
            occasion: Some("Date".into()),
            ..Default::default()
        };
        match request.validate() {
            Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "Missing field: gender"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_outfit_request_blank_occasion_is_missing() {
        let request = OutfitRequest {
            gender: Some("Men".into()),
            occasion: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(request.validate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_skin_outcome_labels() {
        assert_eq!(
            SkinToneOutcome::Detected(ToneProfile::Warm).label(),
            "Warm"
        );
        assert_eq!(SkinToneOutcome::DetectionFailed.label(), "Detection failed.");

        let response = SkinAnalysisResponse::from(SkinToneOutcome::DetectionFailed);
        assert!(response.success);
        assert_eq!(response.tone, DETECTION_FAILED);
    }
}
