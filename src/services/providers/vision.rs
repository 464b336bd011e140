//! Google Cloud Vision provider
//!
//! Sends one annotate request asking for face detection and image properties,
//! then classifies the first dominant colour with
//! [`ToneProfile::from_dominant_color`].

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{SkinToneOutcome, ToneProfile},
    services::providers::SkinToneClassifier,
};

const FACE_DETECTION: &str = "FACE_DETECTION";
const IMAGE_PROPERTIES: &str = "IMAGE_PROPERTIES";

#[derive(Clone)]
pub struct GoogleVisionClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AnnotateRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct ImageContent {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: &'static str,
    pub max_results: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub face_annotations: Vec<serde_json::Value>,
    #[serde(default)]
    pub image_properties_annotation: Option<ImagePropertiesAnnotation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePropertiesAnnotation {
    #[serde(default)]
    pub dominant_colors: Option<DominantColors>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DominantColors {
    #[serde(default)]
    pub colors: Vec<ColorInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ColorInfo {
    #[serde(default)]
    pub color: Color,
}

/// Channel values are omitted by the API when zero
#[derive(Debug, Default, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub red: f64,
    #[serde(default)]
    pub green: f64,
    #[serde(default)]
    pub blue: f64,
}

impl AnnotateRequest {
    pub fn for_image(image_base64: &str) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: image_base64.to_string(),
                },
                features: vec![
                    Feature {
                        feature_type: FACE_DETECTION,
                        max_results: 1,
                    },
                    Feature {
                        feature_type: IMAGE_PROPERTIES,
                        max_results: 1,
                    },
                ],
            }],
        }
    }
}

impl AnnotateResponse {
    /// Tone of the first dominant colour, if a face was found
    pub fn outcome(&self) -> SkinToneOutcome {
        let Some(response) = self.responses.first() else {
            return SkinToneOutcome::DetectionFailed;
        };

        if response.face_annotations.is_empty() {
            return SkinToneOutcome::DetectionFailed;
        }

        let dominant = response
            .image_properties_annotation
            .as_ref()
            .and_then(|props| props.dominant_colors.as_ref())
            .and_then(|dominant| dominant.colors.first());

        match dominant {
            Some(ColorInfo { color }) => SkinToneOutcome::Detected(
                ToneProfile::from_dominant_color(color.red, color.green, color.blue),
            ),
            None => SkinToneOutcome::DetectionFailed,
        }
    }
}

impl GoogleVisionClient {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl SkinToneClassifier for GoogleVisionClient {
    async fn classify(&self, image_base64: &str) -> AppResult<SkinToneOutcome> {
        let response = self
            .http_client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&AnnotateRequest::for_image(image_base64))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Vision API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let annotations: AnnotateResponse = match serde_json::from_str(&response_text) {
            Ok(annotations) => annotations,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.name(),
                    "Unreadable Vision API response"
                );
                return Ok(SkinToneOutcome::DetectionFailed);
            }
        };

        let outcome = annotations.outcome();
        tracing::info!(
            tone = outcome.label(),
            provider = self.name(),
            "Skin tone classified"
        );

        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "google_vision"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::test_support::spawn_upstream;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    fn parse(json: serde_json::Value) -> AnnotateResponse {
        serde_json::from_value(json).unwrap()
    }

    fn face_with_color(red: u8, green: u8, blue: u8) -> serde_json::Value {
        json!({
            "responses": [{
                "faceAnnotations": [{"detectionConfidence": 0.98}],
                "imagePropertiesAnnotation": {
                    "dominantColors": {
                        "colors": [
                            {"color": {"red": red, "green": green, "blue": blue}, "score": 0.6},
                            {"color": {"red": 0, "green": 0, "blue": 255}, "score": 0.1}
                        ]
                    }
                }
            }]
        })
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(AnnotateRequest::for_image("aGVsbG8=")).unwrap();
        assert_eq!(
            body,
            json!({
                "requests": [{
                    "image": {"content": "aGVsbG8="},
                    "features": [
                        {"type": "FACE_DETECTION", "maxResults": 1},
                        {"type": "IMAGE_PROPERTIES", "maxResults": 1}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_outcome_uses_first_dominant_color() {
        assert_eq!(
            parse(face_with_color(200, 100, 50)).outcome(),
            SkinToneOutcome::Detected(ToneProfile::Warm)
        );
        assert_eq!(
            parse(face_with_color(50, 100, 200)).outcome(),
            SkinToneOutcome::Detected(ToneProfile::Cool)
        );
        assert_eq!(
            parse(face_with_color(100, 100, 100)).outcome(),
            SkinToneOutcome::Detected(ToneProfile::Neutral)
        );
    }

    #[test]
    fn test_missing_channels_count_as_zero() {
        let response = parse(json!({
            "responses": [{
                "faceAnnotations": [{}],
                "imagePropertiesAnnotation": {"dominantColors": {"colors": [{"color": {"red": 180, "green": 90}}]}}
            }]
        }));
        assert_eq!(response.outcome(), SkinToneOutcome::Detected(ToneProfile::Warm));
    }

    #[test]
    fn test_no_face_is_detection_failed() {
        let response = parse(json!({
            "responses": [{
                "imagePropertiesAnnotation": {"dominantColors": {"colors": [{"color": {"red": 200, "green": 100, "blue": 50}}]}}
            }]
        }));
        assert_eq!(response.outcome(), SkinToneOutcome::DetectionFailed);
    }

    #[test]
    fn test_no_colors_is_detection_failed() {
        let response = parse(json!({"responses": [{"faceAnnotations": [{}]}]}));
        assert_eq!(response.outcome(), SkinToneOutcome::DetectionFailed);

        let response = parse(json!({
            "responses": [{"faceAnnotations": [{}], "imagePropertiesAnnotation": {"dominantColors": {"colors": []}}}]
        }));
        assert_eq!(response.outcome(), SkinToneOutcome::DetectionFailed);
    }

    #[test]
    fn test_empty_responses_is_detection_failed() {
        assert_eq!(parse(json!({})).outcome(), SkinToneOutcome::DetectionFailed);
    }

    #[tokio::test]
    async fn test_classify_against_upstream() {
        let router = Router::new().route(
            "/annotate",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["requests"][0]["image"]["content"], "aW1hZ2U=");
                Json(face_with_color(50, 100, 200))
            }),
        );
        let base = spawn_upstream(router).await;
        let client = GoogleVisionClient::new(
            HttpClient::new(),
            "test_key".to_string(),
            format!("{}/annotate", base),
        );

        let outcome = client.classify("aW1hZ2U=").await.unwrap();
        assert_eq!(outcome, SkinToneOutcome::Detected(ToneProfile::Cool));
    }

    #[tokio::test]
    async fn test_classify_malformed_body_is_detection_failed() {
        let router = Router::new().route("/annotate", post(|| async { "<html>oops</html>" }));
        let base = spawn_upstream(router).await;
        let client = GoogleVisionClient::new(
            HttpClient::new(),
            "test_key".to_string(),
            format!("{}/annotate", base),
        );

        let outcome = client.classify("aW1hZ2U=").await.unwrap();
        assert_eq!(outcome, SkinToneOutcome::DetectionFailed);
    }

    #[tokio::test]
    async fn test_classify_non_success_status_is_error() {
        let router = Router::new().route(
            "/annotate",
            post(|| async { (StatusCode::FORBIDDEN, "API key not valid") }),
        );
        let base = spawn_upstream(router).await;
        let client = GoogleVisionClient::new(
            HttpClient::new(),
            "bad_key".to_string(),
            format!("{}/annotate", base),
        );

        let result = client.classify("aW1hZ2U=").await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
