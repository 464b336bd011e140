//! External AI provider abstraction
//!
//! Two single-shot upstream services back the analysis endpoints: an image
//! classifier that infers a skin tone from a photo, and a text generator that
//! writes coaching tips. Neither is retried; a failed exchange is reported to
//! the caller once.

use std::time::Duration;

use crate::{error::AppResult, models::SkinToneOutcome};

pub mod gemini;
pub mod vision;

pub use gemini::GeminiClient;
pub use vision::GoogleVisionClient;

/// Infers a skin tone from a base64-encoded photo
#[async_trait::async_trait]
pub trait SkinToneClassifier: Send + Sync {
    /// Classify the dominant colour of a detected face.
    ///
    /// Transport failures and non-success statuses are errors. A completed
    /// exchange without a usable face or colour is `DetectionFailed`.
    async fn classify(&self, image_base64: &str) -> AppResult<SkinToneOutcome>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Produces a short styling tip from a free-form prompt
#[async_trait::async_trait]
pub trait CoachTipGenerator: Send + Sync {
    /// Blank prompts are rejected before any request is made
    async fn generate_tip(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Shared outbound client with the configured request timeout
pub fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(client)
}
