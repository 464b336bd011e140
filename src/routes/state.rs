use std::sync::Arc;

use crate::{
    cache::ResponseCache,
    catalog::Catalog,
    config::Config,
    error::AppResult,
    services::{
        providers::{
            build_http_client, CoachTipGenerator, GeminiClient, GoogleVisionClient,
            SkinToneClassifier,
        },
        OutfitRecommender, StaticCatalogStrategy,
    },
};

/// Request body limit when none is configured
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state.
///
/// An AI adapter left as `None` makes its endpoint answer "not configured".
pub struct AppState {
    pub recommender: OutfitRecommender,
    pub skin_classifier: Option<Arc<dyn SkinToneClassifier>>,
    pub coach: Option<Arc<dyn CoachTipGenerator>>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(
        recommender: OutfitRecommender,
        skin_classifier: Option<Arc<dyn SkinToneClassifier>>,
        coach: Option<Arc<dyn CoachTipGenerator>>,
    ) -> Self {
        Self {
            recommender,
            skin_classifier,
            coach,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Wires the catalog, cache, strategy and AI adapters from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = Arc::new(Catalog::load(config.catalog_path.as_deref())?);
        let cache = match (config.cache_capacity(), config.cache_ttl()) {
            (Some(capacity), Some(ttl)) => Some(ResponseCache::new(capacity, ttl)),
            _ => None,
        };
        match &cache {
            Some(cache) => tracing::info!(
                capacity = cache.capacity(),
                ttl_secs = cache.ttl().as_secs(),
                "Outfit cache enabled"
            ),
            None => tracing::info!("Outfit cache disabled"),
        }
        let strategy = StaticCatalogStrategy::new(catalog, cache);
        let recommender = OutfitRecommender::for_mode(strategy, config.use_real_brain);

        let http_client = build_http_client(config.http_timeout())?;

        let skin_classifier = config.vision_key().map(|key| {
            Arc::new(GoogleVisionClient::new(
                http_client.clone(),
                key.to_string(),
                config.vision_api_url.clone(),
            )) as Arc<dyn SkinToneClassifier>
        });

        let coach = config.gemini_key().map(|key| {
            Arc::new(GeminiClient::new(
                http_client.clone(),
                key.to_string(),
                config.gemini_api_url.clone(),
                config.gemini_model.clone(),
            )) as Arc<dyn CoachTipGenerator>
        });

        if skin_classifier.is_none() {
            tracing::warn!("VISION_API_KEY not set, skin analysis disabled");
        }
        if coach.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, coaching tips disabled");
        }

        tracing::info!(
            use_real_brain = recommender.uses_real_brain(),
            "Application state initialized"
        );

        Ok(Self {
            max_body_bytes: config.max_body_bytes,
            ..Self::new(recommender, skin_classifier, coach)
        })
    }
}
