use std::sync::Arc;

use crate::{
    cache::{OutfitCacheKey, ResponseCache},
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{OutfitQuery, RecommendedOutfit},
    services::ranking,
};

pub type OutfitCache = ResponseCache<OutfitCacheKey, Vec<RecommendedOutfit>>;

/// A way of producing outfit recommendations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OutfitStrategy: Send + Sync {
    async fn recommend(&self, query: &OutfitQuery) -> AppResult<Vec<RecommendedOutfit>>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Ranks outfits from the in-memory catalog, memoized when a cache is set
pub struct StaticCatalogStrategy {
    catalog: Arc<Catalog>,
    cache: Option<OutfitCache>,
}

impl StaticCatalogStrategy {
    pub fn new(catalog: Arc<Catalog>, cache: Option<OutfitCache>) -> Self {
        Self { catalog, cache }
    }

    pub fn cache(&self) -> Option<&OutfitCache> {
        self.cache.as_ref()
    }

    /// Infallible ranking used directly and as the fallback path
    pub fn rank(&self, query: &OutfitQuery) -> Vec<RecommendedOutfit> {
        let compute = || {
            ranking::rank(
                &self.catalog,
                &query.gender,
                &query.skin_tone,
                &query.occasion,
                query.count,
            )
        };

        match &self.cache {
            Some(cache) => cache.get_or_compute(&OutfitCacheKey::from(query), compute),
            None => compute(),
        }
    }
}

#[async_trait::async_trait]
impl OutfitStrategy for StaticCatalogStrategy {
    async fn recommend(&self, query: &OutfitQuery) -> AppResult<Vec<RecommendedOutfit>> {
        Ok(self.rank(query))
    }

    fn name(&self) -> &'static str {
        "static_catalog"
    }
}

/// Model-generated outfits. Not available yet; always reports
/// [`AppError::Unimplemented`] so the recommender falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerativeStrategy;

#[async_trait::async_trait]
impl OutfitStrategy for GenerativeStrategy {
    async fn recommend(&self, _query: &OutfitQuery) -> AppResult<Vec<RecommendedOutfit>> {
        Err(AppError::Unimplemented(
            "Generative outfit mode is not implemented".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "generative"
    }
}

/// Runs the configured strategy and falls back to the static catalog on
/// any error it reports
pub struct OutfitRecommender {
    primary: Option<Arc<dyn OutfitStrategy>>,
    fallback: Arc<StaticCatalogStrategy>,
}

impl OutfitRecommender {
    pub fn new(
        fallback: Arc<StaticCatalogStrategy>,
        primary: Option<Arc<dyn OutfitStrategy>>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Static catalog only, or the generative strategy in front of it
    pub fn for_mode(fallback: StaticCatalogStrategy, use_real_brain: bool) -> Self {
        let primary: Option<Arc<dyn OutfitStrategy>> = if use_real_brain {
            Some(Arc::new(GenerativeStrategy))
        } else {
            None
        };
        Self::new(Arc::new(fallback), primary)
    }

    /// True when a strategy other than the static catalog is tried first
    pub fn uses_real_brain(&self) -> bool {
        self.primary.is_some()
    }

    pub async fn recommend(&self, query: &OutfitQuery) -> AppResult<Vec<RecommendedOutfit>> {
        if let Some(primary) = &self.primary {
            match primary.recommend(query).await {
                Ok(outfits) => return Ok(outfits),
                Err(e) => {
                    tracing::warn!(
                        strategy = primary.name(),
                        error = %e,
                        "Strategy failed, falling back to static catalog"
                    );
                }
            }
        }

        self.fallback.recommend(query).await
    }
}
