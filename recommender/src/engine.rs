use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use ripple_core::{
    Clock, CoreError, InteractionStore, PostId, RecommendationStore, RecommenderConfig, UserId,
};

use crate::cache::RecommendationCache;
use crate::metrics::{MetricsCollector, RecommendationSource};
use crate::profile::ProfileBuilder;
use crate::scoring::{rank, score_posts_by_content};

/// Tiered recommendation orchestrator. Strategies are tried in a fixed
/// order and the first one that produces ids wins: precomputed lists,
/// the in-process cache, a fresh content-based pass, and finally the
/// popularity query, which also backstops every error.
pub struct Recommender {
    interactions: Arc<dyn InteractionStore>,
    precomputed: Arc<dyn RecommendationStore>,
    profile_builder: ProfileBuilder,
    cache: RecommendationCache,
    metrics: MetricsCollector,
    clock: Arc<dyn Clock>,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(
        interactions: Arc<dyn InteractionStore>,
        precomputed: Arc<dyn RecommendationStore>,
        clock: Arc<dyn Clock>,
        config: RecommenderConfig,
    ) -> Self {
        let cache = RecommendationCache::new(config.cache_ttl(), clock.clone());
        let profile_builder = ProfileBuilder::new(interactions.clone(), config.clone());

        Self {
            interactions,
            precomputed,
            profile_builder,
            cache,
            metrics: MetricsCollector::new(),
            clock,
            config,
        }
    }

    /// Recommended post ids with the default list length.
    pub async fn recommendations(&self, user_id: UserId) -> Vec<PostId> {
        self.recommendations_for_user(user_id, self.config.default_limit)
            .await
    }

    /// Recommended post ids for a user. Always returns a list; every
    /// failure path degrades to the popularity query.
    pub async fn recommendations_for_user(&self, user_id: UserId, limit: usize) -> Vec<PostId> {
        let started = Instant::now();

        if let Some(ids) = self.precomputed_recommendations(user_id, limit).await {
            self.metrics
                .record_request(RecommendationSource::Precomputed, started.elapsed())
                .await;
            return ids;
        }

        if let Some(ids) = self.cache.get(user_id, limit) {
            self.metrics
                .record_request(RecommendationSource::Cache, started.elapsed())
                .await;
            return ids;
        }

        debug!("Generating content-based recommendations for user {}", user_id);
        let fallback_source = match self.content_based_recommendations(user_id, limit).await {
            Ok(Some(ids)) => {
                self.metrics
                    .record_request(RecommendationSource::ContentBased, started.elapsed())
                    .await;
                return ids;
            }
            Ok(None) => RecommendationSource::Popularity,
            Err(e) => {
                error!("Error generating recommendations: {}", e);
                RecommendationSource::ErrorFallback
            }
        };

        let ids = self.popular_recommendations(limit).await;
        self.metrics
            .record_request(fallback_source, started.elapsed())
            .await;
        ids
    }

    /// Invalidate every cached list for a user. Call after the user
    /// likes, reposts, or follows, so stale scores are not served.
    pub fn clear_user_cache(&self, user_id: UserId) {
        self.cache.clear_user(user_id);
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Precomputed list from the object store, when one exists, is
    /// unexpired, and is non-empty. Lookup failures count as a miss.
    async fn precomputed_recommendations(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Option<Vec<PostId>> {
        match self.precomputed.load_recommendations(user_id).await {
            Ok(Some(recommendations)) if !recommendations.post_ids.is_empty() => {
                info!("Using precomputed recommendations for user {}", user_id);
                Some(recommendations.post_ids.into_iter().take(limit).collect())
            }
            Ok(_) => None,
            Err(e) => {
                debug!(
                    "No precomputed recommendations for user {}: {}",
                    user_id, e
                );
                None
            }
        }
    }

    /// The profile-driven path. `Ok(None)` means cold start or an empty
    /// candidate set; the caller falls back to popularity.
    async fn content_based_recommendations(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Option<Vec<PostId>>, CoreError> {
        let profile = self.profile_builder.build(user_id).await;
        if profile.is_cold_start() {
            info!("Cold start - returning popular posts for user {}", user_id);
            return Ok(None);
        }

        let candidates = self
            .interactions
            .candidate_posts(user_id, self.config.candidate_limit)
            .await?;
        if candidates.is_empty() {
            info!("No candidate posts - returning popular posts");
            return Ok(None);
        }

        let scored = score_posts_by_content(&profile, candidates, self.clock.now());
        let ids = rank(scored, limit);

        self.cache.insert(user_id, limit, ids.clone());
        self.cache.sweep();

        Ok(Some(ids))
    }

    /// Last-resort trending query. Its own failure yields an empty
    /// list rather than an error.
    async fn popular_recommendations(&self, limit: usize) -> Vec<PostId> {
        match self.interactions.popular_posts(limit as i64).await {
            Ok(ids) => ids,
            Err(e) => {
                error!("Error getting popular posts: {}", e);
                Vec::new()
            }
        }
    }
}
