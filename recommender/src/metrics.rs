use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Which tier of the fallback chain served a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    Precomputed,
    Cache,
    ContentBased,
    Popularity,
    ErrorFallback,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationSource::Precomputed => "precomputed",
            RecommendationSource::Cache => "cache",
            RecommendationSource::ContentBased => "content_based",
            RecommendationSource::Popularity => "popularity",
            RecommendationSource::ErrorFallback => "error_fallback",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderMetrics {
    pub total_requests: u64,
    pub requests_by_source: HashMap<String, u64>,
    pub average_compute_time: Duration,
}

impl Default for RecommenderMetrics {
    fn default() -> Self {
        Self {
            total_requests: 0,
            requests_by_source: HashMap::new(),
            average_compute_time: Duration::from_millis(0),
        }
    }
}

impl RecommenderMetrics {
    pub fn source_count(&self, source: RecommendationSource) -> u64 {
        self.requests_by_source
            .get(source.as_str())
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<RecommenderMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(RecommenderMetrics::default())),
        }
    }

    pub async fn record_request(&self, source: RecommendationSource, compute_time: Duration) {
        let mut metrics = self.metrics.write().await;

        metrics.total_requests += 1;
        *metrics
            .requests_by_source
            .entry(source.as_str().to_string())
            .or_insert(0) += 1;

        let total_time = metrics.average_compute_time * (metrics.total_requests - 1) as u32
            + compute_time;
        metrics.average_compute_time = total_time / metrics.total_requests as u32;
    }

    pub async fn get_metrics(&self) -> RecommenderMetrics {
        self.metrics.read().await.clone()
    }

    pub async fn reset_metrics(&self) {
        let mut metrics = self.metrics.write().await;
        *metrics = RecommenderMetrics::default();
    }

    pub async fn export_metrics(&self) -> Result<String, serde_json::Error> {
        let metrics = self.get_metrics().await;
        serde_json::to_string_pretty(&metrics)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
