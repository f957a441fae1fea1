use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use ripple_core::{
    Clock, CoreError, PostId, PrecomputedRecommendations, ProcessingJob, ProcessingLogEntry,
    RecommendationStore, StorageError, SystemClock, UserAnalysis, UserId,
};

use crate::{keys, ObjectStore};

/// How long a stored recommendation list stays authoritative.
const RECOMMENDATION_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueueStateDocument {
    queue: Vec<ProcessingJob>,
    updated_at: DateTime<Utc>,
}

/// Typed document access over a raw object store.
pub struct LlmStorage<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: ObjectStore> LlmStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn load_analysis(&self, user_id: UserId) -> Result<Option<UserAnalysis>, CoreError> {
        let key = keys::analysis_key(user_id);
        let Some(body) = self.store.get(&key).await? else {
            debug!("No analysis found for user {}", user_id);
            return Ok(None);
        };

        let analysis = serde_json::from_str(&body).map_err(|e| StorageError::InvalidBody {
            key,
            details: e.to_string(),
        })?;
        Ok(Some(analysis))
    }

    pub async fn save_analysis(
        &self,
        user_id: UserId,
        analysis: serde_json::Value,
    ) -> Result<(), CoreError> {
        let document = UserAnalysis {
            user_id,
            analysis,
            analyzed_at: self.clock.now(),
        };

        let key = keys::analysis_key(user_id);
        self.store
            .put(&key, serde_json::to_string_pretty(&document)?)
            .await?;
        info!("Saved analysis for user {}", user_id);
        Ok(())
    }

    /// Queue snapshot for the out-of-band processor. A missing document
    /// means a fresh queue.
    pub async fn load_queue_state(&self) -> Result<Vec<ProcessingJob>, CoreError> {
        let Some(body) = self.store.get(keys::QUEUE_STATE_KEY).await? else {
            debug!("No queue state found, starting fresh");
            return Ok(Vec::new());
        };

        let document: QueueStateDocument =
            serde_json::from_str(&body).map_err(|e| StorageError::InvalidBody {
                key: keys::QUEUE_STATE_KEY.to_string(),
                details: e.to_string(),
            })?;
        Ok(document.queue)
    }

    pub async fn save_queue_state(&self, queue: Vec<ProcessingJob>) -> Result<(), CoreError> {
        let job_count = queue.len();
        let document = QueueStateDocument {
            queue,
            updated_at: self.clock.now(),
        };

        self.store
            .put(
                keys::QUEUE_STATE_KEY,
                serde_json::to_string_pretty(&document)?,
            )
            .await?;
        info!("Saved queue state ({} jobs)", job_count);
        Ok(())
    }

    /// Append one event to the daily processing log. Best-effort:
    /// failures are logged and swallowed.
    pub async fn log_processing(&self, user_id: UserId, event: &str, data: serde_json::Value) {
        if let Err(e) = self.append_log_entry(user_id, event, data).await {
            warn!("Failed to log processing event: {}", e);
        }
    }

    async fn append_log_entry(
        &self,
        user_id: UserId,
        event: &str,
        data: serde_json::Value,
    ) -> Result<(), CoreError> {
        let now = self.clock.now();
        let key = keys::processing_log_key(now);

        // A corrupt or missing log file starts a fresh day
        let mut entries: Vec<ProcessingLogEntry> = match self.store.get(&key).await? {
            Some(body) => serde_json::from_str(&body).unwrap_or_default(),
            None => Vec::new(),
        };

        entries.push(ProcessingLogEntry {
            timestamp: now,
            user_id,
            event: event.to_string(),
            data,
        });

        self.store
            .put(&key, serde_json::to_string_pretty(&entries)?)
            .await
    }
}

#[async_trait]
impl<S: ObjectStore> RecommendationStore for LlmStorage<S> {
    async fn load_recommendations(
        &self,
        user_id: UserId,
    ) -> Result<Option<PrecomputedRecommendations>, CoreError> {
        let key = keys::recommendations_key(user_id);
        let Some(body) = self.store.get(&key).await? else {
            debug!("No recommendations found for user {}", user_id);
            return Ok(None);
        };

        let recommendations: PrecomputedRecommendations =
            serde_json::from_str(&body).map_err(|e| StorageError::InvalidBody {
                key,
                details: e.to_string(),
            })?;

        if recommendations.is_expired(self.clock.now()) {
            info!("Recommendations expired for user {}", user_id);
            return Ok(None);
        }

        debug!("Loaded recommendations for user {}", user_id);
        Ok(Some(recommendations))
    }

    async fn save_recommendations(
        &self,
        user_id: UserId,
        post_ids: &[PostId],
        metadata: serde_json::Value,
    ) -> Result<(), CoreError> {
        let now = self.clock.now();
        let document = PrecomputedRecommendations {
            user_id,
            post_ids: post_ids.to_vec(),
            metadata,
            generated_at: now,
            expires_at: now + Duration::hours(RECOMMENDATION_TTL_HOURS),
        };

        let key = keys::recommendations_key(user_id);
        self.store
            .put(&key, serde_json::to_string_pretty(&document)?)
            .await?;
        info!("Saved recommendations for user {}", user_id);
        Ok(())
    }
}
