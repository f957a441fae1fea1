use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::error::CoreError;

pub type UserId = i64;
pub type PostId = i64;

/// A post eligible for recommendation, with aggregated engagement counts
/// as returned by the candidate query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePost {
    pub id: PostId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub repost_count: i64,
}

/// A candidate post with its computed score and the match counts that
/// produced it.
#[derive(Debug, Clone)]
pub struct ScoredPost {
    pub post: CandidatePost,
    pub score: f64,
    pub hashtag_matches: usize,
    pub keyword_matches: usize,
}

/// Content of a single post a user liked or reposted.
#[derive(Debug, Clone)]
pub struct PostContent {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Interactions that feed the interest profile, with their wire
/// spellings (`LIKE`, `REPOST`, `FOLLOW`, `REPLY`, `VIEW_LONG`, `SKIP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Like,
    Repost,
    Follow,
    Reply,
    ViewLong,
    Skip,
}

impl InteractionKind {
    /// Signed weight this interaction contributes to the interest
    /// profile. Skips are the only negative signal.
    pub fn signal_weight(&self) -> f64 {
        match self {
            InteractionKind::Like => 0.03,
            InteractionKind::Repost => 0.06,
            InteractionKind::Follow => 0.06,
            InteractionKind::Reply => 0.04,
            InteractionKind::ViewLong => 0.015,
            InteractionKind::Skip => -0.02,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Like => "LIKE",
            InteractionKind::Repost => "REPOST",
            InteractionKind::Follow => "FOLLOW",
            InteractionKind::Reply => "REPLY",
            InteractionKind::ViewLong => "VIEW_LONG",
            InteractionKind::Skip => "SKIP",
        }
    }
}

impl FromStr for InteractionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKE" => Ok(InteractionKind::Like),
            "REPOST" => Ok(InteractionKind::Repost),
            "FOLLOW" => Ok(InteractionKind::Follow),
            "REPLY" => Ok(InteractionKind::Reply),
            "VIEW_LONG" => Ok(InteractionKind::ViewLong),
            "SKIP" => Ok(InteractionKind::Skip),
            other => Err(CoreError::InvalidInput {
                message: format!("Unknown interaction type: {}", other),
            }),
        }
    }
}

/// Per-user category weight vector persisted on the user record.
///
/// After every update the weights sum to 1, unless no positive weight
/// remains, in which case the profile stays all-zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestProfile(HashMap<String, f64>);

impl InterestProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn weight(&self, category: &str) -> f64 {
        self.0.get(category).copied().unwrap_or(0.0)
    }

    pub fn weights_sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    /// Apply one interaction: every category the post belongs to gains
    /// `signed_weight * relevance`, negatives clamp at zero, then the
    /// whole vector is renormalized.
    pub fn apply(&mut self, categories: &HashMap<String, f64>, signed_weight: f64) {
        for (category, relevance) in categories {
            let entry = self.0.entry(category.clone()).or_insert(0.0);
            let updated = *entry + signed_weight * relevance;
            *entry = if updated < 0.0 { 0.0 } else { updated };
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        let sum = self.weights_sum();
        if sum > 0.0 {
            for value in self.0.values_mut() {
                *value /= sum;
            }
        }
    }
}

impl FromIterator<(String, f64)> for InterestProfile {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Transient view of a user's recent tastes, rebuilt per recommendation
/// request from their liked and reposted posts. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ContentProfile {
    pub hashtags: HashSet<String>,
    pub keywords: Vec<String>,
    pub activity_count: usize,
}

impl ContentProfile {
    pub fn is_cold_start(&self) -> bool {
        self.activity_count == 0
    }
}

/// Recommendation list generated out-of-band and stored as a JSON
/// document under `recommendations/user-<id>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecomputedRecommendations {
    pub user_id: UserId,
    pub post_ids: Vec<PostId>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PrecomputedRecommendations {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Analysis document stored under `analysis/user-<id>/latest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalysis {
    pub user_id: UserId,
    pub analysis: serde_json::Value,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// One entry of the background processor's queue, persisted as part of
/// the `queue/state.json` snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingJob {
    pub id: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub post_id: PostId,
    pub content: String,
    pub status: JobStatus,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessingJob {
    pub fn analyze_post(post_id: PostId, content: String, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("post_{}_{}", post_id, now.timestamp_millis()),
            job_type: "analyze_post".to_string(),
            post_id,
            content,
            status: JobStatus::Pending,
            added_at: now,
            started_at: None,
            completed_at: None,
            error: None,
        }
    }
}

/// One line of the daily processing log (`logs/<date>.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingLogEntry {
    pub timestamp: DateTime<Utc>,
    pub user_id: UserId,
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}
