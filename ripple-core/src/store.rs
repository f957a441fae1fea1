use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::types::{
    CandidatePost, InterestProfile, PostContent, PostId, PrecomputedRecommendations, UserId,
};

/// Read/write access to the relational interaction data the
/// recommendation engine consumes.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Persisted interest profile. `Ok(None)` when the user row does
    /// not exist; an existing user without a profile yet gets an empty
    /// one.
    async fn interest_profile(&self, user_id: UserId)
        -> Result<Option<InterestProfile>, CoreError>;

    /// Persist an updated profile. Returns `false` when the user row
    /// does not exist.
    async fn save_interest_profile(
        &self,
        user_id: UserId,
        profile: &InterestProfile,
    ) -> Result<bool, CoreError>;

    /// Contents of the user's most recently liked posts, newest like
    /// first.
    async fn liked_posts(&self, user_id: UserId, limit: i64)
        -> Result<Vec<PostContent>, CoreError>;

    /// Contents of the user's most recent reposts, newest first.
    async fn reposted_posts(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<PostContent>, CoreError>;

    /// Recent posts authored by other users that the target user has
    /// neither liked nor reposted, newest first.
    async fn candidate_posts(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<CandidatePost>, CoreError>;

    /// Posts from the last week ranked by engagement, then recency.
    async fn popular_posts(&self, limit: i64) -> Result<Vec<PostId>, CoreError>;
}

/// Precomputed recommendation documents in the object store.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Load the precomputed list for a user. `Ok(None)` when the
    /// document is absent or expired.
    async fn load_recommendations(
        &self,
        user_id: UserId,
    ) -> Result<Option<PrecomputedRecommendations>, CoreError>;

    /// Write a freshly generated list. Expiry is set 24 hours out.
    async fn save_recommendations(
        &self,
        user_id: UserId,
        post_ids: &[PostId],
        metadata: serde_json::Value,
    ) -> Result<(), CoreError>;
}

/// Time source injected into the cache, scorer, and orchestrator so
/// tests can pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant; used by tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
