use std::collections::HashSet;
use std::sync::Arc;
use tracing::error;

use ripple_core::{ContentProfile, CoreError, InteractionStore, RecommenderConfig, UserId};

use crate::text::{extract_hashtags, extract_keywords};

/// Derives the transient content profile for a user from their recent
/// liked and reposted posts.
pub struct ProfileBuilder {
    store: Arc<dyn InteractionStore>,
    config: RecommenderConfig,
}

impl ProfileBuilder {
    pub fn new(store: Arc<dyn InteractionStore>, config: RecommenderConfig) -> Self {
        Self { store, config }
    }

    /// Build the profile. Any fetch error degrades to an empty profile
    /// (cold start) instead of propagating.
    pub async fn build(&self, user_id: UserId) -> ContentProfile {
        match self.try_build(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("Error building user profile: {}", e);
                ContentProfile::default()
            }
        }
    }

    async fn try_build(&self, user_id: UserId) -> Result<ContentProfile, CoreError> {
        let (liked, reposted) = tokio::try_join!(
            self.store.liked_posts(user_id, self.config.liked_posts_cap),
            self.store
                .reposted_posts(user_id, self.config.reposted_posts_cap),
        )?;

        let contents: Vec<&str> = liked
            .iter()
            .chain(reposted.iter())
            .map(|post| post.content.as_str())
            .collect();

        let mut hashtags = HashSet::new();
        for content in &contents {
            hashtags.extend(extract_hashtags(content));
        }

        let keywords = extract_keywords(
            &contents,
            self.config.min_keyword_len,
            self.config.max_keywords,
        );

        Ok(ContentProfile {
            hashtags,
            keywords,
            activity_count: liked.len() + reposted.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use ripple_core::{CandidatePost, InterestProfile, PostContent, PostId};

    struct ActivityStore {
        liked: Vec<PostContent>,
        reposted: Vec<PostContent>,
        fail: bool,
    }

    impl ActivityStore {
        fn new(liked: &[&str], reposted: &[&str]) -> Arc<Self> {
            let to_posts = |contents: &[&str]| {
                contents
                    .iter()
                    .map(|content| PostContent {
                        content: content.to_string(),
                        created_at: Utc::now(),
                    })
                    .collect()
            };
            Arc::new(Self {
                liked: to_posts(liked),
                reposted: to_posts(reposted),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                liked: Vec::new(),
                reposted: Vec::new(),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl InteractionStore for ActivityStore {
        async fn interest_profile(&self, _: UserId) -> Result<Option<InterestProfile>, CoreError> {
            Ok(None)
        }

        async fn save_interest_profile(
            &self,
            _: UserId,
            _: &InterestProfile,
        ) -> Result<bool, CoreError> {
            Ok(false)
        }

        async fn liked_posts(&self, _: UserId, limit: i64) -> Result<Vec<PostContent>, CoreError> {
            if self.fail {
                return Err(CoreError::Internal {
                    message: "liked query failed".to_string(),
                });
            }
            Ok(self.liked.iter().take(limit as usize).cloned().collect())
        }

        async fn reposted_posts(
            &self,
            _: UserId,
            limit: i64,
        ) -> Result<Vec<PostContent>, CoreError> {
            if self.fail {
                return Err(CoreError::Internal {
                    message: "repost query failed".to_string(),
                });
            }
            Ok(self.reposted.iter().take(limit as usize).cloned().collect())
        }

        async fn candidate_posts(
            &self,
            _: UserId,
            _: i64,
        ) -> Result<Vec<CandidatePost>, CoreError> {
            Ok(Vec::new())
        }

        async fn popular_posts(&self, _: i64) -> Result<Vec<PostId>, CoreError> {
            Ok(Vec::new())
        }
    }

    fn builder(store: Arc<ActivityStore>) -> ProfileBuilder {
        ProfileBuilder::new(store, RecommenderConfig::default())
    }

    #[tokio::test]
    async fn test_profile_combines_likes_and_reposts() {
        let store = ActivityStore::new(
            &["Excited for the #Gaming tournament tonight!"],
            &["Another #gaming stream, tournament brackets are live"],
        );
        let profile = builder(store).build(1).await;

        assert_eq!(profile.activity_count, 2);
        // Duplicate hashtags collapse into the set
        assert_eq!(profile.hashtags.len(), 1);
        assert!(profile.hashtags.contains("#gaming"));
        assert_eq!(profile.keywords[0], "tournament");
    }

    #[tokio::test]
    async fn test_no_activity_is_cold_start() {
        let store = ActivityStore::new(&[], &[]);
        let profile = builder(store).build(1).await;

        assert_eq!(profile.activity_count, 0);
        assert!(profile.is_cold_start());
        assert!(profile.hashtags.is_empty());
        assert!(profile.keywords.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_error_degrades_to_empty_profile() {
        let store = ActivityStore::failing();
        let profile = builder(store).build(1).await;

        assert!(profile.is_cold_start());
    }
}
