use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use ripple_core::{CoreError, InteractionKind, InteractionStore, UserId};

/// Applies interaction events to the persisted per-user interest
/// profile. Updates are fire-and-forget: callers never see an error.
///
/// The read-modify-write is not guarded; concurrent updates for the
/// same user can race and one can be lost.
pub struct InterestEngine {
    store: Arc<dyn InteractionStore>,
}

impl InterestEngine {
    pub fn new(store: Arc<dyn InteractionStore>) -> Self {
        Self { store }
    }

    /// String-boundary entry point for callers speaking the wire
    /// spellings. Unknown kinds log a warning and do nothing.
    pub async fn record_interaction(
        &self,
        user_id: UserId,
        categories: &HashMap<String, f64>,
        kind: &str,
    ) {
        let kind = match kind.parse::<InteractionKind>() {
            Ok(kind) => kind,
            Err(_) => {
                warn!("Unknown interaction type: {}", kind);
                return;
            }
        };

        self.update_interests(user_id, categories, kind).await;
    }

    /// Fold one interaction into the user's interest profile and
    /// persist the result. Unknown users and storage failures are
    /// logged and swallowed.
    pub async fn update_interests(
        &self,
        user_id: UserId,
        categories: &HashMap<String, f64>,
        kind: InteractionKind,
    ) {
        if let Err(e) = self.try_update(user_id, categories, kind).await {
            error!("Error updating interests: {}", e);
        }
    }

    async fn try_update(
        &self,
        user_id: UserId,
        categories: &HashMap<String, f64>,
        kind: InteractionKind,
    ) -> Result<(), CoreError> {
        let Some(mut profile) = self.store.interest_profile(user_id).await? else {
            return Ok(());
        };

        profile.apply(categories, kind.signal_weight());

        self.store.save_interest_profile(user_id, &profile).await?;
        info!("Updated profile for user {} ({})", user_id, kind.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ripple_core::{CandidatePost, InterestProfile, PostContent, PostId};
    use std::sync::Mutex;

    /// Store fake tracking profile reads and writes.
    struct ProfileStore {
        profiles: Mutex<HashMap<UserId, InterestProfile>>,
        saves: Mutex<usize>,
    }

    impl ProfileStore {
        fn with_user(user_id: UserId) -> Arc<Self> {
            let mut profiles = HashMap::new();
            profiles.insert(user_id, InterestProfile::new());
            Arc::new(Self {
                profiles: Mutex::new(profiles),
                saves: Mutex::new(0),
            })
        }

        fn profile(&self, user_id: UserId) -> InterestProfile {
            self.profiles.lock().unwrap().get(&user_id).cloned().unwrap()
        }

        fn save_count(&self) -> usize {
            *self.saves.lock().unwrap()
        }
    }

    #[async_trait]
    impl InteractionStore for ProfileStore {
        async fn interest_profile(
            &self,
            user_id: UserId,
        ) -> Result<Option<InterestProfile>, CoreError> {
            Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
        }

        async fn save_interest_profile(
            &self,
            user_id: UserId,
            profile: &InterestProfile,
        ) -> Result<bool, CoreError> {
            let mut profiles = self.profiles.lock().unwrap();
            *self.saves.lock().unwrap() += 1;
            match profiles.get_mut(&user_id) {
                Some(existing) => {
                    *existing = profile.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn liked_posts(&self, _: UserId, _: i64) -> Result<Vec<PostContent>, CoreError> {
            Ok(Vec::new())
        }

        async fn reposted_posts(&self, _: UserId, _: i64) -> Result<Vec<PostContent>, CoreError> {
            Ok(Vec::new())
        }

        async fn candidate_posts(&self, _: UserId, _: i64) -> Result<Vec<CandidatePost>, CoreError> {
            Ok(Vec::new())
        }

        async fn popular_posts(&self, _: i64) -> Result<Vec<PostId>, CoreError> {
            Ok(Vec::new())
        }
    }

    fn categories(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs
            .iter()
            .map(|(name, weight)| (name.to_string(), *weight))
            .collect()
    }

    #[tokio::test]
    async fn test_like_updates_and_normalizes() {
        let store = ProfileStore::with_user(1);
        let engine = InterestEngine::new(store.clone());

        engine
            .update_interests(1, &categories(&[("gaming", 0.8), ("tech", 0.2)]), InteractionKind::Like)
            .await;

        let profile = store.profile(1);
        assert!((profile.weights_sum() - 1.0).abs() < 1e-9);
        assert!((profile.weight("gaming") - 0.8).abs() < 1e-9);
        assert!((profile.weight("tech") - 0.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_skip_cannot_push_weight_below_zero() {
        let store = ProfileStore::with_user(1);
        let engine = InterestEngine::new(store.clone());

        engine
            .update_interests(1, &categories(&[("gaming", 1.0)]), InteractionKind::Like)
            .await;
        engine
            .update_interests(1, &categories(&[("gaming", 1.0)]), InteractionKind::Skip)
            .await;

        let profile = store.profile(1);
        assert!(profile.weight("gaming") >= 0.0);
        let sum = profile.weights_sum();
        assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_interaction_is_a_no_op() {
        let store = ProfileStore::with_user(1);
        let engine = InterestEngine::new(store.clone());

        engine
            .record_interaction(1, &categories(&[("gaming", 1.0)]), "BOOKMARK")
            .await;

        assert_eq!(store.save_count(), 0);
        assert!(store.profile(1).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_a_no_op() {
        let store = ProfileStore::with_user(1);
        let engine = InterestEngine::new(store.clone());

        engine
            .record_interaction(99, &categories(&[("gaming", 1.0)]), "LIKE")
            .await;

        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_wire_spelling_accepted() {
        let store = ProfileStore::with_user(1);
        let engine = InterestEngine::new(store.clone());

        engine
            .record_interaction(1, &categories(&[("music", 1.0)]), "VIEW_LONG")
            .await;

        assert_eq!(store.save_count(), 1);
        assert!((store.profile(1).weight("music") - 1.0).abs() < 1e-9);
    }
}
