use crate::{profile_from_json, Database};
use ripple_core::{InteractionStore, InterestProfile};
use serde_json::json;

#[test]
fn test_profile_from_missing_column() {
    let profile = profile_from_json(None).expect("missing column maps to empty profile");
    assert!(profile.is_empty());

    let profile =
        profile_from_json(Some(serde_json::Value::Null)).expect("null maps to empty profile");
    assert!(profile.is_empty());
}

#[test]
fn test_profile_from_json_object() {
    let value = json!({"gaming": 0.7, "tech": 0.3});
    let profile = profile_from_json(Some(value)).expect("object parses");

    assert_eq!(profile.len(), 2);
    assert!((profile.weight("gaming") - 0.7).abs() < 1e-9);
    assert!((profile.weights_sum() - 1.0).abs() < 1e-9);
}

#[test]
fn test_profile_from_json_rejects_non_object() {
    assert!(profile_from_json(Some(json!([1, 2, 3]))).is_err());
}

/// Live round-trip checks; skipped when DATABASE_URL is not set.
async fn test_database() -> Option<Database> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = Database::connect(&url).await.ok()?;
    db.run_migrations().await.ok()?;
    Some(db)
}

#[tokio::test]
async fn test_unknown_user_has_no_profile() {
    let Some(db) = test_database().await else {
        return;
    };

    let profile = db
        .interest_profile(i64::MAX)
        .await
        .expect("query should succeed");
    assert!(profile.is_none());

    let saved = db
        .save_interest_profile(i64::MAX, &InterestProfile::new())
        .await
        .expect("update should succeed");
    assert!(!saved);
}

#[tokio::test]
async fn test_popular_posts_query_shape() {
    let Some(db) = test_database().await else {
        return;
    };

    // Shape check only; the result depends on seeded data
    let ids = db.popular_posts(5).await.expect("query should succeed");
    assert!(ids.len() <= 5);
}
