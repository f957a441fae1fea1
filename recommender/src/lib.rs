//! Content-based recommendation engine.
//!
//! A request for recommendations walks a tiered chain: precomputed
//! lists from the object store, then the in-process cache, then a
//! fresh content-based scoring pass, and finally the popularity query
//! that also backstops every failure along the way. Interaction events
//! feed the long-lived interest profile independently of this chain.

pub mod cache;
pub mod engine;
pub mod interests;
pub mod metrics;
pub mod profile;
pub mod scoring;
pub mod stopwords;
pub mod text;

pub use cache::RecommendationCache;
pub use engine::Recommender;
pub use interests::InterestEngine;
pub use metrics::{MetricsCollector, RecommendationSource, RecommenderMetrics};
pub use profile::ProfileBuilder;
pub use scoring::{rank, recency_score, score_posts_by_content};
