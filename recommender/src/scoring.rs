//! Pure content-based scoring. No I/O; the clock value is passed in.

use chrono::{DateTime, Utc};

use ripple_core::{CandidatePost, ContentProfile, PostId, ScoredPost};

use crate::text::{extract_hashtags, keyword_pattern};

const HASHTAG_MATCH_POINTS: f64 = 10.0;
const KEYWORD_MATCH_POINTS: f64 = 3.0;
const LIKE_WEIGHT: f64 = 0.5;
const REPOST_WEIGHT: f64 = 0.3;
const MAX_RECENCY_POINTS: f64 = 5.0;

/// Score candidates against a content profile: hashtag overlap weighs
/// heaviest, then keyword occurrences, engagement, and recency.
pub fn score_posts_by_content(
    profile: &ContentProfile,
    posts: Vec<CandidatePost>,
    now: DateTime<Utc>,
) -> Vec<ScoredPost> {
    let keyword_patterns: Vec<_> = profile
        .keywords
        .iter()
        .filter_map(|keyword| keyword_pattern(keyword))
        .collect();

    posts
        .into_iter()
        .map(|post| {
            let content_lower = post.content.to_lowercase();
            let mut score = 0.0;

            let hashtag_matches = extract_hashtags(&post.content)
                .filter(|tag| profile.hashtags.contains(tag))
                .count();
            score += hashtag_matches as f64 * HASHTAG_MATCH_POINTS;

            let keyword_matches: usize = keyword_patterns
                .iter()
                .map(|pattern| pattern.find_iter(&content_lower).count())
                .sum();
            score += keyword_matches as f64 * KEYWORD_MATCH_POINTS;

            score += post.like_count as f64 * LIKE_WEIGHT
                + post.repost_count as f64 * REPOST_WEIGHT;

            score += recency_score(post.created_at, now);

            ScoredPost {
                post,
                score,
                hashtag_matches,
                keyword_matches,
            }
        })
        .collect()
}

/// Linear decay from 5 points at age zero to none at 120 hours.
pub fn recency_score(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_hours = (now - created_at).num_milliseconds() as f64 / 3_600_000.0;
    (MAX_RECENCY_POINTS - age_hours / 24.0).max(0.0)
}

/// Sort by descending score and keep the top `limit` ids. The sort is
/// stable, so equal scores preserve candidate order.
pub fn rank(mut scored: Vec<ScoredPost>, limit: usize) -> Vec<PostId> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
        .into_iter()
        .take(limit)
        .map(|scored| scored.post.id)
        .collect()
}
