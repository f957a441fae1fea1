use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::debug;

use ripple_core::{
    CandidatePost, CoreError, DatabaseError, InteractionStore, InterestProfile, PostContent,
    PostId, UserId,
};

#[cfg(test)]
mod tests;

const LIKED_POSTS_SQL: &str = r#"
    SELECT p.content, p.created_at
    FROM posts p
    JOIN likes l ON p.id = l.post_id
    WHERE l.user_id = $1
    ORDER BY l.created_at DESC
    LIMIT $2
"#;

const REPOSTED_POSTS_SQL: &str = r#"
    SELECT p.content, p.created_at
    FROM posts p
    JOIN reposts r ON p.id = r.post_id
    WHERE r.user_id = $1
    ORDER BY r.created_at DESC
    LIMIT $2
"#;

const CANDIDATE_POSTS_SQL: &str = r#"
    SELECT p.id, p.content, p.created_at,
           COUNT(DISTINCT l.id) AS like_count,
           COUNT(DISTINCT r.id) AS repost_count
    FROM posts p
    LEFT JOIN likes l ON p.id = l.post_id
    LEFT JOIN reposts r ON p.id = r.post_id
    WHERE p.user_id != $1
      AND p.id NOT IN (
          SELECT post_id FROM likes WHERE user_id = $1
          UNION
          SELECT post_id FROM reposts WHERE user_id = $1
      )
      AND p.created_at > NOW() - INTERVAL '7 days'
    GROUP BY p.id
    ORDER BY p.created_at DESC
    LIMIT $2
"#;

const POPULAR_POSTS_SQL: &str = r#"
    SELECT p.id
    FROM posts p
    LEFT JOIN likes l ON p.id = l.post_id
    LEFT JOIN reposts r ON p.id = r.post_id
    WHERE p.created_at > NOW() - INTERVAL '7 days'
    GROUP BY p.id
    ORDER BY (COUNT(DISTINCT l.id) * 2 + COUNT(DISTINCT r.id)) DESC, p.created_at DESC
    LIMIT $1
"#;

/// Postgres-backed interaction store.
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, CoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        debug!("Connected to Postgres");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), CoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::MigrationFailed {
                migration: e.to_string(),
            })?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn sql_err(e: sqlx::Error) -> CoreError {
    DatabaseError::Sql(e).into()
}

fn post_content_from_row(row: &PgRow) -> Result<PostContent, sqlx::Error> {
    Ok(PostContent {
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

fn candidate_from_row(row: &PgRow) -> Result<CandidatePost, sqlx::Error> {
    Ok(CandidatePost {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
        like_count: row.try_get("like_count")?,
        repost_count: row.try_get("repost_count")?,
    })
}

/// An absent or null column maps to an empty profile; anything else
/// must be a JSON object of category weights.
fn profile_from_json(value: Option<serde_json::Value>) -> Result<InterestProfile, CoreError> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(InterestProfile::new()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

#[async_trait]
impl InteractionStore for Database {
    async fn interest_profile(
        &self,
        user_id: UserId,
    ) -> Result<Option<InterestProfile>, CoreError> {
        let row = sqlx::query("SELECT interest_profile FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(sql_err)?;

        match row {
            None => Ok(None),
            Some(row) => {
                let value: Option<serde_json::Value> =
                    row.try_get("interest_profile").map_err(sql_err)?;
                Ok(Some(profile_from_json(value)?))
            }
        }
    }

    async fn save_interest_profile(
        &self,
        user_id: UserId,
        profile: &InterestProfile,
    ) -> Result<bool, CoreError> {
        let value = serde_json::to_value(profile)?;
        let result = sqlx::query("UPDATE users SET interest_profile = $1 WHERE id = $2")
            .bind(value)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(sql_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn liked_posts(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<PostContent>, CoreError> {
        let rows = sqlx::query(LIKED_POSTS_SQL)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(sql_err)?;

        rows.iter()
            .map(|row| post_content_from_row(row).map_err(sql_err))
            .collect()
    }

    async fn reposted_posts(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<PostContent>, CoreError> {
        let rows = sqlx::query(REPOSTED_POSTS_SQL)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(sql_err)?;

        rows.iter()
            .map(|row| post_content_from_row(row).map_err(sql_err))
            .collect()
    }

    async fn candidate_posts(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<CandidatePost>, CoreError> {
        let rows = sqlx::query(CANDIDATE_POSTS_SQL)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(sql_err)?;

        rows.iter()
            .map(|row| candidate_from_row(row).map_err(sql_err))
            .collect()
    }

    async fn popular_posts(&self, limit: i64) -> Result<Vec<PostId>, CoreError> {
        let rows = sqlx::query(POPULAR_POSTS_SQL)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(sql_err)?;

        rows.iter()
            .map(|row| row.try_get("id").map_err(sql_err))
            .collect()
    }
}
