use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::StoredProfile;

/// Store operations the profile handlers depend on.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredProfile>>;

    /// Store a raw profile document. The username carries a unique
    /// constraint; a concurrent insert losing the race is the expected
    /// "already exists" outcome, reported as Ok(false).
    async fn insert(&self, username: &str, profile: &Value) -> Result<bool>;
}

/// Repository for scraped profile documents, keyed by username
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredProfile>> {
        let record = sqlx::query_as::<_, StoredProfile>(
            r#"
            SELECT id, username, profile, fetched_at
            FROM profiles
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert(&self, username: &str, profile: &Value) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (username, profile)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(profile)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
