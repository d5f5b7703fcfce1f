use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{GenerationSummary, NewGeneration};

/// Store operations the generation handlers depend on. Handlers take this
/// seam rather than the concrete repository so tests can swap the store.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Insert a completed generation and return the store-assigned id.
    ///
    /// Every call creates a new row; there is no idempotence and no upsert.
    async fn insert(&self, generation: &NewGeneration) -> Result<Uuid>;

    /// List all generations projected to {id, output_url, created_at},
    /// most recent first. An empty table is a success.
    async fn list(&self) -> Result<Vec<GenerationSummary>>;

    /// Delete one generation; Ok(false) when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

const LIST_SQL: &str = "SELECT id, output_url, created_at \
     FROM generations \
     ORDER BY created_at DESC";

/// Repository for generation records
#[derive(Clone)]
pub struct GenerationRepository {
    pool: PgPool,
}

impl GenerationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationStore for GenerationRepository {
    async fn insert(&self, generation: &NewGeneration) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO generations
                (prompt, input_image, output_format, aspect_ratio,
                 reference_tags, reference_images, output_url, model, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'completed')
            RETURNING id
            "#,
        )
        .bind(&generation.prompt)
        .bind(&generation.input_image)
        .bind(&generation.output_format)
        .bind(&generation.aspect_ratio)
        .bind(&generation.reference_tags)
        .bind(&generation.reference_images)
        .bind(&generation.output_url)
        .bind(&generation.model)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list(&self) -> Result<Vec<GenerationSummary>> {
        let summaries = sqlx::query_as::<_, GenerationSummary>(LIST_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(summaries)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM generations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
