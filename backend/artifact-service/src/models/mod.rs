/// Data structures for artifact-service
///
/// Wire models keep the field names the frontend already consumes
/// (`_id`, `image_url`, `success`); row types map onto the PostgreSQL schema.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Generation requests
// ============================================================================

/// Request body for POST /generate
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub input_image: Option<String>,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

/// Request body for POST /generate-gen4
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateGen4Request {
    pub prompt: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default)]
    pub reference_tags: Option<Vec<String>>,
    #[serde(default)]
    pub reference_images: Option<Vec<String>>,
}

fn default_output_format() -> String {
    "jpg".to_string()
}

fn default_aspect_ratio() -> String {
    "4:3".to_string()
}

// ============================================================================
// Generation responses and rows
// ============================================================================

/// Response body for the generation endpoints
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub image_url: String,
    pub message: String,
    pub success: bool,
    pub id: String,
}

/// Fully-assembled record handed to the persister after normalization
#[derive(Debug, Clone)]
pub struct NewGeneration {
    pub prompt: String,
    pub input_image: Option<String>,
    pub output_format: String,
    pub aspect_ratio: String,
    pub reference_tags: Option<Vec<String>>,
    pub reference_images: Option<Vec<String>>,
    pub output_url: String,
    pub model: String,
}

/// Projection returned by GET /generations
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct GenerationSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub output_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GenerationListResponse {
    pub generations: Vec<GenerationSummary>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub success: bool,
}

// ============================================================================
// Scraped profiles
// ============================================================================

/// Stored profile row; the `profile` document is served verbatim once fetched
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StoredProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    /// Raw upstream API response, no shape validation
    pub profile: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AddUserResponse {
    pub username: String,
    pub message: String,
}

// ============================================================================
// Movie catalog
// ============================================================================

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub directors: Option<Vec<String>>,
    pub year: Option<i32>,
    pub genres: Option<Vec<String>>,
    #[serde(rename = "cast")]
    pub cast_members: Option<Vec<String>>,
}
