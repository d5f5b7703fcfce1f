/// Configuration management for artifact-service
///
/// Loads configuration from environment variables with sensible defaults.
/// Built once in `main` and handed to each component constructor; nothing
/// else in the service reads the environment.
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub scraper: ScraperConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Image-generation API (Replicate-style predictions endpoint)
#[derive(Clone, Debug, Deserialize)]
pub struct GenerationConfig {
    pub base_url: String,
    /// Bearer token; absence is surfaced as a server error before any call
    pub api_token: Option<String>,
    pub flux_model: String,
    pub gen4_model: String,
    pub request_timeout_secs: u64,
}

/// Profile-scraping API (RapidAPI-style key/host header auth)
#[derive(Clone, Debug, Deserialize)]
pub struct ScraperConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_host: String,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                host: std::env::var("ARTIFACT_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("ARTIFACT_SERVICE_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .unwrap_or(8080),
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/artifacts".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
            },
            generation: GenerationConfig {
                base_url: std::env::var("GENERATION_API_BASE_URL")
                    .unwrap_or_else(|_| "https://api.replicate.com/v1".to_string()),
                api_token: std::env::var("GENERATION_API_TOKEN").ok(),
                flux_model: std::env::var("GENERATION_FLUX_MODEL")
                    .unwrap_or_else(|_| "black-forest-labs/flux-kontext-max".to_string()),
                gen4_model: std::env::var("GENERATION_GEN4_MODEL")
                    .unwrap_or_else(|_| "runwayml/gen4-image".to_string()),
                request_timeout_secs: std::env::var("GENERATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
            },
            scraper: ScraperConfig {
                base_url: std::env::var("SCRAPER_API_BASE_URL").unwrap_or_else(|_| {
                    "https://instagram-scrapper-posts-reels-stories-downloader.p.rapidapi.com"
                        .to_string()
                }),
                api_key: std::env::var("SCRAPER_API_KEY").ok(),
                api_host: std::env::var("SCRAPER_API_HOST").unwrap_or_else(|_| {
                    "instagram-scrapper-posts-reels-stories-downloader.p.rapidapi.com".to_string()
                }),
                request_timeout_secs: std::env::var("SCRAPER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            },
        })
    }
}
