/// Artifact Service Library
///
/// Proxies an external image-generation API, normalizes its heterogeneous
/// output into a canonical locator, and persists generation records. Also
/// serves a lookup-or-fetch path for scraped social profiles and a read-only
/// movie catalog.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: request/response and row types
/// - `services`: external API clients and output normalization
/// - `db`: repositories over the PostgreSQL store
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
