/// External API clients
pub mod generation;
pub mod scraper;

pub use generation::{GenerationClient, GenerationOutput};
pub use scraper::{ProfileFetcher, ScraperClient};
