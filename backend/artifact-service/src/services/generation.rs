//! Image-generation API client and output normalization
//!
//! The upstream predictions endpoint returns its `output` field in several
//! shapes depending on model and version: an object carrying a URL, a bare
//! string, or a list of either. The shapes are tagged here, at the
//! deserialization boundary, so everything downstream works with a single
//! canonical locator string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::GenerationConfig;
use crate::error::{AppError, Result};

/// Upstream `output` value, tagged by shape.
///
/// Variant order matters: serde tries untagged variants top to bottom, so the
/// richer shapes must come before the `Opaque` catch-all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GenerationOutput {
    /// Object exposing a locator field
    Locator { url: String },
    /// Bare locator string
    Text(String),
    /// List of outputs; only the first element is meaningful
    Many(Vec<GenerationOutput>),
    /// Anything else the upstream may send
    Opaque(Value),
}

impl GenerationOutput {
    /// Collapse any output shape into a single locator string.
    ///
    /// Ordered, first match wins: locator object, then plain string, then the
    /// first element of a non-empty list re-checked for the first two shapes.
    /// Unrecognized shapes degrade to a string coercion of the whole value;
    /// normalization never fails outward.
    pub fn into_locator(self) -> String {
        match self {
            GenerationOutput::Locator { url } => url,
            GenerationOutput::Text(text) => text,
            GenerationOutput::Many(mut items) if !items.is_empty() => {
                match items.swap_remove(0) {
                    GenerationOutput::Locator { url } => url,
                    GenerationOutput::Text(text) => text,
                    first => first.coerce(),
                }
            }
            other => other.coerce(),
        }
    }

    /// String coercion of the raw value, the fallback for shapes the
    /// normalizer does not recognize. Always non-empty: JSON null coerces to
    /// the text "null".
    fn coerce(self) -> String {
        match self {
            GenerationOutput::Locator { url } => url,
            GenerationOutput::Text(text) => text,
            GenerationOutput::Opaque(Value::String(text)) => text,
            other => serde_json::to_string(&other).unwrap_or_else(|_| "null".to_string()),
        }
    }
}

/// One prediction from the generation API. Fields other than `output` are
/// ignored; a missing `output` is treated as an opaque null.
#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    output: Option<GenerationOutput>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the external image-generation API
#[derive(Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl GenerationClient {
    pub fn new(config: GenerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    /// Run a model synchronously and return its tagged output.
    ///
    /// The API key is checked before any network call; its absence is a
    /// server-side configuration error, not an upstream one.
    pub async fn generate(&self, model: &str, input: &Value) -> Result<GenerationOutput> {
        let token = self
            .config
            .api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::MissingConfiguration(
                    "GENERATION_API_TOKEN is not set in the environment".to_string(),
                )
            })?;

        let url = format!("{}/models/{}/predictions", self.config.base_url, model);
        info!(model = %model, "Calling generation API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Prefer", "wait")
            .json(&serde_json::json!({ "input": input }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("generation request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(model = %model, %status, "Generation API error: {}", body);
            return Err(AppError::ExternalApi(format!(
                "generation API returned {}: {}",
                status, body
            )));
        }

        let prediction: Prediction = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("failed to parse prediction: {}", e)))?;

        if let Some(message) = prediction.error {
            error!(model = %model, "Generation failed upstream: {}", message);
            return Err(AppError::ExternalApi(message));
        }

        if prediction.output.is_none() {
            warn!(model = %model, "Prediction completed without an output field");
        }

        Ok(prediction
            .output
            .unwrap_or(GenerationOutput::Opaque(Value::Null)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn output_from(value: Value) -> GenerationOutput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn locator_object() {
        let output = output_from(json!({"url": "https://x/a.jpg"}));
        assert_eq!(output.into_locator(), "https://x/a.jpg");
    }

    #[test]
    fn locator_object_with_extra_fields() {
        let output = output_from(json!({"url": "https://x/a.jpg", "size": 12345}));
        assert_eq!(output.into_locator(), "https://x/a.jpg");
    }

    #[test]
    fn plain_string() {
        let output = output_from(json!("https://x/b.jpg"));
        assert_eq!(output.into_locator(), "https://x/b.jpg");
    }

    #[test]
    fn list_of_locator_objects() {
        let output = output_from(json!([{"url": "https://x/c.jpg"}, {"url": "https://x/d.jpg"}]));
        assert_eq!(output.into_locator(), "https://x/c.jpg");
    }

    #[test]
    fn list_of_strings() {
        let output = output_from(json!(["https://x/b.jpg"]));
        assert_eq!(output.into_locator(), "https://x/b.jpg");
    }

    #[test]
    fn number_coerces_to_string() {
        let output = output_from(json!(42));
        assert_eq!(output.into_locator(), "42");
    }

    #[test]
    fn null_coerces_to_non_empty_string() {
        let output = output_from(json!(null));
        assert_eq!(output.into_locator(), "null");
    }

    #[test]
    fn empty_list_coerces() {
        let output = output_from(json!([]));
        assert_eq!(output.into_locator(), "[]");
    }

    #[test]
    fn unrecognized_object_coerces_to_json_text() {
        let output = output_from(json!({"status": "processing"}));
        let locator = output.into_locator();
        assert!(!locator.is_empty());
        assert!(locator.contains("processing"));
    }

    #[test]
    fn list_with_unrecognized_first_element_coerces_element() {
        let output = output_from(json!([{"id": 7}]));
        let locator = output.into_locator();
        assert!(!locator.is_empty());
        assert!(locator.contains('7'));
    }

    #[test]
    fn every_shape_yields_non_empty_locator() {
        let shapes = vec![
            json!({"url": "https://x/a.jpg"}),
            json!("https://x/b.jpg"),
            json!([{"url": "https://x/c.jpg"}]),
            json!(["https://x/d.jpg"]),
            json!(42),
            json!(true),
            json!(null),
            json!([]),
            json!({"unexpected": [1, 2, 3]}),
        ];
        for shape in shapes {
            let locator = output_from(shape.clone()).into_locator();
            assert!(!locator.is_empty(), "empty locator for {}", shape);
        }
    }

    #[test]
    fn prediction_without_output_parses() {
        let prediction: Prediction =
            serde_json::from_value(json!({"status": "starting"})).unwrap();
        assert!(prediction.output.is_none());
        assert!(prediction.error.is_none());
    }

    #[test]
    fn prediction_with_error_parses() {
        let prediction: Prediction =
            serde_json::from_value(json!({"error": "NSFW content detected"})).unwrap();
        assert_eq!(prediction.error.as_deref(), Some("NSFW content detected"));
    }
}
