/// Generation handlers - proxy the generation API, normalize, persist
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::db::GenerationStore;
use crate::error::{AppError, Result};
use crate::models::{
    DeleteResponse, GenerateGen4Request, GenerateRequest, GenerateResponse,
    GenerationListResponse, NewGeneration,
};
use crate::services::GenerationClient;

/// POST /generate - generate an image with the Flux Kontext model
pub async fn generate(
    config: web::Data<Config>,
    client: web::Data<GenerationClient>,
    store: web::Data<dyn GenerationStore>,
    request: web::Json<GenerateRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    info!(prompt = %request.prompt, "POST /generate");

    let mut input = json!({
        "prompt": request.prompt,
        "output_format": request.output_format,
        "safety_tolerance": 2,
        "prompt_upsampling": false,
    });
    if !request.aspect_ratio.is_empty() {
        input["aspect_ratio"] = json!(request.aspect_ratio);
    }
    if let Some(image) = &request.input_image {
        input["input_image"] = json!(image);
    }

    let model = config.generation.flux_model.clone();
    let output = client.generate(&model, &input).await?;
    let output_url = output.into_locator();

    let id = store
        .insert(&NewGeneration {
            prompt: request.prompt,
            input_image: request.input_image,
            output_format: request.output_format,
            aspect_ratio: request.aspect_ratio,
            reference_tags: None,
            reference_images: None,
            output_url: output_url.clone(),
            model,
        })
        .await?;

    Ok(HttpResponse::Ok().json(GenerateResponse {
        image_url: output_url,
        message: "Image generated successfully with Flux Kontext".to_string(),
        success: true,
        id: id.to_string(),
    }))
}

/// POST /generate-gen4 - generate an image with the Gen4 reference model
pub async fn generate_gen4(
    config: web::Data<Config>,
    client: web::Data<GenerationClient>,
    store: web::Data<dyn GenerationStore>,
    request: web::Json<GenerateGen4Request>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    info!(prompt = %request.prompt, "POST /generate-gen4");

    let mut input = json!({
        "prompt": request.prompt,
        "aspect_ratio": request.aspect_ratio,
    });
    if let Some(tags) = &request.reference_tags {
        input["reference_tags"] = json!(tags);
    }
    if let Some(images) = &request.reference_images {
        input["reference_images"] = json!(images);
    }

    let model = config.generation.gen4_model.clone();
    let output = client.generate(&model, &input).await?;
    let output_url = output.into_locator();

    let id = store
        .insert(&NewGeneration {
            prompt: request.prompt,
            input_image: None,
            output_format: "jpg".to_string(),
            aspect_ratio: request.aspect_ratio,
            reference_tags: request.reference_tags,
            reference_images: request.reference_images,
            output_url: output_url.clone(),
            model,
        })
        .await?;

    Ok(HttpResponse::Ok().json(GenerateResponse {
        image_url: output_url,
        message: "Image generated successfully with Gen4".to_string(),
        success: true,
        id: id.to_string(),
    }))
}

/// GET /generations - list all generation records, most recent first
pub async fn list_generations(store: web::Data<dyn GenerationStore>) -> Result<HttpResponse> {
    let generations = store.list().await?;

    Ok(HttpResponse::Ok().json(GenerationListResponse {
        generations,
        success: true,
    }))
}

/// GET /delete/{generation_id} - delete a generation record by id
pub async fn delete_generation(
    store: web::Data<dyn GenerationStore>,
    generation_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = Uuid::parse_str(&generation_id).map_err(|_| {
        AppError::InvalidIdentifier(format!("'{}' is not a valid generation id", generation_id))
    })?;

    let deleted = store.delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Image generation not found".to_string()));
    }

    info!(%id, "Deleted generation record");
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Image generation deleted successfully".to_string(),
        success: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenerationSummary;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemoryGenerationStore {
        rows: Mutex<Vec<(Uuid, String, DateTime<Utc>)>>,
    }

    impl MemoryGenerationStore {
        fn push(&self, url: &str, created_at: DateTime<Utc>) -> Uuid {
            let id = Uuid::new_v4();
            self.rows.lock().unwrap().push((id, url.to_string(), created_at));
            id
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GenerationStore for MemoryGenerationStore {
        async fn insert(&self, generation: &NewGeneration) -> Result<Uuid> {
            Ok(self.push(&generation.output_url, Utc::now()))
        }

        async fn list(&self) -> Result<Vec<GenerationSummary>> {
            let mut summaries: Vec<GenerationSummary> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .map(|(id, url, created_at)| GenerationSummary {
                    id: *id,
                    output_url: url.clone(),
                    created_at: *created_at,
                })
                .collect();
            summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(summaries)
        }

        async fn delete(&self, id: Uuid) -> Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|(row_id, ..)| *row_id != id);
            Ok(rows.len() < before)
        }
    }

    fn generation_routes() -> impl Fn(&mut web::ServiceConfig) + Clone {
        |cfg: &mut web::ServiceConfig| {
            cfg.route("/generations", web::get().to(list_generations))
                .route("/delete/{generation_id}", web::get().to(delete_generation));
        }
    }

    fn store_data(store: Arc<MemoryGenerationStore>) -> web::Data<dyn GenerationStore> {
        let data: Arc<dyn GenerationStore> = store;
        web::Data::from(data)
    }

    #[actix_web::test]
    async fn delete_of_absent_id_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(store_data(Arc::new(MemoryGenerationStore::default())))
                .configure(generation_routes()),
        )
        .await;

        let uri = format!("/delete/{}", Uuid::new_v4());
        let response =
            test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_of_malformed_id_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(store_data(Arc::new(MemoryGenerationStore::default())))
                .configure(generation_routes()),
        )
        .await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/delete/not-a-uuid").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_removes_exactly_one_row() {
        let store = Arc::new(MemoryGenerationStore::default());
        let target = store.push("https://x/a.jpg", Utc::now());
        store.push("https://x/b.jpg", Utc::now());
        let app = test::init_service(
            App::new()
                .app_data(store_data(store.clone()))
                .configure(generation_routes()),
        )
        .await;

        let uri = format!("/delete/{}", target);
        let first =
            test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(store.len(), 1);

        // A second delete of the same id now misses
        let second =
            test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn listing_is_most_recent_first() {
        let store = Arc::new(MemoryGenerationStore::default());
        let base = Utc::now();
        store.push("https://x/old.jpg", base - Duration::seconds(60));
        store.push("https://x/new.jpg", base);
        store.push("https://x/mid.jpg", base - Duration::seconds(30));
        let app = test::init_service(
            App::new()
                .app_data(store_data(store))
                .configure(generation_routes()),
        )
        .await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/generations").to_request(),
        )
        .await;

        assert_eq!(body["success"], true);
        let urls: Vec<&str> = body["generations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["output_url"].as_str().unwrap())
            .collect();
        assert_eq!(
            urls,
            vec!["https://x/new.jpg", "https://x/mid.jpg", "https://x/old.jpg"]
        );
    }

    #[actix_web::test]
    async fn empty_listing_is_a_success() {
        let app = test::init_service(
            App::new()
                .app_data(store_data(Arc::new(MemoryGenerationStore::default())))
                .configure(generation_routes()),
        )
        .await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/generations").to_request(),
        )
        .await;

        assert_eq!(body["success"], true);
        assert_eq!(body["generations"], serde_json::json!([]));
    }
}
