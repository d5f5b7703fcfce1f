/// Profile handlers - lookup-or-fetch for scraped user documents
use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::info;

use crate::db::ProfileStore;
use crate::error::{AppError, Result};
use crate::models::AddUserResponse;
use crate::services::ProfileFetcher;

/// GET /users/add/{username} - fetch and store a profile unless already stored
///
/// On a store hit no external call is made; the stored document is considered
/// current indefinitely. Two concurrent calls for the same username may both
/// fetch, but the unique constraint guarantees a single stored row.
pub async fn add_user(
    store: web::Data<dyn ProfileStore>,
    fetcher: web::Data<dyn ProfileFetcher>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let username = username.into_inner();
    info!(username = %username, "GET /users/add");

    if store.find_by_username(&username).await?.is_some() {
        return Ok(HttpResponse::Ok().json(AddUserResponse {
            username,
            message: "User data already exists in the database".to_string(),
        }));
    }

    let profile = fetcher.fetch_profile(&username).await?;

    let inserted = store.insert(&username, &profile).await?;
    if !inserted {
        info!(username = %username, "Concurrent insert won the race; keeping stored profile");
    }

    Ok(HttpResponse::Ok().json(AddUserResponse {
        username,
        message: "User data retrieved successfully".to_string(),
    }))
}

/// GET /users/{username} - return the stored profile document verbatim,
/// with the store id attached as a string
pub async fn get_user(
    store: web::Data<dyn ProfileStore>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let record = store
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut document = record.profile;
    if let Some(map) = document.as_object_mut() {
        map.insert("_id".to_string(), Value::String(record.id.to_string()));
    }

    Ok(HttpResponse::Ok().json(document))
}
