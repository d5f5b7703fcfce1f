/// Movie catalog handlers - read-only
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::db::MovieRepository;
use crate::error::{AppError, Result};

const MOVIE_LIST_LIMIT: i64 = 100;

/// GET /movies - list up to 100 movie summaries
pub async fn list_movies(repo: web::Data<MovieRepository>) -> Result<HttpResponse> {
    let movies = repo.list(MOVIE_LIST_LIMIT).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// GET /movies/{movie_id} - get a single movie by id
pub async fn get_movie(
    repo: web::Data<MovieRepository>,
    movie_id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = Uuid::parse_str(&movie_id)
        .map_err(|_| AppError::InvalidIdentifier(format!("'{}' is not a valid movie id", movie_id)))?;

    let movie = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(HttpResponse::Ok().json(movie))
}
