/// Artifact Service - HTTP Server
///
/// Image generation proxy + persisted generation records, scraped profile
/// lookup-or-fetch, and a read-only movie catalog.
use actix_cors::Cors;
use actix_web::{middleware as actix_middleware, web, App, HttpResponse, HttpServer};
use artifact_service::db::{
    GenerationRepository, GenerationStore, MovieRepository, ProfileRepository, ProfileStore,
};
use artifact_service::handlers;
use artifact_service::services::{GenerationClient, ProfileFetcher, ScraperClient};
use artifact_service::Config;
use db_pool::DbConfig;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from environment; everything downstream takes it by value
    let config = Config::from_env().expect("Failed to load configuration");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Artifact service starting HTTP server on {}", bind_address);

    // Initialize database connection pool
    let db_config = DbConfig {
        service_name: "artifact-service".to_string(),
        database_url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..DbConfig::default()
    };
    db_config.log_config();
    let pool = db_pool::create_pool(db_config)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let generation_store: Arc<dyn GenerationStore> =
        Arc::new(GenerationRepository::new(pool.clone()));
    let profile_store: Arc<dyn ProfileStore> = Arc::new(ProfileRepository::new(pool.clone()));
    let movie_repo = MovieRepository::new(pool.clone());
    let generation_client = GenerationClient::new(config.generation.clone());
    let profile_fetcher: Arc<dyn ProfileFetcher> =
        Arc::new(ScraperClient::new(config.scraper.clone()));

    let server_config = config.clone();
    HttpServer::new(move || {
        let cors = if server_config
            .cors
            .allowed_origins
            .iter()
            .any(|origin| origin == "*")
        {
            Cors::permissive()
        } else {
            server_config
                .cors
                .allowed_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allow_any_method()
                .allow_any_header()
        };

        App::new()
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::from(generation_store.clone()))
            .app_data(web::Data::from(profile_store.clone()))
            .app_data(web::Data::new(movie_repo.clone()))
            .app_data(web::Data::new(generation_client.clone()))
            .app_data(web::Data::from(profile_fetcher.clone()))
            .wrap(cors)
            .wrap(actix_middleware::Logger::default())
            .route(
                "/api/v1/health",
                web::get()
                    .to(|| async { HttpResponse::Ok().json(serde_json::json!({"status": "ok"})) }),
            )
            .route(
                "/api/v1/health/ready",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .route(
                "/api/v1/health/live",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .service(
                web::scope("/api/v1")
                    .route("/generate", web::post().to(handlers::generate))
                    .route("/generate-gen4", web::post().to(handlers::generate_gen4))
                    .route("/generations", web::get().to(handlers::list_generations))
                    .route(
                        "/delete/{generation_id}",
                        web::get().to(handlers::delete_generation),
                    )
                    .route("/users/add/{username}", web::get().to(handlers::add_user))
                    .route("/users/{username}", web::get().to(handlers::get_user))
                    .route("/movies", web::get().to(handlers::list_movies))
                    .route("/movies/{movie_id}", web::get().to(handlers::get_movie)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
