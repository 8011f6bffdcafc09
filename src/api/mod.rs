//! REST adapter over the catalog.
//!
//! Maps HTTP requests onto [`Storage`](crate::catalog::Storage) calls and
//! outcomes onto status codes: validation failures are 400, unknown records
//! 404, storage failures 500. Error bodies are `{"message": "..."}`.

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::AppState;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};

/// Register the publication routes.
///
/// `/batch` and `/export` are registered ahead of `/{id}` so they never
/// parse as ids.
pub fn routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    cfg.app_data(json_config)
        .route("/health", web::get().to(|| async { HttpResponse::Ok().body("OK") }))
        .service(
            web::scope("/api/publications")
                .route("", web::get().to(handlers::list_publications))
                .route("", web::post().to(handlers::create_publication))
                .route("/batch", web::post().to(handlers::batch_publications))
                .route("/export", web::post().to(handlers::export_publications))
                .route("/{id}", web::get().to(handlers::get_publication))
                .route("/{id}", web::put().to(handlers::update_publication))
                .route("/{id}", web::delete().to(handlers::delete_publication))
                .route("/{id}/citation", web::get().to(handlers::cite_publication)),
        );
}

/// Run the HTTP server until it is shut down
pub async fn serve(state: AppState, bind: &str) -> std::io::Result<()> {
    tracing::info!("Starting server at http://{}", bind);

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}
