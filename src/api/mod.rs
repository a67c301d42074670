pub mod health;
pub mod movies;
pub mod stats;
pub mod swagger;
pub mod users;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::utils::AppError;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidRequest(format!("Invalid JSON body: {}", err)).into()
}

/// Registers every catalog route. Shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .route("/stats", web::get().to(stats::get_stats))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create_user))
                .route("", web::get().to(users::list_users)),
        )
        .service(
            web::scope("/movies")
                .route("", web::post().to(movies::create_movie))
                .route("", web::get().to(movies::list_movies))
                .route("/top-rated", web::get().to(movies::top_rated_movies))
                .route("/recent", web::get().to(movies::recent_movies))
                // Keep the {id} routes last so they don't shadow the fixed paths
                .route("/{id}", web::get().to(movies::get_movie))
                .route("/{id}", web::put().to(movies::update_movie))
                .route("/{id}", web::delete().to(movies::delete_movie)),
        );
}
