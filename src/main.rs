mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::StoreState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting Moviescope Pro Server...");

    // Store routes answer 503 until the connection below is established
    let store_state = web::Data::new(StoreState::new());
    let app_state = store_state.clone();

    let server = HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(config.bind_address())?
    .run();

    log::info!("🌐 Moviescope Pro Server is Running on {}", config.bind_address());
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", config.bind_address());

    let handle = server.handle();
    let connector = actix_rt::spawn(async move {
        log::info!("📊 Connecting to MongoDB...");

        match database::MongoDB::new(&config.mongodb_uri, config.database_name.as_deref()).await {
            Ok(db) => {
                store_state.set(Arc::new(db));
                log::info!("✅ MongoDB connected successfully");
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Failed to connect to MongoDB: {}", e);
                handle.stop(true).await;
                Err(e)
            }
        }
    });

    server.await?;

    match connector.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(io::Error::new(io::ErrorKind::NotConnected, e)),
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
    }
}
