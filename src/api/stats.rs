use actix_web::{web, HttpResponse};

use crate::database::StoreState;
use crate::models::CatalogStats;
use crate::services::stats_service;
use crate::utils::AppError;

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Number of movies and users", body = CatalogStats)
    )
)]
pub async fn get_stats(state: web::Data<StoreState>) -> Result<HttpResponse, AppError> {
    let store = state.get()?;

    let stats = stats_service::catalog_stats(store).await?;
    log::info!("📊 GET /stats - {} movies, {} users", stats.movie_count, stats.user_count);

    Ok(HttpResponse::Ok().json(stats))
}
