use actix_web::{web, HttpResponse};

use crate::database::StoreState;
use crate::models::{DeleteAck, InsertAck, MoviePayload, MovieQuery, UpdateAck};
use crate::services::movie_service;
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/movies",
    tag = "Movies",
    request_body = MoviePayload,
    responses(
        (status = 200, description = "Movie inserted", body = InsertAck)
    )
)]
pub async fn create_movie(
    state: web::Data<StoreState>,
    body: web::Json<MoviePayload>,
) -> Result<HttpResponse, AppError> {
    let store = state.get()?;
    log::info!("🎬 POST /movies");

    let ack = movie_service::create_movie(store, body.into_inner().0).await?;
    log::info!("✅ Movie created: {}", ack.inserted_id);

    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/movies",
    tag = "Movies",
    params(MovieQuery),
    responses(
        (status = 200, description = "Movies, optionally filtered by addedBy")
    )
)]
pub async fn list_movies(
    state: web::Data<StoreState>,
    query: web::Query<MovieQuery>,
) -> Result<HttpResponse, AppError> {
    let store = state.get()?;
    let added_by = query.added_by.as_deref();

    let movies = movie_service::list_movies(store, added_by).await?;
    log::info!(
        "📋 GET /movies - addedBy: {} - {} movies",
        added_by.unwrap_or("*"),
        movies.len()
    );

    Ok(HttpResponse::Ok().json(movies))
}

#[utoipa::path(
    get,
    path = "/movies/top-rated",
    tag = "Movies",
    responses(
        (status = 200, description = "Up to 5 movies by numeric rating, highest first")
    )
)]
pub async fn top_rated_movies(state: web::Data<StoreState>) -> Result<HttpResponse, AppError> {
    let store = state.get()?;
    log::info!("⭐ GET /movies/top-rated");

    let movies = movie_service::top_rated_movies(store).await?;
    Ok(HttpResponse::Ok().json(movies))
}

#[utoipa::path(
    get,
    path = "/movies/recent",
    tag = "Movies",
    responses(
        (status = 200, description = "Up to 6 movies by releaseYear, newest first")
    )
)]
pub async fn recent_movies(state: web::Data<StoreState>) -> Result<HttpResponse, AppError> {
    let store = state.get()?;
    log::info!("🆕 GET /movies/recent");

    let movies = movie_service::recent_movies(store).await?;
    Ok(HttpResponse::Ok().json(movies))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ObjectId as 24 hex chars")),
    responses(
        (status = 200, description = "The movie, or null when no movie has this id"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_movie(
    state: web::Data<StoreState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let store = state.get()?;
    let movie_id = path.into_inner();
    log::info!("🔎 GET /movies/{}", movie_id);

    let movie = movie_service::get_movie(store, &movie_id).await?;
    Ok(HttpResponse::Ok().json(movie))
}

#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ObjectId as 24 hex chars")),
    request_body = MoviePayload,
    responses(
        (
            status = 200,
            description = "Fields merged; zero counts when no movie has this id",
            body = UpdateAck
        ),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn update_movie(
    state: web::Data<StoreState>,
    path: web::Path<String>,
    body: web::Json<MoviePayload>,
) -> Result<HttpResponse, AppError> {
    let store = state.get()?;
    let movie_id = path.into_inner();
    log::info!("🔧 PUT /movies/{}", movie_id);

    let ack = movie_service::update_movie(store, &movie_id, body.into_inner().0).await?;
    if ack.matched_count == 0 {
        log::info!("ℹ️  No movie matched {}", movie_id);
    }

    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ObjectId as 24 hex chars")),
    responses(
        (
            status = 200,
            description = "Deleted count, zero when no movie has this id",
            body = DeleteAck
        ),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_movie(
    state: web::Data<StoreState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let store = state.get()?;
    let movie_id = path.into_inner();
    log::info!("🗑️  DELETE /movies/{}", movie_id);

    let ack = movie_service::delete_movie(store, &movie_id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
