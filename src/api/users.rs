use actix_web::{web, HttpResponse};

use crate::database::StoreState;
use crate::models::{InsertAck, UserPayload};
use crate::services::user_service;
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User created", body = InsertAck),
        (status = 400, description = "Email missing or already registered"),
        (status = 503, description = "Database not ready yet")
    )
)]
pub async fn create_user(
    state: web::Data<StoreState>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    let store = state.get()?;
    let body = body.into_inner().0;

    log::info!(
        "👤 POST /users - email: {}",
        body.get("email").and_then(|v| v.as_str()).unwrap_or("N/A")
    );

    let ack = user_service::create_user(store, body).await?;
    log::info!("✅ User created: {}", ack.inserted_id);

    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every user document, unordered")
    )
)]
pub async fn list_users(state: web::Data<StoreState>) -> Result<HttpResponse, AppError> {
    let store = state.get()?;

    let users = user_service::list_users(store).await?;
    log::info!("📋 GET /users - {} users", users.len());

    Ok(HttpResponse::Ok().json(users))
}
