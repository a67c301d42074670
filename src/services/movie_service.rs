use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};

use crate::database::CatalogStore;
use crate::models::{
    document_to_json, documents_to_json, json_to_document, DeleteAck, InsertAck, UpdateAck,
    RECENT_MOVIES_LIMIT, TOP_RATED_LIMIT,
};
use crate::utils::AppError;

pub fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

/// Inserts the movie as given, no deduplication.
pub async fn create_movie(
    store: &dyn CatalogStore,
    body: Map<String, Value>,
) -> Result<InsertAck, AppError> {
    let movie = json_to_document(body)?;
    store.insert_movie(movie).await
}

pub async fn list_movies(
    store: &dyn CatalogStore,
    added_by: Option<&str>,
) -> Result<Vec<Value>, AppError> {
    let movies = store.find_movies(added_by).await?;
    Ok(documents_to_json(movies))
}

/// `None` when no movie has this id.
pub async fn get_movie(store: &dyn CatalogStore, id: &str) -> Result<Option<Value>, AppError> {
    let object_id = parse_id(id)?;
    Ok(store.find_movie(object_id).await?.map(document_to_json))
}

/// Overwrites only the fields present in `body`.
pub async fn update_movie(
    store: &dyn CatalogStore,
    id: &str,
    body: Map<String, Value>,
) -> Result<UpdateAck, AppError> {
    let object_id = parse_id(id)?;
    let fields = json_to_document(body)?;
    store.update_movie(object_id, fields).await
}

pub async fn delete_movie(store: &dyn CatalogStore, id: &str) -> Result<DeleteAck, AppError> {
    let object_id = parse_id(id)?;
    store.delete_movie(object_id).await
}

pub async fn top_rated_movies(store: &dyn CatalogStore) -> Result<Vec<Value>, AppError> {
    let movies = store.top_rated_movies(TOP_RATED_LIMIT).await?;
    Ok(documents_to_json(movies))
}

pub async fn recent_movies(store: &dyn CatalogStore) -> Result<Vec<Value>, AppError> {
    let movies = store.recent_movies(RECENT_MOVIES_LIMIT).await?;
    Ok(documents_to_json(movies))
}
