use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::OnceCell;

use crate::models::{DeleteAck, InsertAck, UpdateAck};
use crate::utils::AppError;

/// Document-store operations the router needs over the `movies` and `users` collections.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn insert_movie(&self, movie: Document) -> Result<InsertAck, AppError>;

    /// All movies, or only those whose `addedBy` equals `added_by` exactly.
    async fn find_movies(&self, added_by: Option<&str>) -> Result<Vec<Document>, AppError>;

    async fn find_movie(&self, id: ObjectId) -> Result<Option<Document>, AppError>;

    /// `$set` merge of `fields` into the movie with `id`. No match is not an error.
    async fn update_movie(&self, id: ObjectId, fields: Document) -> Result<UpdateAck, AppError>;

    async fn delete_movie(&self, id: ObjectId) -> Result<DeleteAck, AppError>;

    /// Movies ordered by numeric `rating` descending; ratings stored as strings are coerced.
    async fn top_rated_movies(&self, limit: i64) -> Result<Vec<Document>, AppError>;

    /// Movies ordered by numeric `releaseYear` descending; years stored as strings are coerced.
    async fn recent_movies(&self, limit: i64) -> Result<Vec<Document>, AppError>;

    async fn count_movies(&self) -> Result<u64, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, AppError>;

    /// Inserts a user. A duplicate email reported by the store surfaces as `AppError::Conflict`.
    async fn insert_user(&self, user: Document) -> Result<InsertAck, AppError>;

    async fn list_users(&self) -> Result<Vec<Document>, AppError>;

    async fn count_users(&self) -> Result<u64, AppError>;
}

/// Shared store handle. Empty until the connection is established at startup, set once after that.
#[derive(Default)]
pub struct StoreState {
    store: OnceCell<Arc<dyn CatalogStore>>,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn ready(store: Arc<dyn CatalogStore>) -> Self {
        Self { store: OnceCell::new_with(Some(store)) }
    }

    /// Returns false if a store was already installed.
    pub fn set(&self, store: Arc<dyn CatalogStore>) -> bool {
        self.store.set(store).is_ok()
    }

    pub fn is_ready(&self) -> bool {
        self.store.initialized()
    }

    pub fn get(&self) -> Result<&dyn CatalogStore, AppError> {
        self.store.get().map(|store| store.as_ref()).ok_or(AppError::NotReady)
    }
}
