pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::{CatalogStore, StoreState};

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteError, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

use crate::models::{
    duplicate_email_message, DeleteAck, InsertAck, UpdateAck, MOVIES_COLLECTION,
    USERS_COLLECTION, USER_EMAIL_FIELD,
};
use crate::utils::AppError;

pub const DEFAULT_DATABASE: &str = "moviescope";
const APP_NAME: &str = "moviescope-server";
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Connects, pings the deployment and makes sure the catalog indexes exist.
    ///
    /// `database_name` wins over the URI's default database; `DEFAULT_DATABASE` is the fallback.
    pub async fn new(uri: &str, database_name: Option<&str>) -> mongodb::error::Result<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.app_name = Some(APP_NAME.to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = database_name
            .map(str::to_string)
            .or_else(|| client_options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;

        client.database("admin").run_command(doc! { "ping": 1 }).await?;
        log::info!("🏓 Pinged deployment, using database '{}'", db_name);

        let mongodb = Self { db: client.database(&db_name) };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the catalog indexes. Failures are logged and never fatal.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        // Unique email makes the store the authority on duplicate users
        let email_index = IndexModel::builder()
            .keys(doc! { USER_EMAIL_FIELD: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.users().create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email, unique)"),
            Err(e) => log::warn!(
                "   ⚠️  Could not create unique index on users(email), \
                 relying on pre-insert check: {}",
                e
            ),
        }

        let added_by_index = IndexModel::builder().keys(doc! { "addedBy": 1 }).build();

        match self.movies().create_index(added_by_index).await {
            Ok(_) => log::info!("   ✅ Index created: movies(addedBy)"),
            Err(e) => log::debug!("   ℹ️  Index not created: {}", e),
        }

        let release_year_index = IndexModel::builder().keys(doc! { "releaseYear": -1 }).build();

        match self.movies().create_index(release_year_index).await {
            Ok(_) => log::info!("   ✅ Index created: movies(releaseYear)"),
            Err(e) => log::debug!("   ℹ️  Index not created: {}", e),
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn movies(&self) -> Collection<Document> {
        self.collection(MOVIES_COLLECTION)
    }

    fn users(&self) -> Collection<Document> {
        self.collection(USERS_COLLECTION)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: DUPLICATE_KEY_CODE, .. }))
    )
}

/// Sorts movies by `field` as a number, descending, ties broken by `_id`.
///
/// Numeric strings are trimmed and converted; anything unconvertible becomes null and
/// sorts after every number. The temporary sort key is projected away.
fn numeric_desc_pipeline(field: &str, limit: i64) -> Vec<Document> {
    let path = format!("${}", field);
    let path = path.as_str();
    let sort_key = format!("_{}Sort", field);

    vec![
        doc! {
            "$addFields": {
                &sort_key: {
                    "$convert": {
                        "input": {
                            "$cond": [
                                { "$eq": [{ "$type": path }, "string"] },
                                { "$trim": { "input": path } },
                                path
                            ]
                        },
                        "to": "double",
                        "onError": Bson::Null,
                        "onNull": Bson::Null
                    }
                }
            }
        },
        doc! { "$sort": { &sort_key: -1, "_id": 1 } },
        doc! { "$limit": limit },
        doc! { "$project": { &sort_key: 0 } },
    ]
}

#[async_trait]
impl CatalogStore for MongoDB {
    async fn insert_movie(&self, movie: Document) -> Result<InsertAck, AppError> {
        let result = self.movies().insert_one(movie).await?;
        Ok(InsertAck::new(&result.inserted_id))
    }

    async fn find_movies(&self, added_by: Option<&str>) -> Result<Vec<Document>, AppError> {
        let filter = match added_by {
            Some(email) => doc! { "addedBy": email },
            None => doc! {},
        };

        let cursor = self.movies().find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_movie(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        Ok(self.movies().find_one(doc! { "_id": id }).await?)
    }

    async fn update_movie(&self, id: ObjectId, fields: Document) -> Result<UpdateAck, AppError> {
        // An empty $set is rejected by the server
        if fields.is_empty() {
            let matched = self.movies().count_documents(doc! { "_id": id }).await?;
            return Ok(UpdateAck::new(matched, 0));
        }

        let result = self
            .movies()
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        Ok(UpdateAck::new(result.matched_count, result.modified_count))
    }

    async fn delete_movie(&self, id: ObjectId) -> Result<DeleteAck, AppError> {
        let result = self.movies().delete_one(doc! { "_id": id }).await?;
        Ok(DeleteAck::new(result.deleted_count))
    }

    async fn top_rated_movies(&self, limit: i64) -> Result<Vec<Document>, AppError> {
        let cursor = self.movies().aggregate(numeric_desc_pipeline("rating", limit)).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn recent_movies(&self, limit: i64) -> Result<Vec<Document>, AppError> {
        let cursor = self
            .movies()
            .aggregate(numeric_desc_pipeline("releaseYear", limit))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_movies(&self) -> Result<u64, AppError> {
        Ok(self.movies().count_documents(doc! {}).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, AppError> {
        Ok(self.users().find_one(doc! { USER_EMAIL_FIELD: email }).await?)
    }

    async fn insert_user(&self, user: Document) -> Result<InsertAck, AppError> {
        let email = user.get_str(USER_EMAIL_FIELD).unwrap_or_default().to_string();

        match self.users().insert_one(user).await {
            Ok(result) => Ok(InsertAck::new(&result.inserted_id)),
            Err(e) if is_duplicate_key(&e) => {
                Err(AppError::Conflict(duplicate_email_message(&email)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_users(&self) -> Result<Vec<Document>, AppError> {
        let cursor = self.users().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_users(&self) -> Result<u64, AppError> {
        Ok(self.users().count_documents(doc! {}).await?)
    }
}
