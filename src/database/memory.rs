use std::cmp::Ordering;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::models::{
    duplicate_email_message, numeric_value, DeleteAck, InsertAck, UpdateAck, USER_EMAIL_FIELD,
};
use crate::utils::AppError;

/// In-process store with the same observable semantics as the MongoDB one, used by tests.
#[derive(Default)]
pub struct MemoryStore {
    movies: RwLock<Vec<Document>>,
    users: RwLock<Vec<Document>>,
}

fn with_new_id(fields: Document) -> (ObjectId, Document) {
    let id = ObjectId::new();
    let mut stored = doc! { "_id": id };
    for (key, value) in fields {
        stored.insert(key, value);
    }
    (id, stored)
}

fn has_id(doc: &Document, id: ObjectId) -> bool {
    doc.get_object_id("_id").map_or(false, |stored| stored == id)
}

/// Descending numeric order; values that are not numbers go last.
fn numeric_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sorted_by_desc(mut movies: Vec<Document>, field: &str, limit: i64) -> Vec<Document> {
    movies.sort_by(|a, b| numeric_desc(numeric_value(a.get(field)), numeric_value(b.get(field))));
    movies.truncate(usize::try_from(limit).unwrap_or(0));
    movies
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_movie(&self, movie: Document) -> Result<InsertAck, AppError> {
        let (id, stored) = with_new_id(movie);
        self.movies.write().await.push(stored);
        Ok(InsertAck::new(&Bson::ObjectId(id)))
    }

    async fn find_movies(&self, added_by: Option<&str>) -> Result<Vec<Document>, AppError> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .filter(|movie| match added_by {
                Some(email) => movie.get_str("addedBy").map_or(false, |v| v == email),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_movie(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|movie| has_id(movie, id)).cloned())
    }

    async fn update_movie(&self, id: ObjectId, fields: Document) -> Result<UpdateAck, AppError> {
        let mut movies = self.movies.write().await;
        let Some(movie) = movies.iter_mut().find(|movie| has_id(movie, id)) else {
            return Ok(UpdateAck::new(0, 0));
        };

        let mut modified = false;
        for (key, value) in fields {
            if movie.get(&key) != Some(&value) {
                movie.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateAck::new(1, u64::from(modified)))
    }

    async fn delete_movie(&self, id: ObjectId) -> Result<DeleteAck, AppError> {
        let mut movies = self.movies.write().await;
        let before = movies.len();
        if let Some(pos) = movies.iter().position(|movie| has_id(movie, id)) {
            movies.remove(pos);
        }
        Ok(DeleteAck::new((before - movies.len()) as u64))
    }

    async fn top_rated_movies(&self, limit: i64) -> Result<Vec<Document>, AppError> {
        let movies = self.movies.read().await.clone();
        Ok(sorted_by_desc(movies, "rating", limit))
    }

    async fn recent_movies(&self, limit: i64) -> Result<Vec<Document>, AppError> {
        let movies = self.movies.read().await.clone();
        Ok(sorted_by_desc(movies, "releaseYear", limit))
    }

    async fn count_movies(&self) -> Result<u64, AppError> {
        Ok(self.movies.read().await.len() as u64)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.get_str(USER_EMAIL_FIELD).map_or(false, |v| v == email))
            .cloned())
    }

    async fn insert_user(&self, user: Document) -> Result<InsertAck, AppError> {
        let mut users = self.users.write().await;

        // Mirrors the unique index on users(email)
        if let Ok(email) = user.get_str(USER_EMAIL_FIELD) {
            if users.iter().any(|u| u.get_str(USER_EMAIL_FIELD).map_or(false, |v| v == email)) {
                return Err(AppError::Conflict(duplicate_email_message(email)));
            }
        }

        let (id, stored) = with_new_id(user);
        users.push(stored);
        Ok(InsertAck::new(&Bson::ObjectId(id)))
    }

    async fn list_users(&self) -> Result<Vec<Document>, AppError> {
        Ok(self.users.read().await.clone())
    }

    async fn count_users(&self) -> Result<u64, AppError> {
        Ok(self.users.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unique_email_is_enforced_at_insert() {
        let store = MemoryStore::default();
        store.insert_user(doc! { "email": "a@x.com" }).await.unwrap();

        let err = store.insert_user(doc! { "email": "a@x.com" }).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_reports_unmodified_when_values_match() {
        let store = MemoryStore::default();
        let ack = store.insert_movie(doc! { "title": "Ikiru" }).await.unwrap();
        let id = ObjectId::parse_str(&ack.inserted_id).unwrap();

        let same = store.update_movie(id, doc! { "title": "Ikiru" }).await.unwrap();
        assert_eq!(same, UpdateAck::new(1, 0));

        let changed = store.update_movie(id, doc! { "title": "Ikiru (1952)" }).await.unwrap();
        assert_eq!(changed, UpdateAck::new(1, 1));
    }

    #[test]
    fn non_numeric_values_sort_last() {
        let movies = vec![
            doc! { "title": "a", "rating": "n/a" },
            doc! { "title": "b", "rating": 3 },
            doc! { "title": "c" },
            doc! { "title": "d", "rating": "12" },
        ];
        let titles: Vec<String> = sorted_by_desc(movies, "rating", 10)
            .iter()
            .map(|m| m.get_str("title").unwrap().to_string())
            .collect();
        assert_eq!(titles, ["d", "b", "a", "c"]);
    }

    #[tokio::test]
    async fn release_years_stored_as_strings_sort_numerically() {
        let store = MemoryStore::default();
        store
            .insert_movie(doc! { "title": "old-string", "releaseYear": "1950" })
            .await
            .unwrap();
        store
            .insert_movie(doc! { "title": "new-number", "releaseYear": 2024 })
            .await
            .unwrap();

        let recent = store.recent_movies(6).await.unwrap();
        let titles: Vec<&str> = recent.iter().map(|m| m.get_str("title").unwrap()).collect();
        assert_eq!(titles, ["new-number", "old-string"]);
    }
}
