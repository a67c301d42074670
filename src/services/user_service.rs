use serde_json::{Map, Value};

use crate::database::CatalogStore;
use crate::models::{
    documents_to_json, duplicate_email_message, json_to_document, InsertAck, USER_EMAIL_FIELD,
};
use crate::utils::AppError;

/// Creates a user unless one with the same email exists.
///
/// The lookup is not atomic with the insert; the unique index on `users.email`
/// catches concurrent duplicates and the store reports them as a conflict too.
pub async fn create_user(
    store: &dyn CatalogStore,
    body: Map<String, Value>,
) -> Result<InsertAck, AppError> {
    let email = body
        .get(USER_EMAIL_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::InvalidRequest("User email is required".to_string()))?
        .to_string();

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(duplicate_email_message(&email)));
    }

    let user = json_to_document(body)?;
    store.insert_user(user).await
}

pub async fn list_users(store: &dyn CatalogStore) -> Result<Vec<Value>, AppError> {
    let users = store.list_users().await?;
    Ok(documents_to_json(users))
}
