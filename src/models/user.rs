use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub const USERS_COLLECTION: &str = "users";

/// Field that identifies a user; unique across the collection.
pub const USER_EMAIL_FIELD: &str = "email";

/// User body for create. Must carry a string `email`; other fields pass through.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct UserPayload(pub Map<String, Value>);

pub fn duplicate_email_message(email: &str) -> String {
    format!("User with email {} already exists", email)
}
