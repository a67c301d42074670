use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

pub const MOVIES_COLLECTION: &str = "movies";

/// Size of the top-rated list.
pub const TOP_RATED_LIMIT: i64 = 5;

/// Size of the recent-movies list.
pub const RECENT_MOVIES_LIMIT: i64 = 6;

/// Query string accepted by `GET /movies`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MovieQuery {
    /// Exact, case-sensitive match on the submitting user's email
    pub added_by: Option<String>,
}

/// Counts returned by `GET /stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub movie_count: u64,
    pub user_count: u64,
}

/// Movie body for create and update. Any JSON object is accepted; fields pass through untouched.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct MoviePayload(pub Map<String, Value>);
