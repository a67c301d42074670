use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Moviescope Pro API",
        version = "1.0.0",
        description = "Movie catalog backend. \n\n**Features:**\n\
            - Movie CRUD with merge updates\n\
            - Top-rated and recent movie lists\n\
            - Users with unique emails\n\
            - Catalog statistics and health"
    ),
    paths(
        // Health
        crate::api::health::root,
        crate::api::health::health_check,

        // Movies
        crate::api::movies::create_movie,
        crate::api::movies::list_movies,
        crate::api::movies::top_rated_movies,
        crate::api::movies::recent_movies,
        crate::api::movies::get_movie,
        crate::api::movies::update_movie,
        crate::api::movies::delete_movie,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,

        // Stats
        crate::api::stats::get_stats,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::MoviePayload,
            crate::models::UserPayload,
            crate::models::InsertAck,
            crate::models::UpdateAck,
            crate::models::DeleteAck,
            crate::models::CatalogStats,
        )
    ),
    tags(
        (
            name = "Health",
            description = "Liveness endpoints, available before the database is connected."
        ),
        (
            name = "Movies",
            description = "Movie catalog: CRUD, addedBy filter, top-rated and recent lists."
        ),
        (name = "Users", description = "Users identified by a unique email."),
        (name = "Stats", description = "Catalog counts."),
    )
)]
pub struct ApiDoc;
