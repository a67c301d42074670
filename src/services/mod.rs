pub mod movie_service;
pub mod stats_service;
pub mod user_service;
