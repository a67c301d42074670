use crate::database::CatalogStore;
use crate::models::CatalogStats;
use crate::utils::AppError;

pub async fn catalog_stats(store: &dyn CatalogStore) -> Result<CatalogStats, AppError> {
    let (movie_count, user_count) =
        futures::try_join!(store.count_movies(), store.count_users())?;

    Ok(CatalogStats { movie_count, user_count })
}
