use axum::{routing::get, Router};
use sqlx::PgPool;

use super::handlers;

/// `/api/{routes,stations}` CRUD. The entity segment picks the collection.
pub fn create_router(pool: PgPool) -> Router {
    Router::new()
        .route(
            "/api/:entity",
            get(handlers::list_entities)
                .post(handlers::create_entity)
                .put(handlers::update_entity)
                .delete(handlers::delete_without_id),
        )
        .route(
            "/api/:entity/:id",
            get(handlers::get_entity).delete(handlers::delete_entity),
        )
        .with_state(pool)
}
