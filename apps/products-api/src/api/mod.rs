use axum::Router;

pub mod files;
pub mod health;
pub mod products;

use crate::state::AppState;

/// API routes without the `/api` prefix; `create_router` adds it.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/seed", products::seed_router(state))
        .nest("/files", files::router(state))
}

/// `/ready` with a live database check, merged next to the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
