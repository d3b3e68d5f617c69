//! Catalog and seed routes backed by PostgreSQL

use axum::Router;
use domain_products::{PgProductRepository, ProductService, SeedService, handlers};

use crate::state::AppState;

fn service(state: &AppState) -> ProductService<PgProductRepository> {
    ProductService::new(PgProductRepository::new(state.db.clone()))
}

pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

pub fn seed_router(state: &AppState) -> Router {
    handlers::seed_router(SeedService::new(service(state)))
}
