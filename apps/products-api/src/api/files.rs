//! Product image upload and download

use axum::Router;
use domain_products::{DiskAssetStore, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::files_router(DiskAssetStore::new(
        state.config.assets.products_dir.clone(),
    ))
}
