//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! ## Modules
//!
//! - **[`server`]**: Router bootstrap with OpenAPI UIs, health/readiness, graceful shutdown
//! - **[`http`]**: CORS layer built from `CORS_ALLOWED_ORIGIN`, security headers
//! - **[`errors`]**: `AppError` and the `{ code, error, message, details }` response body
//! - **[`extractors`]**: `UuidPath`, `ValidatedJson`, `ValidatedQuery`
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new();
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     create_app(router, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, UNEXPECTED_ERROR_MESSAGE};

pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery};
