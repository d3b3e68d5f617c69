//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalog with image storage and seed reset",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/seed", api = domain_products::SeedApiDoc),
        (path = "/api/files", api = domain_products::FilesApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Seed", description = "Catalog reset"),
        (name = "Files", description = "Product image storage")
    )
)]
pub struct ApiDoc;
