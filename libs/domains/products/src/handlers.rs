//! HTTP handlers for the catalog, seed and product image endpoints

use axum::{
    Json, Router,
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::assets::AssetStore;
use crate::error::ProductResult;
use crate::models::{
    CreateProduct, Gender, Pagination, ProductResponse, RemovedResponse, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::seed::SeedService;
use crate::service::ProductService;

/// Multipart field carrying the uploaded image
pub const UPLOAD_FIELD: &str = "file";

/// OpenAPI documentation for the catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, find_product, update_product, remove_product),
    components(
        schemas(ProductResponse, CreateProduct, UpdateProduct, Gender, RemovedResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(reseed),
    components(responses(InternalServerErrorResponse)),
    tags(
        (name = "Seed", description = "Catalog reset")
    )
)]
pub struct SeedApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(upload_product_image, download_product_image),
    components(schemas(UploadImageForm, UploadedImage)),
    tags(
        (name = "Files", description = "Product image storage")
    )
)]
pub struct FilesApiDoc;

/// Catalog routes, mounted under `/products`.
///
/// `/{term}` is shared: GET resolves an id, title or slug while PATCH and
/// DELETE require an id.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{term}",
            get(find_product).patch(update_product).delete(remove_product),
        )
        .with_state(Arc::new(service))
}

/// Seed routes, mounted under `/seed`
pub fn seed_router<R: ProductRepository + 'static>(seed: SeedService<R>) -> Router {
    Router::new()
        .route("/", get(reseed))
        .with_state(Arc::new(seed))
}

/// Image routes, mounted under `/files`
pub fn files_router<A: AssetStore + 'static>(store: A) -> Router {
    Router::new()
        .route("/product", post(upload_product_image))
        .route("/product/{image_name}", get(download_product_image))
        .with_state(Arc::new(store))
}

/// List products one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(Pagination),
    responses(
        (status = 200, description = "Page of products ordered by id", body = Vec<ProductResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.list_products(pagination).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Find a product by id, title or slug
#[utoipa::path(
    get,
    path = "/{term}",
    tag = "Products",
    params(
        ("term" = String, Path, description = "Product id, title or slug")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(term): Path<String>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.find_product(&term).await?;
    Ok(Json(product.into()))
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product.into()))
}

/// Remove a product and its images
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product removed", body = RemovedResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<RemovedResponse>> {
    let message = service.remove_product(id).await?;
    Ok(Json(RemovedResponse { message }))
}

/// Wipe the catalog and recreate the seed dataset
#[utoipa::path(
    get,
    path = "",
    tag = "Seed",
    responses(
        (status = 200, description = "Products created by the seed", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reseed<R: ProductRepository>(
    State(seed): State<Arc<SeedService<R>>>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let created = seed.reseed().await?;
    Ok(Json(created.into_iter().map(ProductResponse::from).collect()))
}

/// Multipart form accepted by the upload endpoint
#[derive(Debug, ToSchema)]
pub struct UploadImageForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    /// Name to reference from a product's `images`
    pub secure_url: String,
}

/// Upload a product image
#[utoipa::path(
    post,
    path = "/product",
    tag = "Files",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadedImage),
        (status = 400, description = "Missing file or not an image"),
        (status = 500, description = "Storage failure")
    )
)]
async fn upload_product_image<A: AssetStore>(
    State(store): State<Arc<A>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        let name = store.save(&content_type, bytes.to_vec()).await?;

        return Ok((StatusCode::CREATED, Json(UploadedImage { secure_url: name })));
    }

    Err(AppError::BadRequest(
        "Make sure that the file is an image".to_string(),
    ))
}

/// Download a stored product image
#[utoipa::path(
    get,
    path = "/product/{image_name}",
    tag = "Files",
    params(
        ("image_name" = String, Path, description = "Name returned by the upload endpoint")
    ),
    responses(
        (status = 200, description = "Image bytes with their stored content type"),
        (status = 400, description = "Invalid image name"),
        (status = 404, description = "No image with that name")
    )
)]
async fn download_product_image<A: AssetStore>(
    State(store): State<Arc<A>>,
    Path(image_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let asset = store.load(&image_name).await?;
    Ok(([(header::CONTENT_TYPE, asset.content_type)], asset.bytes))
}
