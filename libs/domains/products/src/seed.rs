use futures::future::join_all;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Pagination, Product};
use crate::repository::ProductRepository;
use crate::seed_data::initial_products;
use crate::service::ProductService;

/// Wipes the catalog and recreates a fixed dataset through the regular create path.
///
/// Not safe against concurrent writers: callers serialize reseeds.
#[derive(Clone)]
pub struct SeedService<R: ProductRepository> {
    products: ProductService<R>,
    catalog: Vec<CreateProduct>,
}

impl<R: ProductRepository> SeedService<R> {
    pub fn new(products: ProductService<R>) -> Self {
        Self::with_catalog(products, initial_products())
    }

    pub fn with_catalog(products: ProductService<R>, catalog: Vec<CreateProduct>) -> Self {
        Self { products, catalog }
    }

    /// Delete everything, verify the first page is empty, then create every
    /// catalog record concurrently. Failed creates are logged and left out.
    #[instrument(skip(self), fields(records = self.catalog.len()))]
    pub async fn reseed(&self) -> ProductResult<Vec<Product>> {
        self.products.delete_all_products().await?;

        let remaining = self.products.list_products(Pagination::default()).await?;
        if !remaining.is_empty() {
            return Err(ProductError::SeedInvariantViolation(format!(
                "catalog still holds {} product(s) after wipe",
                remaining.len()
            )));
        }

        let creates = self.catalog.iter().cloned().map(|input| {
            let title = input.title.clone();
            async move { (title, self.products.create_product(input).await) }
        });

        let mut created = Vec::with_capacity(self.catalog.len());
        for (title, result) in join_all(creates).await {
            match result {
                Ok(product) => created.push(product),
                Err(e) => tracing::warn!(%title, error = %e, "Seed record failed"),
            }
        }

        tracing::info!(created = created.len(), "Catalog reseeded");
        Ok(created)
    }
}
