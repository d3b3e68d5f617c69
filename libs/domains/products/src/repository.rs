use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, UpdateProduct};

/// Storage port for products and their owned images.
///
/// Lookups report absence as `None`; the service decides whether that is an error.
/// Unique violations surface as [`ProductError::UniqueConflict`], everything else
/// as [`ProductError::UnexpectedStorage`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Write the product row and its staged images in one transaction
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Case-insensitive match on title or slug
    async fn get_by_title_or_slug(&self, term: &str) -> ProductResult<Option<Product>>;

    /// Page ordered by id
    async fn list_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>>;

    /// Stored product with `changes` merged in, not persisted
    async fn preload(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Option<Product>> {
        Ok(self.get_by_id(id).await?.map(|mut product| {
            product.apply_update(changes);
            product
        }))
    }

    /// Transactional write of the scalar columns
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Remove the product and its images; returns products removed
    async fn delete_by_id(&self, id: Uuid) -> ProductResult<u64>;

    /// Remove every product and image; returns products removed
    async fn delete_all(&self) -> ProductResult<u64>;
}

/// In-memory implementation (for development/testing).
///
/// Enforces the same case-sensitive title/slug uniqueness as the database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn check_unique(products: &HashMap<Uuid, Product>, candidate: &Product) -> ProductResult<()> {
        for other in products.values().filter(|p| p.id != candidate.id) {
            if other.title == candidate.title {
                return Err(ProductError::UniqueConflict(format!(
                    "Key (title)=({}) already exists.",
                    candidate.title
                )));
            }
            if other.slug == candidate.slug {
                return Err(ProductError::UniqueConflict(format!(
                    "Key (slug)=({}) already exists.",
                    candidate.slug
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        Self::check_unique(&products, &product)?;

        products.insert(product.id, product.clone());
        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn get_by_title_or_slug(&self, term: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        let term = term.to_lowercase();

        let mut matches: Vec<&Product> = products
            .values()
            .filter(|p| p.title.to_lowercase() == term || p.slug.to_lowercase() == term)
            .collect();
        matches.sort_by_key(|p| p.id);

        Ok(matches.first().map(|p| (*p).clone()))
    }

    async fn list_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by_key(|p| p.id);

        Ok(result
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let stored = products
            .get(&product.id)
            .ok_or_else(|| ProductError::not_found_id(product.id))?;
        Self::check_unique(&products, &product)?;

        let saved = Product {
            images: stored.images.clone(),
            ..product
        };
        products.insert(saved.id, saved.clone());

        tracing::info!(product_id = %saved.id, "Updated product");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: Uuid) -> ProductResult<u64> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).map_or(0, |_| 1))
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut products = self.products.write().await;
        let removed = products.len() as u64;
        products.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProduct, Gender};

    fn product(title: &str) -> Product {
        Product::new(CreateProduct {
            title: title.to_string(),
            price: Some(10.0),
            description: None,
            slug: None,
            stock: Some(1),
            sizes: vec!["M".into()],
            gender: Gender::Unisex,
            tags: vec![],
            images: vec!["a.jpg".into()],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(product("Cyber Hoodie")).await.unwrap();

        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(
            repo.get_by_title_or_slug("CYBER_HOODIE").await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(
            repo.get_by_title_or_slug("cyber hoodie").await.unwrap(),
            Some(created)
        );
        assert_eq!(repo.get_by_title_or_slug("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_title_conflicts() {
        let repo = InMemoryProductRepository::new();
        repo.insert(product("Cyber Hoodie")).await.unwrap();

        let result = repo.insert(product("Cyber Hoodie")).await;
        assert!(matches!(result, Err(ProductError::UniqueConflict(_))));
    }

    #[tokio::test]
    async fn test_save_keeps_stored_images() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(product("Cyber Hoodie")).await.unwrap();

        let mut candidate = repo
            .preload(created.id, UpdateProduct {
                price: Some(99.0),
                ..Default::default()
            })
            .await
            .unwrap()
            .unwrap();
        candidate.images.clear();

        let saved = repo.save(candidate).await.unwrap();
        assert_eq!(saved.price, 99.0);
        assert_eq!(saved.images, created.images);
    }

    #[tokio::test]
    async fn test_preload_missing_is_none() {
        let repo = InMemoryProductRepository::new();
        let result = repo.preload(Uuid::now_v7(), UpdateProduct::default()).await;
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_counts() {
        let repo = InMemoryProductRepository::new();
        let a = repo.insert(product("A")).await.unwrap();
        repo.insert(product("B")).await.unwrap();

        assert_eq!(repo.delete_by_id(a.id).await.unwrap(), 1);
        assert_eq!(repo.delete_by_id(a.id).await.unwrap(), 0);
        assert_eq!(repo.delete_all().await.unwrap(), 1);
        assert!(repo.list_page(10, 0).await.unwrap().is_empty());
    }
}
