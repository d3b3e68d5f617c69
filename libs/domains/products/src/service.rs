use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::lookup::SearchTerm;
use crate::models::{CreateProduct, Pagination, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Engine entry points for the product catalog
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.insert(Product::new(input)?).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, pagination: Pagination) -> ProductResult<Vec<Product>> {
        pagination
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository
            .list_page(pagination.limit(), pagination.offset())
            .await
    }

    /// Resolve `term` as an id when it is a hyphenated UUID, otherwise as a title or slug.
    #[instrument(skip(self))]
    pub async fn find_product(&self, term: &str) -> ProductResult<Product> {
        let search = SearchTerm::classify(term);

        let found = match search {
            SearchTerm::Id(id) => self.repository.get_by_id(id).await?,
            SearchTerm::TitleOrSlug(text) => self.repository.get_by_title_or_slug(text).await?,
        };

        found.ok_or_else(|| ProductError::NotFound {
            key: search.key(),
            term: term.to_string(),
        })
    }

    /// Merge `input` onto the stored product and persist it in one transaction.
    ///
    /// A failed write is rolled back by the repository and surfaces as
    /// `UniqueConflict` or `UnexpectedStorage`.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let candidate = self
            .repository
            .preload(id, input)
            .await?
            .ok_or_else(|| ProductError::not_found_id(id))?;

        self.repository.save(candidate).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_product(&self, id: Uuid) -> ProductResult<String> {
        let affected = self.repository.delete_by_id(id).await?;

        if affected == 0 {
            return Err(ProductError::not_found_id(id));
        }

        Ok(format!("Product with id {} has been removed", id))
    }

    #[instrument(skip(self))]
    pub async fn delete_all_products(&self) -> ProductResult<u64> {
        self.repository.delete_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupKey;
    use crate::models::Gender;
    use crate::repository::{InMemoryProductRepository, MockProductRepository};
    use mockall::predicate::*;

    fn create_input(title: &str) -> CreateProduct {
        CreateProduct {
            title: title.to_string(),
            price: Some(30.0),
            description: Some("Soft cotton".into()),
            slug: None,
            stock: Some(5),
            sizes: vec!["S".into(), "M".into(), "L".into()],
            gender: Gender::Men,
            tags: vec!["sweatshirt".into()],
            images: vec!["1740250-00-A_0_2000.jpg".into(), "1740250-00-A_1.jpg".into()],
        }
    }

    fn in_memory() -> ProductService<InMemoryProductRepository> {
        ProductService::new(InMemoryProductRepository::new())
    }

    #[tokio::test]
    async fn test_create_derives_slug_and_keeps_image_order() {
        let service = in_memory();
        let product = service
            .create_product(create_input("Men's Chill Sweatshirt"))
            .await
            .unwrap();

        assert_eq!(product.slug, "mens_chill_sweatshirt");
        assert_eq!(
            product.image_urls(),
            vec!["1740250-00-A_0_2000.jpg", "1740250-00-A_1.jpg"]
        );
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = in_memory();
        let mut input = create_input("Shirt");
        input.price = Some(-5.0);

        let result = service.create_product(input).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_title_without_slug_characters() {
        let service = in_memory();

        let result = service.create_product(create_input("'")).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));

        let listed = service.list_products(Pagination::default()).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_update_with_apostrophe_only_slug_keeps_slug() {
        let service = in_memory();
        let created = service.create_product(create_input("Cyber Hoodie")).await.unwrap();

        let updated = service
            .update_product(
                created.id,
                UpdateProduct {
                    slug: Some("''".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "cyber_hoodie");
    }

    #[tokio::test]
    async fn test_duplicate_title_conflicts_and_first_survives() {
        let service = in_memory();
        let first = service.create_product(create_input("Cyber Hoodie")).await.unwrap();

        let second = service.create_product(create_input("Cyber Hoodie")).await;
        assert!(matches!(second, Err(ProductError::UniqueConflict(_))));

        let found = service.find_product(&first.id.to_string()).await.unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn test_find_by_id_slug_and_title() {
        let service = in_memory();
        let created = service.create_product(create_input("Cyber Hoodie")).await.unwrap();

        assert_eq!(service.find_product(&created.id.to_string()).await.unwrap().id, created.id);
        assert_eq!(service.find_product("cyber_hoodie").await.unwrap().id, created.id);
        assert_eq!(service.find_product("CYBER HOODIE").await.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_find_missing_reports_key_type() {
        let service = in_memory();

        let missing_id = Uuid::now_v7().to_string();
        match service.find_product(&missing_id).await {
            Err(ProductError::NotFound { key, term }) => {
                assert_eq!(key, LookupKey::Id);
                assert_eq!(term, missing_id);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }

        match service.find_product("no_such_slug").await {
            Err(ProductError::NotFound { key, .. }) => assert_eq!(key, LookupKey::Slug),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pages_are_disjoint() {
        let service = in_memory();
        for title in ["A", "B", "C", "D"] {
            service.create_product(create_input(title)).await.unwrap();
        }

        let first = service.list_products(Pagination::new(2, 0)).await.unwrap();
        let second = service.list_products(Pagination::new(2, 2)).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        let mut ids: Vec<Uuid> = first.iter().chain(second.iter()).map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[tokio::test]
    async fn test_list_defaults_to_ten() {
        let service = in_memory();
        for i in 0..12 {
            service.create_product(create_input(&format!("Tee {}", i))).await.unwrap();
        }

        let page = service.list_products(Pagination::default()).await.unwrap();
        assert_eq!(page.len(), 10);
    }

    #[tokio::test]
    async fn test_update_price_only() {
        let service = in_memory();
        let created = service.create_product(create_input("Cyber Hoodie")).await.unwrap();

        let updated = service
            .update_product(
                created.id,
                UpdateProduct {
                    price: Some(55.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 55.0);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.slug, created.slug);
    }

    #[tokio::test]
    async fn test_update_normalizes_slug() {
        let service = in_memory();
        let created = service.create_product(create_input("Cyber Hoodie")).await.unwrap();

        let updated = service
            .update_product(
                created.id,
                UpdateProduct {
                    slug: Some("Winter's Hoodie".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "winters_hoodie");
        assert!(service.find_product("winters_hoodie").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = in_memory();
        let result = service
            .update_product(Uuid::now_v7(), UpdateProduct::default())
            .await;
        assert!(matches!(
            result,
            Err(ProductError::NotFound { key: LookupKey::Id, .. })
        ));
    }

    #[tokio::test]
    async fn test_update_into_existing_title_conflicts() {
        let service = in_memory();
        service.create_product(create_input("Cyber Hoodie")).await.unwrap();
        let other = service.create_product(create_input("Plaid Shirt")).await.unwrap();

        let result = service
            .update_product(
                other.id,
                UpdateProduct {
                    title: Some("Cyber Hoodie".into()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::UniqueConflict(_))));
        let unchanged = service.find_product(&other.id.to_string()).await.unwrap();
        assert_eq!(unchanged.title, "Plaid Shirt");
    }

    #[tokio::test]
    async fn test_update_surfaces_storage_failure_after_single_write() {
        let id = Uuid::now_v7();
        let mut mock = MockProductRepository::new();

        mock.expect_preload().with(eq(id), always()).times(1).returning(move |_, changes| {
            let mut product = Product::new(CreateProduct {
                title: "Cyber Hoodie".into(),
                price: None,
                description: None,
                slug: None,
                stock: None,
                sizes: vec![],
                gender: Gender::Unisex,
                tags: vec![],
                images: vec![],
            })
            .unwrap();
            product.id = id;
            product.apply_update(changes);
            Ok(Some(product))
        });
        mock.expect_save()
            .times(1)
            .returning(|_| Err(ProductError::UnexpectedStorage("connection reset".into())));

        let service = ProductService::new(mock);
        let result = service
            .update_product(
                id,
                UpdateProduct {
                    stock: Some(3),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::UnexpectedStorage(_))));
    }

    #[tokio::test]
    async fn test_update_does_not_write_when_missing() {
        let mut mock = MockProductRepository::new();
        mock.expect_preload().returning(|_, _| Ok(None));
        mock.expect_save().never();

        let service = ProductService::new(mock);
        let result = service.update_product(Uuid::now_v7(), UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_reports_message_then_not_found() {
        let service = in_memory();
        let created = service.create_product(create_input("Cyber Hoodie")).await.unwrap();

        let message = service.remove_product(created.id).await.unwrap();
        assert_eq!(message, format!("Product with id {} has been removed", created.id));

        let again = service.remove_product(created.id).await;
        assert!(matches!(again, Err(ProductError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_uses_affected_count() {
        let id = Uuid::now_v7();
        let mut mock = MockProductRepository::new();
        mock.expect_delete_by_id().with(eq(id)).times(1).returning(|_| Ok(0));

        let service = ProductService::new(mock);
        assert!(matches!(
            service.remove_product(id).await,
            Err(ProductError::NotFound { key: LookupKey::Id, .. })
        ));
    }
}
