use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::images::{associate, image_urls};
use crate::slug::{non_empty_slug, slug_for_insert};

pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const DEFAULT_PAGE_OFFSET: u64 = 0;
/// Largest limit or offset PostgreSQL accepts as a `bigint`
pub const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

/// Target audience of a product
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_gender")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "men")]
    Men,
    #[sea_orm(string_value = "women")]
    Women,
    #[sea_orm(string_value = "kid")]
    Kid,
    #[sea_orm(string_value = "unisex")]
    Unisex,
}

/// Image owned by exactly one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Storage name handed out by the asset store
    pub url: String,
    /// Zero-based index in the list the product was created with
    pub position: i32,
}

/// Product with its images loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Build an unsaved product: fresh id, normalized slug, staged images.
    ///
    /// Fails when neither the slug nor the title leaves anything after
    /// normalization.
    pub fn new(input: CreateProduct) -> ProductResult<Self> {
        let id = Uuid::now_v7();
        let slug = slug_for_insert(&input.title, input.slug.as_deref()).ok_or_else(|| {
            ProductError::Validation(format!("title {:?} yields an empty slug", input.title))
        })?;

        Ok(Self {
            id,
            slug,
            title: input.title,
            price: input.price.unwrap_or(0.0),
            description: input.description,
            stock: input.stock.unwrap_or(0),
            sizes: input.sizes,
            gender: input.gender,
            tags: input.tags,
            images: associate(id, input.images),
        })
    }

    /// Merge the supplied fields onto the stored product.
    ///
    /// A supplied slug is normalized and replaces the stored one only when
    /// something survives normalization. The title is never re-derived into
    /// the slug here, and `images` is ignored: the image association only
    /// changes on create.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(slug) = update.slug.as_deref().and_then(non_empty_slug) {
            self.slug = slug;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(sizes) = update.sizes {
            self.sizes = sizes;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
    }

    pub fn image_urls(&self) -> Vec<String> {
        image_urls(&self.images)
    }
}

/// Product as returned to clients: images flattened to their reference strings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let images = product.image_urls();
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            description: product.description,
            slug: product.slug,
            stock: product.stock,
            sizes: product.sizes,
            gender: product.gender,
            tags: product.tags,
            images,
        }
    }
}

/// DTO for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub description: Option<String>,
    /// Derived from the title when absent
    pub slug: Option<String>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub sizes: Vec<String>,
    pub gender: Gender,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Storage names returned by the upload endpoint
    #[serde(default)]
    pub images: Vec<String>,
}

/// DTO for a partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    /// Absent keeps the stored description, `null` clears it
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub slug: Option<String>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub sizes: Option<Vec<String>>,
    pub gender: Option<Gender>,
    pub tags: Option<Vec<String>>,
    /// Accepted for compatibility, not applied
    pub images: Option<Vec<String>>,
}

/// Only runs for a field that is present, so `null` becomes `Some(None)`
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Page window for listings
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page size, positive (default 10)
    #[validate(range(min = 1, max = 9223372036854775807u64))]
    pub limit: Option<u64>,
    /// Rows to skip (default 0)
    #[validate(range(max = 9223372036854775807u64))]
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(DEFAULT_PAGE_OFFSET)
    }
}

/// Body returned by the remove endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemovedResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(title: &str) -> CreateProduct {
        CreateProduct {
            title: title.to_string(),
            price: None,
            description: None,
            slug: None,
            stock: None,
            sizes: vec!["S".into(), "M".into()],
            gender: Gender::Men,
            tags: vec![],
            images: vec!["1.jpg".into(), "2.jpg".into()],
        }
    }

    #[test]
    fn test_new_product_defaults() {
        let product = Product::new(create_input("Men's Chill Sweatshirt")).unwrap();

        assert_eq!(product.slug, "mens_chill_sweatshirt");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.stock, 0);
        assert!(product.tags.is_empty());
        assert_eq!(product.images.len(), 2);
        assert!(product.images.iter().all(|i| i.product_id == product.id));
    }

    #[test]
    fn test_new_product_uses_supplied_slug() {
        let mut input = create_input("Cyber Hoodie");
        input.slug = Some("The Hoodie".into());

        assert_eq!(Product::new(input).unwrap().slug, "the_hoodie");
    }

    #[test]
    fn test_update_price_only_keeps_title_and_slug() {
        let mut product = Product::new(create_input("Cyber Hoodie")).unwrap();
        product.apply_update(UpdateProduct {
            price: Some(42.5),
            ..Default::default()
        });

        assert_eq!(product.title, "Cyber Hoodie");
        assert_eq!(product.slug, "cyber_hoodie");
        assert_eq!(product.price, 42.5);
    }

    #[test]
    fn test_update_title_does_not_rederive_slug() {
        let mut product = Product::new(create_input("Cyber Hoodie")).unwrap();
        product.apply_update(UpdateProduct {
            title: Some("Plaid Hoodie".into()),
            ..Default::default()
        });

        assert_eq!(product.slug, "cyber_hoodie");
    }

    #[test]
    fn test_update_slug_is_normalized() {
        let mut product = Product::new(create_input("Cyber Hoodie")).unwrap();
        product.apply_update(UpdateProduct {
            slug: Some("Kid's New Slug".into()),
            ..Default::default()
        });

        assert_eq!(product.slug, "kids_new_slug");
    }

    #[test]
    fn test_apostrophe_only_title_is_rejected() {
        let result = Product::new(create_input("'"));
        assert!(matches!(result, Err(ProductError::Validation(_))));

        let mut input = create_input("''");
        input.slug = Some("Kid's".into());
        assert_eq!(Product::new(input).unwrap().slug, "kids");
    }

    #[test]
    fn test_apostrophe_only_slug_falls_back_to_title() {
        let mut input = create_input("Cyber Hoodie");
        input.slug = Some("'".into());
        assert_eq!(Product::new(input).unwrap().slug, "cyber_hoodie");
    }

    #[test]
    fn test_update_with_apostrophe_only_slug_keeps_stored_slug() {
        let mut product = Product::new(create_input("Cyber Hoodie")).unwrap();
        product.apply_update(UpdateProduct {
            slug: Some("''".into()),
            ..Default::default()
        });

        assert_eq!(product.slug, "cyber_hoodie");
    }

    #[test]
    fn test_update_description_absent_null_or_value() {
        let mut input = create_input("Cyber Hoodie");
        input.description = Some("Warm".into());
        let mut product = Product::new(input).unwrap();

        let absent: UpdateProduct = serde_json::from_str(r#"{"price": 3.0}"#).unwrap();
        assert_eq!(absent.description, None);
        product.apply_update(absent);
        assert_eq!(product.description.as_deref(), Some("Warm"));

        let replaced: UpdateProduct =
            serde_json::from_str(r#"{"description": "Cozy"}"#).unwrap();
        product.apply_update(replaced);
        assert_eq!(product.description.as_deref(), Some("Cozy"));

        let cleared: UpdateProduct = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        product.apply_update(cleared);
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_update_ignores_images() {
        let mut product = Product::new(create_input("Cyber Hoodie")).unwrap();
        let before = product.images.clone();
        product.apply_update(UpdateProduct {
            images: Some(vec!["other.jpg".into()]),
            ..Default::default()
        });

        assert_eq!(product.images, before);
    }

    #[test]
    fn test_response_flattens_images() {
        let response = ProductResponse::from(Product::new(create_input("Cyber Hoodie")).unwrap());
        assert_eq!(response.images, vec!["1.jpg", "2.jpg"]);
    }

    #[test]
    fn test_pagination_defaults() {
        let page = Pagination::default();
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 0);
        assert!(Pagination::new(0, 0).validate().is_err());
    }

    #[test]
    fn test_pagination_rejects_values_beyond_bigint() {
        assert!(Pagination::new(MAX_PAGE_VALUE, MAX_PAGE_VALUE).validate().is_ok());
        assert!(Pagination::new(MAX_PAGE_VALUE + 1, 0).validate().is_err());
        assert!(Pagination::new(10, MAX_PAGE_VALUE + 1).validate().is_err());
        assert!(Pagination::new(u64::MAX, 0).validate().is_err());
    }

    #[test]
    fn test_create_validation() {
        let mut input = create_input("");
        assert!(input.validate().is_err());

        input.title = "Shirt".into();
        input.price = Some(-1.0);
        assert!(input.validate().is_err());

        input.price = Some(1.0);
        input.stock = Some(-3);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_gender_serde() {
        assert_eq!(serde_json::to_string(&Gender::Kid).unwrap(), "\"kid\"");
        assert_eq!("unisex".parse::<Gender>().unwrap(), Gender::Unisex);
    }
}
