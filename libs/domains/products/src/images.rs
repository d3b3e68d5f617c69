//! Image references ↔ owned image records.

use uuid::Uuid;

use crate::models::ProductImage;

/// Stage one owned image per reference, keeping input order in `position`.
///
/// Nothing is written here; the records become durable with the product insert.
pub fn associate<I, S>(product_id: Uuid, urls: I) -> Vec<ProductImage>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    urls.into_iter()
        .enumerate()
        .map(|(position, url)| ProductImage {
            id: Uuid::new_v4(),
            product_id,
            url: url.into(),
            position: position as i32,
        })
        .collect()
}

/// Reference strings in stored order.
pub fn image_urls(images: &[ProductImage]) -> Vec<String> {
    let mut ordered: Vec<&ProductImage> = images.iter().collect();
    ordered.sort_by_key(|image| image.position);
    ordered.into_iter().map(|image| image.url.clone()).collect()
}
