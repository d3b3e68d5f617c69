//! Sea-ORM entities for the `products` and `product_images` tables

pub mod product;
pub mod product_image;
