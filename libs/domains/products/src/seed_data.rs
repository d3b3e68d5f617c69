//! Fixed catalog recreated by the seed endpoint

use crate::models::{CreateProduct, Gender};

struct SeedRecord {
    title: &'static str,
    description: &'static str,
    price: f64,
    stock: i32,
    sizes: &'static [&'static str],
    gender: Gender,
    tags: &'static [&'static str],
    images: &'static [&'static str],
}

const SEED_RECORDS: &[SeedRecord] = &[
    SeedRecord {
        title: "Men's Chill Crew Neck Sweatshirt",
        description: "Relaxed fit crew neck in a premium heavyweight fleece with a subtle logo on the chest.",
        price: 75.0,
        stock: 7,
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["sweatshirt"],
        images: &["1740176-00-A_0_2000.jpg", "1740176-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Men's Quilted Shirt Jacket",
        description: "Lightweight quilted shacket with snap closures and a water-repellent finish.",
        price: 200.0,
        stock: 5,
        sizes: &["XS", "S", "M", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["jacket"],
        images: &["1740507-00-A_0_2000.jpg", "1740507-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Men's Raven Lightweight Zip Up Bomber Jacket",
        description: "Modern bomber with a matte finish, ribbed collar and cuffs, and a two-way front zip.",
        price: 130.0,
        stock: 10,
        sizes: &["S", "M", "L", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["shirt"],
        images: &["1740250-00-A_0_2000.jpg", "1740250-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Men's Turbine Long Sleeve Tee",
        description: "Soft long sleeve tee in cotton jersey with a turbine graphic on the sleeve.",
        price: 45.0,
        stock: 50,
        sizes: &["XS", "S", "M", "L"],
        gender: Gender::Men,
        tags: &["shirt"],
        images: &["1740280-00-A_0_2000.jpg", "1740280-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Men's Turbine Short Sleeve Tee",
        description: "Everyday short sleeve tee in organic cotton with a small printed wordmark.",
        price: 40.0,
        stock: 50,
        sizes: &["M", "L", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["shirt"],
        images: &["1741416-00-A_0_2000.jpg", "1741416-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Men's Cybertruck Owl Tee",
        description: "Graphic tee featuring a night owl illustration, printed on a breathable cotton blend.",
        price: 35.0,
        stock: 0,
        sizes: &["M", "L", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["shirt"],
        images: &["7654393-00-A_2_2000.jpg", "7654393-00-A_3.jpg"],
    },
    SeedRecord {
        title: "Women's Cropped Puffer Jacket",
        description: "Cropped puffer with a boxy silhouette, recycled fill, and a stand collar.",
        price: 225.0,
        stock: 85,
        sizes: &["XS", "S", "M"],
        gender: Gender::Women,
        tags: &["hoodie"],
        images: &["1740535-00-A_0_2000.jpg", "1740535-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Women's Chill Half Zip Cropped Hoodie",
        description: "Cropped half zip hoodie in brushed fleece with dropped shoulders and a kangaroo pocket.",
        price: 130.0,
        stock: 10,
        sizes: &["XS", "S", "M", "XXL"],
        gender: Gender::Women,
        tags: &["hoodie"],
        images: &["1740226-00-A_0_2000.jpg", "1740226-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Women's Raven Slouchy Crew Sweatshirt",
        description: "Oversized crew sweatshirt with a slouchy fit and tonal embroidery.",
        price: 110.0,
        stock: 9,
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        gender: Gender::Women,
        tags: &["hoodie"],
        images: &["1740260-00-A_0_2000.jpg", "1740260-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Kids Cybertruck Long Sleeve Tee",
        description: "Long sleeve tee for kids with a bold graphic across the front.",
        price: 30.0,
        stock: 10,
        sizes: &["XS", "S", "M"],
        gender: Gender::Kid,
        tags: &["shirt"],
        images: &["1742694-00-A_1_2000.jpg", "1742694-00-A_3.jpg"],
    },
    SeedRecord {
        title: "Kids Scribble T Logo Tee",
        description: "Cotton tee for kids with a hand drawn logo in a playful scribble style.",
        price: 25.0,
        stock: 0,
        sizes: &["XS", "S", "M"],
        gender: Gender::Kid,
        tags: &["shirt"],
        images: &["8529312-00-A_0_2000.jpg", "8529312-00-A_1.jpg"],
    },
    SeedRecord {
        title: "Chill Pullover Hoodie",
        description: "Unisex pullover hoodie in heavyweight fleece with a lined hood and ribbed hem.",
        price: 85.0,
        stock: 10,
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        gender: Gender::Unisex,
        tags: &["hoodie"],
        images: &["1740051-00-A_0_2000.jpg", "1740051-00-A_1.jpg"],
    },
];

/// Create payloads for the seed catalog, in catalog order
pub fn initial_products() -> Vec<CreateProduct> {
    SEED_RECORDS
        .iter()
        .map(|record| CreateProduct {
            title: record.title.to_string(),
            price: Some(record.price),
            description: Some(record.description.to_string()),
            slug: None,
            stock: Some(record.stock),
            sizes: record.sizes.iter().map(|s| s.to_string()).collect(),
            gender: record.gender,
            tags: record.tags.iter().map(|s| s.to_string()).collect(),
            images: record.images.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::slug_for_insert;
    use std::collections::HashSet;
    use validator::Validate;

    #[test]
    fn test_seed_catalog_is_valid() {
        let products = initial_products();
        assert!(!products.is_empty());
        assert!(products.iter().all(|p| p.validate().is_ok()));
    }

    #[test]
    fn test_seed_titles_and_slugs_are_unique() {
        let products = initial_products();

        let titles: HashSet<_> = products.iter().map(|p| p.title.as_str()).collect();
        let slugs: HashSet<_> = products
            .iter()
            .map(|p| slug_for_insert(&p.title, p.slug.as_deref()).unwrap())
            .collect();

        assert_eq!(titles.len(), products.len());
        assert_eq!(slugs.len(), products.len());
    }
}
