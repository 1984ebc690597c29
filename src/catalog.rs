use crate::entities::product::{Brand, Model};

/// Case-insensitive substring search across title, brand and specs. An
/// empty query returns the collection unchanged, in its original order.
pub fn filter_products(products: &[Model], query: &str) -> Vec<Model> {
    if query.is_empty() {
        return products.to_vec();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| {
            product.title.to_lowercase().contains(&needle)
                || product.brand.to_string().to_lowercase().contains(&needle)
                || product.specs.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Partitions a product list into per-brand sections, in the fixed brand
/// display order. Brands with no products are omitted.
pub fn group_by_brand(products: Vec<Model>) -> Vec<(Brand, Vec<Model>)> {
    Brand::ALL
        .iter()
        .filter_map(|brand| {
            let section: Vec<Model> = products
                .iter()
                .filter(|product| product.brand == *brand)
                .cloned()
                .collect();
            if section.is_empty() {
                None
            } else {
                Some((*brand, section))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::prelude::DateTimeUtc;

    fn model(id: i32, title: &str, specs: &str, brand: Brand) -> Model {
        Model {
            id,
            title: title.to_string(),
            specs: specs.to_string(),
            price: 1000.0,
            brand,
            images: "[\"a.jpg\"]".to_string(),
            created_at: DateTimeUtc::default(),
        }
    }

    fn fixture() -> Vec<Model> {
        vec![
            model(1, "Embroidered Lawn", "chiffon dupatta", Brand::Nishat),
            model(2, "Kurta Classic", "cotton, regular fit", Brand::JunaidJamshaid),
            model(3, "Summer Dress", "", Brand::Beechtree),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let products = fixture();
        let filtered = filter_products(&products, "");
        assert_eq!(filtered, products);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let products = fixture();
        //title
        assert_eq!(filter_products(&products, "LAWN")[0].id, 1);
        //brand
        assert_eq!(filter_products(&products, "junaid")[0].id, 2);
        //specs
        assert_eq!(filter_products(&products, "Cotton")[0].id, 2);
        assert!(filter_products(&products, "velvet").is_empty());
    }

    #[test]
    fn filtering_leaves_the_source_untouched() {
        let products = fixture();
        let _ = filter_products(&products, "dress");
        assert_eq!(products.len(), 3);
    }

    #[test]
    fn grouping_omits_empty_brands() {
        let mut products = fixture();
        products.retain(|p| p.brand != Brand::Beechtree);
        let grouped = group_by_brand(products);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, Brand::Nishat);
        assert_eq!(grouped[1].0, Brand::JunaidJamshaid);
    }

    #[test]
    fn grouping_keeps_per_brand_order() {
        let products = vec![
            model(5, "B", "", Brand::Nishat),
            model(2, "A", "", Brand::Nishat),
        ];
        let grouped = group_by_brand(products);
        let ids: Vec<i32> = grouped[0].1.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 2]);
    }
}
