use crate::domain::{Product, ALL_CATEGORIES};

/// Where the current catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Live,
    /// The backend was unreachable; browsing uses the built-in product set.
    Fallback,
}

/// Browsing criteria. Both criteria must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            search: None,
        }
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            category: None,
            search: Some(text.into()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => product.category == category,
        };
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                [&product.name, &product.description, &product.category]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        };
        category_ok && search_ok
    }
}

/// Products and category names as fetched from the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    pub products: Vec<Product>,
    /// Category names, `All` first.
    pub categories: Vec<String>,
}

impl CatalogView {
    pub fn new(products: Vec<Product>, categories: Vec<String>) -> Self {
        Self {
            products,
            categories: with_all_first(categories),
        }
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn filter(&self, filter: &ProductFilter) -> Vec<Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect()
    }
}

/// Puts `All` at the front exactly once.
pub fn with_all_first(categories: Vec<String>) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(categories.into_iter().filter(|name| name != ALL_CATEGORIES))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog() -> CatalogView {
        CatalogView::new(
            vec![
                Product::new("p1", "Wireless Headphones", "Electronics", dec!(79.99))
                    .with_description("Noise cancelling over-ear headphones"),
                Product::new("p2", "Yoga Mat", "Sports", dec!(25.00)),
                Product::new("p3", "Phone Case", "Accessories", dec!(15.00))
                    .with_description("Slim case for wireless charging"),
            ],
            vec!["Electronics".into(), "All".into(), "Sports".into()],
        )
    }

    #[test]
    fn test_all_category_is_first_and_unique() {
        assert_eq!(catalog().categories, vec!["All", "Electronics", "Sports"]);
    }

    #[test]
    fn test_filter_by_category() {
        let ids: Vec<String> = catalog()
            .filter(&ProductFilter::category("Sports"))
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p2"]);
        assert_eq!(catalog().filter(&ProductFilter::category("All")).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let hits = catalog().filter(&ProductFilter::search("  WIRELESS "));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_filters_combine() {
        let filter = ProductFilter {
            category: Some("Accessories".into()),
            search: Some("wireless".into()),
        };
        let hits = catalog().filter(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p3");
    }
}
