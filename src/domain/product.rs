use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Highest unit price the catalog accepts.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A catalog entry. Read-only from the cart's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub in_stock: bool,
    /// Discount percentage in `0..=100`. Zero means no promotion.
    #[serde(default)]
    pub promotion: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            description: String::new(),
            image: String::new(),
            in_stock: true,
            promotion: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_promotion(mut self, promotion: u8) -> Self {
        self.promotion = promotion;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    pub fn is_on_promotion(&self) -> bool {
        self.promotion > 0
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub in_stock: bool,
    pub promotion: u8,
}

impl From<Product> for ProductCreate {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            category: product.category,
            price: product.price,
            description: product.description,
            image: product.image,
            in_stock: product.in_stock,
            promotion: product.promotion,
        }
    }
}

/// Payload for editing a product. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub in_stock: Option<bool>,
    pub promotion: Option<u8>,
}
