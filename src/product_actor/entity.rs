use chrono::Utc;
use rust_decimal::Decimal;

use super::actions::{ProductAction, ProductActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch, MAX_PRICE};

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name is required".to_string());
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), String> {
    if price < Decimal::ZERO {
        return Err(format!("price must not be negative: {price}"));
    }
    if price > MAX_PRICE {
        return Err(format!("price must not exceed {MAX_PRICE}: {price}"));
    }
    Ok(())
}

fn validate_promotion(promotion: u8) -> Result<(), String> {
    if promotion > 100 {
        return Err(format!("promotion must be 0-100, got {promotion}"));
    }
    Ok(())
}

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    const KIND: &'static str = "products";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// Rejects a blank name or category, a negative price and promotions above 100.
    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        validate_name(&payload.name)?;
        if payload.category.trim().is_empty() {
            return Err("category is required".to_string());
        }
        validate_price(payload.price)?;
        validate_promotion(payload.promotion)?;

        let now = Utc::now();
        Ok(Self {
            id,
            name: payload.name.trim().to_string(),
            category: payload.category,
            price: payload.price,
            description: payload.description,
            image: payload.image,
            in_stock: payload.in_stock,
            promotion: payload.promotion,
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            validate_name(&name)?;
            self.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(promotion) = patch.promotion {
            validate_promotion(promotion)?;
            self.promotion = promotion;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckAvailability => Ok(ProductActionResult::CheckAvailability(self.in_stock)),
            ProductAction::SetInStock(in_stock) => {
                self.in_stock = in_stock;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::SetInStock(()))
            }
            ProductAction::SetPromotion(promotion) => {
                validate_promotion(promotion)?;
                self.promotion = promotion;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::SetPromotion(()))
            }
        }
    }
}
