use thiserror::Error;

use crate::cart::CartError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorefrontError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),
    #[error("Quantity limit reached for {0}")]
    LimitReached(String),
    #[error("The cart cannot change while an order is being submitted")]
    CheckoutInProgress,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CartError> for StorefrontError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::OutOfStock(id) => StorefrontError::OutOfStock(id),
            CartError::LimitReached(id) => StorefrontError::LimitReached(id),
        }
    }
}
