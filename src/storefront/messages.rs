use tokio::sync::oneshot;

use super::error::StorefrontError;
use crate::cart::CartSummary;
use crate::catalog::CatalogSource;
use crate::checkout::{CheckoutError, CheckoutState};
use crate::domain::{CustomerInfo, OrderReceipt, Product, Upload};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// UI events and queries handled by the storefront controller.
#[derive(Debug)]
pub enum StorefrontRequest {
    LoadCatalog {
        respond_to: ServiceResponse<CatalogSource, StorefrontError>,
    },
    SelectCategory {
        category: String,
        respond_to: ServiceResponse<Vec<Product>, StorefrontError>,
    },
    Search {
        text: String,
        respond_to: ServiceResponse<Vec<Product>, StorefrontError>,
    },
    VisibleProducts {
        respond_to: ServiceResponse<Vec<Product>, StorefrontError>,
    },
    Categories {
        respond_to: ServiceResponse<Vec<String>, StorefrontError>,
    },
    AddItem {
        product_id: String,
        respond_to: ServiceResponse<CartSummary, StorefrontError>,
    },
    RemoveItem {
        product_id: String,
        respond_to: ServiceResponse<CartSummary, StorefrontError>,
    },
    SetQuantity {
        product_id: String,
        delta: i32,
        respond_to: ServiceResponse<CartSummary, StorefrontError>,
    },
    Cart {
        respond_to: ServiceResponse<CartSummary, StorefrontError>,
    },
    Checkout {
        customer: CustomerInfo,
        payment_proof: Option<Upload>,
        respond_to: ServiceResponse<OrderReceipt, CheckoutError>,
    },
    CheckoutState {
        respond_to: ServiceResponse<CheckoutState, StorefrontError>,
    },
}

/// Outcome of one order submission, sent back by the submitting task.
#[derive(Debug)]
pub struct SubmissionResolved {
    pub attempt: u64,
    pub outcome: Result<OrderReceipt, CheckoutError>,
}
