use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use super::error::StorefrontError;
use super::messages::StorefrontRequest;
use crate::cart::CartSummary;
use crate::catalog::CatalogSource;
use crate::checkout::{CheckoutError, CheckoutState};
use crate::domain::{CustomerInfo, OrderReceipt, Product, Upload};

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

/// Handle used by the UI layer to talk to the storefront controller.
#[derive(Clone)]
pub struct StorefrontClient {
    sender: mpsc::Sender<StorefrontRequest>,
}

impl StorefrontClient {
    pub fn new(sender: mpsc::Sender<StorefrontRequest>) -> Self {
        Self { sender }
    }

    /// Submits the current cart as an order.
    #[instrument(skip(self, customer, payment_proof), fields(with_proof = payment_proof.is_some()))]
    pub async fn checkout(
        &self,
        customer: CustomerInfo,
        payment_proof: Option<Upload>,
    ) -> Result<OrderReceipt, CheckoutError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StorefrontRequest::Checkout {
                customer,
                payment_proof,
                respond_to,
            })
            .await
            .map_err(|_| CheckoutError::BackendUnavailable("storefront closed".to_string()))?;
        response
            .await
            .map_err(|_| CheckoutError::BackendUnavailable("storefront dropped the request".to_string()))?
    }
}

client_method!(StorefrontClient => fn load_catalog() -> CatalogSource as StorefrontRequest::LoadCatalog, Error = StorefrontError);
client_method!(StorefrontClient => fn select_category(category: String) -> Vec<Product> as StorefrontRequest::SelectCategory, Error = StorefrontError);
client_method!(StorefrontClient => fn search(text: String) -> Vec<Product> as StorefrontRequest::Search, Error = StorefrontError);
client_method!(StorefrontClient => fn visible_products() -> Vec<Product> as StorefrontRequest::VisibleProducts, Error = StorefrontError);
client_method!(StorefrontClient => fn categories() -> Vec<String> as StorefrontRequest::Categories, Error = StorefrontError);
client_method!(StorefrontClient => fn add_item(product_id: String) -> CartSummary as StorefrontRequest::AddItem, Error = StorefrontError);
client_method!(StorefrontClient => fn remove_item(product_id: String) -> CartSummary as StorefrontRequest::RemoveItem, Error = StorefrontError);
client_method!(StorefrontClient => fn set_quantity(product_id: String, delta: i32) -> CartSummary as StorefrontRequest::SetQuantity, Error = StorefrontError);
client_method!(StorefrontClient => fn cart() -> CartSummary as StorefrontRequest::Cart, Error = StorefrontError);
client_method!(StorefrontClient => fn checkout_state() -> CheckoutState as StorefrontRequest::CheckoutState, Error = StorefrontError);
