use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn, Instrument};

use super::client::StorefrontClient;
use super::error::StorefrontError;
use super::messages::{ServiceResponse, StorefrontRequest, SubmissionResolved};
use crate::cart::{CartEngine, CartSummary};
use crate::catalog::{fallback_catalog, CatalogSource, CatalogView, ProductFilter};
use crate::checkout::{validate_checkout, CheckoutError, CheckoutMachine};
use crate::clients::{CategoryClient, OrderClient, ProductClient};
use crate::domain::{CustomerInfo, OrderDraft, OrderReceipt, Product, Upload};

/// Backend clients the storefront calls into.
#[derive(Clone)]
pub struct StorefrontBackend {
    pub products: ProductClient,
    pub categories: CategoryClient,
    pub orders: OrderClient,
}

struct PendingCheckout {
    attempt: u64,
    respond_to: ServiceResponse<OrderReceipt, CheckoutError>,
}

/// The storefront controller actor. Owns all shopper-side state.
pub struct StorefrontService {
    receiver: mpsc::Receiver<StorefrontRequest>,
    resolved_tx: mpsc::Sender<SubmissionResolved>,
    resolved_rx: mpsc::Receiver<SubmissionResolved>,
    backend: StorefrontBackend,
    checkout_timeout: Duration,
    catalog: CatalogView,
    filter: ProductFilter,
    cart: CartEngine,
    checkout: CheckoutMachine,
    pending: Option<PendingCheckout>,
}

impl StorefrontService {
    pub fn new(
        buffer_size: usize,
        backend: StorefrontBackend,
        cart: CartEngine,
        checkout_timeout: Duration,
    ) -> (Self, StorefrontClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (resolved_tx, resolved_rx) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            resolved_tx,
            resolved_rx,
            backend,
            checkout_timeout,
            catalog: CatalogView::default(),
            filter: ProductFilter::default(),
            cart,
            checkout: CheckoutMachine::new(),
            pending: None,
        };
        (service, StorefrontClient::new(sender))
    }

    /// Main actor loop. Stops once every client handle is dropped.
    #[instrument(name = "storefront_service", skip(self))]
    pub async fn run(mut self) {
        info!("StorefrontService starting");
        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg).await,
                    None => break,
                },
                Some(resolved) = self.resolved_rx.recv() => {
                    self.handle_submission_resolved(resolved);
                }
            }
        }
        if self.pending.is_some() {
            warn!("Stopping with an order submission in flight");
        }
        info!("StorefrontService stopped");
    }

    async fn handle(&mut self, msg: StorefrontRequest) {
        match msg {
            StorefrontRequest::LoadCatalog { respond_to } => {
                let source = self.handle_load_catalog().await;
                let _ = respond_to.send(Ok(source));
            }
            StorefrontRequest::SelectCategory { category, respond_to } => {
                self.filter.category = Some(category);
                let _ = respond_to.send(Ok(self.visible_products()));
            }
            StorefrontRequest::Search { text, respond_to } => {
                self.filter.search = Some(text);
                let _ = respond_to.send(Ok(self.visible_products()));
            }
            StorefrontRequest::VisibleProducts { respond_to } => {
                let _ = respond_to.send(Ok(self.visible_products()));
            }
            StorefrontRequest::Categories { respond_to } => {
                let _ = respond_to.send(Ok(self.catalog.categories.clone()));
            }
            StorefrontRequest::AddItem { product_id, respond_to } => {
                let _ = respond_to.send(self.handle_add_item(product_id));
            }
            StorefrontRequest::RemoveItem { product_id, respond_to } => {
                let _ = respond_to.send(self.handle_remove_item(product_id));
            }
            StorefrontRequest::SetQuantity {
                product_id,
                delta,
                respond_to,
            } => {
                let _ = respond_to.send(self.handle_set_quantity(product_id, delta));
            }
            StorefrontRequest::Cart { respond_to } => {
                let _ = respond_to.send(Ok(self.cart.summary()));
            }
            StorefrontRequest::Checkout {
                customer,
                payment_proof,
                respond_to,
            } => {
                self.handle_checkout(customer, payment_proof, respond_to);
            }
            StorefrontRequest::CheckoutState { respond_to } => {
                let _ = respond_to.send(Ok(self.checkout.state().clone()));
            }
        }
    }

    fn visible_products(&self) -> Vec<Product> {
        self.catalog.filter(&self.filter)
    }

    /// Fetches products and categories. Any backend failure switches to the
    /// built-in catalog so browsing keeps working.
    #[instrument(skip(self))]
    async fn handle_load_catalog(&mut self) -> CatalogSource {
        debug!("Processing load_catalog request");
        let fetched = async {
            let products = self.backend.products.list_products().await.map_err(|e| e.to_string())?;
            let categories = self.backend.categories.list_categories().await.map_err(|e| e.to_string())?;
            Ok::<_, String>(CatalogView::new(products, categories))
        }
        .await;

        match fetched {
            Ok(catalog) => {
                info!(products = catalog.products.len(), "Catalog loaded");
                self.catalog = catalog;
                CatalogSource::Live
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed, using built-in catalog");
                self.catalog = fallback_catalog();
                CatalogSource::Fallback
            }
        }
    }

    fn ensure_cart_editable(&self) -> Result<(), StorefrontError> {
        if self.checkout.state().is_submitting() {
            return Err(StorefrontError::CheckoutInProgress);
        }
        Ok(())
    }

    #[instrument(fields(product_id = %product_id), skip(self, product_id))]
    fn handle_add_item(&mut self, product_id: String) -> Result<CartSummary, StorefrontError> {
        self.ensure_cart_editable()?;
        let product = self
            .catalog
            .find(&product_id)
            .ok_or_else(|| StorefrontError::ProductNotFound(product_id.clone()))?;
        if let Err(e) = self.cart.add_item(product) {
            debug!(error = %e, "Item not added");
            return Err(e.into());
        }
        let summary = self.cart.summary();
        info!(item_count = summary.item_count, "Item added to cart");
        Ok(summary)
    }

    #[instrument(fields(product_id = %product_id), skip(self, product_id))]
    fn handle_remove_item(&mut self, product_id: String) -> Result<CartSummary, StorefrontError> {
        self.ensure_cart_editable()?;
        if self.cart.remove_item(&product_id) {
            info!("Item removed from cart");
        }
        Ok(self.cart.summary())
    }

    #[instrument(fields(product_id = %product_id), skip(self, product_id))]
    fn handle_set_quantity(&mut self, product_id: String, delta: i32) -> Result<CartSummary, StorefrontError> {
        self.ensure_cart_editable()?;
        match self.cart.set_quantity(&product_id, delta) {
            Some(quantity) => debug!(quantity, "Quantity changed"),
            None => debug!("Line absent after quantity change"),
        }
        Ok(self.cart.summary())
    }

    /// Validates synchronously, then hands the submission to a background
    /// task. The reply is sent when that task reports back.
    #[instrument(skip(self, customer, payment_proof, respond_to))]
    fn handle_checkout(
        &mut self,
        customer: CustomerInfo,
        payment_proof: Option<Upload>,
        respond_to: ServiceResponse<OrderReceipt, CheckoutError>,
    ) {
        if let Err(e) = self.checkout.begin() {
            warn!("Checkout already in flight");
            let _ = respond_to.send(Err(e));
            return;
        }
        if let Err(e) = validate_checkout(&customer, self.cart.item_count()) {
            warn!(error = %e, "Checkout validation failed");
            self.checkout.reject();
            let _ = respond_to.send(Err(e.into()));
            return;
        }
        let attempt = match self.checkout.submit() {
            Ok(attempt) => attempt,
            Err(e) => {
                let _ = respond_to.send(Err(e));
                return;
            }
        };

        let draft = OrderDraft {
            customer,
            items: self.cart.cart().lines().to_vec(),
            total: self.cart.total(),
            payment_proof,
        };
        self.pending = Some(PendingCheckout { attempt, respond_to });

        let orders = self.backend.orders.clone();
        info!(attempt, total = %draft.total, "Submitting order");
        spawn_submission(
            attempt,
            self.checkout_timeout,
            async move { orders.create_order(draft).await },
            self.resolved_tx.clone(),
        );
    }

    /// Applies a submission outcome. Outcomes for anything but the attempt
    /// in flight are dropped.
    #[instrument(fields(attempt = resolved.attempt), skip(self, resolved))]
    fn handle_submission_resolved(&mut self, resolved: SubmissionResolved) {
        let SubmissionResolved { attempt, outcome } = resolved;
        let order_id = outcome
            .as_ref()
            .map(|receipt| receipt.order_id.clone())
            .map_err(|e| e.clone());
        if !self.checkout.resolve(attempt, order_id) {
            warn!("Ignoring late submission outcome");
            return;
        }

        match &outcome {
            Ok(receipt) => {
                self.cart.clear();
                info!(order_id = %receipt.order_id, "Order placed, cart cleared");
                if let Some(warning) = &receipt.upload_warning {
                    warn!(%warning, "Payment proof must be sent separately");
                }
            }
            Err(e) => error!(error = %e, "Order submission failed, cart kept"),
        }

        match self.pending.take() {
            Some(pending) if pending.attempt == attempt => {
                let _ = pending.respond_to.send(outcome);
            }
            other => {
                self.pending = other;
                error!("No caller waiting for this submission");
            }
        }
    }
}

/// Runs `submission` on its own task under `timeout` and always reports an
/// outcome for `attempt`, including when the task panics or is cancelled.
fn spawn_submission<F, E>(
    attempt: u64,
    timeout: Duration,
    submission: F,
    resolved_tx: mpsc::Sender<SubmissionResolved>,
) where
    F: Future<Output = Result<OrderReceipt, E>> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    tokio::spawn(
        async move {
            let mut task = tokio::spawn(submission.in_current_span());
            let outcome = match tokio::time::timeout(timeout, &mut task).await {
                Ok(Ok(Ok(receipt))) => Ok(receipt),
                Ok(Ok(Err(e))) => Err(CheckoutError::BackendUnavailable(e.to_string())),
                Ok(Err(e)) => {
                    error!(error = %e, "Order submission task died");
                    Err(CheckoutError::BackendUnavailable("order submission failed".into()))
                }
                Err(_) => {
                    task.abort();
                    Err(CheckoutError::Timeout(timeout.as_secs()))
                }
            };
            let _ = resolved_tx.send(SubmissionResolved { attempt, outcome }).await;
        }
        .instrument(tracing::info_span!("order_submission", attempt)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{MemorySessionStore, DEFAULT_SESSION_KEY, MAX_LINE_QUANTITY};
    use crate::checkout::CheckoutState;
    use crate::mock_framework::{create_mock_client, mock_admin_client, mock_storage_client};
    use rust_decimal_macros::dec;

    fn service() -> StorefrontService {
        let (admin, _admin_rx) = mock_admin_client();
        let (storage, _storage_rx) = mock_storage_client();
        let (products, _) = create_mock_client::<Product>(4);
        let (categories, _) = create_mock_client(4);
        let (orders, _) = create_mock_client(4);
        let products = ProductClient::new(products, admin.clone(), storage.clone());
        let backend = StorefrontBackend {
            categories: CategoryClient::new(categories, admin.clone(), products.clone()),
            orders: OrderClient::new(orders, admin, storage),
            products,
        };
        let cart = CartEngine::load(Box::new(MemorySessionStore::new()), DEFAULT_SESSION_KEY);
        let (mut service, _client) = StorefrontService::new(4, backend, cart, Duration::from_secs(45));
        service.catalog = CatalogView::new(
            vec![Product::new("p1", "Lamp", "Home", dec!(40))],
            vec!["Home".into()],
        );
        service
    }

    fn receipt(order_id: &str) -> OrderReceipt {
        OrderReceipt {
            order_id: order_id.into(),
            total: dec!(40),
            item_count: 1,
            payment_proof: None,
            upload_warning: None,
        }
    }

    #[tokio::test]
    async fn test_stale_outcome_does_not_clear_cart() {
        let mut service = service();
        service.handle_add_item("p1".into()).unwrap();

        let (respond_to, response) = tokio::sync::oneshot::channel();
        service.handle_checkout(CustomerInfo::new("Dana", "555", "1 Main St"), None, respond_to);
        let attempt = match service.checkout.state() {
            CheckoutState::Submitting { attempt } => *attempt,
            other => panic!("unexpected state: {other:?}"),
        };

        service.handle_submission_resolved(SubmissionResolved {
            attempt,
            outcome: Err(CheckoutError::Timeout(45)),
        });
        assert_eq!(response.await.unwrap(), Err(CheckoutError::Timeout(45)));

        // A success for the same attempt arriving afterwards changes nothing.
        service.handle_submission_resolved(SubmissionResolved {
            attempt,
            outcome: Ok(receipt("order_late")),
        });
        assert!(matches!(service.checkout.state(), CheckoutState::Failed { .. }));
        assert_eq!(service.cart.item_count(), 1);
    }

    #[tokio::test]
    async fn test_cart_is_locked_while_submitting() {
        let mut service = service();
        service.handle_add_item("p1".into()).unwrap();
        let (respond_to, _response) = tokio::sync::oneshot::channel();
        service.handle_checkout(CustomerInfo::new("Dana", "555", "1 Main St"), None, respond_to);

        assert_eq!(
            service.handle_add_item("p1".into()),
            Err(StorefrontError::CheckoutInProgress)
        );
        assert_eq!(
            service.handle_set_quantity("p1".into(), -1),
            Err(StorefrontError::CheckoutInProgress)
        );
    }

    fn crashing_submission(attempt: u64) -> impl Future<Output = Result<OrderReceipt, String>> {
        async move {
            if attempt > 0 {
                panic!("order task crashed");
            }
            Ok(receipt("order_1"))
        }
    }

    #[tokio::test]
    async fn test_crashed_submission_fails_checkout() {
        let mut service = service();
        service.handle_add_item("p1".into()).unwrap();
        let (respond_to, response) = tokio::sync::oneshot::channel();
        service.handle_checkout(CustomerInfo::new("Dana", "555", "1 Main St"), None, respond_to);
        let attempt = match service.checkout.state() {
            CheckoutState::Submitting { attempt } => *attempt,
            other => panic!("unexpected state: {other:?}"),
        };

        let (resolved_tx, mut resolved_rx) = mpsc::channel(1);
        spawn_submission(attempt, Duration::from_secs(45), crashing_submission(attempt), resolved_tx);
        let resolved = resolved_rx.recv().await.expect("Expected an outcome");
        assert_eq!(resolved.attempt, attempt);
        service.handle_submission_resolved(resolved);

        assert!(matches!(
            response.await.unwrap(),
            Err(CheckoutError::BackendUnavailable(_))
        ));
        assert!(matches!(service.checkout.state(), CheckoutState::Failed { .. }));
        assert_eq!(service.cart.item_count(), 1);
        assert!(service.handle_add_item("p1".into()).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_submission_times_out() {
        let (resolved_tx, mut resolved_rx) = mpsc::channel(1);
        spawn_submission(
            3,
            Duration::from_secs(45),
            std::future::pending::<Result<OrderReceipt, String>>(),
            resolved_tx,
        );
        let resolved = resolved_rx.recv().await.expect("Expected an outcome");
        assert_eq!(resolved.attempt, 3);
        assert_eq!(resolved.outcome, Err(CheckoutError::Timeout(45)));
    }

    #[test]
    fn test_quantity_limit_is_reported() {
        let mut service = service();
        service.handle_add_item("p1".into()).unwrap();
        let summary = service.handle_set_quantity("p1".into(), i32::MAX).unwrap();
        assert_eq!(summary.item_count, MAX_LINE_QUANTITY);
        assert_eq!(
            service.handle_add_item("p1".into()),
            Err(StorefrontError::LimitReached("p1".into()))
        );
    }
}
