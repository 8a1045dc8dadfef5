use tracing::{debug, error, info, instrument, warn};

use super::admin_client::AdminClient;
use super::storage_client::{StorageClient, PAYMENTS_FOLDER};
use crate::actor_framework::ResourceClient;
use crate::domain::{AdminSession, Order, OrderCreate, OrderDraft, OrderReceipt, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

/// Client for interacting with the Order actor.
///
/// Order creation is orchestrated here: the payment proof goes to storage
/// first, then the order record is written.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    admin: AdminClient,
    storage: StorageClient,
}

impl_client_get!(OrderClient, Order, OrderError, order);

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, admin: AdminClient, storage: StorageClient) -> Self {
        Self { inner, admin, storage }
    }

    /// Records an order. A failed proof upload does not block the order; the
    /// receipt carries an `upload_warning` instead.
    #[instrument(skip(self, draft), fields(items = draft.items.len(), total = %draft.total))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<OrderReceipt, OrderError> {
        info!("Submitting order");

        // Step 1: Upload payment proof
        let (payment_proof, upload_warning) = match draft.payment_proof {
            Some(upload) => match self.storage.upload(PAYMENTS_FOLDER, upload).await {
                Ok(path) => (Some(path), None),
                Err(e) => {
                    warn!(error = %e, "Payment proof upload failed, recording order without it");
                    (None, Some(e.to_string()))
                }
            },
            None => (None, None),
        };

        // Step 2: Write the order
        let item_count = draft
            .items
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity));
        let payload = OrderCreate {
            customer: draft.customer,
            items: draft.items,
            total: draft.total,
            payment_proof: payment_proof.clone(),
        };
        match self.inner.create(payload).await {
            Ok(order_id) => {
                info!(order_id = %order_id, "Order created successfully");
                Ok(OrderReceipt {
                    order_id,
                    total: draft.total,
                    item_count,
                    payment_proof,
                    upload_warning,
                })
            }
            Err(e) => {
                error!(error = %e, "Order creation failed");
                if let Some(path) = payment_proof {
                    self.storage.discard(&path).await;
                }
                Err(e.into())
            }
        }
    }

    /// All orders, newest first.
    #[instrument(skip(self, session))]
    pub async fn list_orders(&self, session: &AdminSession) -> Result<Vec<Order>, OrderError> {
        self.admin.authorize(session).await?;
        debug!("Sending request");
        let mut orders = self.inner.list().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Returns the status the order had before the update.
    #[instrument(skip(self, session))]
    pub async fn update_order_status(
        &self,
        session: &AdminSession,
        id: String,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        self.admin.authorize(session).await?;
        match self.inner.perform_action(id, OrderAction::UpdateStatus(status)).await? {
            OrderActionResult::UpdateStatus(previous) => {
                info!(%previous, %status, "Order status updated");
                Ok(previous)
            }
        }
    }
}
