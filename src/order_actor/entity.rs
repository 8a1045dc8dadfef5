use chrono::Utc;
use rust_decimal::Decimal;

use super::actions::{OrderAction, OrderActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = (); // Orders are immutable snapshots
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    const KIND: &'static str = "orders";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from a checkout snapshot.
    ///
    /// # Errors
    /// Rejects blank customer fields, an empty item list, and a total that
    /// disagrees with the items.
    ///
    /// # Notes
    /// The order is initialized with status `pending`.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, String> {
        let customer = &payload.customer;
        for (field, value) in [
            ("name", &customer.name),
            ("phone", &customer.phone),
            ("address", &customer.address),
        ] {
            if value.trim().is_empty() {
                return Err(format!("customer {field} is required"));
            }
        }
        if payload.items.is_empty() {
            return Err("order has no items".to_string());
        }
        if payload.items.iter().any(|line| line.quantity == 0) {
            return Err("order line with zero quantity".to_string());
        }
        let expected = payload
            .items
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.checked_line_total()?))
            .ok_or_else(|| "order total overflows".to_string())?;
        if expected != payload.total {
            return Err(format!("total {} does not match items {}", payload.total, expected));
        }

        Ok(Self {
            id,
            customer: payload.customer,
            items: payload.items,
            total: payload.total,
            payment_proof: payload.payment_proof,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Err("orders are immutable; use a status update".to_string())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, String> {
        match action {
            OrderAction::UpdateStatus(next) => {
                let previous = self.status;
                if !previous.can_transition_to(next) {
                    return Err(format!("cannot move order from {previous} to {next}"));
                }
                if previous != next {
                    self.status = next;
                    self.updated_at = Some(Utc::now());
                }
                Ok(OrderActionResult::UpdateStatus(previous))
            }
        }
    }
}
