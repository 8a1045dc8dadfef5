use crate::domain::OrderStatus;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to a new status.
    ///
    /// # Errors
    /// Fails when the transition is not allowed (see [`OrderStatus::can_transition_to`]).
    UpdateStatus(OrderStatus),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// Carries the status the order had before the update.
    UpdateStatus(OrderStatus),
}
