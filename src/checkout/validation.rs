use super::error::ValidationError;
use crate::domain::CustomerInfo;

/// Fails closed on an empty cart or any blank contact field.
pub fn validate_checkout(customer: &CustomerInfo, item_count: u32) -> Result<(), ValidationError> {
    if item_count == 0 {
        return Err(ValidationError::EmptyCart);
    }
    for (field, value) in [
        ("name", &customer.name),
        ("phone", &customer.phone),
        ("address", &customer.address),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }
    Ok(())
}
