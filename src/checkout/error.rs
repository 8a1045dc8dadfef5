use thiserror::Error;

/// Problems the shopper must fix before an order can be submitted.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please fill in your {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("An order is already being submitted")]
    InFlight,
    #[error("Could not place your order, please try again: {0}")]
    BackendUnavailable(String),
    #[error("The store took longer than {0}s to respond, please try again")]
    Timeout(u64),
}

impl CheckoutError {
    /// Whether resubmitting the same cart may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::BackendUnavailable(_) | CheckoutError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_has_distinct_message() {
        let timeout = CheckoutError::Timeout(45).to_string();
        let backend = CheckoutError::BackendUnavailable("closed".into()).to_string();
        assert!(timeout.contains("45s"));
        assert_ne!(timeout, backend);
    }

    #[test]
    fn test_validation_is_not_retryable() {
        assert!(!CheckoutError::from(ValidationError::EmptyCart).is_retryable());
        assert!(CheckoutError::Timeout(1).is_retryable());
    }
}
