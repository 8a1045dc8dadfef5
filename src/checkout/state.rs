use super::error::CheckoutError;

/// `Idle -> Validating -> Submitting -> {Cleared | Failed}`
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    Idle,
    Validating,
    Submitting { attempt: u64 },
    Cleared { order_id: String },
    Failed { attempt: u64, error: CheckoutError },
}

impl CheckoutState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, CheckoutState::Submitting { .. })
    }
}

/// Tracks the checkout state and hands out attempt numbers so that a
/// resolution arriving after the machine has moved on is ignored.
#[derive(Debug)]
pub struct CheckoutMachine {
    state: CheckoutState,
    last_attempt: u64,
}

impl Default for CheckoutMachine {
    fn default() -> Self {
        Self {
            state: CheckoutState::Idle,
            last_attempt: 0,
        }
    }
}

impl CheckoutMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Enters `Validating`. Refused while a submission is in flight.
    pub fn begin(&mut self) -> Result<(), CheckoutError> {
        if self.state.is_submitting() {
            return Err(CheckoutError::InFlight);
        }
        self.state = CheckoutState::Validating;
        Ok(())
    }

    /// Validation failed: back to `Idle`.
    pub fn reject(&mut self) {
        if self.state == CheckoutState::Validating {
            self.state = CheckoutState::Idle;
        }
    }

    /// `Validating -> Submitting`. Returns the new attempt number.
    pub fn submit(&mut self) -> Result<u64, CheckoutError> {
        match self.state {
            CheckoutState::Validating => {
                self.last_attempt += 1;
                self.state = CheckoutState::Submitting {
                    attempt: self.last_attempt,
                };
                Ok(self.last_attempt)
            }
            CheckoutState::Submitting { .. } => Err(CheckoutError::InFlight),
            _ => Err(CheckoutError::BackendUnavailable(
                "checkout was not validated".to_string(),
            )),
        }
    }

    /// Applies the outcome of `attempt`. Returns `false`, leaving the state
    /// untouched, when `attempt` is not the submission in flight.
    pub fn resolve(&mut self, attempt: u64, outcome: Result<String, CheckoutError>) -> bool {
        match self.state {
            CheckoutState::Submitting { attempt: current } if current == attempt => {
                self.state = match outcome {
                    Ok(order_id) => CheckoutState::Cleared { order_id },
                    Err(error) => CheckoutState::Failed { attempt, error },
                };
                true
            }
            _ => false,
        }
    }
}
