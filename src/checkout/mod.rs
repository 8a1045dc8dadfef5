//! Checkout: customer validation and the submission state machine.

mod error;
mod state;
mod validation;

pub use error::*;
pub use state::*;
pub use validation::*;
