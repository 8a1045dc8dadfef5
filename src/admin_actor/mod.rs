//! Administrator accounts: salted credential checks and session tokens.

mod actions;
pub mod credentials;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
