//! Order records: validation at creation and admin status transitions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
