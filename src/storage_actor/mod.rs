//! Object storage for payment proofs and product images.

pub mod entity;
pub mod error;

pub use error::*;
