//! Category records: unique names plus display metadata.

pub mod entity;
pub mod error;

pub use error::*;
