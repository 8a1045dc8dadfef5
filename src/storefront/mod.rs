//! Storefront controller: one actor owns the catalog, cart and checkout
//! state, and handles every UI event to completion before the next.

mod client;
mod error;
mod messages;
mod service;

pub use client::*;
pub use error::*;
pub use messages::*;
pub use service::*;
