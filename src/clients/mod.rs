//! Typed clients for the backend resource actors.

#[macro_use]
mod macros;

mod admin_client;
mod category_client;
mod order_client;
mod product_client;
mod storage_client;

pub use admin_client::*;
pub use category_client::*;
pub use order_client::*;
pub use product_client::*;
pub use storage_client::*;
