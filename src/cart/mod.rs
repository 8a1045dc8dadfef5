//! Cart/Pricing Engine: cart state, quantity rules, promotion-aware pricing
//! and session persistence. Nothing here touches the backend.

mod engine;
mod line;
mod pricing;
mod session;
mod summary;

pub use engine::*;
pub use line::*;
pub use pricing::*;
pub use session::*;
pub use summary::*;
