//! Derived catalog views used for browsing.

mod fallback;
mod view;

pub use fallback::*;
pub use view::*;
