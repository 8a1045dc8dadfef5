pub mod admin;
pub mod category;
pub mod order;
pub mod product;
pub mod stored_object;

pub use admin::*;
pub use category::*;
pub use order::*;
pub use product::*;
pub use stored_object::*;
