//! Business records. Pure data structures with no actor-specific concerns.

pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use order::*;
pub use product::*;
pub use review::*;
pub use user::*;
