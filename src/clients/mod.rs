//! Typed handles over the resource actors, plus the admin orchestration client.

#[macro_use]
mod macros;

pub mod admin_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use admin_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
