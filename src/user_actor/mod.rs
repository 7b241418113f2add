//! User-specific store logic: validation, uniqueness, password hashing and wishlist actions.

mod actions;
pub mod entity;
pub mod error;
pub mod password;

pub use actions::*;
pub use error::*;
