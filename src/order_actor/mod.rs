//! Order lifecycle: placement and status transitions.

pub mod entity;
pub mod error;

pub use error::*;
