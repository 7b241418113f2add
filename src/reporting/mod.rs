//! Read-only projections over collection snapshots: the admin dashboard,
//! the cross-product review feed and pagination.

pub mod dashboard;
pub mod pagination;
pub mod reviews;

pub use dashboard::*;
pub use pagination::*;
pub use reviews::*;
