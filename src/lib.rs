//! Storefront back office: user, product and order collections owned by
//! resource actors, with admin reporting and catalog maintenance on top.

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod order_actor;
pub mod product_actor;
pub mod reporting;
pub mod storage;
pub mod user_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

pub use crate::app_system::{setup_tracing, StoreSystem};
pub use crate::config::AppConfig;
pub use crate::error::AdminError;
