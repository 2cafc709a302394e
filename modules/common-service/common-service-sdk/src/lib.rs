//! Common Service SDK
//!
//! This crate provides the public API for the common-service module:
//! - `CommonServiceApi` trait for in-process consumers
//! - Model types (`Params`, `Row`)
//! - Error type (`CommonServiceError`)
//!
//! ```ignore
//! let params = Params::new().with("table", "users").with("column", "role");
//! let roles = client.get_option(&params).await?;
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::CommonServiceApi;
pub use errors::CommonServiceError;
pub use models::{Params, Row};
