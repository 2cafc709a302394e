//! Common Service Module Implementation
//!
//! Generic query facade over a relational store. The public API is defined
//! in `common-service-sdk` and re-exported here.

pub use common_service_sdk::{CommonServiceApi, CommonServiceError, Params, Row};

pub mod module;
pub use config::CommonServiceConfig;
pub use module::CommonServiceModule;

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
