//! `CommonServiceApi` trait definition.
//!
//! In-process contract for the common-service module. Every operation takes
//! a parameter bag and returns whatever the underlying store produced.

use async_trait::async_trait;

use crate::errors::CommonServiceError;
use crate::models::{Params, Row};

#[async_trait]
pub trait CommonServiceApi: Send + Sync {
    /// Distinct values of `column` in `table`.
    async fn get_option(&self, params: &Params) -> Result<Vec<String>, CommonServiceError>;

    /// First row of `table` where `column` equals `columnValue`.
    /// Returns an empty row when nothing matches.
    async fn get_follow_by_option(&self, params: &Params) -> Result<Row, CommonServiceError>;

    /// Set the audit flag (`sfsh`) of the row identified by `id`.
    async fn sh(&self, params: &Params) -> Result<(), CommonServiceError>;

    /// Number of rows of `table` inside the optional reminder range.
    async fn remind_count(&self, params: &Params) -> Result<i64, CommonServiceError>;

    /// `sum`, `max`, `min`, `avg` and `count` over a numeric column.
    async fn select_cal(&self, params: &Params) -> Result<Row, CommonServiceError>;

    /// Row count per distinct value of `column`.
    async fn select_group(&self, params: &Params) -> Result<Vec<Row>, CommonServiceError>;

    /// Sum of `yColumn` per distinct value of `xColumn`.
    async fn select_value(&self, params: &Params) -> Result<Vec<Row>, CommonServiceError>;
}
