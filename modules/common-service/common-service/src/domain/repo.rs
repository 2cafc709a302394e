use async_trait::async_trait;
use common_service_sdk::models::{Params, Row};

/// Port for the domain layer: the generic data-access object.
///
/// One method per service operation, same input, same output. Implementations
/// decide which keys of the bag they need and report every failure through
/// `anyhow::Error`; the service hands those errors to the caller untouched.
///
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait CommonDao: Send + Sync {
    async fn get_option(&self, params: &Params) -> anyhow::Result<Vec<String>>;

    async fn get_follow_by_option(&self, params: &Params) -> anyhow::Result<Row>;

    async fn sh(&self, params: &Params) -> anyhow::Result<()>;

    async fn remind_count(&self, params: &Params) -> anyhow::Result<i64>;

    async fn select_cal(&self, params: &Params) -> anyhow::Result<Row>;

    async fn select_group(&self, params: &Params) -> anyhow::Result<Vec<Row>>;

    async fn select_value(&self, params: &Params) -> anyhow::Result<Vec<Row>>;
}
