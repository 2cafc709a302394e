//! Local client implementing the `CommonServiceApi` trait.

use std::sync::Arc;

use async_trait::async_trait;
use common_service_sdk::{CommonServiceApi, CommonServiceError, Params, Row};

use crate::domain::service::Service;

/// In-process client for the common-service module.
///
/// Delegates to the domain service and converts domain errors into the
/// SDK error type.
pub struct CommonServiceLocalClient {
    service: Arc<Service>,
}

impl CommonServiceLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommonServiceApi for CommonServiceLocalClient {
    async fn get_option(&self, params: &Params) -> Result<Vec<String>, CommonServiceError> {
        self.service.get_option(params).await.map_err(Into::into)
    }

    async fn get_follow_by_option(&self, params: &Params) -> Result<Row, CommonServiceError> {
        self.service
            .get_follow_by_option(params)
            .await
            .map_err(Into::into)
    }

    async fn sh(&self, params: &Params) -> Result<(), CommonServiceError> {
        self.service.sh(params).await.map_err(Into::into)
    }

    async fn remind_count(&self, params: &Params) -> Result<i64, CommonServiceError> {
        self.service.remind_count(params).await.map_err(Into::into)
    }

    async fn select_cal(&self, params: &Params) -> Result<Row, CommonServiceError> {
        self.service.select_cal(params).await.map_err(Into::into)
    }

    async fn select_group(&self, params: &Params) -> Result<Vec<Row>, CommonServiceError> {
        self.service.select_group(params).await.map_err(Into::into)
    }

    async fn select_value(&self, params: &Params) -> Result<Vec<Row>, CommonServiceError> {
        self.service.select_value(params).await.map_err(Into::into)
    }
}
