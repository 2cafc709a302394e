use std::sync::Arc;

use common_service_sdk::models::{Params, Row};
use tracing::{debug, instrument};

use super::error::DomainError;
use super::repo::CommonDao;

/// Generic query facade.
///
/// Stateless: each call is a single delegation to the DAO. Results come back
/// as the DAO produced them and DAO errors are wrapped without translation.
#[derive(Clone)]
pub struct Service {
    dao: Arc<dyn CommonDao>,
}

impl Service {
    #[must_use]
    pub fn new(dao: Arc<dyn CommonDao>) -> Self {
        Self { dao }
    }

    #[instrument(skip_all, fields(table = params.get_str("table")))]
    pub async fn get_option(&self, params: &Params) -> Result<Vec<String>, DomainError> {
        let options = self.dao.get_option(params).await?;
        debug!(count = options.len(), "get_option done");
        Ok(options)
    }

    #[instrument(skip_all, fields(table = params.get_str("table")))]
    pub async fn get_follow_by_option(&self, params: &Params) -> Result<Row, DomainError> {
        Ok(self.dao.get_follow_by_option(params).await?)
    }

    #[instrument(skip_all, fields(table = params.get_str("table")))]
    pub async fn sh(&self, params: &Params) -> Result<(), DomainError> {
        self.dao.sh(params).await?;
        debug!("audit flag updated");
        Ok(())
    }

    #[instrument(skip_all, fields(table = params.get_str("table")))]
    pub async fn remind_count(&self, params: &Params) -> Result<i64, DomainError> {
        Ok(self.dao.remind_count(params).await?)
    }

    #[instrument(skip_all, fields(table = params.get_str("table")))]
    pub async fn select_cal(&self, params: &Params) -> Result<Row, DomainError> {
        Ok(self.dao.select_cal(params).await?)
    }

    #[instrument(skip_all, fields(table = params.get_str("table")))]
    pub async fn select_group(&self, params: &Params) -> Result<Vec<Row>, DomainError> {
        let groups = self.dao.select_group(params).await?;
        debug!(count = groups.len(), "select_group done");
        Ok(groups)
    }

    #[instrument(skip_all, fields(table = params.get_str("table")))]
    pub async fn select_value(&self, params: &Params) -> Result<Vec<Row>, DomainError> {
        let groups = self.dao.select_value(params).await?;
        debug!(count = groups.len(), "select_value done");
        Ok(groups)
    }
}
