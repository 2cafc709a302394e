//! Wiring of the common-service module.

use std::sync::Arc;

use common_service_sdk::CommonServiceApi;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::{debug, info};

use crate::config::CommonServiceConfig;
use crate::domain::repo::CommonDao;
use crate::domain::service::Service;
use crate::infra::storage::SeaOrmCommonDao;
use crate::local_client::CommonServiceLocalClient;

/// Common-service module: the service, its in-process client and its REST routes.
#[derive(Clone)]
pub struct CommonServiceModule {
    service: Arc<Service>,
    config: CommonServiceConfig,
}

impl CommonServiceModule {
    /// Builds the module over a database connection.
    #[must_use]
    pub fn init(db: DatabaseConnection, config: CommonServiceConfig) -> Self {
        info!("Initializing common_service module");
        debug!(
            route_prefix = %config.route_prefix,
            backend = ?db.get_database_backend(),
            "Loaded common_service config"
        );
        Self::with_dao(Arc::new(SeaOrmCommonDao::new(db)), config)
    }

    /// Builds the module over any DAO implementation.
    #[must_use]
    pub fn with_dao(dao: Arc<dyn CommonDao>, config: CommonServiceConfig) -> Self {
        Self {
            service: Arc::new(Service::new(dao)),
            config,
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn CommonServiceApi> {
        Arc::new(CommonServiceLocalClient::new(self.service()))
    }

    /// Merges the module routes into `router`.
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!(prefix = %self.config.route_prefix, "Registering common_service REST routes");
        router.merge(crate::api::rest::routes::router(self.service(), &self.config))
    }
}
