use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::config::CommonServiceConfig;
use crate::domain::service::Service;

/// Routes relative to the configured prefix.
fn routes() -> Router {
    Router::new()
        .route("/option/{table}/{column}", get(handlers::get_option))
        .route("/follow/{table}/{column}", get(handlers::get_follow_by_option))
        .route("/sh/{table}", post(handlers::sh))
        .route(
            "/remind/{table}/{column}/{type}",
            get(handlers::remind_count),
        )
        .route("/cal/{table}/{column}", get(handlers::select_cal))
        .route("/group/{table}/{column}", get(handlers::select_group))
        .route(
            "/value/{table}/{x_column}/{y_column}",
            get(handlers::select_value),
        )
}

/// Builds the module router, mounted under `config.route_prefix`.
pub fn router(service: Arc<Service>, config: &CommonServiceConfig) -> Router {
    let prefix = config.normalized_prefix();
    let routes = routes().layer(Extension(service));
    if prefix.is_empty() {
        Router::new().merge(routes)
    } else {
        Router::new().nest(&prefix, routes)
    }
}
