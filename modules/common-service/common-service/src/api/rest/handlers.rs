use std::sync::Arc;

use axum::extract::{Extension, OriginalUri, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use common_service_sdk::models::{Params, Row};
use serde_json::{Map, Value};

use crate::domain::error::DomainError;
use crate::domain::service::Service;

use super::dto::{CountDto, FollowQuery, OptionFilterQuery, RemindRangeQuery};
use super::error::{domain_error_to_problem, Problem};

pub type ApiResult<T> = Result<T, Problem>;

fn problem_at(uri: &OriginalUri) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.0.path())
}

fn table_column(table: String, column: String) -> Params {
    Params::new().with("table", table).with("column", column)
}

pub async fn get_option(
    Extension(svc): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path((table, column)): Path<(String, String)>,
    Query(filter): Query<OptionFilterQuery>,
) -> ApiResult<Json<Vec<String>>> {
    let mut params = table_column(table, column);
    filter.apply(&mut params);
    let options = svc.get_option(&params).await.map_err(problem_at(&uri))?;
    Ok(Json(options))
}

pub async fn get_follow_by_option(
    Extension(svc): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path((table, column)): Path<(String, String)>,
    Query(query): Query<FollowQuery>,
) -> ApiResult<Json<Row>> {
    let mut params = table_column(table, column);
    query.apply(&mut params);
    let row = svc
        .get_follow_by_option(&params)
        .await
        .map_err(problem_at(&uri))?;
    Ok(Json(row))
}

/// Body fields become parameters; the path's `table` wins over a body `table`.
pub async fn sh(
    Extension(svc): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path(table): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<StatusCode> {
    let mut params = Params::from(body);
    params.insert("table", table);
    svc.sh(&params).await.map_err(problem_at(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remind_count(
    Extension(svc): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path((table, column, kind)): Path<(String, String, String)>,
    Query(range): Query<RemindRangeQuery>,
) -> ApiResult<Json<CountDto>> {
    let mut params = table_column(table, column).with("type", kind);
    range.apply(&mut params);
    let count = svc.remind_count(&params).await.map_err(problem_at(&uri))?;
    Ok(Json(CountDto { count }))
}

pub async fn select_cal(
    Extension(svc): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path((table, column)): Path<(String, String)>,
) -> ApiResult<Json<Row>> {
    let params = table_column(table, column);
    let stats = svc.select_cal(&params).await.map_err(problem_at(&uri))?;
    Ok(Json(stats))
}

pub async fn select_group(
    Extension(svc): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path((table, column)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Row>>> {
    let params = table_column(table, column);
    let groups = svc.select_group(&params).await.map_err(problem_at(&uri))?;
    Ok(Json(groups))
}

pub async fn select_value(
    Extension(svc): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path((table, x_column, y_column)): Path<(String, String, String)>,
) -> ApiResult<Json<Vec<Row>>> {
    let params = Params::new()
        .with("table", table)
        .with("xColumn", x_column)
        .with("yColumn", y_column);
    let values = svc.select_value(&params).await.map_err(problem_at(&uri))?;
    Ok(Json(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::rest::routes;
    use crate::config::CommonServiceConfig;
    use crate::domain::error::ParamError;
    use crate::domain::repo::CommonDao;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use parking_lot::Mutex;
    use serde_json::json;
    use tower::ServiceExt as _;

    /// Echoes the received bag back so tests can see how the request was mapped.
    #[derive(Default)]
    struct EchoDao {
        last: Mutex<Option<Params>>,
    }

    impl EchoDao {
        fn seen(&self, params: &Params) -> anyhow::Result<Row> {
            *self.last.lock() = Some(params.clone());
            match params.get_str("table") {
                Some("missing") => Err(ParamError::missing("column").into()),
                Some("broken") => Err(anyhow::anyhow!("no such table: broken")),
                _ => Ok(params.as_map().clone()),
            }
        }
    }

    #[async_trait]
    impl CommonDao for EchoDao {
        async fn get_option(&self, params: &Params) -> anyhow::Result<Vec<String>> {
            let mut keys: Vec<String> = self.seen(params)?.keys().cloned().collect();
            keys.sort();
            Ok(keys)
        }
        async fn get_follow_by_option(&self, params: &Params) -> anyhow::Result<Row> {
            self.seen(params)
        }
        async fn sh(&self, params: &Params) -> anyhow::Result<()> {
            self.seen(params).map(|_| ())
        }
        async fn remind_count(&self, params: &Params) -> anyhow::Result<i64> {
            Ok(i64::try_from(self.seen(params)?.len())?)
        }
        async fn select_cal(&self, params: &Params) -> anyhow::Result<Row> {
            self.seen(params)
        }
        async fn select_group(&self, params: &Params) -> anyhow::Result<Vec<Row>> {
            Ok(vec![self.seen(params)?])
        }
        async fn select_value(&self, params: &Params) -> anyhow::Result<Vec<Row>> {
            Ok(vec![self.seen(params)?])
        }
    }

    fn create_test_router() -> (Router, Arc<EchoDao>) {
        let dao = Arc::new(EchoDao::default());
        let service = Arc::new(Service::new(dao.clone()));
        let router = routes::router(service, &CommonServiceConfig::default());
        (router, dao)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_option_merges_path_and_query() {
        let (app, dao) = create_test_router();

        let (status, json) = send(
            app,
            get("/common/v1/option/areas/name?level=2&conditionColumn=kind&conditionValue=city"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!(["column", "conditionColumn", "conditionValue", "level", "table"])
        );
        let seen = dao.last.lock().clone().unwrap();
        assert_eq!(seen.get_str("table"), Some("areas"));
        assert_eq!(seen.get_str("level"), Some("2"));
        assert!(!seen.contains_key("parent"));
    }

    #[tokio::test]
    async fn test_follow_passes_column_value() {
        let (app, _dao) = create_test_router();

        let (status, json) = send(
            app,
            get("/common/v1/follow/users/username?columnValue=admin"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({ "table": "users", "column": "username", "columnValue": "admin" })
        );
    }

    #[tokio::test]
    async fn test_sh_merges_body_and_returns_no_content() {
        let (app, dao) = create_test_router();

        let request = Request::builder()
            .method("POST")
            .uri("/common/v1/sh/orders")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"id":5001,"sfsh":"yes","table":"ignored"}"#))
            .unwrap();
        let (status, json) = send(app, request).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(json, Value::Null);
        let seen = dao.last.lock().clone().unwrap();
        assert_eq!(seen.get_str("table"), Some("orders"));
        assert_eq!(seen.get("id"), Some(&json!(5001)));
    }

    #[tokio::test]
    async fn test_remind_returns_count_object() {
        let (app, dao) = create_test_router();

        let (status, json) = send(
            app,
            get("/common/v1/remind/orders/created_at/2?remindstart=2024-01-01"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "count": 4 }));
        let seen = dao.last.lock().clone().unwrap();
        assert_eq!(seen.get_str("type"), Some("2"));
    }

    #[tokio::test]
    async fn test_cal_group_value_routes() {
        let (app, _dao) = create_test_router();
        let (status, json) = send(app, get("/common/v1/cal/dishes/price")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["column"], "price");

        let (app, _dao) = create_test_router();
        let (status, json) = send(app, get("/common/v1/group/dishes/category")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["column"], "category");

        let (app, _dao) = create_test_router();
        let (status, json) = send(app, get("/common/v1/value/orders/dish/price")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["xColumn"], "dish");
        assert_eq!(json[0]["yColumn"], "price");
    }

    #[tokio::test]
    async fn test_param_error_is_problem_400() {
        let (app, _dao) = create_test_router();

        let response = app
            .oneshot(get("/common/v1/group/missing/x"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["detail"], "missing required parameter 'column'");
        assert_eq!(json["instance"], "/common/v1/group/missing/x");
    }

    #[tokio::test]
    async fn test_storage_error_is_opaque_500() {
        let (app, _dao) = create_test_router();

        let (status, json) = send(app, get("/common/v1/cal/broken/price")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!json["detail"].as_str().unwrap().contains("no such table"));
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let dao = Arc::new(EchoDao::default());
        let service = Arc::new(Service::new(dao));
        let config = CommonServiceConfig {
            route_prefix: "/api/common/".to_owned(),
        };
        let app = routes::router(service, &config);

        let (status, _json) = send(app, get("/api/common/group/dishes/category")).await;

        assert_eq!(status, StatusCode::OK);
    }
}
