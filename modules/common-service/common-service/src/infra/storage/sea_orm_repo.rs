use async_trait::async_trait;
use common_service_sdk::models::{Params, Row};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement, StatementBuilder};
use tracing::debug;

use crate::domain::repo::CommonDao;

use super::query::{
    AuditUpdate, CalQuery, FollowQuery, GroupQuery, OptionQuery, RemindQuery, ValueQuery,
};
use super::{sql, value};

/// `CommonDao` over any database SeaORM can connect to.
#[derive(Clone)]
pub struct SeaOrmCommonDao {
    db: DatabaseConnection,
}

impl SeaOrmCommonDao {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn backend(&self) -> DatabaseBackend {
        self.db.get_database_backend()
    }

    fn statement<S: StatementBuilder>(&self, op: &'static str, builder: &S) -> Statement {
        let stmt = self.backend().build(builder);
        debug!(
            op,
            backend = ?stmt.db_backend,
            sql = %stmt.sql,
            "executing statement"
        );
        stmt
    }

    async fn fetch_rows(&self, stmt: Statement) -> anyhow::Result<Vec<Row>> {
        let rows = self.db.query_all(stmt).await?;
        Ok(rows.iter().map(value::decode_row).collect())
    }

    async fn fetch_row(&self, stmt: Statement) -> anyhow::Result<Row> {
        let row = self.db.query_one(stmt).await?;
        Ok(row.as_ref().map(value::decode_row).unwrap_or_default())
    }
}

#[async_trait]
impl CommonDao for SeaOrmCommonDao {
    async fn get_option(&self, params: &Params) -> anyhow::Result<Vec<String>> {
        let q = OptionQuery::from_params(params)?;
        let stmt = self.statement("get_option", &sql::option_select(&q, self.backend()));

        let rows = self.db.query_all(stmt).await?;
        Ok(rows
            .iter()
            .filter_map(|row| value::option_text(value::decode_column(row, &q.column)))
            .collect())
    }

    async fn get_follow_by_option(&self, params: &Params) -> anyhow::Result<Row> {
        let q = FollowQuery::from_params(params)?;
        let stmt = self.statement("get_follow_by_option", &sql::follow_select(&q, self.backend()));
        self.fetch_row(stmt).await
    }

    async fn sh(&self, params: &Params) -> anyhow::Result<()> {
        let q = AuditUpdate::from_params(params)?;
        let stmt = self.statement("sh", &sql::audit_update(&q, self.backend()));

        let res = self.db.execute(stmt).await?;
        debug!(rows_affected = res.rows_affected(), "audit update applied");
        Ok(())
    }

    async fn remind_count(&self, params: &Params) -> anyhow::Result<i64> {
        let q = RemindQuery::from_params(params)?;
        let stmt = self.statement("remind_count", &sql::remind_count(&q));

        let Some(row) = self.db.query_one(stmt).await? else {
            return Ok(0);
        };
        Ok(row.try_get::<i64>("", sql::TOTAL)?)
    }

    async fn select_cal(&self, params: &Params) -> anyhow::Result<Row> {
        let q = CalQuery::from_params(params)?;
        let stmt = self.statement("select_cal", &sql::cal_select(&q));
        self.fetch_row(stmt).await
    }

    async fn select_group(&self, params: &Params) -> anyhow::Result<Vec<Row>> {
        let q = GroupQuery::from_params(params)?;
        let stmt = self.statement("select_group", &sql::group_select(&q));
        self.fetch_rows(stmt).await
    }

    async fn select_value(&self, params: &Params) -> anyhow::Result<Vec<Row>> {
        let q = ValueQuery::from_params(params)?;
        let stmt = self.statement("select_value", &sql::value_select(&q));
        self.fetch_rows(stmt).await
    }
}
