//! Statement builders, one per DAO operation.
//!
//! Builders only assemble `sea_query` statements; the DAO renders them for
//! the backend of its connection, so quoting and placeholders follow the
//! driver.

use sea_orm::DatabaseBackend;
use sea_orm::sea_query::{
    Alias, Asterisk, ConditionalStatement, Expr, Func, Order, OrderedStatement, Query,
    SelectStatement, SimpleExpr, UpdateStatement, Value as SqlValue,
};

use super::query::{
    AuditUpdate, CalQuery, FollowQuery, GroupQuery, OptionQuery, RemindQuery, ValueQuery,
};

/// Alias of the count / sum column in group, value and remind results.
pub const TOTAL: &str = "total";

/// Aliases of the `select_cal` result columns.
pub const CAL_SUM: &str = "sum";
pub const CAL_MAX: &str = "max";
pub const CAL_MIN: &str = "min";
pub const CAL_AVG: &str = "avg";
pub const CAL_COUNT: &str = "count";

fn text_type(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::MySql => "CHAR",
        DatabaseBackend::Postgres | DatabaseBackend::Sqlite => "TEXT",
    }
}

/// `column = value`.
///
/// Text values are matched against the column cast to text: column types are
/// unknown here, and strictly typed backends reject `integer = text`.
fn equals(backend: DatabaseBackend, column: &str, value: &SqlValue) -> SimpleExpr {
    let col = Expr::col(Alias::new(column));
    if matches!(value, SqlValue::String(_)) {
        col.cast_as(Alias::new(text_type(backend))).eq(value.clone())
    } else {
        col.eq(value.clone())
    }
}

/// Empty strings are dropped by the caller after decoding, which keeps the
/// statement valid for columns of any type.
pub fn option_select(q: &OptionQuery, backend: DatabaseBackend) -> SelectStatement {
    let column = Alias::new(q.column.as_str());
    let mut stmt = Query::select();
    stmt.distinct()
        .column(column.clone())
        .from(Alias::new(q.table.as_str()))
        .and_where(Expr::col(column.clone()).is_not_null());

    if let Some(level) = &q.level {
        stmt.and_where(equals(backend, "level", level));
    }
    if let Some(parent) = &q.parent {
        stmt.and_where(equals(backend, "parent", parent));
    }
    if let Some((col, value)) = &q.condition {
        stmt.and_where(equals(backend, col, value));
    }

    stmt.order_by(column, Order::Asc);
    stmt
}

pub fn follow_select(q: &FollowQuery, backend: DatabaseBackend) -> SelectStatement {
    Query::select()
        .column(Asterisk)
        .from(Alias::new(q.table.as_str()))
        .and_where(equals(backend, &q.column, &q.value))
        .limit(1)
        .to_owned()
}

pub fn audit_update(q: &AuditUpdate, backend: DatabaseBackend) -> UpdateStatement {
    let mut stmt = Query::update();
    stmt.table(Alias::new(q.table.as_str()))
        .value(Alias::new("sfsh"), q.sfsh.clone());
    if let Some(shhf) = &q.shhf {
        stmt.value(Alias::new("shhf"), shhf.clone());
    }
    stmt.and_where(equals(backend, "id", &q.id));
    stmt
}

pub fn remind_count(q: &RemindQuery) -> SelectStatement {
    let mut stmt = Query::select();
    stmt.expr_as(Func::count(Expr::col(Asterisk)), Alias::new(TOTAL))
        .from(Alias::new(q.table.as_str()));

    if let Some(column) = &q.column {
        let column = Alias::new(column.as_str());
        if let Some(start) = &q.start {
            stmt.and_where(Expr::col(column.clone()).gte(start.clone()));
        }
        if let Some(end) = &q.end {
            stmt.and_where(Expr::col(column).lte(end.clone()));
        }
    }
    stmt
}

pub fn cal_select(q: &CalQuery) -> SelectStatement {
    let column = Alias::new(q.column.as_str());
    Query::select()
        .expr_as(Func::sum(Expr::col(column.clone())), Alias::new(CAL_SUM))
        .expr_as(Func::max(Expr::col(column.clone())), Alias::new(CAL_MAX))
        .expr_as(Func::min(Expr::col(column.clone())), Alias::new(CAL_MIN))
        .expr_as(Func::avg(Expr::col(column.clone())), Alias::new(CAL_AVG))
        .expr_as(Func::count(Expr::col(column)), Alias::new(CAL_COUNT))
        .from(Alias::new(q.table.as_str()))
        .to_owned()
}

pub fn group_select(q: &GroupQuery) -> SelectStatement {
    let column = Alias::new(q.column.as_str());
    Query::select()
        .column(column.clone())
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new(TOTAL))
        .from(Alias::new(q.table.as_str()))
        .group_by_col(column.clone())
        .order_by(column, Order::Asc)
        .to_owned()
}

pub fn value_select(q: &ValueQuery) -> SelectStatement {
    let x = Alias::new(q.x_column.as_str());
    Query::select()
        .column(x.clone())
        .expr_as(
            Func::sum(Expr::col(Alias::new(q.y_column.as_str()))),
            Alias::new(TOTAL),
        )
        .from(Alias::new(q.table.as_str()))
        .group_by_col(x.clone())
        .order_by(x, Order::Asc)
        .to_owned()
}
