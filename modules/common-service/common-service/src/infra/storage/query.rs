//! Typed views over the parameter bag.
//!
//! Each DAO operation reads the keys it needs from [`Params`] into one of the
//! query structs below. Table and column names are checked against a strict
//! identifier grammar before they can reach SQL text; every other value is
//! bound as a statement parameter.

use chrono::NaiveDate;
use common_service_sdk::models::Params;
use sea_orm::sea_query::Value as SqlValue;
use serde_json::Value;

use crate::domain::error::ParamError;

const MAX_IDENTIFIER_LEN: usize = 64;

/// `true` for `[A-Za-z_][A-Za-z0-9_]*` of at most 64 characters.
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    s.len() <= MAX_IDENTIFIER_LEN
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn identifier(params: &Params, key: &str) -> Result<String, ParamError> {
    match params.get(key) {
        None | Some(Value::Null) => Err(ParamError::missing(key)),
        Some(Value::String(s)) if is_valid_identifier(s) => Ok(s.clone()),
        Some(Value::String(s)) => Err(ParamError::invalid_identifier(key, s.as_str())),
        Some(_) => Err(ParamError::invalid_type(key, "a string")),
    }
}

/// Absent, `null` and `""` all mean "no filter".
fn optional_identifier(params: &Params, key: &str) -> Result<Option<String>, ParamError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(_) => identifier(params, key).map(Some),
    }
}

fn scalar(key: &str, value: &Value) -> Result<SqlValue, ParamError> {
    match value {
        Value::String(s) => Ok(s.clone().into()),
        Value::Bool(b) => Ok((*b).into()),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::from)
            .or_else(|| n.as_f64().map(SqlValue::from))
            .ok_or_else(|| ParamError::invalid_type(key, "a representable number")),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err(ParamError::invalid_type(key, "a string, number or boolean"))
        }
    }
}

fn required_scalar(params: &Params, key: &str) -> Result<SqlValue, ParamError> {
    match params.get(key) {
        None | Some(Value::Null) => Err(ParamError::missing(key)),
        Some(v) => scalar(key, v),
    }
}

fn optional_scalar(params: &Params, key: &str) -> Result<Option<SqlValue>, ParamError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(v) => scalar(key, v).map(Some),
    }
}

fn numeric(key: &str, value: &Value) -> Result<SqlValue, ParamError> {
    match value {
        Value::Number(_) => scalar(key, value),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Ok(i.into())
            } else if let Some(f) = s.parse::<f64>().ok().filter(|f| f.is_finite()) {
                Ok(f.into())
            } else {
                Err(ParamError::invalid_type(key, "a number"))
            }
        }
        _ => Err(ParamError::invalid_type(key, "a number")),
    }
}

fn date(key: &str, value: &Value) -> Result<NaiveDate, ParamError> {
    let Value::String(s) = value else {
        return Err(ParamError::invalid_type(key, "a YYYY-MM-DD string"));
    };
    let trimmed = s.trim();
    if trimmed.len() != 10 {
        return Err(ParamError::invalid_date(key, s.as_str()));
    }
    trimmed
        .parse::<NaiveDate>()
        .map_err(|_| ParamError::invalid_date(key, s.as_str()))
}

fn present<'a>(params: &'a Params, key: &str) -> Option<&'a Value> {
    match params.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(v) => Some(v),
    }
}

/// Distinct non-empty values of a column, optionally filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionQuery {
    pub table: String,
    pub column: String,
    pub level: Option<SqlValue>,
    pub parent: Option<SqlValue>,
    pub condition: Option<(String, SqlValue)>,
}

impl OptionQuery {
    pub fn from_params(params: &Params) -> Result<Self, ParamError> {
        let condition = match optional_identifier(params, "conditionColumn")? {
            Some(col) => Some((col, required_scalar(params, "conditionValue")?)),
            None => None,
        };
        Ok(Self {
            table: identifier(params, "table")?,
            column: identifier(params, "column")?,
            level: optional_scalar(params, "level")?,
            parent: optional_scalar(params, "parent")?,
            condition,
        })
    }
}

/// First row whose column equals a value.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowQuery {
    pub table: String,
    pub column: String,
    pub value: SqlValue,
}

impl FollowQuery {
    pub fn from_params(params: &Params) -> Result<Self, ParamError> {
        Ok(Self {
            table: identifier(params, "table")?,
            column: identifier(params, "column")?,
            value: required_scalar(params, "columnValue")?,
        })
    }
}

/// Audit flag update of a single row by primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditUpdate {
    pub table: String,
    pub id: SqlValue,
    pub sfsh: SqlValue,
    pub shhf: Option<SqlValue>,
}

impl AuditUpdate {
    pub fn from_params(params: &Params) -> Result<Self, ParamError> {
        Ok(Self {
            table: identifier(params, "table")?,
            id: required_scalar(params, "id")?,
            sfsh: required_scalar(params, "sfsh")?,
            shhf: match params.get("shhf") {
                None | Some(Value::Null) => None,
                Some(v) => Some(scalar("shhf", v)?),
            },
        })
    }
}

/// How `remindstart` / `remindend` are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemindKind {
    /// No range: count every row.
    All,
    /// `type = 1`: numeric bounds.
    Numeric,
    /// `type = 2`: `YYYY-MM-DD` bounds.
    Date,
}

impl RemindKind {
    fn from_params(params: &Params) -> Self {
        let code = match params.get("type") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match code {
            Some(1) => Self::Numeric,
            Some(2) => Self::Date,
            _ => Self::All,
        }
    }
}

/// Row count inside an optional inclusive range on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct RemindQuery {
    pub table: String,
    pub column: Option<String>,
    pub kind: RemindKind,
    pub start: Option<SqlValue>,
    pub end: Option<SqlValue>,
}

impl RemindQuery {
    pub fn from_params(params: &Params) -> Result<Self, ParamError> {
        let table = identifier(params, "table")?;
        let kind = RemindKind::from_params(params);

        let bound = |key: &str| -> Result<Option<SqlValue>, ParamError> {
            let Some(v) = present(params, key) else {
                return Ok(None);
            };
            match kind {
                RemindKind::All => Ok(None),
                RemindKind::Numeric => numeric(key, v).map(Some),
                RemindKind::Date => date(key, v).map(|d| Some(d.into())),
            }
        };
        let start = bound("remindstart")?;
        let end = bound("remindend")?;

        let column = if start.is_some() || end.is_some() {
            Some(identifier(params, "column")?)
        } else {
            optional_identifier(params, "column")?
        };

        Ok(Self {
            table,
            column,
            kind,
            start,
            end,
        })
    }
}

/// `sum` / `max` / `min` / `avg` / `count` over one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalQuery {
    pub table: String,
    pub column: String,
}

impl CalQuery {
    pub fn from_params(params: &Params) -> Result<Self, ParamError> {
        Ok(Self {
            table: identifier(params, "table")?,
            column: identifier(params, "column")?,
        })
    }
}

/// Row count per distinct value of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuery {
    pub table: String,
    pub column: String,
}

impl GroupQuery {
    pub fn from_params(params: &Params) -> Result<Self, ParamError> {
        Ok(Self {
            table: identifier(params, "table")?,
            column: identifier(params, "column")?,
        })
    }
}

/// Sum of one column per distinct value of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueQuery {
    pub table: String,
    pub x_column: String,
    pub y_column: String,
}

impl ValueQuery {
    pub fn from_params(params: &Params) -> Result<Self, ParamError> {
        Ok(Self {
            table: identifier(params, "table")?,
            x_column: identifier(params, "xColumn")?,
            y_column: identifier(params, "yColumn")?,
        })
    }
}
