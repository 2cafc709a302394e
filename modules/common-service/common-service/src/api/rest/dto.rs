use common_service_sdk::models::Params;
use serde::{Deserialize, Serialize};

/// Optional filters of the option listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionFilterQuery {
    pub level: Option<String>,
    pub parent: Option<String>,
    pub condition_column: Option<String>,
    pub condition_value: Option<String>,
}

/// Comparison value of the follow lookup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowQuery {
    pub column_value: Option<String>,
}

/// Bounds of the reminder range.
#[derive(Debug, Default, Deserialize)]
pub struct RemindRangeQuery {
    pub remindstart: Option<String>,
    pub remindend: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountDto {
    pub count: i64,
}

fn put(params: &mut Params, key: &str, value: Option<String>) {
    if let Some(v) = value {
        params.insert(key, v);
    }
}

impl OptionFilterQuery {
    pub fn apply(self, params: &mut Params) {
        put(params, "level", self.level);
        put(params, "parent", self.parent);
        put(params, "conditionColumn", self.condition_column);
        put(params, "conditionValue", self.condition_value);
    }
}

impl FollowQuery {
    pub fn apply(self, params: &mut Params) {
        put(params, "columnValue", self.column_value);
    }
}

impl RemindRangeQuery {
    pub fn apply(self, params: &mut Params) {
        put(params, "remindstart", self.remindstart);
        put(params, "remindend", self.remindend);
    }
}
