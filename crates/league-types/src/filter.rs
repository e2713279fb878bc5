use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Equality predicate applied by the data store to a list request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    pub field: String,
    pub value: String,
}

impl ListFilter {
    /// Restrict a list to records whose `field` equals `value`.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Records scheduled on `date`.
    pub fn on_date(date: NaiveDate) -> Self {
        Self::equals("date", date.format("%Y-%m-%d").to_string())
    }

    /// Model filter input in the shape the GraphQL API expects: `{ field: { eq: value } }`.
    pub fn to_graphql(&self) -> Value {
        let mut filter = Map::new();
        filter.insert(self.field.clone(), json!({ "eq": self.value }));
        Value::Object(filter)
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} eq {}", self.field, self.value)
    }
}
