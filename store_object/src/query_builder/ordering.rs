//! Sort direction for ordered queries

use std::cmp::Ordering;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Compare two serialized field values in this direction.
    ///
    /// Strings compare by byte value, numbers numerically; anything else (or
    /// a mismatch of kinds) compares equal so the sort stays stable.
    ///
    /// Byte order puts every uppercase ASCII letter before any lowercase one
    /// ("Books" < "apple"). PostgreSQL sorts text by the database collation,
    /// so the two backends agree only under a `C` collation.
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let ordering = match (a, b) {
            (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
            (Some(Value::Number(a)), Some(Value::Number(b))) => {
                let a = a.as_f64().unwrap_or(0.0);
                let b = b.as_f64().unwrap_or(0.0);
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
            _ => Ordering::Equal,
        };

        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}
