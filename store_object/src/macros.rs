// Bind a JSON filter value with the PostgreSQL type of its column. Strings are
// bound as `uuid` only for UUID columns.
macro_rules! bind_json_param {
    ($query:expr, $param:expr, $uuid_column:expr) => {
        match $param {
            serde_json::Value::String(s) if $uuid_column => match uuid::Uuid::parse_str(&s) {
                Ok(uuid) => $query.bind(uuid),
                Err(_) => $query.bind(s),
            },
            serde_json::Value::String(s) => $query.bind(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    $query.bind(i)
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            serde_json::Value::Bool(b) => $query.bind(b),
            serde_json::Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(other.to_string()),
        }
    };
}
