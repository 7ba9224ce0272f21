use serde_json::Value;

// Availability sources are loosely typed, so scalar attributes are read with
// truthiness rules rather than strict types. Anything unreadable falls back to false/0.

pub fn parse_bool_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false")),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn parse_number_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

// identifiers may be sent as numbers or strings; both become the decimal string
pub fn parse_id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub mod lenient_bool {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use crate::utils::json::parse_bool_value;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_bool_value(&value))
    }
}

pub mod lenient_number {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use crate::utils::json::parse_number_value;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_number_value(&value))
    }
}

pub mod lenient_text {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) if !s.is_empty() => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

pub mod item_ids {
    use serde::{Deserialize, Deserializer};
    use serde::de::Error;
    use serde_json::Value;
    use crate::utils::json::parse_id_value;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let values = Vec::<Value>::deserialize(deserializer)?;
        values.iter()
            .map(|v| parse_id_value(v).ok_or_else(|| D::Error::custom(format!("invalid item id {}", v))))
            .collect()
    }
}
