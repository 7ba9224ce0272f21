pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time.format(DATE_FMT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Serialize};
    use crate::utils::date::{serializer, DATE_FMT};

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "serializer")]
        at: NaiveDateTime,
    }

    #[tokio::test]
    async fn test_should_parse_serialized_date() {
        let at = NaiveDateTime::parse_from_str("2024-03-01T10:15:30.250", DATE_FMT).expect("should parse date");
        let json = serde_json::to_string(&Stamped { at }).expect("should serialize");
        assert!(json.contains("2024-03-01T10:15:30"));
        let loaded: Stamped = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(at, loaded.at);
    }
}
