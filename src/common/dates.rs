// src/common/dates.rs

// Datas do backend chegam em mais de um formato (RFC 3339, "2024-03-01 10:00:00", "2024-03-01").

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Para `#[serde(deserialize_with)]`: formato desconhecido, null ou não-string viram `None`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_the_three_backend_formats() {
        let rfc = parse_timestamp("2024-03-01T10:00:00.000000Z").unwrap();
        let spaced = parse_timestamp("2024-03-01 10:00:00").unwrap();
        let date_only = parse_timestamp("2024-03-01").unwrap();

        assert_eq!(rfc, spaced);
        assert_eq!(date_only.day(), 1);
        assert_eq!(date_only.hour(), 0);
        assert!(parse_timestamp("ontem").is_none());
    }
}
