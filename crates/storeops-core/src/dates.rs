//! Serde helpers for the `YYYY/MM/DD` date format used in data files.

use chrono::NaiveDate;
use serde::{self, Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y/%m/%d";

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
}

/// Same format for `Option<NaiveDate>` fields.
pub mod optional {
    use super::FORMAT;
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|s| NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Record {
        #[serde(with = "crate::dates")]
        on: NaiveDate,
        #[serde(with = "crate::dates::optional")]
        maybe: Option<NaiveDate>,
    }

    #[test]
    fn test_slash_format_round_trip() {
        let record = Record {
            on: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            maybe: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("2024/03/05"));
        assert_eq!(serde_json::from_str::<Record>(&json).unwrap(), record);
    }

    #[test]
    fn test_rejects_dashed_format() {
        let json = r#"{"on":"2024-03-05","maybe":null}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }
}
