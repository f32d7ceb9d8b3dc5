use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::DailySteps;
use crate::day::iso_date;

#[derive(Debug, Deserialize)]
pub struct PutSteps {
    pub steps_count: i32,
    /// Defaults to today.
    #[serde(default, with = "iso_date::option")]
    pub step_date: Option<Date>,
}

/// `steps` is `null` when nothing was recorded for the day, which is not the same as zero.
#[derive(Debug, Serialize)]
pub struct StepsResponse {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub steps: Option<DailySteps>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_body_with_and_without_date() {
        let b: PutSteps = serde_json::from_str(r#"{"steps_count":8000}"#).unwrap();
        assert_eq!(b.steps_count, 8000);
        assert!(b.step_date.is_none());

        let b: PutSteps =
            serde_json::from_str(r#"{"steps_count":0,"step_date":"2024-06-14"}"#).unwrap();
        assert_eq!(b.step_date, Some(date!(2024 - 06 - 14)));
    }

    #[test]
    fn missing_record_serializes_as_null() {
        let r = StepsResponse {
            date: date!(2024 - 06 - 14),
            steps: None,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["date"], "2024-06-14");
        assert!(json["steps"].is_null());
    }
}
