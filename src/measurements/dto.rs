use serde::Deserialize;
use time::Date;

use crate::day::iso_date;

#[derive(Debug, Default, Deserialize)]
pub struct MeasurementBody {
    #[serde(default, with = "iso_date::option")]
    pub measurement_date: Option<Date>,
    pub weight: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub thigh: Option<f64>,
    pub arm: Option<f64>,
    pub notes: Option<String>,
}

impl MeasurementBody {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("weight", self.weight),
            ("chest", self.chest),
            ("waist", self.waist),
            ("hips", self.hips),
            ("thigh", self.thigh),
            ("arm", self.arm),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(format!("{name} must be positive"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_positive_sizes() {
        let ok: MeasurementBody =
            serde_json::from_str(r#"{"measurement_date":"2024-06-01","weight":81.2,"waist":90}"#)
                .unwrap();
        assert!(ok.validate().is_ok());

        let bad: MeasurementBody = serde_json::from_str(r#"{"arm":-3}"#).unwrap();
        assert_eq!(bad.validate().unwrap_err(), "arm must be positive");
    }
}
