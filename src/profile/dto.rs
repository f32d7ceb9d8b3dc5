use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::UserProfile;
use crate::balance::{ActivityLevel, Sex};
use crate::day::iso_date;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainMuscle,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::Maintain => "maintain",
            Goal::GainMuscle => "gain_muscle",
        }
    }
}

/// Partial profile update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub sex: Option<Sex>,
    #[serde(default, with = "iso_date::option")]
    pub birth_date: Option<Date>,
    pub height: Option<f64>,
    pub current_weight: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub caloric_deficit_goal: Option<i32>,
    pub daily_calorie_goal: Option<i32>,
    pub protein_goal: Option<i32>,
    pub carbs_goal: Option<i32>,
    pub fats_goal: Option<i32>,
}

impl ProfilePatch {
    pub fn validate(&self, today: Date) -> Result<(), String> {
        for (name, value) in [("height", self.height), ("current_weight", self.current_weight)] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(format!("{name} must be positive"));
                }
            }
        }
        if matches!(self.birth_date, Some(d) if d > today) {
            return Err("birth_date must not be in the future".into());
        }
        for (name, value) in [
            ("daily_calorie_goal", self.daily_calorie_goal),
            ("protein_goal", self.protein_goal),
            ("carbs_goal", self.carbs_goal),
            ("fats_goal", self.fats_goal),
        ] {
            if matches!(value, Some(v) if v < 0) {
                return Err(format!("{name} must not be negative"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Basal estimate, before any activity.
    pub tmb: i32,
    /// Basal estimate scaled by the activity level.
    pub maintenance_kcal: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 15);

    #[test]
    fn parses_partial_patch() {
        let patch: ProfilePatch = serde_json::from_str(
            r#"{"sex":"male","birth_date":"1994-03-02","activity_level":"very_active","goal":"lose_weight"}"#,
        )
        .unwrap();
        assert_eq!(patch.sex, Some(Sex::Male));
        assert_eq!(patch.birth_date, Some(date!(1994 - 03 - 02)));
        assert_eq!(patch.activity_level, Some(ActivityLevel::VeryActive));
        assert_eq!(patch.goal, Some(Goal::LoseWeight));
        assert!(patch.height.is_none());
        assert!(patch.validate(TODAY).is_ok());
    }

    #[test]
    fn rejects_unknown_enum_values() {
        assert!(serde_json::from_str::<ProfilePatch>(r#"{"activity_level":"extreme"}"#).is_err());
    }

    #[test]
    fn validates_measurements_and_dates() {
        let patch = ProfilePatch {
            height: Some(0.0),
            ..ProfilePatch::default()
        };
        assert!(patch.validate(TODAY).is_err());

        let patch = ProfilePatch {
            birth_date: Some(date!(2025 - 01 - 01)),
            ..ProfilePatch::default()
        };
        assert!(patch.validate(TODAY).is_err());

        let patch = ProfilePatch {
            fats_goal: Some(-5),
            ..ProfilePatch::default()
        };
        assert!(patch.validate(TODAY).is_err());
    }
}
