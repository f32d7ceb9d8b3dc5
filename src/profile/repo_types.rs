use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::balance::Profile;
use crate::day::iso_date;

/// Row of `user_profiles`; `id` is the identity provider's user ID.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub sex: Option<String>,
    #[serde(with = "iso_date::option")]
    pub birth_date: Option<Date>,
    pub height: Option<f64>,         // cm
    pub current_weight: Option<f64>, // kg
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub caloric_deficit_goal: i32,
    pub daily_calorie_goal: i32,
    pub protein_goal: i32,
    pub carbs_goal: i32,
    pub fats_goal: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&UserProfile> for Profile {
    fn from(p: &UserProfile) -> Self {
        Self {
            sex: p.sex.as_deref().and_then(|s| s.parse().ok()),
            birth_date: p.birth_date,
            height_cm: p.height,
            weight_kg: p.current_weight,
            activity_level: p.activity_level.as_deref().and_then(|s| s.parse().ok()),
            caloric_deficit_goal: Some(p.caloric_deficit_goal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{ActivityLevel, Sex};
    use time::macros::{date, datetime};

    fn sample() -> UserProfile {
        UserProfile {
            id: Uuid::nil(),
            full_name: Some("Ana".into()),
            sex: Some("female".into()),
            birth_date: Some(date!(1990 - 04 - 12)),
            height: Some(165.0),
            current_weight: Some(62.5),
            activity_level: Some("light".into()),
            goal: Some("maintain".into()),
            caloric_deficit_goal: -300,
            daily_calorie_goal: 2000,
            protein_goal: 120,
            carbs_goal: 220,
            fats_goal: 65,
            created_at: datetime!(2024-01-01 10:00 UTC),
            updated_at: datetime!(2024-01-02 10:00 UTC),
        }
    }

    #[test]
    fn converts_to_calculator_profile() {
        let p = Profile::from(&sample());
        assert_eq!(p.sex, Some(Sex::Female));
        assert_eq!(p.activity_level, Some(ActivityLevel::Light));
        assert_eq!(p.height_cm, Some(165.0));
        assert_eq!(p.weight_kg, Some(62.5));
        assert_eq!(p.caloric_deficit_goal, Some(-300));
    }

    #[test]
    fn unknown_enum_text_becomes_unknown() {
        let mut row = sample();
        row.sex = Some("robot".into());
        row.activity_level = None;
        let p = Profile::from(&row);
        assert_eq!(p.sex, None);
        assert_eq!(p.activity_level, None);
    }

    #[test]
    fn serializes_dates_as_text() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["birth_date"], "1990-04-12");
        assert_eq!(json["created_at"], "2024-01-01T10:00:00Z");
    }
}
