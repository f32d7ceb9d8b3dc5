use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct NewWorkout {
    pub exercise_name: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    /// Defaults to now.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub workout_date: Option<OffsetDateTime>,
    pub notes: Option<String>,
}

impl NewWorkout {
    pub fn validate(&self) -> Result<(), String> {
        if self.exercise_name.trim().is_empty() {
            return Err("exercise_name is required".into());
        }
        if self.duration_minutes < 0 {
            return Err("duration_minutes must not be negative".into());
        }
        if self.calories_burned < 0 {
            return Err("calories_burned must not be negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_workout() {
        let w: NewWorkout = serde_json::from_str(
            r#"{"exercise_name":"Running","duration_minutes":30,"calories_burned":300}"#,
        )
        .unwrap();
        assert!(w.validate().is_ok());
        assert!(w.workout_date.is_none());

        let w: NewWorkout = serde_json::from_str(
            r#"{"exercise_name":"Running","duration_minutes":30,"calories_burned":-3}"#,
        )
        .unwrap();
        assert!(w.validate().is_err());

        let w: NewWorkout = serde_json::from_str(
            r#"{"exercise_name":"","duration_minutes":30,"calories_burned":3}"#,
        )
        .unwrap();
        assert!(w.validate().is_err());
    }
}
