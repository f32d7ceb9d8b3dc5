use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Row of `workouts`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exercise_name: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub workout_date: OffsetDateTime,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Default, Serialize, FromRow, PartialEq, Eq)]
pub struct WorkoutTotals {
    pub count: i64,
    pub calories_burned: i64,
    pub duration_minutes: i64,
}
