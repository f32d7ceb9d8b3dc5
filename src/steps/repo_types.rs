use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::day::iso_date;

/// Row of `daily_steps`, at most one per user and date.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailySteps {
    pub id: Uuid,
    pub user_id: Uuid,
    pub steps_count: i32,
    pub calories_burned: i32,
    #[serde(with = "iso_date")]
    pub step_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
