use anyhow::Context;
use futures_util::future::try_join_all;
use sqlx::PgPool;
use time::{Date, UtcOffset};
use uuid::Uuid;

use super::model::{DailyActivityAggregate, Profile};
use super::weekly::window;
use crate::day::day_range;
use crate::{meals, profile, steps, workouts};

/// The user's calculator profile. A user without a profile row gets an empty
/// one, which yields the fallback TMB and the default deficit goal.
pub async fn load_profile(db: &PgPool, user_id: Uuid) -> anyhow::Result<Profile> {
    let row = profile::repo::find(db, user_id).await?;
    Ok(row.as_ref().map(Profile::from).unwrap_or_default())
}

/// Loads meals, workouts and steps for `date` concurrently.
pub async fn load_day_aggregate(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    offset: UtcOffset,
) -> anyhow::Result<DailyActivityAggregate> {
    let (start, end) = day_range(date, offset);
    let (meal_totals, workout_totals, steps) = tokio::try_join!(
        meals::repo::day_totals(db, user_id, start, end),
        workouts::repo::day_totals(db, user_id, start, end),
        steps::repo::find_for_date(db, user_id, date),
    )?;

    DailyActivityAggregate::from_parts(date, &meal_totals, &workout_totals, steps.as_ref())
        .with_context(|| format!("aggregate activity for {date}"))
}

/// Aggregates for the seven days ending on `end`, oldest first. Days are
/// loaded concurrently; the pool bounds how many queries actually run at once.
pub async fn load_week_aggregates(
    db: &PgPool,
    user_id: Uuid,
    end: Date,
    offset: UtcOffset,
) -> anyhow::Result<Vec<DailyActivityAggregate>> {
    try_join_all(
        window(end)
            .into_iter()
            .map(|date| load_day_aggregate(db, user_id, date, offset)),
    )
    .await
}
