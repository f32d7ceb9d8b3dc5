use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::NewWorkout;
use super::repo_types::{Workout, WorkoutTotals};

const COLUMNS: &str = "id, user_id, exercise_name, duration_minutes, calories_burned, workout_date, \
     notes, created_at, updated_at";

pub async fn list_for_day(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<Workout>> {
    let rows = sqlx::query_as::<_, Workout>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM workouts
        WHERE user_id = $1 AND workout_date >= $2 AND workout_date < $3
        ORDER BY workout_date DESC
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .context("list workouts for day")?;
    Ok(rows)
}

pub async fn day_totals(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<WorkoutTotals> {
    let totals = sqlx::query_as::<_, WorkoutTotals>(
        r#"
        SELECT COUNT(*)                                   AS count,
               COALESCE(SUM(calories_burned), 0)::BIGINT  AS calories_burned,
               COALESCE(SUM(duration_minutes), 0)::BIGINT AS duration_minutes
        FROM workouts
        WHERE user_id = $1 AND workout_date >= $2 AND workout_date < $3
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_one(db)
    .await
    .context("sum workouts for day")?;
    Ok(totals)
}

pub async fn insert(db: &PgPool, user_id: Uuid, workout: &NewWorkout) -> anyhow::Result<Workout> {
    let row = sqlx::query_as::<_, Workout>(&format!(
        r#"
        INSERT INTO workouts (user_id, exercise_name, duration_minutes, calories_burned, workout_date, notes)
        VALUES ($1, $2, $3, $4, COALESCE($5, now()), $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(workout.exercise_name.trim())
    .bind(workout.duration_minutes)
    .bind(workout.calories_burned)
    .bind(workout.workout_date)
    .bind(workout.notes.as_deref())
    .fetch_one(db)
    .await
    .context("insert workout")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, workout_id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
        .bind(workout_id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete workout")?;
    Ok(res.rows_affected() > 0)
}
