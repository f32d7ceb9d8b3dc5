use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::DailySteps;

const COLUMNS: &str = "id, user_id, steps_count, calories_burned, step_date, created_at, updated_at";

pub async fn find_for_date(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Option<DailySteps>> {
    let row = sqlx::query_as::<_, DailySteps>(&format!(
        "SELECT {COLUMNS} FROM daily_steps WHERE user_id = $1 AND step_date = $2"
    ))
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await
    .context("select daily steps")?;
    Ok(row)
}

/// Creates or replaces the record for `date`.
pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    steps_count: i32,
    calories_burned: i32,
) -> anyhow::Result<DailySteps> {
    let row = sqlx::query_as::<_, DailySteps>(&format!(
        r#"
        INSERT INTO daily_steps (user_id, steps_count, calories_burned, step_date)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, step_date) DO UPDATE SET
            steps_count     = EXCLUDED.steps_count,
            calories_burned = EXCLUDED.calories_burned,
            updated_at      = now()
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(steps_count)
    .bind(calories_burned)
    .bind(date)
    .fetch_one(db)
    .await
    .context("upsert daily steps")?;
    Ok(row)
}
