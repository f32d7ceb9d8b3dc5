use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::dto::MeasurementBody;
use super::repo_types::Measurement;

const COLUMNS: &str = "id, user_id, measurement_date, weight, chest, waist, hips, thigh, arm, notes, \
     created_at, updated_at";

/// Newest first.
pub async fn list(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Measurement>> {
    let rows = sqlx::query_as::<_, Measurement>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM measurements
        WHERE user_id = $1
        ORDER BY measurement_date DESC, created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list measurements")?;
    Ok(rows)
}

pub async fn latest(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Measurement>> {
    let row = sqlx::query_as::<_, Measurement>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM measurements
        WHERE user_id = $1
        ORDER BY measurement_date DESC, created_at DESC
        LIMIT 1
        "#
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("latest measurement")?;
    Ok(row)
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    body: &MeasurementBody,
) -> anyhow::Result<Measurement> {
    let row = sqlx::query_as::<_, Measurement>(&format!(
        r#"
        INSERT INTO measurements (user_id, measurement_date, weight, chest, waist, hips, thigh, arm, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(date)
    .bind(body.weight)
    .bind(body.chest)
    .bind(body.waist)
    .bind(body.hips)
    .bind(body.thigh)
    .bind(body.arm)
    .bind(body.notes.as_deref())
    .fetch_one(db)
    .await
    .context("insert measurement")?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    body: &MeasurementBody,
) -> anyhow::Result<Option<Measurement>> {
    let row = sqlx::query_as::<_, Measurement>(&format!(
        r#"
        UPDATE measurements SET
            measurement_date = COALESCE($3, measurement_date),
            weight           = COALESCE($4, weight),
            chest            = COALESCE($5, chest),
            waist            = COALESCE($6, waist),
            hips             = COALESCE($7, hips),
            thigh            = COALESCE($8, thigh),
            arm              = COALESCE($9, arm),
            notes            = COALESCE($10, notes),
            updated_at       = now()
        WHERE id = $1 AND user_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(body.measurement_date)
    .bind(body.weight)
    .bind(body.chest)
    .bind(body.waist)
    .bind(body.hips)
    .bind(body.thigh)
    .bind(body.arm)
    .bind(body.notes.as_deref())
    .fetch_optional(db)
    .await
    .context("update measurement")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM measurements WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete measurement")?;
    Ok(res.rows_affected() > 0)
}
