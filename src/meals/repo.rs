use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{MealPatch, NewMeal};
use super::repo_types::{Meal, MealTotals};

const COLUMNS: &str =
    "id, user_id, name, meal_type, calories, protein, carbs, fats, eaten_at, created_at, updated_at";

/// Meals eaten in `[start, end)`, newest first.
pub async fn list_for_day(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM meals
        WHERE user_id = $1 AND eaten_at >= $2 AND eaten_at < $3
        ORDER BY eaten_at DESC
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .context("list meals for day")?;
    Ok(rows)
}

pub async fn day_totals(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<MealTotals> {
    let totals = sqlx::query_as::<_, MealTotals>(
        r#"
        SELECT COUNT(*)                           AS count,
               COALESCE(SUM(calories), 0)::BIGINT AS calories,
               COALESCE(SUM(protein), 0)          AS protein,
               COALESCE(SUM(carbs), 0)            AS carbs,
               COALESCE(SUM(fats), 0)             AS fats
        FROM meals
        WHERE user_id = $1 AND eaten_at >= $2 AND eaten_at < $3
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_one(db)
    .await
    .context("sum meals for day")?;
    Ok(totals)
}

pub async fn insert(db: &PgPool, user_id: Uuid, meal: &NewMeal) -> anyhow::Result<Meal> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        r#"
        INSERT INTO meals (user_id, name, meal_type, calories, protein, carbs, fats, eaten_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, now()))
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(meal.name.trim())
    .bind(meal.meal_type.as_str())
    .bind(meal.calories)
    .bind(meal.protein)
    .bind(meal.carbs)
    .bind(meal.fats)
    .bind(meal.eaten_at)
    .fetch_one(db)
    .await
    .context("insert meal")?;
    Ok(row)
}

/// Returns `None` when the meal does not exist or belongs to someone else.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    meal_id: Uuid,
    patch: &MealPatch,
) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        r#"
        UPDATE meals SET
            name       = COALESCE($3, name),
            meal_type  = COALESCE($4, meal_type),
            calories   = COALESCE($5, calories),
            protein    = COALESCE($6, protein),
            carbs      = COALESCE($7, carbs),
            fats       = COALESCE($8, fats),
            eaten_at   = COALESCE($9, eaten_at),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(meal_id)
    .bind(user_id)
    .bind(patch.name.as_deref().map(str::trim))
    .bind(patch.meal_type.map(|t| t.as_str()))
    .bind(patch.calories)
    .bind(patch.protein)
    .bind(patch.carbs)
    .bind(patch.fats)
    .bind(patch.eaten_at)
    .fetch_optional(db)
    .await
    .context("update meal")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
        .bind(meal_id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete meal")?;
    Ok(res.rows_affected() > 0)
}
