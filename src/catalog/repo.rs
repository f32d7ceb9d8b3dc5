use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::Lookup;
use super::dto::{LIST_LIMIT, SEARCH_LIMIT};
use super::repo_types::{Exercise, Food};

// Shared entries have no owner; custom ones are only visible to their owner.

pub async fn foods(db: &PgPool, user_id: Uuid, lookup: &Lookup) -> anyhow::Result<Vec<Food>> {
    let (pattern, limit) = match lookup {
        Lookup::Nothing => return Ok(Vec::new()),
        Lookup::All => (None, LIST_LIMIT),
        Lookup::Search(p) => (Some(p.as_str()), SEARCH_LIMIT),
    };
    let rows = sqlx::query_as::<_, Food>(
        r#"
        SELECT id, user_id, name, calories_per_100g, protein_per_100g, carbs_per_100g,
               fats_per_100g, is_custom, created_at
        FROM foods
        WHERE (user_id IS NULL OR user_id = $1)
          AND ($2::TEXT IS NULL OR name ILIKE $2)
        ORDER BY name ASC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(pattern)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("search foods")?;
    Ok(rows)
}

pub async fn exercises(
    db: &PgPool,
    user_id: Uuid,
    lookup: &Lookup,
) -> anyhow::Result<Vec<Exercise>> {
    let (pattern, limit) = match lookup {
        Lookup::Nothing => return Ok(Vec::new()),
        Lookup::All => (None, LIST_LIMIT),
        Lookup::Search(p) => (Some(p.as_str()), SEARCH_LIMIT),
    };
    let rows = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, calories_per_hour, category, intensity, description, is_custom,
               user_id, created_at
        FROM exercises
        WHERE (user_id IS NULL OR user_id = $1)
          AND ($2::TEXT IS NULL OR name ILIKE $2)
        ORDER BY name ASC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(pattern)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("search exercises")?;
    Ok(rows)
}
