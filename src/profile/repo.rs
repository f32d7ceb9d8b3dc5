use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::ProfilePatch;
use super::repo_types::UserProfile;

const COLUMNS: &str = "id, full_name, sex, birth_date, height, current_weight, activity_level, goal, \
     caloric_deficit_goal, daily_calorie_goal, protein_goal, carbs_goal, fats_goal, created_at, updated_at";

pub async fn find(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<UserProfile>> {
    let row = sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {COLUMNS} FROM user_profiles WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("select profile")?;
    Ok(row)
}

/// Applies `patch`, creating the profile row first if the user has none yet.
pub async fn update(db: &PgPool, user_id: Uuid, patch: &ProfilePatch) -> anyhow::Result<UserProfile> {
    let mut tx = db.begin().await.context("begin tx")?;

    sqlx::query("INSERT INTO user_profiles (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .context("ensure profile")?;

    let row = sqlx::query_as::<_, UserProfile>(&format!(
        r#"
        UPDATE user_profiles SET
            full_name            = COALESCE($2, full_name),
            sex                  = COALESCE($3, sex),
            birth_date           = COALESCE($4, birth_date),
            height               = COALESCE($5, height),
            current_weight       = COALESCE($6, current_weight),
            activity_level       = COALESCE($7, activity_level),
            goal                 = COALESCE($8, goal),
            caloric_deficit_goal = COALESCE($9, caloric_deficit_goal),
            daily_calorie_goal   = COALESCE($10, daily_calorie_goal),
            protein_goal         = COALESCE($11, protein_goal),
            carbs_goal           = COALESCE($12, carbs_goal),
            fats_goal            = COALESCE($13, fats_goal),
            updated_at           = now()
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(patch.full_name.as_deref())
    .bind(patch.sex.map(|s| s.as_str()))
    .bind(patch.birth_date)
    .bind(patch.height)
    .bind(patch.current_weight)
    .bind(patch.activity_level.map(|a| a.as_str()))
    .bind(patch.goal.map(|g| g.as_str()))
    .bind(patch.caloric_deficit_goal)
    .bind(patch.daily_calorie_goal)
    .bind(patch.protein_goal)
    .bind(patch.carbs_goal)
    .bind(patch.fats_goal)
    .fetch_one(&mut *tx)
    .await
    .context("update profile")?;

    tx.commit().await.context("commit tx")?;
    Ok(row)
}
