use sqlx::PgPool;
use uuid::Uuid;

use crate::models::quiz_result::QuizResult;

pub async fn insert_result(pool: &PgPool, result: &QuizResult) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO quiz_results
            (id, user_id, module_id, quiz_id, score, total_questions, passed, duration_secs, submitted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(result.id)
    .bind(result.user_id)
    .bind(result.module_id)
    .bind(result.quiz_id)
    .bind(result.score)
    .bind(result.total_questions)
    .bind(result.passed)
    .bind(result.duration_secs)
    .bind(result.submitted_at)
    .execute(pool)
    .await
    .map(|_| ())
}

/// Distinct modules (out of the given set) the user has passed at least once.
pub async fn passing_module_ids(
    pool: &PgPool,
    user_id: Uuid,
    module_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows: Vec<(Uuid,)> = sqlx::query_as(
        "SELECT DISTINCT module_id FROM quiz_results \
         WHERE user_id = $1 AND passed AND module_id = ANY($2)",
    )
    .bind(user_id)
    .bind(module_ids)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn has_passing_result(
    pool: &PgPool,
    user_id: Uuid,
    module_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM quiz_results WHERE user_id = $1 AND module_id = $2 AND passed LIMIT 1",
    )
    .bind(user_id)
    .bind(module_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

/// Most recent attempt for a module, by submission time.
pub async fn latest_for_module(
    pool: &PgPool,
    user_id: Uuid,
    module_id: Uuid,
) -> Result<Option<QuizResult>, sqlx::Error> {
    sqlx::query_as::<_, QuizResult>(
        "SELECT id, user_id, module_id, quiz_id, score, total_questions, passed, duration_secs, submitted_at \
         FROM quiz_results WHERE user_id = $1 AND module_id = $2 \
         ORDER BY submitted_at DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(module_id)
    .fetch_optional(pool)
    .await
}

/// Paged attempt history, newest first, with the unpaged total.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    module_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<QuizResult>, i64), sqlx::Error> {
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM quiz_results \
         WHERE user_id = $1 AND ($2::uuid IS NULL OR module_id = $2)",
    )
    .bind(user_id)
    .bind(module_id)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, QuizResult>(
        "SELECT id, user_id, module_id, quiz_id, score, total_questions, passed, duration_secs, submitted_at \
         FROM quiz_results \
         WHERE user_id = $1 AND ($2::uuid IS NULL OR module_id = $2) \
         ORDER BY submitted_at DESC LIMIT $3 OFFSET $4",
    )
    .bind(user_id)
    .bind(module_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((items, total))
}

/// Full history oldest-first, as aggregated for the insight payload.
pub async fn list_all_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<QuizResult>, sqlx::Error> {
    sqlx::query_as::<_, QuizResult>(
        "SELECT id, user_id, module_id, quiz_id, score, total_questions, passed, duration_secs, submitted_at \
         FROM quiz_results WHERE user_id = $1 ORDER BY submitted_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
