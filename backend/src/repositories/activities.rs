use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::models::activity::{Activity, ActivityType, NewActivity};

const ACTIVITY_COLUMNS: &str =
    "id, user_id, course_id, module_id, event_type, occurred_at, metadata";

/// Append-only insert; events are never updated or deduplicated.
pub async fn record(pool: &PgPool, event: &NewActivity) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO activities (id, user_id, course_id, module_id, event_type, occurred_at, metadata)
        VALUES ($1, $2, $3, $4, $5, NOW(), $6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(event.user_id)
    .bind(event.course_id)
    .bind(event.module_id)
    .bind(event.event_type)
    .bind(event.metadata.clone().map(Json))
    .execute(pool)
    .await
    .map(|_| ())
}

/// Paged event history, newest first, with the unpaged total.
pub async fn query_for_user(
    pool: &PgPool,
    user_id: Uuid,
    course_id: Option<Uuid>,
    module_id: Option<Uuid>,
    event_type: Option<ActivityType>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Activity>, i64), sqlx::Error> {
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM activities \
         WHERE user_id = $1 \
           AND ($2::uuid IS NULL OR course_id = $2) \
           AND ($3::uuid IS NULL OR module_id = $3) \
           AND ($4::text IS NULL OR event_type = $4)",
    )
    .bind(user_id)
    .bind(course_id)
    .bind(module_id)
    .bind(event_type.map(|t| t.as_str()))
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, Activity>(&format!(
        "SELECT {ACTIVITY_COLUMNS} FROM activities \
         WHERE user_id = $1 \
           AND ($2::uuid IS NULL OR course_id = $2) \
           AND ($3::uuid IS NULL OR module_id = $3) \
           AND ($4::text IS NULL OR event_type = $4) \
         ORDER BY occurred_at DESC LIMIT $5 OFFSET $6",
    ))
    .bind(user_id)
    .bind(course_id)
    .bind(module_id)
    .bind(event_type.map(|t| t.as_str()))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((items, total))
}

/// Event kinds recorded for a module, newest first; feeds the module status
/// derivation.
pub async fn module_event_types(
    pool: &PgPool,
    user_id: Uuid,
    module_id: Uuid,
) -> Result<Vec<ActivityType>, sqlx::Error> {
    let rows: Vec<(ActivityType,)> = sqlx::query_as(
        "SELECT event_type FROM activities \
         WHERE user_id = $1 AND module_id = $2 ORDER BY occurred_at DESC",
    )
    .bind(user_id)
    .bind(module_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(ty,)| ty).collect())
}

/// Instant of the most recent quiz_start for the (user, module, course)
/// triple; anchors submission duration.
pub async fn latest_quiz_start(
    pool: &PgPool,
    user_id: Uuid,
    module_id: Uuid,
    course_id: Uuid,
) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    let row: Option<(DateTime<Utc>,)> = sqlx::query_as(
        "SELECT occurred_at FROM activities \
         WHERE user_id = $1 AND module_id = $2 AND course_id = $3 AND event_type = 'quiz_start' \
         ORDER BY occurred_at DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(module_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(at,)| at))
}

/// Raw event instants since `from`, for daily bucketing.
pub async fn occurred_since(
    pool: &PgPool,
    user_id: Uuid,
    course_id: Option<Uuid>,
    from: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
    let rows: Vec<(DateTime<Utc>,)> = sqlx::query_as(
        "SELECT occurred_at FROM activities \
         WHERE user_id = $1 AND occurred_at >= $2 \
           AND ($3::uuid IS NULL OR course_id = $3) \
         ORDER BY occurred_at",
    )
    .bind(user_id)
    .bind(from)
    .bind(course_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(at,)| at).collect())
}

/// Full event history oldest-first, as aggregated for the insight payload.
pub async fn list_all_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Activity>, sqlx::Error> {
    sqlx::query_as::<_, Activity>(&format!(
        "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE user_id = $1 ORDER BY occurred_at",
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}
