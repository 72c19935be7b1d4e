use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::models::enrollment::{Enrollment, QuizAttempt};

const ENROLLMENT_COLUMNS: &str =
    "id, user_id, course_id, completed_modules, progress, is_completed, quiz_history, enrolled_at";

pub async fn find_enrollment(
    pool: &PgPool,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(&format!(
        "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE user_id = $1 AND course_id = $2",
    ))
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_enrollment(
    pool: &PgPool,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<Enrollment, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(&format!(
        "INSERT INTO enrollments (id, user_id, course_id) VALUES ($1, $2, $3) \
         RETURNING {ENROLLMENT_COLUMNS}",
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
}

/// Persists a recomputed progress snapshot.
pub async fn update_progress(
    pool: &PgPool,
    enrollment_id: Uuid,
    completed_modules: &[Uuid],
    progress: i32,
    is_completed: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE enrollments SET completed_modules = $1, progress = $2, is_completed = $3 \
         WHERE id = $4",
    )
    .bind(completed_modules)
    .bind(progress)
    .bind(is_completed)
    .bind(enrollment_id)
    .execute(pool)
    .await
    .map(|_| ())
}

/// Appends one attempt summary to the enrollment's embedded history log,
/// creating the enrollment row when it does not exist yet (submission
/// without prior enrollment keeps the original's upsert behavior).
pub async fn append_quiz_attempt(
    pool: &PgPool,
    user_id: Uuid,
    course_id: Uuid,
    attempt: &QuizAttempt,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO enrollments (id, user_id, course_id, quiz_history)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, course_id)
        DO UPDATE SET quiz_history = enrollments.quiz_history || EXCLUDED.quiz_history
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(course_id)
    .bind(Json(vec![attempt.clone()]))
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(&format!(
        "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE user_id = $1 ORDER BY enrolled_at",
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}
