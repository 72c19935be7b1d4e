use sqlx::PgPool;
use uuid::Uuid;

use crate::models::course::{Course, CourseModuleLink, CourseModuleRef};

pub async fn list_courses(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, created_at FROM courses ORDER BY created_at",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_course(pool: &PgPool, course_id: Uuid) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, created_at FROM courses WHERE id = $1",
    )
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_course(
    pool: &PgPool,
    course: &Course,
    modules: &[CourseModuleRef],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO courses (id, title, description, created_at) VALUES ($1, $2, $3, $4)")
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.created_at)
        .execute(&mut *tx)
        .await?;

    for (position, entry) in modules.iter().enumerate() {
        sqlx::query(
            "INSERT INTO course_modules (course_id, module_id, position, ord) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(course.id)
        .bind(entry.module_id)
        .bind(position as i32)
        .bind(entry.order)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

/// The course's module list in stored (positional) order. Effective course
/// order is computed by `services::progression::order_modules`.
pub async fn course_module_links(
    pool: &PgPool,
    course_id: Uuid,
) -> Result<Vec<CourseModuleLink>, sqlx::Error> {
    sqlx::query_as::<_, CourseModuleLink>(
        "SELECT module_id, position, ord FROM course_modules \
         WHERE course_id = $1 ORDER BY position",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}
