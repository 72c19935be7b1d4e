use sqlx::PgPool;
use uuid::Uuid;

use crate::models::quiz::{Quiz, QuizQuestion};

pub async fn find_quiz_by_module(
    pool: &PgPool,
    module_id: Uuid,
) -> Result<Option<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(
        "SELECT id, module_id, deadline_at, maximum_duration_secs FROM quizzes \
         WHERE module_id = $1",
    )
    .bind(module_id)
    .fetch_optional(pool)
    .await
}

pub async fn quiz_questions(pool: &PgPool, quiz_id: Uuid) -> Result<Vec<QuizQuestion>, sqlx::Error> {
    sqlx::query_as::<_, QuizQuestion>(
        "SELECT id, quiz_id, position, question, options, answer FROM quiz_questions \
         WHERE quiz_id = $1 ORDER BY position",
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_quiz(
    pool: &PgPool,
    quiz: &Quiz,
    questions: &[QuizQuestion],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO quizzes (id, module_id, deadline_at, maximum_duration_secs) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(quiz.id)
    .bind(quiz.module_id)
    .bind(quiz.deadline_at)
    .bind(quiz.maximum_duration_secs)
    .execute(&mut *tx)
    .await?;

    for question in questions {
        sqlx::query(
            "INSERT INTO quiz_questions (id, quiz_id, position, question, options, answer) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(question.id)
        .bind(question.quiz_id)
        .bind(question.position)
        .bind(&question.question)
        .bind(&question.options)
        .bind(question.answer)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}
