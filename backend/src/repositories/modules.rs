use sqlx::PgPool;
use uuid::Uuid;

use crate::models::module::Module;

pub async fn insert_module(pool: &PgPool, module: &Module) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO modules (id, title, content, created_at) VALUES ($1, $2, $3, $4)")
        .bind(module.id)
        .bind(&module.title)
        .bind(&module.content)
        .bind(module.created_at)
        .execute(pool)
        .await
        .map(|_| ())
}

pub async fn find_module(pool: &PgPool, module_id: Uuid) -> Result<Option<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>("SELECT id, title, content, created_at FROM modules WHERE id = $1")
        .bind(module_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_modules_by_ids(
    pool: &PgPool,
    module_ids: &[Uuid],
) -> Result<Vec<Module>, sqlx::Error> {
    sqlx::query_as::<_, Module>(
        "SELECT id, title, content, created_at FROM modules WHERE id = ANY($1)",
    )
    .bind(module_ids)
    .fetch_all(pool)
    .await
}
