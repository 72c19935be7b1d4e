use learntrack_backend::{
    config::Config,
    db::connection::create_pool,
    repositories::{revoked_tokens, sessions},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let pool = create_pool(&config.database_url).await?;

    let deleted_sessions = sessions::cleanup_expired_sessions(&pool)
        .await
        .expect("cleanup expired sessions");
    if deleted_sessions > 0 {
        tracing::info!("Deleted {} expired sessions", deleted_sessions);
    }

    sqlx::query("VACUUM (ANALYZE) sessions")
        .execute(&pool)
        .await
        .expect("vacuum sessions table");

    let deleted_tokens = revoked_tokens::cleanup_expired_tokens(&pool)
        .await
        .expect("cleanup expired revoked tokens");
    if deleted_tokens > 0 {
        tracing::info!("Deleted {} expired revoked tokens", deleted_tokens);
    }

    sqlx::query("VACUUM (ANALYZE) revoked_tokens")
        .execute(&pool)
        .await
        .expect("vacuum revoked_tokens table");

    Ok(())
}
