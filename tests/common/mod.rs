use sea_orm::{ConnectionTrait, Statement};
use shopfront_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    state::AppState,
};
use uuid::Uuid;

/// Database URL for integration flows, or `None` to skip them.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE personal_access_tokens, audit_logs, orders, products, categories, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    let pool = create_pool(database_url).await?;
    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "integration-secret".into(),
        token_ttl_hours: 1,
        upload_dir: std::env::temp_dir().join(format!("shopfront-it-{}", Uuid::new_v4())),
    };

    Ok(AppState::new(pool, orm, &config))
}
