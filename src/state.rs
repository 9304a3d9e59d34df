use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    storage::ImageStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub images: ImageStore,
    pub auth: AuthSettings,
}

/// Signing material and lifetime for issued bearer tokens.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, config: &AppConfig) -> Self {
        Self {
            pool,
            orm,
            images: ImageStore::new(config.upload_dir.clone()),
            auth: AuthSettings {
                jwt_secret: config.jwt_secret.clone(),
                token_ttl_hours: config.token_ttl_hours,
            },
        }
    }
}
