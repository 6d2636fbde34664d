use crate::config::Config;
use crate::security::jwt::JwtKeys;
use crate::services::storage::MediaStore;
use sqlx::PgPool;

/// Shared application state: the store handle, token keys, and media store
/// are constructed once in `main` and injected into every handler. No
/// process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt: JwtKeys,
    pub media: MediaStore,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: PgPool, jwt: JwtKeys, media: MediaStore, config: Config) -> Self {
        Self {
            pool,
            jwt,
            media,
            config,
        }
    }
}
