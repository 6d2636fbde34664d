//! Shared fixtures for DB-backed integration tests.
//!
//! These tests need a PostgreSQL instance reachable through `DATABASE_URL`;
//! every test using them is marked `#[ignore]` so the default suite passes
//! without one.

use actix_web::web;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use clipshare_api::app_state::AppState;
use clipshare_api::config::{AppConfig, Config, DatabaseConfig, JwtConfig, MediaConfig};
use clipshare_api::db::user_repo;
use clipshare_api::models::User;
use clipshare_api::security::jwt::JwtKeys;
use clipshare_api::security::password;
use clipshare_api::services::storage::MediaStore;

pub const TEST_PASSWORD: &str = "pw123";

pub async fn create_test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub async fn cleanup_test_data(pool: &PgPool) {
    sqlx::query("TRUNCATE comments, likes, videos, users CASCADE")
        .execute(pool)
        .await
        .expect("failed to truncate test tables");
}

/// Application state backed by the test pool, a throwaway media directory,
/// and a fixed signing secret.
pub fn test_state(pool: PgPool) -> web::Data<AppState> {
    let media_root = tempfile::tempdir()
        .expect("failed to create media tempdir")
        .into_path();

    let config = Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            token_ttl_hours: 24,
        },
        media: MediaConfig {
            root: media_root.display().to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        },
    };

    let media = MediaStore::open(&config.media.root).expect("failed to open media store");
    let jwt = JwtKeys::new(&config.jwt.secret, config.jwt.token_ttl_hours);

    web::Data::new(AppState::new(pool, jwt, media, config))
}

pub async fn create_test_user(pool: &PgPool, email: &str, role: &str) -> User {
    let hash = password::hash_password(TEST_PASSWORD.to_string())
        .await
        .expect("failed to hash test password");
    user_repo::create_user(pool, email, &hash, role)
        .await
        .expect("failed to create test user")
}

/// Bearer header value for a user, signed with the test state's keys.
pub fn bearer(state: &web::Data<AppState>, user: &User) -> String {
    let token = state
        .jwt
        .issue(user.id, &user.email, &user.role)
        .expect("failed to issue test token");
    format!("Bearer {token}")
}

pub const MULTIPART_BOUNDARY: &str = "----clipshare-test-boundary";

/// Hand-rolled multipart body for upload tests.
pub fn multipart_upload(
    title: Option<&str>,
    file: Option<(&str, &str, &[u8])>, // (filename, content type, bytes)
) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    if let Some((filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"video\"; filename=\"{filename}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(title) = title {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"title\"\r\n\r\n\
                 {title}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body,
    )
}
