use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use clipshare_api::app_state::AppState;
use clipshare_api::config::Config;
use clipshare_api::routes::configure_routes;
use clipshare_api::security::jwt::JwtKeys;
use clipshare_api::services::storage::MediaStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to PostgreSQL");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let media = MediaStore::open(&config.media.root).expect("Failed to open media store");
    let jwt = JwtKeys::new(&config.jwt.secret, config.jwt.token_ttl_hours);

    let state = web::Data::new(AppState::new(pool.clone(), jwt, media, config.clone()));

    tracing::info!(host = %config.app.host, port = config.app.port, "starting clipshare API");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(configure_routes)
    })
    .bind((config.app.host.as_str(), config.app.port))?
    .run()
    .await?;

    // Explicit store lifecycle: drain connections before exit.
    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}
