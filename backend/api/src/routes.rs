//! Route configuration.
//!
//! Public reads are registered ahead of a nested scope that wraps every
//! mutating endpoint with the bearer-token precondition.

use crate::handlers::{auth, comments, files, health, likes, videos};
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

/// Configure all routes for the application.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(files::index))
        .route("/uploads/{file}", web::get().to(files::serve_upload))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .configure(api::auth)
                .configure(api::videos)
                .configure(api::users),
        );
}

mod api {
    use super::*;

    pub fn auth(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/auth")
                .route("/signup", web::post().to(auth::signup))
                .route("/signin", web::post().to(auth::signin))
                .service(
                    web::scope("")
                        .wrap(JwtAuthMiddleware)
                        .route("/me", web::get().to(auth::me)),
                ),
        );
    }

    pub fn videos(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/videos")
                .route("", web::get().to(videos::list_videos))
                .route("/{id}", web::get().to(videos::get_video))
                .route("/{id}/likes", web::get().to(likes::get_like_count))
                .route("/{id}/comments", web::get().to(comments::list_comments))
                .service(
                    web::scope("")
                        .wrap(JwtAuthMiddleware)
                        .route("", web::post().to(videos::upload_video))
                        .route("/{id}", web::delete().to(videos::delete_video))
                        .route("/{id}/like", web::post().to(likes::toggle_like))
                        .route("/{id}/likes/me", web::get().to(likes::get_my_like))
                        .route("/{id}/comments", web::post().to(comments::create_comment)),
                ),
        );
    }

    pub fn users(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/users")
                .route("/{id}/videos", web::get().to(videos::list_user_videos))
                .route("/{id}/liked-videos", web::get().to(videos::list_liked_videos)),
        );
    }
}
