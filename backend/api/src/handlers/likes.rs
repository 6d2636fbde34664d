//! Like handlers: toggle, count, per-user status.
use actix_web::{web, HttpResponse};

use crate::app_state::AppState;
use crate::db::{like_repo, video_repo};
use crate::error::{AppError, Result};
use crate::handlers::videos::parse_id;
use crate::middleware::UserId;

/// Flip the caller's like on a video. One endpoint, no target state: a
/// second call undoes the first.
/// POST /api/videos/{id}/like
pub async fn toggle_like(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;

    if !video_repo::exists(&state.pool, video_id).await? {
        return Err(AppError::NotFound("video".to_string()));
    }

    // Delete-first keeps both halves single statements; the unique
    // constraint absorbs the insert race.
    let removed = like_repo::delete_like(&state.pool, video_id, user_id.0).await?;
    let liked = if removed {
        false
    } else {
        like_repo::create_like(&state.pool, video_id, user_id.0).await?;
        true
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({ "liked": liked })))
}

/// Like count for a video; zero when the video has none or doesn't exist.
/// GET /api/videos/{id}/likes
pub async fn get_like_count(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;
    let count = like_repo::count_likes(&state.pool, video_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "count": count })))
}

/// Whether the caller has liked a video.
/// GET /api/videos/{id}/likes/me
pub async fn get_my_like(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;
    let liked = like_repo::has_liked(&state.pool, video_id, user_id.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "liked": liked })))
}
