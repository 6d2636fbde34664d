//! Comment handlers: append-only posting and oldest-first listing.
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::db::comment_repo;
use crate::error::{AppError, Result};
use crate::handlers::videos::parse_id;
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Post a comment on a video. Whitespace-only text is rejected; stored text
/// is trimmed.
/// POST /api/videos/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;

    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("comment text is required".to_string()));
    }

    let comment = comment_repo::create_comment(&state.pool, video_id, user_id.0, text)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db) = e {
                if db.is_foreign_key_violation() {
                    return AppError::NotFound("video".to_string());
                }
            }
            AppError::from(e)
        })?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "comment": comment })))
}

/// All comments on a video, ascending by creation time.
/// GET /api/videos/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;
    let comments = comment_repo::list_comments(&state.pool, video_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "comments": comments })))
}
