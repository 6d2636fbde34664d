//! Video handlers: multipart upload, feed listing, fetch-with-view-count,
//! owner-gated deletion, per-user listings.
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::video_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::VideoResponse;
use crate::services::storage::MediaStore;

/// Cap for text parts of the upload form.
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// The original behavior keys resources by opaque strings, so a malformed
/// id is indistinguishable from an unknown one.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(what.to_string()))
}

/// Upload a video.
/// POST /api/videos (multipart: video file + title, description?, genre?, thumbnail?)
pub async fn upload_video(
    state: web::Data<AppState>,
    user_id: UserId,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let max_bytes = state.config.media.max_upload_bytes;

    let mut file: Option<(Option<String>, Vec<u8>)> = None;
    let mut title = String::new();
    let mut description = String::new();
    let mut genre = String::new();
    let mut thumbnail: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::Validation(format!("malformed multipart payload: {e}")))?;

        let field_name = field.name().to_string();
        match field_name.as_str() {
            "video" => {
                match field.content_type() {
                    Some(ct) if ct.type_() == mime::VIDEO => {}
                    Some(ct) => {
                        return Err(AppError::UnsupportedMediaType(ct.to_string()));
                    }
                    None => {
                        return Err(AppError::UnsupportedMediaType(
                            "missing content type".to_string(),
                        ));
                    }
                }

                let original_name = field
                    .content_disposition()
                    .get_filename()
                    .map(str::to_string);
                let data = read_bytes(&mut field, max_bytes).await?;
                file = Some((original_name, data));
            }
            "title" => title = read_text(&mut field).await?,
            "description" => description = read_text(&mut field).await?,
            "genre" => genre = read_text(&mut field).await?,
            "thumbnail" => thumbnail = Some(read_text(&mut field).await?),
            // Unknown parts are drained and ignored.
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| {
                        AppError::Validation(format!("malformed multipart payload: {e}"))
                    })?;
                }
            }
        }
    }

    let (original_name, data) =
        file.ok_or_else(|| AppError::Validation("video file is required".to_string()))?;
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    // Write-once to a freshly generated key; collisions are impossible
    // without locking.
    let file_name = MediaStore::generate_key(original_name.as_deref());
    state.media.save(&file_name, &data).await?;

    let video = video_repo::create_video(
        &state.pool,
        user_id.0,
        &title,
        description.trim(),
        genre.trim(),
        &file_name,
        thumbnail.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "video": VideoResponse::from(video)
    })))
}

/// List all videos, newest first, with computed like/comment counts.
/// GET /api/videos
pub async fn list_videos(state: web::Data<AppState>) -> Result<HttpResponse> {
    let videos = video_repo::list_videos(&state.pool).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "videos": videos.into_iter().map(VideoResponse::from).collect::<Vec<_>>()
    })))
}

/// Fetch one video. Viewing is defined as this call: the stored view count
/// is atomically incremented and the post-increment value returned.
/// GET /api/videos/{id}
pub async fn get_video(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;

    let video = video_repo::get_and_count_view(&state.pool, video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("video".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "video": VideoResponse::from(video)
    })))
}

/// Delete a video owned by the caller. A video owned by someone else is
/// reported exactly like a missing one.
/// DELETE /api/videos/{id}
pub async fn delete_video(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;

    let file_name = video_repo::find_owned_file_name(&state.pool, video_id, user_id.0)
        .await?
        .ok_or_else(|| AppError::NotFound("video".to_string()))?;

    // Best-effort cleanup: a failed unlink never blocks metadata deletion.
    if let Err(e) = state.media.delete(&file_name).await {
        tracing::warn!(video_id = %video_id, error = %e, "failed to remove video file");
    }

    let deleted = video_repo::delete_owned(&state.pool, video_id, user_id.0).await?;
    if !deleted {
        return Err(AppError::NotFound("video".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "video deleted" })))
}

/// List one user's videos, newest first.
/// GET /api/users/{id}/videos
pub async fn list_user_videos(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let owner_id = parse_id(&path, "user")?;
    let videos = video_repo::list_by_owner(&state.pool, owner_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "videos": videos.into_iter().map(VideoResponse::from).collect::<Vec<_>>()
    })))
}

/// List videos a user has liked, most recently liked first, each annotated
/// with the like's timestamp.
/// GET /api/users/{id}/liked-videos
pub async fn list_liked_videos(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = parse_id(&path, "user")?;
    let videos = video_repo::list_liked_by(&state.pool, user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "videos": videos.into_iter().map(VideoResponse::from).collect::<Vec<_>>()
    })))
}

/// Drain a binary field into memory, rejecting streams beyond the cap
/// before any processing happens.
async fn read_bytes(field: &mut Field, max_bytes: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes =
            chunk.map_err(|e| AppError::Validation(format!("malformed multipart payload: {e}")))?;
        if data.len() + bytes.len() > max_bytes {
            return Err(AppError::PayloadTooLarge);
        }
        data.extend_from_slice(&bytes);
    }
    Ok(data)
}

async fn read_text(field: &mut Field) -> Result<String> {
    let data = read_bytes(field, MAX_TEXT_FIELD_BYTES).await?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}
