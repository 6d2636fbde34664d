//! Static serving: uploaded media objects and the frontend entry document.
use actix_web::{web, HttpResponse};

use crate::app_state::AppState;
use crate::error::{AppError, Result};

/// Serve an uploaded media object as a byte stream.
/// GET /uploads/{file}
pub async fn serve_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let key = path.into_inner();

    let bytes = state
        .media
        .load(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("file".to_string()))?;

    let mime = mime_guess::from_path(&key).first_or_octet_stream();
    Ok(HttpResponse::Ok().content_type(mime.as_ref()).body(bytes))
}

/// Serve the single-page client's entry document.
/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../static/index.html"))
}
