//! Authentication handlers: signup, signin, current-user lookup.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{AuthResponse, UserPublic};
use crate::security::password;

const DEFAULT_ROLE: &str = "consumer";

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,

    /// Advisory only; stored and echoed, never enforced.
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Register a new account.
/// POST /api/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    let req = SignupRequest {
        email: payload.email.trim().to_string(),
        password: payload.password.clone(),
        role: payload.role.clone(),
    };
    req.validate()?;

    let role = req.role.as_deref().unwrap_or(DEFAULT_ROLE);
    let password_hash = password::hash_password(req.password).await?;

    let user = user_repo::create_user(&state.pool, &req.email, &password_hash, role)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db) = e {
                if db.is_unique_violation() {
                    return AppError::Conflict("email already registered".to_string());
                }
            }
            AppError::from(e)
        })?;

    let token = state.jwt.issue(user.id, &user.email, &user.role)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: UserPublic::from(user),
    }))
}

/// Sign in with email and password.
/// POST /api/auth/signin
///
/// Unknown email and wrong password produce the same failure, so callers
/// cannot enumerate accounts.
pub async fn signin(
    state: web::Data<AppState>,
    payload: web::Json<SigninRequest>,
) -> Result<HttpResponse> {
    let req = SigninRequest {
        email: payload.email.trim().to_string(),
        password: payload.password.clone(),
    };
    req.validate().map_err(|_| AppError::InvalidCredentials)?;

    let user = user_repo::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let verified = password::verify_password(req.password, user.password_hash.clone()).await?;
    if !verified {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.jwt.issue(user.id, &user.email, &user.role)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserPublic::from(user),
    }))
}

/// Return the authenticated user's public fields.
/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, user_id: UserId) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(&state.pool, user_id.0)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": UserPublic::from(user) })))
}
