use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentGuest, state::AppState},
    auth::AuthService,
    domain::{CreateGuestRequest, Guest},
    error::{AppError, Result},
    repository::guest_repository::get_password_hash,
};

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct GuestDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub created_at: String,
}

impl From<Guest> for GuestDto {
    fn from(guest: Guest) -> Self {
        Self {
            id: guest.id,
            email: guest.email,
            full_name: guest.full_name,
            created_at: guest.created_at.to_rfc3339(),
        }
    }
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<GuestDto>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let guest = state.service_context.guest_repo
        .create(CreateGuestRequest {
            email: request.email,
            full_name: request.full_name,
            password: request.password,
        })
        .await
        .map_err(|e| match e {
            AppError::Database(msg) if msg.contains("UNIQUE") => {
                AppError::Conflict("Email already registered".to_string())
            }
            _ => e,
        })?;

    Ok((StatusCode::CREATED, Json(guest.into())))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub guest: GuestDto,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    // Get password hash from database
    let password_hash = get_password_hash(&state.service_context.db_pool, &req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    if !AuthService::verify_password(&req.password, &password_hash).await? {
        return Err(AppError::Unauthorized);
    }

    let guest = state.service_context.guest_repo
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // "Remember me" is a longer server-side session, nothing stored client-side
    let duration_hours = if req.remember_me {
        state.settings.auth.remember_me_duration_hours
    } else {
        state.settings.auth.session_duration_hours
    };

    let (_session, token) = state.service_context.auth_service
        .create_session(guest.id, duration_hours)
        .await?;

    let cookie = state.service_context.auth_service
        .create_session_cookie(&token, duration_hours, false);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            guest: guest.into(),
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(session_cookie) = jar.get("session") {
        // Invalidate session in database
        let _ = state.service_context.auth_service
            .invalidate_session(session_cookie.value())
            .await;
    }

    // Remove cookie
    let jar = jar.add(AuthService::create_logout_cookie());

    Ok((jar, StatusCode::NO_CONTENT))
}

pub async fn me(
    Extension(current): Extension<CurrentGuest>,
) -> Result<Json<GuestDto>> {
    Ok(Json(current.guest.into()))
}
