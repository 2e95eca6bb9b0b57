use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    middleware::AuthUser,
    state::{AppState, Config},
    user::user_models::{ProfileResponse, ProfileUser, UserResponse},
};
use super::{
    auth_dto::{AuthResponse, GoogleLoginRequest, LoginRequest, RegisterRequest},
    REFRESH_COOKIE_NAME,
};

fn refresh_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::days(config.refresh_token_days))
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE_NAME).path("/").build()
}

/// Register a new account with email and password
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error or user already exists"),
        (status = 503, description = "Database unavailable")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let (user, access_token, refresh_token) = state
        .auth_service
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    let jar = jar.add(refresh_cookie(refresh_token, &state.config));

    Ok((
        jar,
        (
            StatusCode::CREATED,
            Json(AuthResponse {
                access_token,
                user: UserResponse::from(&user),
            }),
        ),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 503, description = "Database unavailable")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let (user, access_token, refresh_token) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    let jar = jar.add(refresh_cookie(refresh_token, &state.config));

    Ok((
        jar,
        Json(AuthResponse {
            access_token,
            user: UserResponse::from(&user),
        }),
    ))
}

/// Sign in with a Google-issued ID token
#[utoipa::path(
    post,
    path = "/api/auth/google",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Missing token"),
        (status = 401, description = "Invalid Google token"),
        (status = 503, description = "Database or identity provider unavailable")
    ),
    tag = "auth"
)]
pub async fn google_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<GoogleLoginRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let (user, access_token, refresh_token) =
        state.auth_service.google_login(&payload.id_token).await?;

    let jar = jar.add(refresh_cookie(refresh_token, &state.config));

    Ok((
        jar,
        Json(AuthResponse {
            access_token,
            user: UserResponse::from(&user),
        }),
    ))
}

/// Exchange the refresh cookie for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "New access token", body = AuthResponse),
        (status = 401, description = "Missing, invalid, or revoked refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<AuthResponse>> {
    let refresh_token = jar
        .get(REFRESH_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Refresh token not found".to_string()))?;

    let (user, access_token) = state.auth_service.refresh(&refresh_token).await?;

    Ok(Json(AuthResponse {
        access_token,
        user: UserResponse::from(&user),
    }))
}

/// Log out: clear the refresh cookie and the stored token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out")
    ),
    tag = "auth"
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(REFRESH_COOKIE_NAME) {
        let token = cookie.value().to_string();
        // The cookie is cleared regardless of whether the token still resolves.
        if let Err(err) = state.auth_service.logout(&token).await {
            tracing::warn!("Failed to clear stored refresh token: {:?}", err);
        }
    }

    let jar = jar.remove(removal_cookie());

    (jar, Json(json!({ "message": "Logged out successfully" })))
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Token is not valid".to_string()))?;

    let registered_tournaments = state
        .user_repository
        .registered_tournament_ids(user_id)
        .await?;

    Ok(Json(ProfileResponse {
        user: ProfileUser {
            user: UserResponse::from(&user),
            registered_tournaments,
        },
    }))
}
