use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::{error::AppError, middleware::AuthUser, state::AppState};

/// Middleware to check if the authenticated user is an admin.
/// Layered after `auth_middleware`, which has already validated the token.
pub async fn admin_middleware(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Token is not valid".to_string()))?;

    if !user.is_admin {
        return Err(AppError::Forbidden(
            "Access denied. Admin rights required.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
