use std::sync::Arc;

use crate::auth::google::{GoogleClaims, GoogleVerifier};
use crate::auth::{create_access_token, create_refresh_token, hash_password, verify_password, verify_token};
use crate::error::{AppError, Result};
use crate::state::Config;
use crate::user::user_models::User;
use crate::user::user_repository::UserRepository;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    google_verifier: Arc<GoogleVerifier>,
    config: Arc<Config>,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        google_verifier: Arc<GoogleVerifier>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            user_repo,
            google_verifier,
            config,
        }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String, String)> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::Validation("User already exists".to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = self.user_repo.create(name, email, &password_hash).await?;

        self.issue_token_pair(user).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String, String)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        // Google-only accounts have no password hash; same uniform rejection.
        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;
        verify_password(password, password_hash)?;

        self.issue_token_pair(user).await
    }

    /// Verifies a Google ID token and finds or creates the matching account.
    pub async fn google_login(&self, id_token: &str) -> Result<(User, String, String)> {
        let claims: GoogleClaims = self.google_verifier.verify(id_token).await?;

        let user = match self
            .user_repo
            .find_by_google_id_or_email(&claims.sub, &claims.email)
            .await?
        {
            Some(existing) => {
                self.user_repo
                    .link_google_identity(
                        existing.id,
                        &claims.sub,
                        &claims.name,
                        claims.picture.as_deref(),
                    )
                    .await?
            }
            None => {
                self.user_repo
                    .create_google_user(
                        &claims.name,
                        &claims.email,
                        &claims.sub,
                        claims.picture.as_deref(),
                    )
                    .await?
            }
        };

        self.issue_token_pair(user).await
    }

    /// Exchanges a refresh cookie for a new access token. The presented token
    /// must match the copy stored on the user row; logout or a newer login
    /// invalidates older cookies even before they expire.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(User, String)> {
        let claims = verify_token(refresh_token, &self.config.refresh_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired refresh token".to_string()))?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AppError::Unauthorized("Invalid refresh token".to_string()));
        }

        let access_token =
            create_access_token(user.id, &self.config.jwt_secret, self.config.access_token_minutes)?;

        Ok((user, access_token))
    }

    /// Clears the stored refresh token. Tolerates invalid or stale cookies;
    /// logout never fails from the caller's point of view.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        if let Ok(claims) = verify_token(refresh_token, &self.config.refresh_secret) {
            if let Ok(user_id) = Uuid::parse_str(&claims.sub) {
                self.user_repo.clear_refresh_token(user_id).await?;
            }
        }
        Ok(())
    }

    async fn issue_token_pair(&self, user: User) -> Result<(User, String, String)> {
        let access_token =
            create_access_token(user.id, &self.config.jwt_secret, self.config.access_token_minutes)?;
        let refresh_token = create_refresh_token(
            user.id,
            &self.config.refresh_secret,
            self.config.refresh_token_days,
        )?;

        self.user_repo
            .store_refresh_token(user.id, &refresh_token)
            .await?;

        Ok((user, access_token, refresh_token))
    }
}
