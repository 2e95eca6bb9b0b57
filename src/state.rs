use std::sync::Arc;

use crate::{
    auth::auth_service::AuthService, tournament::tournament_service::TournamentService,
    user::user_repository::UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub user_repository: UserRepository,
    pub auth_service: AuthService,
    pub tournament_service: TournamentService,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub refresh_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub google_client_id: String,
    pub client_origin: String,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        // A distinct refresh secret is optional; the JWT secret is the fallback.
        let refresh_secret =
            std::env::var("REFRESH_SECRET").unwrap_or_else(|_| jwt_secret.clone());

        Self {
            jwt_secret,
            refresh_secret,
            access_token_minutes: std::env::var("ACCESS_TOKEN_MINUTES")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("ACCESS_TOKEN_MINUTES must be a number"),
            refresh_token_days: std::env::var("REFRESH_TOKEN_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("REFRESH_TOKEN_DAYS must be a number"),
            google_client_id: std::env::var("GOOGLE_CLIENT_ID")
                .expect("GOOGLE_CLIENT_ID must be set"),
            client_origin: std::env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            cookie_secure: std::env::var("APP_ENV")
                .map(|env| env == "production")
                .unwrap_or(false),
        }
    }
}
