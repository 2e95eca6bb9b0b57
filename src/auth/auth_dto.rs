use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::user::user_models::UserResponse;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Google sign-in payload. The SPA sends `idToken`; the legacy static pages
/// post the same value under `credential`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GoogleLoginRequest {
    #[serde(rename = "idToken", alias = "credential")]
    #[validate(length(min = 1))]
    pub id_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_bad_email() {
        let req = RegisterRequest {
            name: "Player".to_string(),
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let req = RegisterRequest {
            name: "Player".to_string(),
            email: "player@example.com".to_string(),
            password: "abc".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_google_request_accepts_both_field_names() {
        let a: GoogleLoginRequest = serde_json::from_str(r#"{"idToken": "tok"}"#).unwrap();
        let b: GoogleLoginRequest = serde_json::from_str(r#"{"credential": "tok"}"#).unwrap();
        assert_eq!(a.id_token, "tok");
        assert_eq!(b.id_token, "tok");
    }

    #[test]
    fn test_auth_response_is_camel_case() {
        let resp = AuthResponse {
            access_token: "jwt".to_string(),
            user: UserResponse {
                id: uuid::Uuid::new_v4(),
                name: "Player".to_string(),
                email: "player@example.com".to_string(),
                picture: None,
                is_admin: false,
            },
        };
        let json = serde_json::to_value(resp).unwrap();
        assert!(json.get("accessToken").is_some());
        assert!(json.get("access_token").is_none());
    }
}
