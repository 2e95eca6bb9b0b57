use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub picture: Option<String>,
    pub is_admin: bool,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection returned by auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.picture.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Profile body: the public fields plus registered tournament refs, nested
/// under a `user` key on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: ProfileUser,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    #[serde(flatten)]
    pub user: UserResponse,
    pub registered_tournaments: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Player One".to_string(),
            email: "player@example.com".to_string(),
            password_hash: Some("$2b$12$secret".to_string()),
            google_id: None,
            picture: None,
            is_admin: false,
            refresh_token: Some("some.jwt.value".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_serialization_hides_secrets() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token").is_none());
        assert!(json.get("email").is_some());
    }

    #[test]
    fn test_user_response_is_camel_case() {
        let user = sample_user();
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(json["isAdmin"], false);
        assert_eq!(json["email"], "player@example.com");
    }

    #[test]
    fn test_profile_body_nests_fields_under_user() {
        let user = sample_user();
        let body = ProfileResponse {
            user: ProfileUser {
                user: UserResponse::from(&user),
                registered_tournaments: vec![Uuid::new_v4()],
            },
        };
        let json = serde_json::to_value(body).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["user"]["email"], "player@example.com");
        assert_eq!(json["user"]["registeredTournaments"].as_array().unwrap().len(), 1);
    }
}
