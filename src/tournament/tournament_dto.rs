use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::tournament_models::{Participant, Tournament};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub game: String,
    #[validate(length(min = 1))]
    pub prize_pool: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub rules: String,
    #[validate(url)]
    pub registration_link: String,
    pub image_url: Option<String>,
    #[validate(range(min = 2, max = 10000))]
    pub max_participants: Option<i32>,
    pub registration_deadline: DateTime<Utc>,
    pub tournament_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournamentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub game: Option<String>,
    #[validate(length(min = 1))]
    pub prize_pool: Option<String>,
    pub description: Option<String>,
    pub rules: Option<String>,
    #[validate(url)]
    pub registration_link: Option<String>,
    pub image_url: Option<String>,
    #[validate(range(min = 2, max = 10000))]
    pub max_participants: Option<i32>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub tournament_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TournamentFilters {
    pub game: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Tournament detail with its participant list.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetail {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub participants: Vec<Participant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_bad_link() {
        let req: CreateTournamentRequest = serde_json::from_str(
            r#"{
                "title": "Summer Cup",
                "game": "BGMI",
                "prizePool": "$500",
                "description": "Weekend bracket",
                "rules": "Standard",
                "registrationLink": "not a url",
                "registrationDeadline": "2026-09-01T00:00:00Z",
                "tournamentDate": "2026-09-07T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_camel_case() {
        let req: CreateTournamentRequest = serde_json::from_str(
            r#"{
                "title": "Summer Cup",
                "game": "Free Fire",
                "prizePool": "$500",
                "description": "Weekend bracket",
                "rules": "Standard",
                "registrationLink": "https://forms.example.com/summer-cup",
                "maxParticipants": 64,
                "registrationDeadline": "2026-09-01T00:00:00Z",
                "tournamentDate": "2026-09-07T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.max_participants, Some(64));
    }

    #[test]
    fn test_update_request_all_fields_optional() {
        let req: UpdateTournamentRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        assert!(req.title.is_none());
    }
}
