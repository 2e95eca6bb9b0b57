use uuid::Uuid;

use crate::error::{AppError, Result};
use super::{
    tournament_dto::{CreateTournamentRequest, TournamentDetail, UpdateTournamentRequest},
    tournament_models::{Game, Tournament, TournamentStatus},
    tournament_repository::{ListFilters, RegistrationOutcome, TournamentRepository},
};

const DEFAULT_MAX_PARTICIPANTS: i32 = 100;

#[derive(Clone)]
pub struct TournamentService {
    repo: TournamentRepository,
}

impl TournamentService {
    pub fn new(repo: TournamentRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        game: Option<String>,
        status: Option<String>,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Tournament>, i64)> {
        // Filters must name a known game/status; a typo would otherwise just
        // return an empty page and hide the mistake.
        if let Some(ref game) = game {
            parse_game(game)?;
        }
        if let Some(ref status) = status {
            parse_status(status)?;
        }

        // Paging is normalized at the HTTP boundary; values arrive effective.
        let filters = ListFilters {
            game,
            status,
            page,
            limit,
        };

        self.repo.find_all(&filters).await
    }

    pub async fn get(&self, tournament_id: Uuid) -> Result<TournamentDetail> {
        let tournament = self
            .repo
            .find_by_id(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        let participants = self.repo.participants(tournament_id).await?;

        Ok(TournamentDetail {
            tournament,
            participants,
        })
    }

    pub async fn create(
        &self,
        created_by: Uuid,
        payload: CreateTournamentRequest,
    ) -> Result<Tournament> {
        let game = parse_game(&payload.game)?;

        if payload.registration_deadline > payload.tournament_date {
            return Err(AppError::Validation(
                "Registration deadline must not be after the tournament date".to_string(),
            ));
        }

        self.repo
            .create(
                &payload.title,
                &game.to_string(),
                &payload.prize_pool,
                &payload.description,
                &payload.rules,
                &payload.registration_link,
                payload.image_url.as_deref().unwrap_or(""),
                payload.max_participants.unwrap_or(DEFAULT_MAX_PARTICIPANTS),
                payload.registration_deadline,
                payload.tournament_date,
                created_by,
            )
            .await
    }

    pub async fn update(
        &self,
        tournament_id: Uuid,
        payload: UpdateTournamentRequest,
    ) -> Result<Tournament> {
        let game = payload
            .game
            .as_deref()
            .map(parse_game)
            .transpose()?
            .map(|g| g.to_string());
        let status = payload
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?
            .map(|s| s.to_string());

        // Capacity cannot drop below the seats already taken; the schema's
        // CHECK constraint backs this against concurrent registrations.
        if let Some(new_max) = payload.max_participants {
            let current = self
                .repo
                .find_by_id(tournament_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

            if new_max < current.current_participants {
                return Err(AppError::Validation(
                    "maxParticipants cannot be lower than the current participant count"
                        .to_string(),
                ));
            }
        }

        self.repo
            .update(
                tournament_id,
                payload.title,
                game,
                payload.prize_pool,
                payload.description,
                payload.rules,
                payload.registration_link,
                payload.image_url,
                payload.max_participants,
                payload.registration_deadline,
                payload.tournament_date,
                status,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))
    }

    pub async fn delete(&self, tournament_id: Uuid) -> Result<()> {
        if !self.repo.delete(tournament_id).await? {
            return Err(AppError::NotFound("Tournament not found".to_string()));
        }
        Ok(())
    }

    pub async fn register(&self, tournament_id: Uuid, user_id: Uuid) -> Result<()> {
        let outcome = self
            .repo
            .register_participant(tournament_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        match outcome {
            RegistrationOutcome::Registered => Ok(()),
            rejected => Err(registration_error(rejected)),
        }
    }
}

fn registration_error(outcome: RegistrationOutcome) -> AppError {
    match outcome {
        RegistrationOutcome::AlreadyRegistered => {
            AppError::Validation("Already registered for this tournament".to_string())
        }
        RegistrationOutcome::Full => AppError::Validation("Tournament is full".to_string()),
        RegistrationOutcome::DeadlinePassed => {
            AppError::Validation("Registration deadline has passed".to_string())
        }
        RegistrationOutcome::Registered => AppError::Internal,
    }
}

fn parse_game(value: &str) -> Result<Game> {
    value
        .parse::<Game>()
        .map_err(|_| AppError::Validation(format!("Invalid game: {}", value)))
}

fn parse_status(value: &str) -> Result<TournamentStatus> {
    value
        .parse::<TournamentStatus>()
        .map_err(|_| AppError::Validation(format!("Invalid status: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_rejected_registrations_map_to_400() {
        for outcome in [
            RegistrationOutcome::AlreadyRegistered,
            RegistrationOutcome::Full,
            RegistrationOutcome::DeadlinePassed,
        ] {
            assert_eq!(
                registration_error(outcome).status_code(),
                StatusCode::BAD_REQUEST
            );
        }
    }

    #[test]
    fn test_full_registration_message() {
        let err = registration_error(RegistrationOutcome::Full);
        assert_eq!(err.to_string(), "Tournament is full");
    }

    #[test]
    fn test_parse_game_accepts_known_titles() {
        assert!(parse_game("BGMI").is_ok());
        assert!(parse_game("Clash Royale").is_ok());
        assert!(parse_game("League of Legends").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert!(parse_status("upcoming").is_ok());
        assert!(parse_status("Upcoming").is_err());
    }
}
