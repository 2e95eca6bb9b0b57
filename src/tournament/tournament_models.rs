use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// The fixed set of games tournaments can be published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Game {
    Bgmi,
    FreeFire,
    Codm,
    ClashOfClans,
    ClashRoyale,
    BrawlStars,
    PokemonUnite,
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Game::Bgmi => write!(f, "BGMI"),
            Game::FreeFire => write!(f, "Free Fire"),
            Game::Codm => write!(f, "CODM"),
            Game::ClashOfClans => write!(f, "Clash Of Clans"),
            Game::ClashRoyale => write!(f, "Clash Royale"),
            Game::BrawlStars => write!(f, "Brawl Stars"),
            Game::PokemonUnite => write!(f, "Pokemon Unite"),
        }
    }
}

impl FromStr for Game {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BGMI" => Ok(Game::Bgmi),
            "Free Fire" => Ok(Game::FreeFire),
            "CODM" => Ok(Game::Codm),
            "Clash Of Clans" => Ok(Game::ClashOfClans),
            "Clash Royale" => Ok(Game::ClashRoyale),
            "Brawl Stars" => Ok(Game::BrawlStars),
            "Pokemon Unite" => Ok(Game::PokemonUnite),
            other => Err(format!("Unknown game: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Upcoming => write!(f, "upcoming"),
            TournamentStatus::Ongoing => write!(f, "ongoing"),
            TournamentStatus::Completed => write!(f, "completed"),
            TournamentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(TournamentStatus::Upcoming),
            "ongoing" => Ok(TournamentStatus::Ongoing),
            "completed" => Ok(TournamentStatus::Completed),
            "cancelled" => Ok(TournamentStatus::Cancelled),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: Uuid,
    pub title: String,
    pub game: String,
    pub prize_pool: String,
    pub description: String,
    pub rules: String,
    pub registration_link: String,
    pub image_url: String,
    pub max_participants: i32,
    pub current_participants: i32,
    pub registration_deadline: DateTime<Utc>,
    pub tournament_date: DateTime<Utc>,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A participant entry joined with the user's display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: Uuid,
    pub name: String,
    pub registered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_display() {
        assert_eq!(Game::Bgmi.to_string(), "BGMI");
        assert_eq!(Game::FreeFire.to_string(), "Free Fire");
        assert_eq!(Game::PokemonUnite.to_string(), "Pokemon Unite");
    }

    #[test]
    fn test_game_round_trip() {
        for game in [
            Game::Bgmi,
            Game::FreeFire,
            Game::Codm,
            Game::ClashOfClans,
            Game::ClashRoyale,
            Game::BrawlStars,
            Game::PokemonUnite,
        ] {
            assert_eq!(game.to_string().parse::<Game>().unwrap(), game);
        }
    }

    #[test]
    fn test_unknown_game_rejected() {
        assert!("Valorant".parse::<Game>().is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TournamentStatus::Upcoming,
            TournamentStatus::Ongoing,
            TournamentStatus::Completed,
            TournamentStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<TournamentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("paused".parse::<TournamentStatus>().is_err());
    }
}
