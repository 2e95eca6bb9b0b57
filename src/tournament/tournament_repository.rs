use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::tournament_models::{Participant, Tournament};

/// Outcome of an attempted registration. The decision happens inside a single
/// transaction so concurrent attempts can never overshoot the capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    AlreadyRegistered,
    Full,
    DeadlinePassed,
}

pub struct ListFilters {
    pub game: Option<String>,
    pub status: Option<String>,
    pub page: u32,
    pub limit: u32,
}

#[derive(Clone)]
pub struct TournamentRepository {
    pool: PgPool,
}

impl TournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, filters: &ListFilters) -> Result<(Vec<Tournament>, i64)> {
        let mut query = "SELECT * FROM tournaments WHERE TRUE".to_string();
        let mut count_query = "SELECT COUNT(*) FROM tournaments WHERE TRUE".to_string();
        let mut params_count: usize = 0;

        if filters.game.is_some() {
            params_count += 1;
            let filter = format!(" AND game = ${}", params_count);
            query.push_str(&filter);
            count_query.push_str(&filter);
        }
        if filters.status.is_some() {
            params_count += 1;
            let filter = format!(" AND status = ${}", params_count);
            query.push_str(&filter);
            count_query.push_str(&filter);
        }

        query.push_str(&format!(
            " ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            params_count + 1,
            params_count + 2
        ));

        let limit = i64::from(filters.limit);
        let offset = i64::from(filters.page.saturating_sub(1)) * limit;

        let mut count_db_query = sqlx::query_scalar::<_, i64>(&count_query);
        let mut db_query = sqlx::query_as::<_, Tournament>(&query);

        if let Some(game) = &filters.game {
            count_db_query = count_db_query.bind(game);
            db_query = db_query.bind(game);
        }
        if let Some(status) = &filters.status {
            count_db_query = count_db_query.bind(status);
            db_query = db_query.bind(status);
        }

        let total = count_db_query.fetch_one(&self.pool).await?;
        let tournaments = db_query.bind(limit).bind(offset).fetch_all(&self.pool).await?;

        Ok((tournaments, total))
    }

    pub async fn find_by_id(&self, tournament_id: Uuid) -> Result<Option<Tournament>> {
        let tournament =
            sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = $1")
                .bind(tournament_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(tournament)
    }

    pub async fn participants(&self, tournament_id: Uuid) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT tp.user_id, u.name, tp.registered_at
             FROM tournament_participants tp
             JOIN users u ON u.id = tp.user_id
             WHERE tp.tournament_id = $1
             ORDER BY tp.registered_at ASC",
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        title: &str,
        game: &str,
        prize_pool: &str,
        description: &str,
        rules: &str,
        registration_link: &str,
        image_url: &str,
        max_participants: i32,
        registration_deadline: DateTime<Utc>,
        tournament_date: DateTime<Utc>,
        created_by: Uuid,
    ) -> Result<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            "INSERT INTO tournaments
                (title, game, prize_pool, description, rules, registration_link,
                 image_url, max_participants, registration_deadline, tournament_date, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(title)
        .bind(game)
        .bind(prize_pool)
        .bind(description)
        .bind(rules)
        .bind(registration_link)
        .bind(image_url)
        .bind(max_participants)
        .bind(registration_deadline)
        .bind(tournament_date)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(tournament)
    }

    /// Partial update. Absent fields keep their current values.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        tournament_id: Uuid,
        title: Option<String>,
        game: Option<String>,
        prize_pool: Option<String>,
        description: Option<String>,
        rules: Option<String>,
        registration_link: Option<String>,
        image_url: Option<String>,
        max_participants: Option<i32>,
        registration_deadline: Option<DateTime<Utc>>,
        tournament_date: Option<DateTime<Utc>>,
        status: Option<String>,
    ) -> Result<Option<Tournament>> {
        let tournament = sqlx::query_as::<_, Tournament>(
            "UPDATE tournaments SET
                title = COALESCE($2, title),
                game = COALESCE($3, game),
                prize_pool = COALESCE($4, prize_pool),
                description = COALESCE($5, description),
                rules = COALESCE($6, rules),
                registration_link = COALESCE($7, registration_link),
                image_url = COALESCE($8, image_url),
                max_participants = COALESCE($9, max_participants),
                registration_deadline = COALESCE($10, registration_deadline),
                tournament_date = COALESCE($11, tournament_date),
                status = COALESCE($12, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(tournament_id)
        .bind(title)
        .bind(game)
        .bind(prize_pool)
        .bind(description)
        .bind(rules)
        .bind(registration_link)
        .bind(image_url)
        .bind(max_participants)
        .bind(registration_deadline)
        .bind(tournament_date)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tournament)
    }

    /// Returns false when the tournament does not exist. Participant rows
    /// cascade.
    pub async fn delete(&self, tournament_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Registers a user inside one transaction:
    /// - the unique (tournament_id, user_id) constraint catches duplicates;
    /// - the increment is guarded by capacity and deadline, so two concurrent
    ///   registrations for the last slot cannot both commit.
    ///
    /// Returns `Ok(None)` when the tournament does not exist.
    pub async fn register_participant(
        &self,
        tournament_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<RegistrationOutcome>> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let inserted = sqlx::query(
            "INSERT INTO tournament_participants (tournament_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (tournament_id, user_id) DO NOTHING",
        )
        .bind(tournament_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(Some(RegistrationOutcome::AlreadyRegistered));
        }

        let updated = sqlx::query(
            "UPDATE tournaments
             SET current_participants = current_participants + 1, updated_at = NOW()
             WHERE id = $1
               AND current_participants < max_participants
               AND registration_deadline > NOW()",
        )
        .bind(tournament_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Guard failed: find out which condition rejected the attempt.
            let (full, closed) = sqlx::query_as::<_, (bool, bool)>(
                "SELECT current_participants >= max_participants,
                        registration_deadline <= NOW()
                 FROM tournaments WHERE id = $1",
            )
            .bind(tournament_id)
            .fetch_one(&mut *tx)
            .await?;

            tx.rollback().await?;

            return Ok(Some(if full {
                RegistrationOutcome::Full
            } else if closed {
                RegistrationOutcome::DeadlinePassed
            } else {
                RegistrationOutcome::Full
            }));
        }

        tx.commit().await?;

        Ok(Some(RegistrationOutcome::Registered))
    }
}
