use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::Result,
    middleware::AuthUser,
    state::AppState,
};
use super::{
    tournament_dto::{
        CreateTournamentRequest, PaginatedResponse, TournamentDetail, TournamentFilters,
        UpdateTournamentRequest,
    },
    tournament_models::Tournament,
};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Normalizes paging inputs once; the envelope and the query must agree on
/// the effective values.
fn clamp_paging(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

fn total_pages(total: i64, limit: u32) -> u32 {
    (total as f64 / f64::from(limit)).ceil() as u32
}

/// List tournaments with optional game/status filters
#[utoipa::path(
    get,
    path = "/api/tournaments",
    params(
        ("game" = Option<String>, Query, description = "Filter by game"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("page" = Option<u32>, Query, description = "Page number"),
        ("limit" = Option<u32>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated tournament list", body = PaginatedResponse<Tournament>),
        (status = 400, description = "Unknown game or status filter")
    ),
    tag = "tournaments"
)]
pub async fn get_tournaments(
    State(state): State<AppState>,
    Query(filters): Query<TournamentFilters>,
) -> Result<Json<PaginatedResponse<Tournament>>> {
    let (page, limit) = clamp_paging(filters.page, filters.limit);

    let (tournaments, total) = state
        .tournament_service
        .list(filters.game, filters.status, page, limit)
        .await?;

    Ok(Json(PaginatedResponse {
        data: tournaments,
        total,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }))
}

/// Tournament detail with participants
#[utoipa::path(
    get,
    path = "/api/tournaments/{id}",
    params(
        ("id" = Uuid, Path, description = "Tournament ID")
    ),
    responses(
        (status = 200, description = "Tournament details", body = TournamentDetail),
        (status = 404, description = "Tournament not found")
    ),
    tag = "tournaments"
)]
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<TournamentDetail>> {
    let detail = state.tournament_service.get(tournament_id).await?;
    Ok(Json(detail))
}

/// Publish a tournament (admin only)
#[utoipa::path(
    post,
    path = "/api/tournaments",
    request_body = CreateTournamentRequest,
    responses(
        (status = 201, description = "Tournament created", body = Tournament),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin rights required")
    ),
    tag = "tournaments",
    security(("bearer_auth" = []))
)]
pub async fn create_tournament(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTournamentRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let tournament = state.tournament_service.create(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(tournament)))
}

/// Update a tournament (admin only)
#[utoipa::path(
    put,
    path = "/api/tournaments/{id}",
    params(
        ("id" = Uuid, Path, description = "Tournament ID")
    ),
    request_body = UpdateTournamentRequest,
    responses(
        (status = 200, description = "Tournament updated", body = Tournament),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin rights required"),
        (status = 404, description = "Tournament not found")
    ),
    tag = "tournaments",
    security(("bearer_auth" = []))
)]
pub async fn update_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(payload): Json<UpdateTournamentRequest>,
) -> Result<Json<Tournament>> {
    payload.validate()?;

    let tournament = state
        .tournament_service
        .update(tournament_id, payload)
        .await?;

    Ok(Json(tournament))
}

/// Delete a tournament (admin only)
#[utoipa::path(
    delete,
    path = "/api/tournaments/{id}",
    params(
        ("id" = Uuid, Path, description = "Tournament ID")
    ),
    responses(
        (status = 200, description = "Tournament deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin rights required"),
        (status = 404, description = "Tournament not found")
    ),
    tag = "tournaments",
    security(("bearer_auth" = []))
)]
pub async fn delete_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.tournament_service.delete(tournament_id).await?;

    Ok(Json(json!({ "message": "Tournament deleted successfully" })))
}

/// Register the caller for a tournament
#[utoipa::path(
    post,
    path = "/api/tournaments/{id}/register",
    params(
        ("id" = Uuid, Path, description = "Tournament ID")
    ),
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Already registered, full, or deadline passed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tournament not found")
    ),
    tag = "tournaments",
    security(("bearer_auth" = []))
)]
pub async fn register_for_tournament(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(tournament_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .tournament_service
        .register(tournament_id, user_id)
        .await?;

    Ok(Json(json!({ "message": "Successfully registered for tournament" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_is_clamped_and_cannot_blow_up_total_pages() {
        let (page, limit) = clamp_paging(Some(1), Some(0));
        assert_eq!((page, limit), (1, 1));
        assert_eq!(total_pages(3, limit), 3);
    }

    #[test]
    fn test_oversized_limit_is_clamped_before_the_envelope() {
        let (_, limit) = clamp_paging(Some(1), Some(1000));
        assert_eq!(limit, MAX_PAGE_SIZE);
        // 250 rows at an effective page size of 100 is three pages, not one.
        assert_eq!(total_pages(250, limit), 3);
    }

    #[test]
    fn test_paging_defaults() {
        assert_eq!(clamp_paging(None, None), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(clamp_paging(Some(0), None), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }
}
