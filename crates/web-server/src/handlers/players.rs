use crate::envelope::{ApiResponse, PageMeta, PageParams};
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use core_types::{Player, PlayerRole};
use database::{PlayerFilter, PlayerInput, StatsFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::teams::DeleteResponse;

#[derive(Debug, Deserialize)]
pub struct PlayerListQuery {
    role: Option<PlayerRole>,
    nationality: Option<String>,
    active: Option<bool>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Period restriction for the profile's career summaries.
#[derive(Debug, Deserialize)]
pub struct StatsPeriodQuery {
    season: Option<i32>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl StatsPeriodQuery {
    fn into_filter(self) -> StatsFilter {
        StatsFilter { season: self.season, from: self.from, to: self.to }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlayerPayload {
    pub name: String,
    pub role: PlayerRole,
    pub nationality: String,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub active: Option<bool>,
}

impl PlayerPayload {
    fn validate(&self) -> Result<PlayerInput, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("player name must not be empty".to_string()));
        }
        if self.nationality.trim().is_empty() {
            return Err(AppError::Validation("nationality must not be empty".to_string()));
        }
        Ok(PlayerInput {
            name: self.name.clone(),
            role: self.role,
            nationality: self.nationality.clone(),
            batting_style: self.batting_style.clone(),
            bowling_style: self.bowling_style.clone(),
            date_of_birth: self.date_of_birth,
        })
    }
}

/// A player profile with career (or period) summaries for both disciplines.
#[derive(Debug, Serialize)]
pub struct PlayerProfile {
    #[serde(flatten)]
    pub player: Player,
    pub batting: stats::BattingSummary,
    pub bowling: stats::BowlingSummary,
}

/// # GET /api/players
pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlayerListQuery>,
) -> Result<Json<ApiResponse<Vec<Player>>>, AppError> {
    let page = PageParams {
        limit: query.limit.unwrap_or(20),
        offset: query.offset.unwrap_or(0),
    }
    .clamp(state.config.stats.max_page_size);
    let filter = PlayerFilter {
        role: query.role,
        nationality: query.nationality,
        active: query.active,
    };

    let (players, total) = state.db_repo.list_players(&filter, page.limit, page.offset).await?;
    Ok(Json(ApiResponse::ok_paged(players, PageMeta::new(&page, total))))
}

/// # GET /api/players/:id
///
/// Profile plus derived batting and bowling summaries over completed
/// matches. An unknown `season` year is a 404; a known season with no rows
/// yields zero-filled summaries.
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<StatsPeriodQuery>,
) -> Result<Json<ApiResponse<PlayerProfile>>, AppError> {
    if let Some(year) = query.season {
        state.db_repo.series_id_for_season(year).await?;
    }
    let filter = query.into_filter();

    let (player_res, batting_res, bowling_res) = tokio::join!(
        state.db_repo.get_player(id),
        state.db_repo.player_batting_cards(id, &filter),
        state.db_repo.player_bowling_cards(id, &filter),
    );
    let profile = PlayerProfile {
        player: player_res?,
        batting: stats::batting_summary(&batting_res?),
        bowling: stats::bowling_summary(&bowling_res?),
    };
    Ok(Json(ApiResponse::ok(profile)))
}

/// # POST /api/players
pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlayerPayload>,
) -> Result<Json<ApiResponse<Player>>, AppError> {
    let input = payload.validate()?;
    let player = state.db_repo.create_player(&input).await?;
    Ok(Json(ApiResponse::ok(player)))
}

/// # PUT /api/players/:id
pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PlayerPayload>,
) -> Result<Json<ApiResponse<Player>>, AppError> {
    let input = payload.validate()?;
    let player = state
        .db_repo
        .update_player(id, &input, payload.active.unwrap_or(true))
        .await?;
    Ok(Json(ApiResponse::ok(player)))
}

/// # DELETE /api/players/:id
pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteResponse>>, AppError> {
    let outcome = state.db_repo.delete_player(id).await?;
    Ok(Json(ApiResponse::ok(DeleteResponse { outcome })))
}
