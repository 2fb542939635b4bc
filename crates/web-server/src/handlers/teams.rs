use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use core_types::Team;
use database::DeleteOutcome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct TeamListQuery {
    #[serde(default)]
    active: bool,
}

#[derive(Debug, Deserialize)]
pub struct TeamPayload {
    pub name: String,
    pub code: String,
    pub color: String,
    pub active: Option<bool>,
}

impl TeamPayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("team name must not be empty".to_string()));
        }
        if self.code.trim().is_empty() {
            return Err(AppError::Validation("team code must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub outcome: DeleteOutcome,
}

/// # GET /api/teams
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TeamListQuery>,
) -> Result<Json<ApiResponse<Vec<Team>>>, AppError> {
    let teams = state.db_repo.list_teams(query.active).await?;
    Ok(Json(ApiResponse::ok(teams)))
}

/// # GET /api/teams/:id
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Team>>, AppError> {
    let team = state.db_repo.get_team(id).await?;
    Ok(Json(ApiResponse::ok(team)))
}

/// # POST /api/teams
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<ApiResponse<Team>>, AppError> {
    payload.validate()?;
    let team = state
        .db_repo
        .create_team(&payload.name, &payload.code, &payload.color)
        .await?;
    Ok(Json(ApiResponse::ok(team)))
}

/// # PUT /api/teams/:id
pub async fn update_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<ApiResponse<Team>>, AppError> {
    payload.validate()?;
    let team = state
        .db_repo
        .update_team(
            id,
            &payload.name,
            &payload.code,
            &payload.color,
            payload.active.unwrap_or(true),
        )
        .await?;
    Ok(Json(ApiResponse::ok(team)))
}

/// # DELETE /api/teams/:id
///
/// Teams with match history are deactivated rather than removed; the outcome
/// field tells the caller which happened.
pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteResponse>>, AppError> {
    let outcome = state.db_repo.delete_team(id).await?;
    Ok(Json(ApiResponse::ok(DeleteResponse { outcome })))
}
