use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use core_types::Stadium;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::teams::DeleteResponse;

#[derive(Debug, Deserialize)]
pub struct StadiumPayload {
    pub name: String,
    pub city: String,
    pub capacity: i32,
    pub active: Option<bool>,
}

impl StadiumPayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("stadium name must not be empty".to_string()));
        }
        if self.capacity < 0 {
            return Err(AppError::Validation("capacity must not be negative".to_string()));
        }
        Ok(())
    }
}

/// A stadium with its derived venue record.
#[derive(Debug, Serialize)]
pub struct StadiumDetail {
    #[serde(flatten)]
    pub stadium: Stadium,
    pub venue: stats::VenueAnalytics,
}

/// # GET /api/stadiums
pub async fn list_stadiums(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Stadium>>>, AppError> {
    let stadiums = state.db_repo.list_stadiums().await?;
    Ok(Json(ApiResponse::ok(stadiums)))
}

/// # GET /api/stadiums/:id
///
/// Stadium row plus venue analytics over completed matches hosted there:
/// toss advantage, bat-first win rate, average first-innings score.
pub async fn get_stadium(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StadiumDetail>>, AppError> {
    let (stadium_res, matches_res) =
        tokio::join!(state.db_repo.get_stadium(id), state.db_repo.venue_matches(id));
    let detail = StadiumDetail {
        stadium: stadium_res?,
        venue: stats::venue_analytics(&matches_res?),
    };
    Ok(Json(ApiResponse::ok(detail)))
}

/// # POST /api/stadiums
pub async fn create_stadium(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StadiumPayload>,
) -> Result<Json<ApiResponse<Stadium>>, AppError> {
    payload.validate()?;
    let stadium = state
        .db_repo
        .create_stadium(&payload.name, &payload.city, payload.capacity)
        .await?;
    Ok(Json(ApiResponse::ok(stadium)))
}

/// # PUT /api/stadiums/:id
pub async fn update_stadium(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StadiumPayload>,
) -> Result<Json<ApiResponse<Stadium>>, AppError> {
    payload.validate()?;
    let stadium = state
        .db_repo
        .update_stadium(
            id,
            &payload.name,
            &payload.city,
            payload.capacity,
            payload.active.unwrap_or(true),
        )
        .await?;
    Ok(Json(ApiResponse::ok(stadium)))
}

/// # DELETE /api/stadiums/:id
pub async fn delete_stadium(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteResponse>>, AppError> {
    let outcome = state.db_repo.delete_stadium(id).await?;
    Ok(Json(ApiResponse::ok(DeleteResponse { outcome })))
}
