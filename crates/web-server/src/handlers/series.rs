use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use core_types::Series;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SeriesPayload {
    pub season_year: Option<i32>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub completed: Option<bool>,
}

impl SeriesPayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("series name must not be empty".to_string()));
        }
        if self.start_date > self.end_date {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
        Ok(())
    }
}

/// # GET /api/series
pub async fn list_series(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Series>>>, AppError> {
    let series = state.db_repo.list_series().await?;
    Ok(Json(ApiResponse::ok(series)))
}

/// # GET /api/series/:id
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Series>>, AppError> {
    let series = state.db_repo.get_series(id).await?;
    Ok(Json(ApiResponse::ok(series)))
}

/// # POST /api/series
///
/// The season year is unique; a duplicate is a 409.
pub async fn create_series(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SeriesPayload>,
) -> Result<Json<ApiResponse<Series>>, AppError> {
    payload.validate()?;
    let Some(season_year) = payload.season_year else {
        return Err(AppError::Validation("season_year is required".to_string()));
    };
    let series = state
        .db_repo
        .create_series(season_year, &payload.name, payload.start_date, payload.end_date)
        .await?;
    Ok(Json(ApiResponse::ok(series)))
}

/// # PUT /api/series/:id
///
/// The season year is immutable after creation; only the descriptive fields
/// and the completed flag may change.
pub async fn update_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SeriesPayload>,
) -> Result<Json<ApiResponse<Series>>, AppError> {
    payload.validate()?;
    let series = state
        .db_repo
        .update_series(
            id,
            &payload.name,
            payload.start_date,
            payload.end_date,
            payload.completed.unwrap_or(false),
        )
        .await?;
    Ok(Json(ApiResponse::ok(series)))
}

/// # DELETE /api/series/:id
///
/// Only an empty series can be removed; matches, contracts or auction rows
/// referencing it surface as a 409.
pub async fn delete_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.db_repo.delete_series(id).await?;
    Ok(Json(ApiResponse::ok(())))
}
