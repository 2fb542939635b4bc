use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use core_types::{AuctionCategory, Contract};
use database::ContractInput;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ContractListQuery {
    team: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ContractPayload {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub season_year: i32,
    pub price_lakh: Decimal,
    pub category: AuctionCategory,
    #[serde(default)]
    pub is_retained: bool,
    #[serde(default)]
    pub is_rtm: bool,
}

impl ContractPayload {
    fn validate(&self) -> Result<(), AppError> {
        if self.price_lakh < Decimal::ZERO {
            return Err(AppError::Validation("price_lakh must not be negative".to_string()));
        }
        if self.is_retained && self.is_rtm {
            return Err(AppError::Validation(
                "a contract cannot be both retained and right-to-match".to_string(),
            ));
        }
        Ok(())
    }
}

/// # GET /api/seasons/:year/contracts
pub async fn list_contracts(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
    Query(query): Query<ContractListQuery>,
) -> Result<Json<ApiResponse<Vec<Contract>>>, AppError> {
    let series_id = state.db_repo.series_id_for_season(year).await?;
    let contracts = state
        .db_repo
        .list_contracts_for_series(series_id, query.team)
        .await?;
    Ok(Json(ApiResponse::ok(contracts)))
}

/// # GET /api/contracts/:id
pub async fn get_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    let contract = state.db_repo.get_contract(id).await?;
    Ok(Json(ApiResponse::ok(contract)))
}

/// # POST /api/contracts
///
/// A retained contract for a player already sold at the same season's
/// auction is a 409.
pub async fn create_contract(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContractPayload>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    payload.validate()?;
    let series_id = state.db_repo.series_id_for_season(payload.season_year).await?;
    let contract = state
        .db_repo
        .create_contract(&ContractInput {
            player_id: payload.player_id,
            team_id: payload.team_id,
            series_id,
            price_lakh: payload.price_lakh,
            category: payload.category,
            is_retained: payload.is_retained,
            is_rtm: payload.is_rtm,
        })
        .await?;
    Ok(Json(ApiResponse::ok(contract)))
}

/// # PUT /api/contracts/:id
///
/// Administrative correction; the player/team/season binding is immutable.
pub async fn update_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContractPayload>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    payload.validate()?;
    let contract = state
        .db_repo
        .update_contract(
            id,
            payload.price_lakh,
            payload.category,
            payload.is_retained,
            payload.is_rtm,
        )
        .await?;
    Ok(Json(ApiResponse::ok(contract)))
}

/// # DELETE /api/contracts/:id
pub async fn delete_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.db_repo.delete_contract(id).await?;
    Ok(Json(ApiResponse::ok(())))
}
