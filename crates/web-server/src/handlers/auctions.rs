use crate::envelope::{ApiResponse, PageMeta, PageParams};
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use core_types::{AuctionCategory, AuctionEntry};
use database::{AuctionEntryInput, AuctionFilter, AuctionSort};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AuctionListQuery {
    sold: Option<bool>,
    category: Option<AuctionCategory>,
    #[serde(default)]
    sort: AuctionSort,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AuctionEntryPayload {
    pub player_id: Uuid,
    pub base_price_lakh: Decimal,
    pub sold_price_lakh: Option<Decimal>,
    pub team_id: Option<Uuid>,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default)]
    pub bid_count: i32,
    pub category: AuctionCategory,
}

impl AuctionEntryPayload {
    fn validate(&self) -> Result<AuctionEntryInput, AppError> {
        if self.base_price_lakh < Decimal::ZERO
            || self.sold_price_lakh.is_some_and(|p| p < Decimal::ZERO)
        {
            return Err(AppError::Validation("prices must not be negative".to_string()));
        }
        if self.bid_count < 0 {
            return Err(AppError::Validation("bid_count must not be negative".to_string()));
        }
        if self.is_sold && (self.sold_price_lakh.is_none() || self.team_id.is_none()) {
            return Err(AppError::Validation(
                "a sold entry requires sold_price_lakh and team_id".to_string(),
            ));
        }
        if !self.is_sold && (self.sold_price_lakh.is_some() || self.team_id.is_some()) {
            return Err(AppError::Validation(
                "an unsold entry cannot carry a price or a team".to_string(),
            ));
        }
        Ok(AuctionEntryInput {
            player_id: self.player_id,
            base_price_lakh: self.base_price_lakh,
            sold_price_lakh: self.sold_price_lakh,
            team_id: self.team_id,
            is_sold: self.is_sold,
            bid_count: self.bid_count,
            category: self.category,
        })
    }
}

/// One listing row: the entry, its player name, and the premium over base
/// price (`None` for unsold lots).
#[derive(Debug, Serialize)]
pub struct AuctionListingItem {
    pub player_name: String,
    #[serde(flatten)]
    pub entry: AuctionEntry,
    pub price_increase: Option<Decimal>,
}

/// # GET /api/auctions/:year
///
/// Paged season listing, filterable by sold flag and category. The summary
/// endpoint is independent of these filters.
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
    Query(query): Query<AuctionListQuery>,
) -> Result<Json<ApiResponse<Vec<AuctionListingItem>>>, AppError> {
    let series_id = state.db_repo.series_id_for_season(year).await?;
    let page = PageParams {
        limit: query.limit.unwrap_or(20),
        offset: query.offset.unwrap_or(0),
    }
    .clamp(state.config.stats.max_page_size);
    let filter = AuctionFilter {
        sold: query.sold,
        category: query.category,
        sort: query.sort,
        limit: page.limit,
        offset: page.offset,
    };

    let (rows, total) = state.db_repo.list_auction_entries(series_id, &filter).await?;
    let items = rows
        .into_iter()
        .map(|row| AuctionListingItem {
            player_name: row.player_name,
            price_increase: row.entry.price_increase(),
            entry: row.entry,
        })
        .collect();
    Ok(Json(ApiResponse::ok_paged(items, PageMeta::new(&page, total))))
}

/// # GET /api/auctions/:year/summary
///
/// Season-wide buckets and spend, always over the full season.
pub async fn season_summary(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> Result<Json<ApiResponse<stats::AuctionSummary>>, AppError> {
    let series_id = state.db_repo.series_id_for_season(year).await?;
    let (entries_res, names_res, retention_res) = tokio::join!(
        state.db_repo.auction_entries_for_series(series_id),
        state.db_repo.team_names(),
        state.db_repo.contract_retention_counts(series_id),
    );
    let entries = entries_res?;
    let team_names: HashMap<Uuid, String> = names_res?.into_iter().collect();
    let (retained, rtm) = retention_res?;

    let summary = stats::auction_summary(&entries, &team_names, retained, rtm);
    Ok(Json(ApiResponse::ok(summary)))
}

/// # POST /api/auctions/:year
///
/// Records an auction outcome. One entry per player per season; selling a
/// player who is retained for the season is a 409.
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
    Json(payload): Json<AuctionEntryPayload>,
) -> Result<Json<ApiResponse<AuctionEntry>>, AppError> {
    let input = payload.validate()?;
    let series_id = state.db_repo.series_id_for_season(year).await?;
    let entry = state.db_repo.create_auction_entry(series_id, &input).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// # PUT /api/auctions/entries/:id
pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AuctionEntryPayload>,
) -> Result<Json<ApiResponse<AuctionEntry>>, AppError> {
    let input = payload.validate()?;
    let entry = state.db_repo.update_auction_entry(id, &input).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// # DELETE /api/auctions/entries/:id
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.db_repo.delete_auction_entry(id).await?;
    Ok(Json(ApiResponse::ok(())))
}
