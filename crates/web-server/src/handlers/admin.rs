use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use database::DbError;
use serde::Serialize;
use std::sync::Arc;
use tracing;

/// Per-step outcome of a season recompute.
#[derive(Debug, Serialize)]
pub struct RecomputeReport {
    pub season_year: i32,
    pub completed_matches: usize,
    pub standings_computed: usize,
    pub rows_upserted: u64,
}

/// Keeps conflicts and not-founds on their normal status codes; anything
/// else is logged with the step name and reported as a step failure.
fn step_failed(step: &'static str, err: DbError) -> AppError {
    match err {
        DbError::NotFound | DbError::SeasonNotFound(_) | DbError::Conflict(_) => {
            AppError::Database(err)
        }
        other => {
            tracing::error!(step, error = ?other, "Recompute step failed.");
            AppError::RecomputeStep { step }
        }
    }
}

/// # POST /api/admin/recompute/:year
///
/// Recomputes the season's standings from the base tables and bulk-upserts
/// `team_stats` in one transaction. Idempotent: repeated runs over the same
/// data write identical rows. The response reports each step's outcome; on
/// failure the envelope names the failing step.
pub async fn recompute_season(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> Result<Json<ApiResponse<RecomputeReport>>, AppError> {
    let series_id = state.db_repo.series_id_for_season(year).await?;

    let (totals_res, teams_res) = tokio::join!(
        state.db_repo.season_match_totals(series_id),
        state.db_repo.team_names_for_series(series_id),
    );
    let totals = totals_res.map_err(|e| step_failed("load_match_totals", e))?;
    let teams = teams_res.map_err(|e| step_failed("load_teams", e))?;

    let table = stats::compute_standings(&totals, &teams).map_err(|e| {
        tracing::error!(step = "compute_standings", error = ?e, "Recompute step failed.");
        AppError::RecomputeStep { step: "compute_standings" }
    })?;

    let rows_upserted = state
        .db_repo
        .upsert_team_stats(series_id, &table)
        .await
        .map_err(|e| step_failed("upsert_team_stats", e))?;

    tracing::info!(
        season_year = year,
        standings = table.len(),
        rows_upserted,
        "Season standings recomputed."
    );

    Ok(Json(ApiResponse::ok(RecomputeReport {
        season_year: year,
        completed_matches: totals.len(),
        standings_computed: table.len(),
        rows_upserted,
    })))
}
