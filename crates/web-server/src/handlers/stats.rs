use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use core_types::{BattingCard, BowlingCard};
use serde::{Deserialize, Serialize};
use stats::{BattingLeader, BowlingLeader, MvpEntry, StandingsRow};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    season: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardMetric {
    Runs,
    Wickets,
    Mvp,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    metric: Option<LeaderboardMetric>,
    season: Option<i32>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LeaderboardData {
    Batting(Vec<BattingLeader>),
    Bowling(Vec<BowlingLeader>),
    Mvp(Vec<MvpEntry>),
}

#[derive(Debug, Serialize)]
pub struct Leaderboard {
    pub metric: LeaderboardMetric,
    pub season_year: i32,
    pub leaders: LeaderboardData,
}

/// # GET /api/seasons/:year/standings
///
/// The points table, recomputed from completed matches on every call. Teams
/// contracted for the season with no completed matches appear zero-filled;
/// an unknown year is a 404.
pub async fn standings(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> Result<Json<ApiResponse<Vec<StandingsRow>>>, AppError> {
    let series_id = state.db_repo.series_id_for_season(year).await?;
    let (totals_res, teams_res) = tokio::join!(
        state.db_repo.season_match_totals(series_id),
        state.db_repo.team_names_for_series(series_id),
    );
    let table = stats::compute_standings(&totals_res?, &teams_res?)?;
    Ok(Json(ApiResponse::ok(table)))
}

/// # GET /api/teams/:id/stats
///
/// One team's won/lost/points/net-run-rate record, over a season when
/// `?season=` is given, otherwise all-time.
pub async fn team_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<SeasonQuery>,
) -> Result<Json<ApiResponse<StandingsRow>>, AppError> {
    if let Some(year) = query.season {
        state.db_repo.series_id_for_season(year).await?;
    }
    let team = state.db_repo.get_team(id).await?;
    let totals = state.db_repo.team_match_totals(id, query.season).await?;
    let record = stats::team_record(id, team.name, &totals)?;
    Ok(Json(ApiResponse::ok(record)))
}

/// # GET /api/teams/:id/head-to-head/:other_id
pub async fn head_to_head_record(
    State(state): State<Arc<AppState>>,
    Path((id, other_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<stats::HeadToHead>>, AppError> {
    if id == other_id {
        return Err(AppError::Validation(
            "head-to-head requires two distinct teams".to_string(),
        ));
    }
    let (team_a_res, team_b_res, matches_res) = tokio::join!(
        state.db_repo.get_team(id),
        state.db_repo.get_team(other_id),
        state.db_repo.matches_between(id, other_id),
    );
    team_a_res?;
    team_b_res?;
    let record = stats::head_to_head(id, other_id, &matches_res?);
    Ok(Json(ApiResponse::ok(record)))
}

/// # GET /api/stats/leaderboard
///
/// Season leaderboard for one metric: most runs, most wickets, or MVP
/// points. Ordering and tie-breaks live in the stats crate.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<ApiResponse<Leaderboard>>, AppError> {
    let Some(metric) = query.metric else {
        return Err(AppError::Validation(
            "metric must be one of: runs, wickets, mvp".to_string(),
        ));
    };
    let Some(year) = query.season else {
        return Err(AppError::Validation("season is required".to_string()));
    };
    let limit = query
        .limit
        .unwrap_or(state.config.stats.leaderboard_limit)
        .clamp(1, state.config.stats.max_page_size as usize);

    let series_id = state.db_repo.series_id_for_season(year).await?;
    let leaders = match metric {
        LeaderboardMetric::Runs => {
            let rows = state.db_repo.season_batting_rows(series_id).await?;
            let mut by_player: HashMap<Uuid, (String, Vec<BattingCard>)> = HashMap::new();
            for row in rows {
                by_player
                    .entry(row.card.player_id)
                    .or_insert_with(|| (row.player_name, Vec::new()))
                    .1
                    .push(row.card);
            }
            let leaders = by_player
                .into_iter()
                .map(|(player_id, (player_name, cards))| BattingLeader {
                    player_id,
                    player_name,
                    summary: stats::batting_summary(&cards),
                })
                .collect();
            LeaderboardData::Batting(stats::rank_batting(leaders, limit))
        }
        LeaderboardMetric::Wickets => {
            let rows = state.db_repo.season_bowling_rows(series_id).await?;
            let mut by_player: HashMap<Uuid, (String, Vec<BowlingCard>)> = HashMap::new();
            for row in rows {
                by_player
                    .entry(row.card.player_id)
                    .or_insert_with(|| (row.player_name, Vec::new()))
                    .1
                    .push(row.card);
            }
            let leaders = by_player
                .into_iter()
                .map(|(player_id, (player_name, cards))| BowlingLeader {
                    player_id,
                    player_name,
                    summary: stats::bowling_summary(&cards),
                })
                .collect();
            LeaderboardData::Bowling(stats::rank_bowling(leaders, limit))
        }
        LeaderboardMetric::Mvp => {
            let totals = state.db_repo.player_season_totals(series_id).await?;
            LeaderboardData::Mvp(stats::rank_mvp(totals, limit))
        }
    };

    Ok(Json(ApiResponse::ok(Leaderboard {
        metric,
        season_year: year,
        leaders,
    })))
}
