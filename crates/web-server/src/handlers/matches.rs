use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use core_types::{
    BattingCard, BowlingCard, Dismissal, Match, MatchStatus, TossDecision, WinType,
};
use database::{LiveProgress, MatchDetail, MatchFilter, MatchResult};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct MatchListQuery {
    season: Option<i32>,
    team: Option<Uuid>,
    status: Option<MatchStatus>,
}

#[derive(Debug, Deserialize)]
pub struct MatchPayload {
    pub series_id: Uuid,
    pub team1_id: Uuid,
    pub team2_id: Uuid,
    pub stadium_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct MatchUpdatePayload {
    pub team1_id: Uuid,
    pub team2_id: Uuid,
    pub stadium_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub winner_id: Option<Uuid>,
    pub win_type: Option<WinType>,
    pub win_margin: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: MatchStatus,
    pub toss_winner_id: Option<Uuid>,
    pub toss_decision: Option<TossDecision>,
    pub winner_id: Option<Uuid>,
    pub win_type: Option<WinType>,
    pub win_margin: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct LiveProgressPayload {
    pub innings: i32,
    pub target: Option<i32>,
    pub current_runs: i32,
    pub current_wickets: i32,
    pub balls_bowled: i32,
}

#[derive(Debug, Deserialize)]
pub struct BattingCardPayload {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub runs: i32,
    pub balls_faced: i32,
    pub fours: i32,
    pub sixes: i32,
    pub is_out: bool,
    pub dismissal: Dismissal,
}

#[derive(Debug, Deserialize)]
pub struct BowlingCardPayload {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub balls_bowled: i32,
    pub runs_conceded: i32,
    pub wickets: i32,
    pub maidens: i32,
}

#[derive(Debug, Deserialize)]
pub struct ScorecardsPayload {
    #[serde(default)]
    pub batting: Vec<BattingCardPayload>,
    #[serde(default)]
    pub bowling: Vec<BowlingCardPayload>,
}

/// # GET /api/matches
pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<ApiResponse<Vec<Match>>>, AppError> {
    let filter = MatchFilter {
        season: query.season,
        team: query.team,
        status: query.status,
    };
    let matches = state.db_repo.list_matches(&filter).await?;
    Ok(Json(ApiResponse::ok(matches)))
}

/// # GET /api/matches/:id
pub async fn get_match(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MatchDetail>>, AppError> {
    let detail = state.db_repo.get_match_detail(id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// # POST /api/matches
///
/// A fixture needs two distinct teams; that is rejected here before any
/// query runs (the schema CHECK is the backstop).
pub async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MatchPayload>,
) -> Result<Json<ApiResponse<Match>>, AppError> {
    if payload.team1_id == payload.team2_id {
        return Err(AppError::Validation(
            "a match requires two distinct teams".to_string(),
        ));
    }
    let fixture = state
        .db_repo
        .create_match(
            payload.series_id,
            payload.team1_id,
            payload.team2_id,
            payload.stadium_id,
            payload.scheduled_at,
        )
        .await?;
    Ok(Json(ApiResponse::ok(fixture)))
}

/// Validates the winner/win-type fields as a unit. `None` means the payload
/// carries no result change.
fn parse_result(
    winner_id: Option<Uuid>,
    win_type: Option<WinType>,
    win_margin: Option<i32>,
) -> Result<Option<MatchResult>, AppError> {
    match win_type {
        Some(WinType::NoResult) if winner_id.is_some() => Err(AppError::Validation(
            "a no-result match cannot have a winner".to_string(),
        )),
        Some(win_type) if win_type != WinType::NoResult && winner_id.is_none() => Err(
            AppError::Validation("a decided match requires winner_id".to_string()),
        ),
        Some(win_type) => Ok(Some(MatchResult { winner_id, win_type, win_margin })),
        None => Ok(None),
    }
}

/// # PUT /api/matches/:id
///
/// Corrects a wrongly entered fixture (teams, venue, schedule) and, for a
/// completed match, its recorded result. Lifecycle changes go through the
/// /status route; the series a match belongs to is fixed at creation.
pub async fn update_match(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MatchUpdatePayload>,
) -> Result<Json<ApiResponse<Match>>, AppError> {
    if payload.team1_id == payload.team2_id {
        return Err(AppError::Validation(
            "a match requires two distinct teams".to_string(),
        ));
    }
    let result = parse_result(payload.winner_id, payload.win_type, payload.win_margin)?;
    let updated = state
        .db_repo
        .update_match(
            id,
            payload.team1_id,
            payload.team2_id,
            payload.stadium_id,
            payload.scheduled_at,
            result,
        )
        .await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// # PUT /api/matches/:id/status
///
/// Drives the scheduled -> live -> completed | abandoned lifecycle. The toss
/// may be recorded when play starts; completing requires result fields.
/// Illegal transitions come back as 409.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<ApiResponse<Match>>, AppError> {
    let toss = match (payload.toss_winner_id, payload.toss_decision) {
        (Some(winner), Some(decision)) => Some((winner, decision)),
        (None, None) => None,
        _ => {
            return Err(AppError::Validation(
                "toss_winner_id and toss_decision must be given together".to_string(),
            ));
        }
    };
    let result = parse_result(payload.winner_id, payload.win_type, payload.win_margin)?;

    let updated = state
        .db_repo
        .update_match_status(id, payload.status, toss, result)
        .await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// # GET /api/matches/:id/live
///
/// Derived in-play state: balls remaining and required run rate computed
/// from the authoritative ball count, never stored.
pub async fn get_live(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<stats::LiveState>>, AppError> {
    let fixture = state.db_repo.get_match(id).await?;
    match stats::live_state(&fixture) {
        Some(live) => Ok(Json(ApiResponse::ok(live))),
        None => Err(AppError::NotFound(
            "live state is only available for a live match".to_string(),
        )),
    }
}

/// # PUT /api/matches/:id/live
///
/// Writes the authoritative live counters as play advances. Only valid
/// while the match is live.
pub async fn put_live(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LiveProgressPayload>,
) -> Result<Json<ApiResponse<Match>>, AppError> {
    if !(1..=2).contains(&payload.innings) {
        return Err(AppError::Validation("innings must be 1 or 2".to_string()));
    }
    if payload.current_runs < 0 || payload.target.is_some_and(|t| t < 0) {
        return Err(AppError::Validation("runs must not be negative".to_string()));
    }
    if !(0..=10).contains(&payload.current_wickets) {
        return Err(AppError::Validation("wickets must be between 0 and 10".to_string()));
    }
    if !(0..=stats::INNINGS_BALLS).contains(&payload.balls_bowled) {
        return Err(AppError::Validation(format!(
            "balls_bowled must be between 0 and {}",
            stats::INNINGS_BALLS
        )));
    }

    let updated = state
        .db_repo
        .update_live_progress(
            id,
            LiveProgress {
                innings: payload.innings,
                target: payload.target,
                current_runs: payload.current_runs,
                current_wickets: payload.current_wickets,
                balls_bowled: payload.balls_bowled,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// # POST /api/matches/:id/scorecards
///
/// Records or corrects both scorecards in one transaction. Accepted only
/// for completed matches.
pub async fn save_scorecards(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ScorecardsPayload>,
) -> Result<Json<ApiResponse<MatchDetail>>, AppError> {
    let batting: Vec<BattingCard> = payload
        .batting
        .into_iter()
        .map(|card| {
            if card.runs < 0 || card.balls_faced < 0 || card.fours < 0 || card.sixes < 0 {
                return Err(AppError::Validation(
                    "batting card counters must not be negative".to_string(),
                ));
            }
            Ok(BattingCard {
                match_id: id,
                player_id: card.player_id,
                team_id: card.team_id,
                runs: card.runs,
                balls_faced: card.balls_faced,
                fours: card.fours,
                sixes: card.sixes,
                is_out: card.is_out,
                dismissal: card.dismissal,
            })
        })
        .collect::<Result<_, _>>()?;
    let bowling: Vec<BowlingCard> = payload
        .bowling
        .into_iter()
        .map(|card| {
            if card.balls_bowled < 0
                || card.runs_conceded < 0
                || card.maidens < 0
                || !(0..=10).contains(&card.wickets)
            {
                return Err(AppError::Validation(
                    "bowling card counters are out of range".to_string(),
                ));
            }
            Ok(BowlingCard {
                match_id: id,
                player_id: card.player_id,
                team_id: card.team_id,
                balls_bowled: card.balls_bowled,
                runs_conceded: card.runs_conceded,
                wickets: card.wickets,
                maidens: card.maidens,
            })
        })
        .collect::<Result<_, _>>()?;

    state.db_repo.save_scorecards(id, &batting, &bowling).await?;
    let detail = state.db_repo.get_match_detail(id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// # DELETE /api/matches/:id
pub async fn delete_match(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.db_repo.delete_match(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_result_with_winner_is_rejected() {
        let err = parse_result(Some(Uuid::new_v4()), Some(WinType::NoResult), None);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn decided_result_without_winner_is_rejected() {
        let err = parse_result(None, Some(WinType::Runs), Some(20));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn decided_result_carries_all_fields() {
        let winner = Uuid::new_v4();
        let result = parse_result(Some(winner), Some(WinType::Wickets), Some(5))
            .unwrap()
            .unwrap();
        assert_eq!(result.winner_id, Some(winner));
        assert_eq!(result.win_type, WinType::Wickets);
        assert_eq!(result.win_margin, Some(5));
    }

    #[test]
    fn absent_result_fields_mean_no_result_change() {
        assert!(parse_result(None, None, None).unwrap().is_none());
    }
}
