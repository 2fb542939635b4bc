use core_types::{Match, MatchStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::{run_rate, RATE_DP};

/// Balls per T20 innings.
pub const INNINGS_BALLS: i32 = 120;

/// Derived in-play state for a live match, computed from the authoritative
/// `balls_bowled` counter on the match row. Nothing here is ever stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveState {
    pub innings: i32,
    pub current_runs: i32,
    pub current_wickets: i32,
    pub balls_bowled: i32,
    pub balls_remaining: i32,
    pub current_run_rate: Decimal,
    pub target: Option<i32>,
    pub runs_required: Option<i32>,
    /// `None` in the first innings, or once no balls remain.
    pub required_run_rate: Option<Decimal>,
}

/// Computes the live state for a match. Returns `None` unless the match is
/// actually live.
pub fn live_state(m: &Match) -> Option<LiveState> {
    if m.status != MatchStatus::Live {
        return None;
    }

    let balls_remaining = (INNINGS_BALLS - m.balls_bowled).max(0);
    let runs_required = m
        .target
        .map(|target| (target - m.current_runs).max(0));
    let required_run_rate = match runs_required {
        Some(required) if balls_remaining > 0 => Some(
            (Decimal::from(required) * Decimal::from(6) / Decimal::from(balls_remaining))
                .round_dp(RATE_DP),
        ),
        _ => None,
    };

    Some(LiveState {
        innings: m.innings,
        current_runs: m.current_runs,
        current_wickets: m.current_wickets,
        balls_bowled: m.balls_bowled,
        balls_remaining,
        current_run_rate: run_rate(i64::from(m.current_runs), i64::from(m.balls_bowled))
            .round_dp(RATE_DP),
        target: m.target,
        runs_required,
        required_run_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn live_match(runs: i32, balls: i32, target: Option<i32>) -> Match {
        Match {
            id: Uuid::new_v4(),
            series_id: Uuid::new_v4(),
            team1_id: Uuid::new_v4(),
            team2_id: Uuid::new_v4(),
            stadium_id: Uuid::new_v4(),
            scheduled_at: Utc::now(),
            status: MatchStatus::Live,
            toss_winner_id: None,
            toss_decision: None,
            winner_id: None,
            win_type: None,
            win_margin: None,
            innings: if target.is_some() { 2 } else { 1 },
            target,
            current_runs: runs,
            current_wickets: 3,
            balls_bowled: balls,
        }
    }

    #[test]
    fn balls_remaining_comes_from_recorded_balls() {
        let state = live_state(&live_match(90, 72, Some(181))).unwrap();
        assert_eq!(state.balls_remaining, 48);
        assert_eq!(state.runs_required, Some(91));
        // 91 * 6 / 48 = 11.375 -> 11.38
        assert_eq!(state.required_run_rate, Some(dec!(11.38)));
    }

    #[test]
    fn first_innings_has_no_required_rate() {
        let state = live_state(&live_match(55, 42, None)).unwrap();
        assert_eq!(state.required_run_rate, None);
        assert_eq!(state.runs_required, None);
        // 55 * 6 / 42 = 7.857 -> 7.86
        assert_eq!(state.current_run_rate, dec!(7.86));
    }

    #[test]
    fn exhausted_innings_yields_no_required_rate() {
        let state = live_state(&live_match(150, 120, Some(181))).unwrap();
        assert_eq!(state.balls_remaining, 0);
        assert_eq!(state.required_run_rate, None);
    }

    #[test]
    fn non_live_match_has_no_state() {
        let mut m = live_match(0, 0, None);
        m.status = MatchStatus::Completed;
        assert_eq!(live_state(&m), None);
    }
}
