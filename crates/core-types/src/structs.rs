use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::enums::{
    AuctionCategory, Dismissal, MatchStatus, PlayerRole, TossDecision, WinType,
};

/// An IPL franchise. Roster membership is indirect via [`Contract`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    /// Short code, e.g. "CSK", "MI".
    pub code: String,
    /// Primary kit color as a hex string, for the dashboard.
    pub color: String,
    /// Soft-deactivation flag; teams with match history are never hard-deleted.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub role: PlayerRole,
    pub nationality: String,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Stadium {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub capacity: i32,
    pub active: bool,
}

/// One bounded competition instance (a season). Matches and contracts belong
/// to exactly one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Series {
    pub id: Uuid,
    pub season_year: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub completed: bool,
}

/// A fixture between two distinct teams at one stadium in one series.
///
/// The `current_*` and `balls_bowled` columns are the authoritative live
/// progress counters, written by the admin status endpoint as play advances.
/// Derived live figures (required run rate, balls remaining) are computed
/// from them, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    pub series_id: Uuid,
    pub team1_id: Uuid,
    pub team2_id: Uuid,
    pub stadium_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: MatchStatus,
    pub toss_winner_id: Option<Uuid>,
    pub toss_decision: Option<TossDecision>,
    pub winner_id: Option<Uuid>,
    pub win_type: Option<WinType>,
    /// Margin in runs or wickets depending on `win_type`.
    pub win_margin: Option<i32>,
    pub innings: i32,
    pub target: Option<i32>,
    pub current_runs: i32,
    pub current_wickets: i32,
    pub balls_bowled: i32,
}

/// One player's batting contribution to one completed match.
/// Uniquely keyed by (match, player).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BattingCard {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub runs: i32,
    pub balls_faced: i32,
    pub fours: i32,
    pub sixes: i32,
    pub is_out: bool,
    pub dismissal: Dismissal,
}

/// One player's bowling contribution to one completed match.
/// Overs are recorded as balls; cricket notation is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BowlingCard {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub balls_bowled: i32,
    pub runs_conceded: i32,
    pub wickets: i32,
    pub maidens: i32,
}

/// Binds a player to a team for one series. Unique per
/// (player, team, series); immutable after the season closes except for
/// administrative correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub series_id: Uuid,
    /// Contract value in lakh INR.
    pub price_lakh: Decimal,
    pub category: AuctionCategory,
    pub is_retained: bool,
    pub is_rtm: bool,
}

/// One player's auction outcome for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AuctionEntry {
    pub id: Uuid,
    pub player_id: Uuid,
    pub series_id: Uuid,
    pub base_price_lakh: Decimal,
    pub sold_price_lakh: Option<Decimal>,
    /// The buying team; `None` while unsold.
    pub team_id: Option<Uuid>,
    pub is_sold: bool,
    pub bid_count: i32,
    pub category: AuctionCategory,
}

impl AuctionEntry {
    /// Premium paid over the base price. `None` for unsold lots, which must
    /// never contribute to spend totals.
    pub fn price_increase(&self) -> Option<Decimal> {
        if self.is_sold {
            self.sold_price_lakh.map(|sold| sold - self.base_price_lakh)
        } else {
            None
        }
    }
}

/// The materialized standings row written by the recompute action.
/// Always rederivable from matches + scorecards; never a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TeamStats {
    pub series_id: Uuid,
    pub team_id: Uuid,
    pub matches_played: i32,
    pub matches_won: i32,
    pub matches_lost: i32,
    pub no_results: i32,
    pub points: i32,
    pub net_run_rate: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(is_sold: bool, sold: Option<Decimal>) -> AuctionEntry {
        AuctionEntry {
            id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            series_id: Uuid::new_v4(),
            base_price_lakh: dec!(200),
            sold_price_lakh: sold,
            team_id: None,
            is_sold,
            bid_count: 0,
            category: AuctionCategory::Capped,
        }
    }

    #[test]
    fn price_increase_only_when_sold() {
        assert_eq!(entry(true, Some(dec!(950))).price_increase(), Some(dec!(750)));
        assert_eq!(entry(false, None).price_increase(), None);
        // Row flagged sold but with no price recorded.
        assert_eq!(entry(true, None).price_increase(), None);
    }
}
