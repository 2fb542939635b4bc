use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batting::BattingSummary;
use crate::bowling::BowlingSummary;

/// MVP scoring constants. One point per run and per four, two per six,
/// twenty-five per wicket, eight per maiden.
const MVP_RUN: i64 = 1;
const MVP_FOUR: i64 = 1;
const MVP_SIX: i64 = 2;
const MVP_WICKET: i64 = 25;
const MVP_MAIDEN: i64 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingLeader {
    pub player_id: Uuid,
    pub player_name: String,
    #[serde(flatten)]
    pub summary: BattingSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingLeader {
    pub player_id: Uuid,
    pub player_name: String,
    #[serde(flatten)]
    pub summary: BowlingSummary,
}

/// Season totals feeding the MVP formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonTotals {
    pub player_id: Uuid,
    pub player_name: String,
    pub runs: i64,
    pub fours: i64,
    pub sixes: i64,
    pub wickets: i64,
    pub maidens: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MvpEntry {
    pub player_id: Uuid,
    pub player_name: String,
    pub runs: i64,
    pub wickets: i64,
    pub mvp_points: i64,
}

/// Orders batting leaders: runs desc, strike rate desc, then name asc for
/// full determinism.
pub fn rank_batting(mut leaders: Vec<BattingLeader>, limit: usize) -> Vec<BattingLeader> {
    leaders.sort_by(|a, b| {
        b.summary
            .runs
            .cmp(&a.summary.runs)
            .then(b.summary.strike_rate.cmp(&a.summary.strike_rate))
            .then(a.player_name.cmp(&b.player_name))
    });
    leaders.truncate(limit);
    leaders
}

/// Orders bowling leaders: wickets desc, economy asc, then name asc.
/// A zero-ball economy of 0.00 would float wicketless bowlers to the top,
/// so entries without a legal ball sort after everyone else.
pub fn rank_bowling(mut leaders: Vec<BowlingLeader>, limit: usize) -> Vec<BowlingLeader> {
    leaders.sort_by(|a, b| {
        let a_eco = economy_key(&a.summary);
        let b_eco = economy_key(&b.summary);
        b.summary
            .wickets
            .cmp(&a.summary.wickets)
            .then(a_eco.cmp(&b_eco))
            .then(a.player_name.cmp(&b.player_name))
    });
    leaders.truncate(limit);
    leaders
}

fn economy_key(summary: &BowlingSummary) -> (bool, Decimal) {
    (summary.balls_bowled == 0, summary.economy)
}

/// Computes and orders the MVP table: points desc, then name asc.
pub fn rank_mvp(totals: Vec<PlayerSeasonTotals>, limit: usize) -> Vec<MvpEntry> {
    let mut entries: Vec<MvpEntry> = totals
        .into_iter()
        .map(|t| {
            let mvp_points = t.runs * MVP_RUN
                + t.fours * MVP_FOUR
                + t.sixes * MVP_SIX
                + t.wickets * MVP_WICKET
                + t.maidens * MVP_MAIDEN;
            MvpEntry {
                player_id: t.player_id,
                player_name: t.player_name,
                runs: t.runs,
                wickets: t.wickets,
                mvp_points,
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        b.mvp_points
            .cmp(&a.mvp_points)
            .then(a.player_name.cmp(&b.player_name))
    });
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn batting_leader(name: &str, runs: i64, strike_rate: Decimal) -> BattingLeader {
        let mut summary = BattingSummary::empty();
        summary.runs = runs;
        summary.strike_rate = strike_rate;
        BattingLeader {
            player_id: Uuid::new_v4(),
            player_name: name.to_string(),
            summary,
        }
    }

    fn bowling_leader(name: &str, wickets: i64, economy: Decimal, balls: i64) -> BowlingLeader {
        let mut summary = BowlingSummary::empty();
        summary.wickets = wickets;
        summary.economy = economy;
        summary.balls_bowled = balls;
        BowlingLeader {
            player_id: Uuid::new_v4(),
            player_name: name.to_string(),
            summary,
        }
    }

    #[test]
    fn batting_ties_break_on_strike_rate_then_name() {
        let ranked = rank_batting(
            vec![
                batting_leader("Sharma", 400, dec!(130.00)),
                batting_leader("Gill", 400, dec!(145.00)),
                batting_leader("Kohli", 400, dec!(145.00)),
            ],
            10,
        );
        let names: Vec<&str> = ranked.iter().map(|l| l.player_name.as_str()).collect();
        assert_eq!(names, vec!["Gill", "Kohli", "Sharma"]);
    }

    #[test]
    fn bowling_ties_break_on_economy_ascending() {
        let ranked = rank_bowling(
            vec![
                bowling_leader("Chahal", 18, dec!(8.10), 240),
                bowling_leader("Bumrah", 18, dec!(6.40), 240),
            ],
            10,
        );
        assert_eq!(ranked[0].player_name, "Bumrah");
    }

    #[test]
    fn wicketless_zero_ball_bowlers_sort_last() {
        let ranked = rank_bowling(
            vec![
                bowling_leader("DidNotBowl", 0, Decimal::ZERO, 0),
                bowling_leader("Bowled", 0, dec!(9.50), 24),
            ],
            10,
        );
        assert_eq!(ranked[0].player_name, "Bowled");
    }

    #[test]
    fn mvp_formula_and_limit() {
        let totals = vec![
            PlayerSeasonTotals {
                player_id: Uuid::new_v4(),
                player_name: "AllRounder".to_string(),
                runs: 100,
                fours: 10,
                sixes: 5,
                wickets: 10,
                maidens: 1,
            },
            PlayerSeasonTotals {
                player_id: Uuid::new_v4(),
                player_name: "Batter".to_string(),
                runs: 300,
                fours: 30,
                sixes: 10,
                wickets: 0,
                maidens: 0,
            },
        ];
        let ranked = rank_mvp(totals, 1);
        assert_eq!(ranked.len(), 1);
        // 100 + 10 + 10 + 250 + 8 = 378 vs 300 + 30 + 20 = 350
        assert_eq!(ranked[0].player_name, "AllRounder");
        assert_eq!(ranked[0].mvp_points, 378);
    }
}
