use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rates::{percentage, ratio_or_none};

/// One completed match at the venue, reduced to what the analytics need.
/// `bat_first_id` is the side that batted first (toss outcome applied);
/// `first_innings_runs` comes from that side's batting cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueMatch {
    pub match_id: Uuid,
    pub toss_winner_id: Option<Uuid>,
    pub bat_first_id: Option<Uuid>,
    pub winner_id: Option<Uuid>,
    pub first_innings_runs: Option<i64>,
}

/// Scoring tendencies and toss advantage for one stadium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueAnalytics {
    pub matches_hosted: i64,
    /// Matches with a defined winner; the denominator for the percentages.
    pub decided_matches: i64,
    pub toss_winner_wins: i64,
    /// % of decided matches won by the toss winner, 2 dp.
    pub toss_advantage_pct: Decimal,
    pub bat_first_wins: i64,
    pub bat_first_win_pct: Decimal,
    pub average_first_innings_runs: Option<Decimal>,
}

/// Computes venue analytics over completed matches at one stadium.
/// No-results are counted as hosted but excluded from every percentage.
pub fn venue_analytics(matches: &[VenueMatch]) -> VenueAnalytics {
    let mut decided = 0i64;
    let mut toss_winner_wins = 0i64;
    let mut bat_first_wins = 0i64;
    let mut innings_total = 0i64;
    let mut innings_count = 0i64;

    for m in matches {
        if let Some(runs) = m.first_innings_runs {
            innings_total += runs;
            innings_count += 1;
        }
        let Some(winner) = m.winner_id else { continue };
        decided += 1;
        if m.toss_winner_id == Some(winner) {
            toss_winner_wins += 1;
        }
        if m.bat_first_id == Some(winner) {
            bat_first_wins += 1;
        }
    }

    VenueAnalytics {
        matches_hosted: matches.len() as i64,
        decided_matches: decided,
        toss_winner_wins,
        toss_advantage_pct: percentage(toss_winner_wins, decided),
        bat_first_wins,
        bat_first_win_pct: percentage(bat_first_wins, decided),
        average_first_innings_runs: ratio_or_none(innings_total, innings_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn m(
        toss: Uuid,
        bat_first: Uuid,
        winner: Option<Uuid>,
        first_innings: i64,
    ) -> VenueMatch {
        VenueMatch {
            match_id: Uuid::new_v4(),
            toss_winner_id: Some(toss),
            bat_first_id: Some(bat_first),
            winner_id: winner,
            first_innings_runs: Some(first_innings),
        }
    }

    #[test]
    fn toss_advantage_excludes_no_results() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let matches = vec![
            m(a, a, Some(a), 180), // toss winner won
            m(b, b, Some(a), 165), // toss winner lost
            m(a, a, None, 90),     // no-result, excluded from percentages
        ];
        let v = venue_analytics(&matches);
        assert_eq!(v.matches_hosted, 3);
        assert_eq!(v.decided_matches, 2);
        assert_eq!(v.toss_advantage_pct, dec!(50.00));
    }

    #[test]
    fn bat_first_and_average_runs() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let matches = vec![m(a, a, Some(a), 200), m(a, b, Some(a), 151)];
        let v = venue_analytics(&matches);
        assert_eq!(v.bat_first_wins, 1);
        assert_eq!(v.bat_first_win_pct, dec!(50.00));
        // (200 + 151) / 2 = 175.5
        assert_eq!(v.average_first_innings_runs, Some(dec!(175.50)));
    }

    #[test]
    fn empty_venue_is_zero_filled() {
        let v = venue_analytics(&[]);
        assert_eq!(v.matches_hosted, 0);
        assert_eq!(v.toss_advantage_pct, Decimal::ZERO);
        assert_eq!(v.average_first_innings_runs, None);
    }
}
