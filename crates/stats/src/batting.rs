use core_types::BattingCard;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::{ratio_or_none, strike_rate};

/// Career/period batting summary derived from scorecard rows of completed
/// matches. Average is `None` when the player was never dismissed; the raw
/// `runs` and `dismissals` counts are always present so callers can render
/// "not out" averages however they like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingSummary {
    pub matches: usize,
    pub innings: usize,
    pub runs: i64,
    pub balls_faced: i64,
    pub fours: i64,
    pub sixes: i64,
    pub not_outs: i64,
    pub dismissals: i64,
    pub highest_score: i32,
    pub fifties: i64,
    pub hundreds: i64,
    pub ducks: i64,
    pub strike_rate: Decimal,
    pub average: Option<Decimal>,
}

impl BattingSummary {
    /// A zero-filled summary: the correct answer for a season with no
    /// completed matches, as opposed to a not-found error.
    pub fn empty() -> Self {
        Self {
            matches: 0,
            innings: 0,
            runs: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            not_outs: 0,
            dismissals: 0,
            highest_score: 0,
            fifties: 0,
            hundreds: 0,
            ducks: 0,
            strike_rate: Decimal::ZERO,
            average: None,
        }
    }
}

impl Default for BattingSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Aggregates one player's (or one team's) batting cards into a summary.
/// Callers are responsible for passing only rows from completed matches.
pub fn batting_summary(cards: &[BattingCard]) -> BattingSummary {
    let mut summary = BattingSummary::empty();
    summary.matches = cards.len();
    summary.innings = cards.len();

    for card in cards {
        summary.runs += i64::from(card.runs);
        summary.balls_faced += i64::from(card.balls_faced);
        summary.fours += i64::from(card.fours);
        summary.sixes += i64::from(card.sixes);
        if card.is_out {
            summary.dismissals += 1;
        } else {
            summary.not_outs += 1;
        }
        if card.runs > summary.highest_score {
            summary.highest_score = card.runs;
        }
        if card.runs >= 100 {
            summary.hundreds += 1;
        } else if card.runs >= 50 {
            summary.fifties += 1;
        }
        if card.runs == 0 && card.is_out {
            summary.ducks += 1;
        }
    }

    summary.strike_rate = strike_rate(summary.runs, summary.balls_faced);
    summary.average = ratio_or_none(summary.runs, summary.dismissals);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Dismissal;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn card(runs: i32, balls: i32, is_out: bool) -> BattingCard {
        BattingCard {
            match_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            runs,
            balls_faced: balls,
            fours: runs / 8,
            sixes: runs / 20,
            is_out,
            dismissal: if is_out { Dismissal::Caught } else { Dismissal::NotOut },
        }
    }

    #[test]
    fn empty_input_is_zero_filled() {
        let s = batting_summary(&[]);
        assert_eq!(s, BattingSummary::empty());
        assert_eq!(s.strike_rate, Decimal::ZERO);
        assert_eq!(s.average, None);
    }

    #[test]
    fn totals_and_milestones() {
        let cards = vec![card(112, 60, true), card(54, 40, false), card(0, 3, true)];
        let s = batting_summary(&cards);
        assert_eq!(s.runs, 166);
        assert_eq!(s.balls_faced, 103);
        assert_eq!(s.hundreds, 1);
        assert_eq!(s.fifties, 1);
        assert_eq!(s.ducks, 1);
        assert_eq!(s.highest_score, 112);
        assert_eq!(s.not_outs, 1);
        assert_eq!(s.dismissals, 2);
        // 166 / 2 dismissals
        assert_eq!(s.average, Some(dec!(83.00)));
        // 166 * 100 / 103 = 161.165... -> 161.17
        assert_eq!(s.strike_rate, dec!(161.17));
    }

    #[test]
    fn never_dismissed_has_no_average() {
        let s = batting_summary(&[card(30, 20, false), card(45, 25, false)]);
        assert_eq!(s.dismissals, 0);
        assert_eq!(s.average, None);
        assert_eq!(s.runs, 75);
    }

    #[test]
    fn zero_balls_faced_strike_rate_is_zero() {
        // Not-out for a duck without facing a ball (e.g. run out off a wide).
        let s = batting_summary(&[card(0, 0, false)]);
        assert_eq!(s.strike_rate, Decimal::ZERO);
    }
}
