use core_types::BowlingCard;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::{economy, overs_notation, ratio_or_none};

/// Best innings figures, ordered by wickets first and then fewest runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestBowling {
    pub wickets: i32,
    pub runs: i32,
}

impl BestBowling {
    fn better_than(&self, other: &BestBowling) -> bool {
        (self.wickets, -self.runs) > (other.wickets, -other.runs)
    }
}

/// Career/period bowling summary derived from scorecard rows of completed
/// matches. Average and strike rate are `None` when wicketless, mirroring the
/// batting-average convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingSummary {
    pub matches: usize,
    pub balls_bowled: i64,
    /// Cricket notation for display, e.g. "16.3".
    pub overs: String,
    pub runs_conceded: i64,
    pub wickets: i64,
    pub maidens: i64,
    pub best: Option<BestBowling>,
    pub four_wicket_hauls: i64,
    pub five_wicket_hauls: i64,
    pub economy: Decimal,
    pub average: Option<Decimal>,
    pub strike_rate: Option<Decimal>,
}

impl BowlingSummary {
    pub fn empty() -> Self {
        Self {
            matches: 0,
            balls_bowled: 0,
            overs: overs_notation(0),
            runs_conceded: 0,
            wickets: 0,
            maidens: 0,
            best: None,
            four_wicket_hauls: 0,
            five_wicket_hauls: 0,
            economy: Decimal::ZERO,
            average: None,
            strike_rate: None,
        }
    }
}

impl Default for BowlingSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Aggregates bowling cards into a summary. Callers pass only rows from
/// completed matches.
pub fn bowling_summary(cards: &[BowlingCard]) -> BowlingSummary {
    let mut summary = BowlingSummary::empty();
    summary.matches = cards.len();

    for card in cards {
        summary.balls_bowled += i64::from(card.balls_bowled);
        summary.runs_conceded += i64::from(card.runs_conceded);
        summary.wickets += i64::from(card.wickets);
        summary.maidens += i64::from(card.maidens);

        let figures = BestBowling { wickets: card.wickets, runs: card.runs_conceded };
        match summary.best {
            Some(best) if !figures.better_than(&best) => {}
            _ => summary.best = Some(figures),
        }
        if card.wickets >= 5 {
            summary.five_wicket_hauls += 1;
        } else if card.wickets >= 4 {
            summary.four_wicket_hauls += 1;
        }
    }

    summary.overs = overs_notation(summary.balls_bowled);
    summary.economy = economy(summary.runs_conceded, summary.balls_bowled);
    summary.average = ratio_or_none(summary.runs_conceded, summary.wickets);
    summary.strike_rate = ratio_or_none(summary.balls_bowled, summary.wickets);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn card(balls: i32, runs: i32, wickets: i32, maidens: i32) -> BowlingCard {
        BowlingCard {
            match_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            balls_bowled: balls,
            runs_conceded: runs,
            wickets,
            maidens,
        }
    }

    #[test]
    fn empty_input_is_zero_filled() {
        let s = bowling_summary(&[]);
        assert_eq!(s, BowlingSummary::empty());
        assert_eq!(s.overs, "0.0");
    }

    #[test]
    fn totals_rates_and_best() {
        let cards = vec![card(24, 18, 5, 1), card(24, 40, 0, 0), card(18, 25, 5, 0)];
        let s = bowling_summary(&cards);
        assert_eq!(s.balls_bowled, 66);
        assert_eq!(s.overs, "11.0");
        assert_eq!(s.runs_conceded, 83);
        assert_eq!(s.wickets, 10);
        assert_eq!(s.five_wicket_hauls, 2);
        // Same wickets, fewer runs wins.
        assert_eq!(s.best, Some(BestBowling { wickets: 5, runs: 18 }));
        // 83 * 6 / 66 = 7.545... -> 7.55
        assert_eq!(s.economy, dec!(7.55));
        assert_eq!(s.average, Some(dec!(8.30)));
        assert_eq!(s.strike_rate, Some(dec!(6.60)));
    }

    #[test]
    fn wicketless_spell_has_no_average_or_strike_rate() {
        let s = bowling_summary(&[card(24, 31, 0, 0)]);
        assert_eq!(s.average, None);
        assert_eq!(s.strike_rate, None);
        assert_eq!(s.economy, dec!(7.75));
    }
}
