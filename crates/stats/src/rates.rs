//! Shared rate arithmetic and rounding policy.
//!
//! Balls are the unit of record everywhere; cricket-notation overs are a
//! presentation detail. Percentages and per-ball rates are rounded to 2
//! decimal places, net run rate to 3, so output is reproducible.

use rust_decimal::Decimal;

/// Decimal places for percentages and per-ball rates.
pub const RATE_DP: u32 = 2;
/// Decimal places for net run rate.
pub const NRR_DP: u32 = 3;

/// Batting strike rate: runs scored per 100 balls. 0 when no balls faced.
pub fn strike_rate(runs: i64, balls: i64) -> Decimal {
    if balls == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(runs) * Decimal::from(100) / Decimal::from(balls)).round_dp(RATE_DP)
}

/// Bowling economy: runs conceded per over (6 balls). 0 when no balls bowled.
pub fn economy(runs_conceded: i64, balls: i64) -> Decimal {
    if balls == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(runs_conceded) * Decimal::from(6) / Decimal::from(balls)).round_dp(RATE_DP)
}

/// `numerator / denominator` rounded to 2 dp, or `None` when the denominator
/// is zero. Used for batting average (runs / dismissals), bowling average
/// (runs / wickets) and bowling strike rate (balls / wickets), where a zero
/// denominator means the figure is undefined rather than zero.
pub fn ratio_or_none(numerator: i64, denominator: i64) -> Option<Decimal> {
    if denominator == 0 {
        None
    } else {
        Some((Decimal::from(numerator) / Decimal::from(denominator)).round_dp(RATE_DP))
    }
}

/// Percentage `part * 100 / whole` rounded to 2 dp; 0 when `whole` is zero.
pub fn percentage(part: i64, whole: i64) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * Decimal::from(100) / Decimal::from(whole)).round_dp(RATE_DP)
}

/// Runs per over across an aggregate number of balls, at NRR precision.
/// 0.000 when no balls, per the standings contract.
pub fn run_rate(runs: i64, balls: i64) -> Decimal {
    if balls == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(runs) * Decimal::from(6) / Decimal::from(balls)).round_dp(NRR_DP)
}

/// Net run rate: `(runs scored / overs faced) - (runs conceded / overs
/// bowled)`. Both quotients are taken at full precision and the difference
/// is rounded once to 3 dp; a zero denominator contributes 0 to its side.
pub fn net_run_rate(
    runs_for: i64,
    balls_faced: i64,
    runs_against: i64,
    balls_bowled: i64,
) -> Decimal {
    let rate = |runs: i64, balls: i64| {
        if balls == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(runs) * Decimal::from(6) / Decimal::from(balls)
        }
    };
    (rate(runs_for, balls_faced) - rate(runs_against, balls_bowled)).round_dp(NRR_DP)
}

/// Cricket-notation overs for a ball count, e.g. 27 balls -> "4.3".
pub fn overs_notation(balls: i64) -> String {
    format!("{}.{}", balls / 6, balls % 6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn strike_rate_zero_balls_is_zero_not_nan() {
        assert_eq!(strike_rate(0, 0), Decimal::ZERO);
        assert_eq!(strike_rate(10, 0), Decimal::ZERO);
    }

    #[test]
    fn strike_rate_rounds_to_two_places() {
        // 47 off 31 = 151.6129... -> 151.61
        assert_eq!(strike_rate(47, 31), dec!(151.61));
    }

    #[test]
    fn economy_is_per_six_balls() {
        // 30 runs off 24 balls = 7.50 per over
        assert_eq!(economy(30, 24), dec!(7.50));
        assert_eq!(economy(12, 0), Decimal::ZERO);
    }

    #[test]
    fn undefined_ratios_are_none() {
        assert_eq!(ratio_or_none(123, 0), None);
        assert_eq!(ratio_or_none(100, 3), Some(dec!(33.33)));
    }

    #[test]
    fn overs_notation_from_balls() {
        assert_eq!(overs_notation(27), "4.3");
        assert_eq!(overs_notation(24), "4.0");
        assert_eq!(overs_notation(0), "0.0");
    }

    #[test]
    fn run_rate_uses_three_places() {
        // 163 runs off 120 balls = 8.15 exactly
        assert_eq!(run_rate(163, 120), dec!(8.150));
        assert_eq!(run_rate(100, 0), Decimal::ZERO);
    }

    #[test]
    fn net_run_rate_rounds_the_difference_once() {
        // 720/113 = 6.37168..., 600/141 = 4.25532...; the exact difference
        // is 2.11636..., i.e. 2.116 at three places. Rounding each rate
        // first would give 6.372 - 4.255 = 2.117.
        assert_eq!(net_run_rate(720, 113, 600, 141), dec!(2.116));
    }

    #[test]
    fn net_run_rate_handles_empty_sides() {
        assert_eq!(net_run_rate(0, 0, 0, 0), Decimal::ZERO);
        // Only balls faced so far: NRR is the scoring rate alone.
        assert_eq!(net_run_rate(80, 60, 0, 0), dec!(8.000));
    }
}
