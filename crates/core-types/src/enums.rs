use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The primary discipline a player is contracted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "player_role", rename_all = "snake_case")]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

/// Lifecycle of a match. Scorecards exist only for `Completed` matches;
/// aggregate statistics never count `Live` or `Abandoned` ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Abandoned,
}

impl MatchStatus {
    /// Whether `next` is a legal lifecycle transition from `self`.
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        matches!(
            (self, next),
            (Scheduled, Live)
                | (Scheduled, Abandoned)
                | (Live, Completed)
                | (Live, Abandoned)
        )
    }
}

/// How a completed match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "win_type", rename_all = "snake_case")]
pub enum WinType {
    Runs,
    Wickets,
    SuperOver,
    Dls,
    NoResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "toss_decision", rename_all = "snake_case")]
pub enum TossDecision {
    Bat,
    Bowl,
}

/// How a batsman's innings ended. `NotOut` pairs with `is_out = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "dismissal", rename_all = "snake_case")]
pub enum Dismissal {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    Retired,
    NotOut,
}

/// Auction pool a player is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "auction_category", rename_all = "snake_case")]
pub enum AuctionCategory {
    Marquee,
    Capped,
    Uncapped,
}

macro_rules! impl_str_conv {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let s = match self {
                    $($ty::$variant => $text),+
                };
                f.write_str(s)
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant)),+,
                    other => Err(CoreError::InvalidEnumValue {
                        kind: stringify!($ty),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

impl_str_conv!(PlayerRole {
    Batsman => "batsman",
    Bowler => "bowler",
    AllRounder => "all_rounder",
    WicketKeeper => "wicket_keeper",
});

impl_str_conv!(MatchStatus {
    Scheduled => "scheduled",
    Live => "live",
    Completed => "completed",
    Abandoned => "abandoned",
});

impl_str_conv!(WinType {
    Runs => "runs",
    Wickets => "wickets",
    SuperOver => "super_over",
    Dls => "dls",
    NoResult => "no_result",
});

impl_str_conv!(TossDecision {
    Bat => "bat",
    Bowl => "bowl",
});

impl_str_conv!(Dismissal {
    Bowled => "bowled",
    Caught => "caught",
    Lbw => "lbw",
    RunOut => "run_out",
    Stumped => "stumped",
    HitWicket => "hit_wicket",
    Retired => "retired",
    NotOut => "not_out",
});

impl_str_conv!(AuctionCategory {
    Marquee => "marquee",
    Capped => "capped",
    Uncapped => "uncapped",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_transitions() {
        assert!(MatchStatus::Scheduled.can_transition_to(MatchStatus::Live));
        assert!(MatchStatus::Live.can_transition_to(MatchStatus::Completed));
        assert!(!MatchStatus::Completed.can_transition_to(MatchStatus::Live));
        assert!(!MatchStatus::Scheduled.can_transition_to(MatchStatus::Completed));
        assert!(MatchStatus::Live.can_transition_to(MatchStatus::Abandoned));
    }

    #[test]
    fn enum_round_trips_through_str() {
        assert_eq!("all_rounder".parse::<PlayerRole>().unwrap(), PlayerRole::AllRounder);
        assert_eq!(PlayerRole::WicketKeeper.to_string(), "wicket_keeper");
        assert_eq!("super_over".parse::<WinType>().unwrap(), WinType::SuperOver);
        assert!("captain".parse::<PlayerRole>().is_err());
    }
}
