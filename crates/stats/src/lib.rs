//! # Crease Statistics Crate
//!
//! The aggregation core of the system: every derived cricket figure is
//! computed here, from row slices fetched by the `database` crate.
//!
//! ## Architectural Principles
//!
//! - **Pure computation:** No I/O. Each function takes slices of scorecard or
//!   match rows and returns a summary struct. Callers guarantee the rows come
//!   only from completed matches.
//! - **Recompute, don't cache:** Figures are always rederived from the base
//!   rows on each call. The `team_stats` table the recompute action writes is
//!   an optimization artifact, never a source of truth.
//! - **Deterministic output:** Every ordering has a full tie-break chain and
//!   every rate a fixed rounding policy, so identical inputs always produce
//!   byte-identical JSON.
//!
//! ## Public API
//!
//! - `batting_summary` / `bowling_summary`: career or period aggregates.
//! - `compute_standings`: the season points table with net run rate.
//! - `auction_summary`: sold/unsold buckets, per-team spend, categories.
//! - `head_to_head` / `venue_analytics`: pairwise and venue records.
//! - `rank_batting` / `rank_bowling` / `rank_mvp`: leaderboard ordering.
//! - `live_state`: derived in-play figures from the authoritative ball count.

pub mod auction;
pub mod batting;
pub mod bowling;
pub mod error;
pub mod head_to_head;
pub mod leaderboard;
pub mod live;
pub mod rates;
pub mod standings;
pub mod venue;

pub use auction::{AuctionSummary, CategoryBreakdown, TeamSpend, TopSale, auction_summary};
pub use batting::{BattingSummary, batting_summary};
pub use bowling::{BestBowling, BowlingSummary, bowling_summary};
pub use error::StatsError;
pub use head_to_head::{HeadToHead, head_to_head};
pub use leaderboard::{
    BattingLeader, BowlingLeader, MvpEntry, PlayerSeasonTotals, rank_batting, rank_bowling,
    rank_mvp,
};
pub use live::{INNINGS_BALLS, LiveState, live_state};
pub use standings::{
    MatchTotals, StandingsRow, compute_standings, stored_standings_current, team_record,
};
pub use venue::{VenueAnalytics, VenueMatch, venue_analytics};
