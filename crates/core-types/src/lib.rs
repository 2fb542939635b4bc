pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{AuctionCategory, Dismissal, MatchStatus, PlayerRole, TossDecision, WinType};
pub use error::CoreError;
pub use structs::{
    AuctionEntry, BattingCard, BowlingCard, Contract, Match, Player, Series, Stadium, Team,
    TeamStats,
};
