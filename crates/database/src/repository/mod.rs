//! The `DbRepository` provides a high-level, application-specific interface
//! to the database. It encapsulates all SQL queries and data access logic,
//! split into one module per entity family.

mod aggregates;
mod auctions;
mod contracts;
mod matches;
mod players;
mod scorecards;
mod seasons;
mod stadiums;
mod team_stats;
mod teams;

pub use aggregates::{PlayerBattingRow, PlayerBowlingRow};
pub use auctions::{AuctionEntryInput, AuctionListingRow};
pub use contracts::ContractInput;
pub use matches::{LiveProgress, MatchDetail, MatchResult};
pub use players::PlayerInput;
pub use teams::DeleteOutcome;

use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves a season year to its series id. Distinguishes "season does
    /// not exist" (an error) from "season exists but has no data" (which
    /// callers report as a zero-filled result).
    pub async fn series_id_for_season(&self, season_year: i32) -> Result<Uuid, DbError> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM series WHERE season_year = $1")
                .bind(season_year)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|(id,)| id)
            .ok_or(DbError::SeasonNotFound(season_year))
    }
}
