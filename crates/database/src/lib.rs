//! # Crease Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database. It is the system's "permanent archive."
//!
//! ## Architectural Principles
//!
//! - **Adapter layer:** Encapsulates all SQL and data access logic behind a
//!   clean API, hiding the underlying schema from the rest of the
//!   application.
//! - **Structured filters:** Optional query predicates are carried as typed
//!   filter structs consumed by `sqlx::QueryBuilder`, never assembled by
//!   string concatenation, so every value is a bound parameter.
//! - **Raw rows out, aggregates elsewhere:** Aggregation endpoints fetch
//!   normalized completed-match rows here; every derived figure is computed
//!   by the `stats` crate.
//! - **Asynchronous & Pooled:** All operations are async over a shared
//!   `PgPool`; multi-row writes run inside a single transaction.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: pool setup and embedded migrations.
//! - `DbRepository`: the struct holding the pool and all data access
//!   methods, one module per entity family.
//! - `DbError`: the specific error types this crate returns, including the
//!   conflict classification used for HTTP 409 mapping.

pub mod connection;
pub mod error;
pub mod filter;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations, PoolSettings};
pub use error::DbError;
pub use filter::{AuctionFilter, AuctionSort, MatchFilter, PlayerFilter, StatsFilter};
pub use repository::{
    AuctionEntryInput, AuctionListingRow, ContractInput, DbRepository, DeleteOutcome,
    LiveProgress, MatchDetail, MatchResult, PlayerBattingRow, PlayerBowlingRow, PlayerInput,
};
