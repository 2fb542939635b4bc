//! Request handlers, one module per entity family. Every handler returns the
//! uniform envelope via `ApiResponse` or an `AppError` that renders it.

pub mod admin;
pub mod auctions;
pub mod contracts;
pub mod matches;
pub mod players;
pub mod series;
pub mod stadiums;
pub mod stats;
pub mod teams;
