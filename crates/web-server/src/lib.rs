//! The axum HTTP layer: routes, handlers, the uniform JSON envelope and the
//! error-to-status mapping. All data access goes through `DbRepository`; all
//! derived figures come from the `stats` crate.

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use configuration::Config;
use database::{DbRepository, PoolSettings};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod envelope;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
    pub config: Config,
}

/// # GET /api/health
///
/// Enveloped like every other endpoint.
async fn health() -> Json<envelope::ApiResponse<&'static str>> {
    Json(envelope::ApiResponse::ok("OK"))
}

/// The main function to configure and run the web server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let db_pool = database::connect(PoolSettings {
        max_connections: config.database.max_connections,
        acquire_timeout_secs: config.database.acquire_timeout_secs,
    })
    .await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app_state = Arc::new(AppState { db_repo, config });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/teams", get(handlers::teams::list_teams).post(handlers::teams::create_team))
        .route(
            "/api/teams/:id",
            get(handlers::teams::get_team)
                .put(handlers::teams::update_team)
                .delete(handlers::teams::delete_team),
        )
        .route("/api/teams/:id/stats", get(handlers::stats::team_stats))
        .route(
            "/api/teams/:id/head-to-head/:other_id",
            get(handlers::stats::head_to_head_record),
        )
        .route(
            "/api/players",
            get(handlers::players::list_players).post(handlers::players::create_player),
        )
        .route(
            "/api/players/:id",
            get(handlers::players::get_player)
                .put(handlers::players::update_player)
                .delete(handlers::players::delete_player),
        )
        .route(
            "/api/stadiums",
            get(handlers::stadiums::list_stadiums).post(handlers::stadiums::create_stadium),
        )
        .route(
            "/api/stadiums/:id",
            get(handlers::stadiums::get_stadium)
                .put(handlers::stadiums::update_stadium)
                .delete(handlers::stadiums::delete_stadium),
        )
        .route(
            "/api/series",
            get(handlers::series::list_series).post(handlers::series::create_series),
        )
        .route(
            "/api/series/:id",
            get(handlers::series::get_series)
                .put(handlers::series::update_series)
                .delete(handlers::series::delete_series),
        )
        .route(
            "/api/matches",
            get(handlers::matches::list_matches).post(handlers::matches::create_match),
        )
        .route(
            "/api/matches/:id",
            get(handlers::matches::get_match)
                .put(handlers::matches::update_match)
                .delete(handlers::matches::delete_match),
        )
        .route("/api/matches/:id/status", put(handlers::matches::update_status))
        .route(
            "/api/matches/:id/live",
            get(handlers::matches::get_live).put(handlers::matches::put_live),
        )
        .route("/api/matches/:id/scorecards", post(handlers::matches::save_scorecards))
        .route("/api/seasons/:year/standings", get(handlers::stats::standings))
        .route("/api/seasons/:year/contracts", get(handlers::contracts::list_contracts))
        .route("/api/contracts", post(handlers::contracts::create_contract))
        .route(
            "/api/contracts/:id",
            get(handlers::contracts::get_contract)
                .put(handlers::contracts::update_contract)
                .delete(handlers::contracts::delete_contract),
        )
        .route(
            "/api/auctions/:year",
            get(handlers::auctions::list_entries).post(handlers::auctions::create_entry),
        )
        .route("/api/auctions/:year/summary", get(handlers::auctions::season_summary))
        .route(
            "/api/auctions/entries/:id",
            put(handlers::auctions::update_entry).delete(handlers::auctions::delete_entry),
        )
        .route("/api/stats/leaderboard", get(handlers::stats::leaderboard))
        .route("/api/admin/recompute/:year", post(handlers::admin::recompute_season))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
