use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Server,
    pub database: Database,
    pub stats: Stats,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// Bind address, e.g. "0.0.0.0".
    pub host: String,
    pub port: u16,
}

/// Connection-pool sizing for the PostgreSQL pool. The URL itself comes from
/// the `DATABASE_URL` environment variable, never from this file.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Knobs for the statistics endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
    /// Default number of rows returned by the leaderboard endpoints.
    pub leaderboard_limit: usize,
    /// Page-size ceiling for the auction listing.
    pub max_page_size: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: Server { host: "0.0.0.0".to_string(), port: 3000 },
            database: Database { max_connections: 10, acquire_timeout_secs: 5 },
            stats: Stats { leaderboard_limit: 10, max_page_size: 100 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert!(config.stats.leaderboard_limit > 0);
        assert!(config.stats.max_page_size >= config.stats.leaderboard_limit as i64);
    }
}
