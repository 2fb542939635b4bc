//! Fetches the normalized completed-match rows that feed the stats engine.
//! Derivation happens in the `stats` crate; these queries only join and
//! group the base tables.

use core_types::{BattingCard, BowlingCard, TossDecision};
use sqlx::{FromRow, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::DbRepository;

#[derive(Debug, Clone, FromRow)]
struct MatchTotalsRow {
    match_id: Uuid,
    team1_id: Uuid,
    team2_id: Uuid,
    winner_id: Option<Uuid>,
    team1_runs: i64,
    team1_balls: i64,
    team2_runs: i64,
    team2_balls: i64,
}

impl From<MatchTotalsRow> for stats::MatchTotals {
    fn from(row: MatchTotalsRow) -> Self {
        stats::MatchTotals {
            match_id: row.match_id,
            team1_id: row.team1_id,
            team2_id: row.team2_id,
            winner_id: row.winner_id,
            team1_runs: row.team1_runs,
            team1_balls: row.team1_balls,
            team2_runs: row.team2_runs,
            team2_balls: row.team2_balls,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct VenueMatchRow {
    match_id: Uuid,
    team1_id: Uuid,
    team2_id: Uuid,
    toss_winner_id: Option<Uuid>,
    toss_decision: Option<TossDecision>,
    winner_id: Option<Uuid>,
    team1_runs: Option<i64>,
    team2_runs: Option<i64>,
}

impl From<VenueMatchRow> for stats::VenueMatch {
    fn from(row: VenueMatchRow) -> Self {
        // The side batting first follows from the toss outcome.
        let bat_first_id = match (row.toss_winner_id, row.toss_decision) {
            (Some(winner), Some(TossDecision::Bat)) => Some(winner),
            (Some(winner), Some(TossDecision::Bowl)) => {
                if winner == row.team1_id {
                    Some(row.team2_id)
                } else {
                    Some(row.team1_id)
                }
            }
            _ => None,
        };
        let first_innings_runs = bat_first_id.and_then(|bat_first| {
            if bat_first == row.team1_id {
                row.team1_runs
            } else {
                row.team2_runs
            }
        });
        stats::VenueMatch {
            match_id: row.match_id,
            toss_winner_id: row.toss_winner_id,
            bat_first_id,
            winner_id: row.winner_id,
            first_innings_runs,
        }
    }
}

/// One scorecard row tagged with its player, for grouping into leaderboards.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerBattingRow {
    pub player_name: String,
    #[sqlx(flatten)]
    pub card: BattingCard,
}

#[derive(Debug, Clone, FromRow)]
pub struct PlayerBowlingRow {
    pub player_name: String,
    #[sqlx(flatten)]
    pub card: BowlingCard,
}

#[derive(Debug, Clone, FromRow)]
struct PlayerTotalsRow {
    player_id: Uuid,
    player_name: String,
    runs: i64,
    fours: i64,
    sixes: i64,
    wickets: i64,
    maidens: i64,
}

/// Per-team batting sums for both sides of every completed match in a
/// season; the standings input.
const SEASON_MATCH_TOTALS_SQL: &str = r#"
SELECT m.id AS match_id, m.team1_id, m.team2_id, m.winner_id,
       COALESCE(b1.runs, 0) AS team1_runs, COALESCE(b1.balls, 0) AS team1_balls,
       COALESCE(b2.runs, 0) AS team2_runs, COALESCE(b2.balls, 0) AS team2_balls
FROM matches m
LEFT JOIN (
    SELECT match_id, team_id, SUM(runs)::bigint AS runs, SUM(balls_faced)::bigint AS balls
    FROM batting_cards GROUP BY match_id, team_id
) b1 ON b1.match_id = m.id AND b1.team_id = m.team1_id
LEFT JOIN (
    SELECT match_id, team_id, SUM(runs)::bigint AS runs, SUM(balls_faced)::bigint AS balls
    FROM batting_cards GROUP BY match_id, team_id
) b2 ON b2.match_id = m.id AND b2.team_id = m.team2_id
WHERE m.series_id = $1 AND m.status = 'completed'
ORDER BY m.scheduled_at ASC
"#;

impl DbRepository {
    /// Standings input: innings totals for every completed match of the
    /// season. Matches without scorecards yet contribute zero totals.
    pub async fn season_match_totals(
        &self,
        series_id: Uuid,
    ) -> Result<Vec<stats::MatchTotals>, DbError> {
        let rows = sqlx::query_as::<_, MatchTotalsRow>(SEASON_MATCH_TOTALS_SQL)
            .bind(series_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Innings totals for every completed match one team has played,
    /// optionally narrowed to a season. Feeds the single-team record.
    pub async fn team_match_totals(
        &self,
        team_id: Uuid,
        season: Option<i32>,
    ) -> Result<Vec<stats::MatchTotals>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT m.id AS match_id, m.team1_id, m.team2_id, m.winner_id,
                   COALESCE(b1.runs, 0) AS team1_runs, COALESCE(b1.balls, 0) AS team1_balls,
                   COALESCE(b2.runs, 0) AS team2_runs, COALESCE(b2.balls, 0) AS team2_balls
            FROM matches m
            JOIN series s ON s.id = m.series_id
            LEFT JOIN (
                SELECT match_id, team_id, SUM(runs)::bigint AS runs, SUM(balls_faced)::bigint AS balls
                FROM batting_cards GROUP BY match_id, team_id
            ) b1 ON b1.match_id = m.id AND b1.team_id = m.team1_id
            LEFT JOIN (
                SELECT match_id, team_id, SUM(runs)::bigint AS runs, SUM(balls_faced)::bigint AS balls
                FROM batting_cards GROUP BY match_id, team_id
            ) b2 ON b2.match_id = m.id AND b2.team_id = m.team2_id
            WHERE m.status = 'completed' AND (m.team1_id = "#,
        );
        qb.push_bind(team_id)
            .push(" OR m.team2_id = ")
            .push_bind(team_id)
            .push(")");
        if let Some(year) = season {
            qb.push(" AND s.season_year = ").push_bind(year);
        }
        qb.push(" ORDER BY m.scheduled_at ASC");

        let rows = qb
            .build_query_as::<MatchTotalsRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Venue analytics input: completed matches at one stadium with per-side
    /// batting sums, reduced to toss/winner/first-innings facts.
    pub async fn venue_matches(
        &self,
        stadium_id: Uuid,
    ) -> Result<Vec<stats::VenueMatch>, DbError> {
        let rows = sqlx::query_as::<_, VenueMatchRow>(
            r#"
            SELECT m.id AS match_id, m.team1_id, m.team2_id,
                   m.toss_winner_id, m.toss_decision, m.winner_id,
                   b1.runs AS team1_runs, b2.runs AS team2_runs
            FROM matches m
            LEFT JOIN (
                SELECT match_id, team_id, SUM(runs)::bigint AS runs
                FROM batting_cards GROUP BY match_id, team_id
            ) b1 ON b1.match_id = m.id AND b1.team_id = m.team1_id
            LEFT JOIN (
                SELECT match_id, team_id, SUM(runs)::bigint AS runs
                FROM batting_cards GROUP BY match_id, team_id
            ) b2 ON b2.match_id = m.id AND b2.team_id = m.team2_id
            WHERE m.stadium_id = $1 AND m.status = 'completed'
            ORDER BY m.scheduled_at ASC
            "#,
        )
        .bind(stadium_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// All batting rows of a season's completed matches, tagged with player
    /// names, for the runs leaderboard.
    pub async fn season_batting_rows(
        &self,
        series_id: Uuid,
    ) -> Result<Vec<PlayerBattingRow>, DbError> {
        let rows = sqlx::query_as::<_, PlayerBattingRow>(
            r#"
            SELECT p.name AS player_name, bc.*
            FROM batting_cards bc
            JOIN players p ON p.id = bc.player_id
            JOIN matches m ON m.id = bc.match_id
            WHERE m.series_id = $1 AND m.status = 'completed'
            "#,
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn season_bowling_rows(
        &self,
        series_id: Uuid,
    ) -> Result<Vec<PlayerBowlingRow>, DbError> {
        let rows = sqlx::query_as::<_, PlayerBowlingRow>(
            r#"
            SELECT p.name AS player_name, bc.*
            FROM bowling_cards bc
            JOIN players p ON p.id = bc.player_id
            JOIN matches m ON m.id = bc.match_id
            WHERE m.series_id = $1 AND m.status = 'completed'
            "#,
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Per-player season totals feeding the MVP formula. Players appear when
    /// they have at least one scorecard row in the season.
    pub async fn player_season_totals(
        &self,
        series_id: Uuid,
    ) -> Result<Vec<stats::PlayerSeasonTotals>, DbError> {
        let rows = sqlx::query_as::<_, PlayerTotalsRow>(
            r#"
            SELECT p.id AS player_id, p.name AS player_name,
                   COALESCE(bat.runs, 0) AS runs,
                   COALESCE(bat.fours, 0) AS fours,
                   COALESCE(bat.sixes, 0) AS sixes,
                   COALESCE(bowl.wickets, 0) AS wickets,
                   COALESCE(bowl.maidens, 0) AS maidens
            FROM players p
            LEFT JOIN (
                SELECT bc.player_id, SUM(bc.runs)::bigint AS runs,
                       SUM(bc.fours)::bigint AS fours, SUM(bc.sixes)::bigint AS sixes
                FROM batting_cards bc
                JOIN matches m ON m.id = bc.match_id
                WHERE m.series_id = $1 AND m.status = 'completed'
                GROUP BY bc.player_id
            ) bat ON bat.player_id = p.id
            LEFT JOIN (
                SELECT bc.player_id, SUM(bc.wickets)::bigint AS wickets,
                       SUM(bc.maidens)::bigint AS maidens
                FROM bowling_cards bc
                JOIN matches m ON m.id = bc.match_id
                WHERE m.series_id = $1 AND m.status = 'completed'
                GROUP BY bc.player_id
            ) bowl ON bowl.player_id = p.id
            WHERE bat.player_id IS NOT NULL OR bowl.player_id IS NOT NULL
            "#,
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| stats::PlayerSeasonTotals {
                player_id: r.player_id,
                player_name: r.player_name,
                runs: r.runs,
                fours: r.fours,
                sixes: r.sixes,
                wickets: r.wickets,
                maidens: r.maidens,
            })
            .collect())
    }
}
