use chrono::{DateTime, Utc};
use core_types::{BattingCard, BowlingCard, Match, MatchStatus, TossDecision, WinType};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{classify, DbError};
use crate::filter::MatchFilter;
use crate::repository::DbRepository;

/// A match with its nested scorecards, for the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub fixture: Match,
    pub batting_cards: Vec<BattingCard>,
    pub bowling_cards: Vec<BowlingCard>,
}

/// Result fields applied when a match completes.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub winner_id: Option<Uuid>,
    pub win_type: WinType,
    pub win_margin: Option<i32>,
}

/// Live-progress counters applied while a match is in play.
#[derive(Debug, Clone, Copy)]
pub struct LiveProgress {
    pub innings: i32,
    pub target: Option<i32>,
    pub current_runs: i32,
    pub current_wickets: i32,
    pub balls_bowled: i32,
}

impl DbRepository {
    pub async fn list_matches(&self, filter: &MatchFilter) -> Result<Vec<Match>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT m.* FROM matches m JOIN series s ON s.id = m.series_id WHERE 1=1",
        );
        filter.apply(&mut qb);
        qb.push(" ORDER BY m.scheduled_at ASC");
        let matches = qb.build_query_as::<Match>().fetch_all(&self.pool).await?;
        Ok(matches)
    }

    pub async fn get_match(&self, id: Uuid) -> Result<Match, DbError> {
        sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    /// Fetches the match and both scorecards concurrently.
    pub async fn get_match_detail(&self, id: Uuid) -> Result<MatchDetail, DbError> {
        let fixture_future = self.get_match(id);
        let batting_future = sqlx::query_as::<_, BattingCard>(
            "SELECT * FROM batting_cards WHERE match_id = $1 ORDER BY runs DESC",
        )
        .bind(id)
        .fetch_all(&self.pool);
        let bowling_future = sqlx::query_as::<_, BowlingCard>(
            "SELECT * FROM bowling_cards WHERE match_id = $1 ORDER BY wickets DESC",
        )
        .bind(id)
        .fetch_all(&self.pool);

        let (fixture_res, batting_res, bowling_res) =
            tokio::join!(fixture_future, batting_future, bowling_future);

        Ok(MatchDetail {
            fixture: fixture_res?,
            batting_cards: batting_res?,
            bowling_cards: bowling_res?,
        })
    }

    pub async fn create_match(
        &self,
        series_id: Uuid,
        team1_id: Uuid,
        team2_id: Uuid,
        stadium_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Match, DbError> {
        sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (id, series_id, team1_id, team2_id, stadium_id, scheduled_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'scheduled')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(series_id)
        .bind(team1_id)
        .bind(team2_id)
        .bind(stadium_id)
        .bind(scheduled_at)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    /// Corrects a wrongly entered fixture (teams, venue, schedule) and, for
    /// a completed match, its recorded result. The series a match belongs to
    /// is fixed at creation; lifecycle changes go through
    /// `update_match_status`.
    pub async fn update_match(
        &self,
        id: Uuid,
        team1_id: Uuid,
        team2_id: Uuid,
        stadium_id: Uuid,
        scheduled_at: DateTime<Utc>,
        result: Option<MatchResult>,
    ) -> Result<Match, DbError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Match>(
            "SELECT * FROM matches WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

        if result.is_some() && current.status != MatchStatus::Completed {
            return Err(DbError::Conflict(
                "a result can only be corrected on a completed match".to_string(),
            ));
        }
        let (winner_id, win_type, win_margin) = match &result {
            Some(r) => (r.winner_id, Some(r.win_type), r.win_margin),
            None => (current.winner_id, current.win_type, current.win_margin),
        };

        let updated = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET team1_id = $2, team2_id = $3, stadium_id = $4, scheduled_at = $5,
                winner_id = $6, win_type = $7, win_margin = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(team1_id)
        .bind(team2_id)
        .bind(stadium_id)
        .bind(scheduled_at)
        .bind(winner_id)
        .bind(win_type)
        .bind(win_margin)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Moves a match through its lifecycle. Illegal transitions are a
    /// conflict; completing a match requires result fields, and the toss may
    /// be recorded when play starts.
    pub async fn update_match_status(
        &self,
        id: Uuid,
        next: MatchStatus,
        toss: Option<(Uuid, TossDecision)>,
        result: Option<MatchResult>,
    ) -> Result<Match, DbError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Match>(
            "SELECT * FROM matches WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

        if !current.status.can_transition_to(next) {
            return Err(DbError::Conflict(format!(
                "cannot move match from {} to {}",
                current.status, next
            )));
        }
        if next == MatchStatus::Completed && result.is_none() {
            return Err(DbError::Conflict(
                "completing a match requires a result".to_string(),
            ));
        }

        let (toss_winner, toss_decision) = match toss {
            Some((winner, decision)) => (Some(winner), Some(decision)),
            None => (current.toss_winner_id, current.toss_decision),
        };
        let (winner_id, win_type, win_margin) = match &result {
            Some(r) => (r.winner_id, Some(r.win_type), r.win_margin),
            None => (None, None, None),
        };

        let updated = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET status = $2, toss_winner_id = $3, toss_decision = $4,
                winner_id = $5, win_type = $6, win_margin = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(next)
        .bind(toss_winner)
        .bind(toss_decision)
        .bind(winner_id)
        .bind(win_type)
        .bind(win_margin)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Writes the authoritative live counters. Only valid while live.
    pub async fn update_live_progress(
        &self,
        id: Uuid,
        progress: LiveProgress,
    ) -> Result<Match, DbError> {
        let updated = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET innings = $2, target = $3, current_runs = $4,
                current_wickets = $5, balls_bowled = $6
            WHERE id = $1 AND status = 'live'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(progress.innings)
        .bind(progress.target)
        .bind(progress.current_runs)
        .bind(progress.current_wickets)
        .bind(progress.balls_bowled)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(m) => Ok(m),
            // Either the match is unknown or it is not live; disambiguate.
            None => match self.get_match(id).await {
                Ok(_) => Err(DbError::Conflict(
                    "live progress can only be recorded for a live match".to_string(),
                )),
                Err(e) => Err(e),
            },
        }
    }

    pub async fn delete_match(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// Completed fixtures between two teams, newest first, for head-to-head.
    pub async fn matches_between(
        &self,
        team_a: Uuid,
        team_b: Uuid,
    ) -> Result<Vec<Match>, DbError> {
        let matches = sqlx::query_as::<_, Match>(
            r#"
            SELECT * FROM matches
            WHERE status = 'completed'
              AND ((team1_id = $1 AND team2_id = $2) OR (team1_id = $2 AND team2_id = $1))
            ORDER BY scheduled_at DESC
            "#,
        )
        .bind(team_a)
        .bind(team_b)
        .fetch_all(&self.pool)
        .await?;
        Ok(matches)
    }
}
