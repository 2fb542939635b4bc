use core_types::{BattingCard, BowlingCard, MatchStatus};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{classify, DbError};
use crate::filter::StatsFilter;
use crate::repository::DbRepository;

impl DbRepository {
    /// Inserts or corrects scorecard rows for a completed match, both
    /// disciplines in one transaction. Rejected with a conflict while the
    /// match is not completed, since scorecards exist only for completed
    /// matches.
    pub async fn save_scorecards(
        &self,
        match_id: Uuid,
        batting: &[BattingCard],
        bowling: &[BowlingCard],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let (status,): (MatchStatus,) =
            sqlx::query_as("SELECT status FROM matches WHERE id = $1")
                .bind(match_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(DbError::NotFound)?;
        if status != MatchStatus::Completed {
            return Err(DbError::Conflict(
                "scorecards can only be recorded for a completed match".to_string(),
            ));
        }

        for card in batting {
            sqlx::query(
                r#"
                INSERT INTO batting_cards
                    (match_id, player_id, team_id, runs, balls_faced, fours, sixes, is_out, dismissal)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (match_id, player_id) DO UPDATE
                SET team_id = EXCLUDED.team_id, runs = EXCLUDED.runs,
                    balls_faced = EXCLUDED.balls_faced, fours = EXCLUDED.fours,
                    sixes = EXCLUDED.sixes, is_out = EXCLUDED.is_out,
                    dismissal = EXCLUDED.dismissal
                "#,
            )
            .bind(match_id)
            .bind(card.player_id)
            .bind(card.team_id)
            .bind(card.runs)
            .bind(card.balls_faced)
            .bind(card.fours)
            .bind(card.sixes)
            .bind(card.is_out)
            .bind(card.dismissal)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        }

        for card in bowling {
            sqlx::query(
                r#"
                INSERT INTO bowling_cards
                    (match_id, player_id, team_id, balls_bowled, runs_conceded, wickets, maidens)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (match_id, player_id) DO UPDATE
                SET team_id = EXCLUDED.team_id, balls_bowled = EXCLUDED.balls_bowled,
                    runs_conceded = EXCLUDED.runs_conceded, wickets = EXCLUDED.wickets,
                    maidens = EXCLUDED.maidens
                "#,
            )
            .bind(match_id)
            .bind(card.player_id)
            .bind(card.team_id)
            .bind(card.balls_bowled)
            .bind(card.runs_conceded)
            .bind(card.wickets)
            .bind(card.maidens)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// A player's batting rows from completed matches, optionally narrowed
    /// by season or date range.
    pub async fn player_batting_cards(
        &self,
        player_id: Uuid,
        filter: &StatsFilter,
    ) -> Result<Vec<BattingCard>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT bc.* FROM batting_cards bc
            JOIN matches m ON m.id = bc.match_id
            JOIN series s ON s.id = m.series_id
            WHERE m.status = 'completed' AND bc.player_id = "#,
        );
        qb.push_bind(player_id);
        filter.apply(&mut qb);
        qb.push(" ORDER BY m.scheduled_at ASC");
        let cards = qb.build_query_as::<BattingCard>().fetch_all(&self.pool).await?;
        Ok(cards)
    }

    pub async fn player_bowling_cards(
        &self,
        player_id: Uuid,
        filter: &StatsFilter,
    ) -> Result<Vec<BowlingCard>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT bc.* FROM bowling_cards bc
            JOIN matches m ON m.id = bc.match_id
            JOIN series s ON s.id = m.series_id
            WHERE m.status = 'completed' AND bc.player_id = "#,
        );
        qb.push_bind(player_id);
        filter.apply(&mut qb);
        qb.push(" ORDER BY m.scheduled_at ASC");
        let cards = qb.build_query_as::<BowlingCard>().fetch_all(&self.pool).await?;
        Ok(cards)
    }
}
