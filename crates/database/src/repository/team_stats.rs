use core_types::TeamStats;
use stats::StandingsRow;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::DbRepository;

impl DbRepository {
    /// Bulk-upserts the recomputed standings for a season inside a single
    /// transaction; a failure leaves the previous rows untouched.
    pub async fn upsert_team_stats(
        &self,
        series_id: Uuid,
        rows: &[StandingsRow],
    ) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut written = 0u64;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO team_stats
                    (series_id, team_id, matches_played, matches_won, matches_lost,
                     no_results, points, net_run_rate, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
                ON CONFLICT (series_id, team_id) DO UPDATE
                SET matches_played = EXCLUDED.matches_played,
                    matches_won = EXCLUDED.matches_won,
                    matches_lost = EXCLUDED.matches_lost,
                    no_results = EXCLUDED.no_results,
                    points = EXCLUDED.points,
                    net_run_rate = EXCLUDED.net_run_rate,
                    updated_at = NOW()
                "#,
            )
            .bind(series_id)
            .bind(row.team_id)
            .bind(row.matches_played)
            .bind(row.matches_won)
            .bind(row.matches_lost)
            .bind(row.no_results)
            .bind(row.points)
            .bind(row.net_run_rate)
            .execute(&mut *tx)
            .await?;
            written += 1;
        }

        tx.commit().await?;
        Ok(written)
    }

    /// The stored standings rows, for comparison against a fresh recompute.
    pub async fn get_team_stats(&self, series_id: Uuid) -> Result<Vec<TeamStats>, DbError> {
        let rows = sqlx::query_as::<_, TeamStats>(
            r#"
            SELECT * FROM team_stats
            WHERE series_id = $1
            ORDER BY points DESC, net_run_rate DESC
            "#,
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
