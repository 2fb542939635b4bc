use core_types::Team;
use uuid::Uuid;

use crate::error::{classify, DbError};
use crate::repository::DbRepository;

/// Outcome of a team/player/stadium delete: rows with match history are
/// soft-deactivated to preserve referential history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    Deactivated,
}

impl DbRepository {
    pub async fn list_teams(&self, active_only: bool) -> Result<Vec<Team>, DbError> {
        let sql = if active_only {
            "SELECT * FROM teams WHERE active ORDER BY name ASC"
        } else {
            "SELECT * FROM teams ORDER BY name ASC"
        };
        let teams = sqlx::query_as::<_, Team>(sql).fetch_all(&self.pool).await?;
        Ok(teams)
    }

    pub async fn get_team(&self, id: Uuid) -> Result<Team, DbError> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    pub async fn create_team(
        &self,
        name: &str,
        code: &str,
        color: &str,
    ) -> Result<Team, DbError> {
        sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (id, name, code, color, active, created_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(code)
        .bind(color)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    pub async fn update_team(
        &self,
        id: Uuid,
        name: &str,
        code: &str,
        color: &str,
        active: bool,
    ) -> Result<Team, DbError> {
        sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams SET name = $2, code = $3, color = $4, active = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(code)
        .bind(color)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(DbError::NotFound)
    }

    /// Deletes a team outright when nothing references it; soft-deactivates
    /// it when match history exists.
    pub async fn delete_team(&self, id: Uuid) -> Result<DeleteOutcome, DbError> {
        let (references,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM matches
            WHERE team1_id = $1 OR team2_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if references > 0 {
            let result = sqlx::query("UPDATE teams SET active = FALSE WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(DbError::NotFound);
            }
            return Ok(DeleteOutcome::Deactivated);
        }

        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(DeleteOutcome::Deleted)
    }

    /// Name lookup used when shaping aggregate responses.
    pub async fn team_names(&self) -> Result<Vec<(Uuid, String)>, DbError> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM teams ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// Teams contracted for a season. Used by standings so that a team with
    /// no completed matches still appears zero-filled.
    pub async fn team_names_for_series(
        &self,
        series_id: Uuid,
    ) -> Result<Vec<(Uuid, String)>, DbError> {
        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT DISTINCT t.id, t.name FROM teams t
            WHERE t.id IN (
                SELECT team_id FROM contracts WHERE series_id = $1
                UNION
                SELECT team1_id FROM matches WHERE series_id = $1
                UNION
                SELECT team2_id FROM matches WHERE series_id = $1
            )
            ORDER BY t.name ASC
            "#,
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
