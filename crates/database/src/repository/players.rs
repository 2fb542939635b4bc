use chrono::NaiveDate;
use core_types::{Player, PlayerRole};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{classify, DbError};
use crate::filter::PlayerFilter;
use crate::repository::{DbRepository, DeleteOutcome};

/// Optional fields accepted by create/update.
#[derive(Debug, Clone)]
pub struct PlayerInput {
    pub name: String,
    pub role: PlayerRole,
    pub nationality: String,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl DbRepository {
    pub async fn list_players(
        &self,
        filter: &PlayerFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Player>, i64), DbError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT p.* FROM players p WHERE 1=1");
        filter.apply(&mut qb);
        qb.push(" ORDER BY p.name ASC");
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);
        let players = qb.build_query_as::<Player>().fetch_all(&self.pool).await?;

        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM players p WHERE 1=1");
        filter.apply(&mut count_qb);
        let (total,): (i64,) = count_qb.build_query_as().fetch_one(&self.pool).await?;

        Ok((players, total))
    }

    pub async fn get_player(&self, id: Uuid) -> Result<Player, DbError> {
        sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    pub async fn create_player(&self, input: &PlayerInput) -> Result<Player, DbError> {
        sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players
                (id, name, role, nationality, batting_style, bowling_style, date_of_birth, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(input.role)
        .bind(&input.nationality)
        .bind(&input.batting_style)
        .bind(&input.bowling_style)
        .bind(input.date_of_birth)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    pub async fn update_player(
        &self,
        id: Uuid,
        input: &PlayerInput,
        active: bool,
    ) -> Result<Player, DbError> {
        sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET name = $2, role = $3, nationality = $4, batting_style = $5,
                bowling_style = $6, date_of_birth = $7, active = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.role)
        .bind(&input.nationality)
        .bind(&input.batting_style)
        .bind(&input.bowling_style)
        .bind(input.date_of_birth)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(DbError::NotFound)
    }

    /// Hard delete only when the player has no scorecard, contract or
    /// auction history; otherwise soft-deactivate.
    pub async fn delete_player(&self, id: Uuid) -> Result<DeleteOutcome, DbError> {
        let (references,): (i64,) = sqlx::query_as(
            r#"
            SELECT (SELECT COUNT(*) FROM batting_cards WHERE player_id = $1)
                 + (SELECT COUNT(*) FROM bowling_cards WHERE player_id = $1)
                 + (SELECT COUNT(*) FROM contracts WHERE player_id = $1)
                 + (SELECT COUNT(*) FROM auction_entries WHERE player_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if references > 0 {
            let result = sqlx::query("UPDATE players SET active = FALSE WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(DbError::NotFound);
            }
            return Ok(DeleteOutcome::Deactivated);
        }

        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(DeleteOutcome::Deleted)
    }
}
