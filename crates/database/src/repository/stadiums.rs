use core_types::Stadium;
use uuid::Uuid;

use crate::error::{classify, DbError};
use crate::repository::{DbRepository, DeleteOutcome};

impl DbRepository {
    pub async fn list_stadiums(&self) -> Result<Vec<Stadium>, DbError> {
        let stadiums =
            sqlx::query_as::<_, Stadium>("SELECT * FROM stadiums ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(stadiums)
    }

    pub async fn get_stadium(&self, id: Uuid) -> Result<Stadium, DbError> {
        sqlx::query_as::<_, Stadium>("SELECT * FROM stadiums WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    pub async fn create_stadium(
        &self,
        name: &str,
        city: &str,
        capacity: i32,
    ) -> Result<Stadium, DbError> {
        sqlx::query_as::<_, Stadium>(
            r#"
            INSERT INTO stadiums (id, name, city, capacity, active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(city)
        .bind(capacity)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    pub async fn update_stadium(
        &self,
        id: Uuid,
        name: &str,
        city: &str,
        capacity: i32,
        active: bool,
    ) -> Result<Stadium, DbError> {
        sqlx::query_as::<_, Stadium>(
            r#"
            UPDATE stadiums SET name = $2, city = $3, capacity = $4, active = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(city)
        .bind(capacity)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(DbError::NotFound)
    }

    pub async fn delete_stadium(&self, id: Uuid) -> Result<DeleteOutcome, DbError> {
        let (references,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM matches WHERE stadium_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if references > 0 {
            let result = sqlx::query("UPDATE stadiums SET active = FALSE WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(DbError::NotFound);
            }
            return Ok(DeleteOutcome::Deactivated);
        }

        let result = sqlx::query("DELETE FROM stadiums WHERE id = $1")
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
