use chrono::NaiveDate;
use core_types::Series;
use uuid::Uuid;

use crate::error::{classify, DbError};
use crate::repository::DbRepository;

impl DbRepository {
    pub async fn list_series(&self) -> Result<Vec<Series>, DbError> {
        let series =
            sqlx::query_as::<_, Series>("SELECT * FROM series ORDER BY season_year DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(series)
    }

    pub async fn get_series(&self, id: Uuid) -> Result<Series, DbError> {
        sqlx::query_as::<_, Series>("SELECT * FROM series WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    pub async fn get_series_by_year(&self, season_year: i32) -> Result<Series, DbError> {
        sqlx::query_as::<_, Series>("SELECT * FROM series WHERE season_year = $1")
            .bind(season_year)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::SeasonNotFound(season_year))
    }

    pub async fn create_series(
        &self,
        season_year: i32,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, DbError> {
        sqlx::query_as::<_, Series>(
            r#"
            INSERT INTO series (id, season_year, name, start_date, end_date, completed)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(season_year)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    pub async fn update_series(
        &self,
        id: Uuid,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        completed: bool,
    ) -> Result<Series, DbError> {
        sqlx::query_as::<_, Series>(
            r#"
            UPDATE series SET name = $2, start_date = $3, end_date = $4, completed = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(DbError::NotFound)
    }

    /// Series rows are deleted only while empty; FK references from matches,
    /// contracts or auctions surface as a conflict.
    pub async fn delete_series(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM series WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
