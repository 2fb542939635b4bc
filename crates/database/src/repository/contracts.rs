use core_types::{AuctionCategory, Contract};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{classify, DbError};
use crate::repository::DbRepository;

#[derive(Debug, Clone)]
pub struct ContractInput {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub series_id: Uuid,
    pub price_lakh: Decimal,
    pub category: AuctionCategory,
    pub is_retained: bool,
    pub is_rtm: bool,
}

impl DbRepository {
    pub async fn list_contracts_for_series(
        &self,
        series_id: Uuid,
        team_id: Option<Uuid>,
    ) -> Result<Vec<Contract>, DbError> {
        let contracts = match team_id {
            Some(team) => {
                sqlx::query_as::<_, Contract>(
                    "SELECT * FROM contracts WHERE series_id = $1 AND team_id = $2 ORDER BY price_lakh DESC",
                )
                .bind(series_id)
                .bind(team)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Contract>(
                    "SELECT * FROM contracts WHERE series_id = $1 ORDER BY price_lakh DESC",
                )
                .bind(series_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(contracts)
    }

    pub async fn get_contract(&self, id: Uuid) -> Result<Contract, DbError> {
        sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    /// Creates a contract. A retained contract for a player already sold at
    /// the season's auction is a conflict, mirroring the auction-side check.
    pub async fn create_contract(&self, input: &ContractInput) -> Result<Contract, DbError> {
        let mut tx = self.pool.begin().await?;

        if input.is_retained {
            let (sold,): (i64,) = sqlx::query_as(
                r#"
                SELECT COUNT(*) FROM auction_entries
                WHERE player_id = $1 AND series_id = $2 AND is_sold
                "#,
            )
            .bind(input.player_id)
            .bind(input.series_id)
            .fetch_one(&mut *tx)
            .await?;
            if sold > 0 {
                return Err(DbError::Conflict(
                    "player was already sold at auction for this season".to_string(),
                ));
            }
        }

        let contract = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts
                (id, player_id, team_id, series_id, price_lakh, category, is_retained, is_rtm)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.player_id)
        .bind(input.team_id)
        .bind(input.series_id)
        .bind(input.price_lakh)
        .bind(input.category)
        .bind(input.is_retained)
        .bind(input.is_rtm)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await?;
        Ok(contract)
    }

    pub async fn update_contract(
        &self,
        id: Uuid,
        price_lakh: Decimal,
        category: AuctionCategory,
        is_retained: bool,
        is_rtm: bool,
    ) -> Result<Contract, DbError> {
        sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts
            SET price_lakh = $2, category = $3, is_retained = $4, is_rtm = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(price_lakh)
        .bind(category)
        .bind(is_retained)
        .bind(is_rtm)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(DbError::NotFound)
    }

    pub async fn delete_contract(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
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
