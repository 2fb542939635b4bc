use core_types::{AuctionCategory, AuctionEntry};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{classify, DbError};
use crate::filter::AuctionFilter;
use crate::repository::DbRepository;

/// An auction row joined with its player name, as listed by the API.
#[derive(Debug, Clone, FromRow)]
pub struct AuctionListingRow {
    pub player_name: String,
    #[sqlx(flatten)]
    pub entry: AuctionEntry,
}

/// Fields accepted when recording an auction outcome.
#[derive(Debug, Clone)]
pub struct AuctionEntryInput {
    pub player_id: Uuid,
    pub base_price_lakh: Decimal,
    pub sold_price_lakh: Option<Decimal>,
    pub team_id: Option<Uuid>,
    pub is_sold: bool,
    pub bid_count: i32,
    pub category: AuctionCategory,
}

impl DbRepository {
    /// Paged auction listing for a season. Returns the page and the total
    /// row count under the same filter.
    pub async fn list_auction_entries(
        &self,
        series_id: Uuid,
        filter: &AuctionFilter,
    ) -> Result<(Vec<AuctionListingRow>, i64), DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT p.name AS player_name, a.*
            FROM auction_entries a
            JOIN players p ON p.id = a.player_id
            WHERE a.series_id = "#,
        );
        qb.push_bind(series_id);
        filter.apply(&mut qb);
        filter.apply_paging(&mut qb);
        let rows = qb
            .build_query_as::<AuctionListingRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM auction_entries a WHERE a.series_id = ",
        );
        count_qb.push_bind(series_id);
        filter.apply(&mut count_qb);
        let (total,): (i64,) = count_qb.build_query_as().fetch_one(&self.pool).await?;

        Ok((rows, total))
    }

    /// Every auction row of the season, unfiltered: the summary input.
    pub async fn auction_entries_for_series(
        &self,
        series_id: Uuid,
    ) -> Result<Vec<AuctionEntry>, DbError> {
        let entries = sqlx::query_as::<_, AuctionEntry>(
            "SELECT * FROM auction_entries WHERE series_id = $1",
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Retained / right-to-match counts from the season's contracts, for the
    /// summary buckets.
    pub async fn contract_retention_counts(
        &self,
        series_id: Uuid,
    ) -> Result<(i64, i64), DbError> {
        let (retained, rtm): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE is_retained),
                   COUNT(*) FILTER (WHERE is_rtm)
            FROM contracts WHERE series_id = $1
            "#,
        )
        .bind(series_id)
        .fetch_one(&self.pool)
        .await?;
        Ok((retained, rtm))
    }

    /// Records an auction outcome. A sold entry for a player retained in the
    /// same season is a conflict: a player cannot be both sold and retained.
    pub async fn create_auction_entry(
        &self,
        series_id: Uuid,
        input: &AuctionEntryInput,
    ) -> Result<AuctionEntry, DbError> {
        let mut tx = self.pool.begin().await?;

        if input.is_sold {
            let (retained,): (i64,) = sqlx::query_as(
                r#"
                SELECT COUNT(*) FROM contracts
                WHERE player_id = $1 AND series_id = $2 AND is_retained
                "#,
            )
            .bind(input.player_id)
            .bind(series_id)
            .fetch_one(&mut *tx)
            .await?;
            if retained > 0 {
                return Err(DbError::Conflict(
                    "player is already retained for this season".to_string(),
                ));
            }
        }

        let entry = sqlx::query_as::<_, AuctionEntry>(
            r#"
            INSERT INTO auction_entries
                (id, player_id, series_id, base_price_lakh, sold_price_lakh,
                 team_id, is_sold, bid_count, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.player_id)
        .bind(series_id)
        .bind(input.base_price_lakh)
        .bind(input.sold_price_lakh)
        .bind(input.team_id)
        .bind(input.is_sold)
        .bind(input.bid_count)
        .bind(input.category)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Administrative correction of a recorded outcome.
    pub async fn update_auction_entry(
        &self,
        id: Uuid,
        input: &AuctionEntryInput,
    ) -> Result<AuctionEntry, DbError> {
        sqlx::query_as::<_, AuctionEntry>(
            r#"
            UPDATE auction_entries
            SET base_price_lakh = $2, sold_price_lakh = $3, team_id = $4,
                is_sold = $5, bid_count = $6, category = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.base_price_lakh)
        .bind(input.sold_price_lakh)
        .bind(input.team_id)
        .bind(input.is_sold)
        .bind(input.bid_count)
        .bind(input.category)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(DbError::NotFound)
    }

    pub async fn delete_auction_entry(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM auction_entries WHERE id = $1")
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
