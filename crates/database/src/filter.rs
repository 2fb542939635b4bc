//! Structured query filters.
//!
//! Each filter is a set of optional predicates appended to a
//! `sqlx::QueryBuilder` with bound parameters. Queries are never assembled
//! from raw user strings.

use chrono::NaiveDate;
use core_types::{AuctionCategory, MatchStatus, PlayerRole};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// Filters for the match listing. Predicates assume the query aliases
/// `matches` as `m` and joins `series` as `s`.
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub season: Option<i32>,
    pub team: Option<Uuid>,
    pub status: Option<MatchStatus>,
}

impl MatchFilter {
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(year) = self.season {
            qb.push(" AND s.season_year = ").push_bind(year);
        }
        if let Some(team) = self.team {
            qb.push(" AND (m.team1_id = ")
                .push_bind(team)
                .push(" OR m.team2_id = ")
                .push_bind(team)
                .push(")");
        }
        if let Some(status) = self.status {
            qb.push(" AND m.status = ").push_bind(status);
        }
    }
}

/// Filters for the player listing (alias `p`).
#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub role: Option<PlayerRole>,
    pub nationality: Option<String>,
    pub active: Option<bool>,
}

impl PlayerFilter {
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(role) = self.role {
            qb.push(" AND p.role = ").push_bind(role);
        }
        if let Some(ref nationality) = self.nationality {
            qb.push(" AND p.nationality = ").push_bind(nationality.clone());
        }
        if let Some(active) = self.active {
            qb.push(" AND p.active = ").push_bind(active);
        }
    }
}

/// Period restriction for statistics queries: an optional season and an
/// optional date range, both narrowing the completed-match set.
/// Predicates assume aliases `m` (matches) and `s` (series).
#[derive(Debug, Clone, Default)]
pub struct StatsFilter {
    pub season: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl StatsFilter {
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(year) = self.season {
            qb.push(" AND s.season_year = ").push_bind(year);
        }
        if let Some(from) = self.from {
            qb.push(" AND m.scheduled_at::date >= ").push_bind(from);
        }
        if let Some(to) = self.to {
            qb.push(" AND m.scheduled_at::date <= ").push_bind(to);
        }
    }
}

/// Sort orders for the auction listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionSort {
    #[default]
    SoldPriceDesc,
    SoldPriceAsc,
    BasePriceDesc,
    BidCountDesc,
}

impl AuctionSort {
    /// Fixed ORDER BY fragments; never interpolated from user input.
    pub fn order_clause(&self) -> &'static str {
        match self {
            AuctionSort::SoldPriceDesc => " ORDER BY a.sold_price_lakh DESC NULLS LAST",
            AuctionSort::SoldPriceAsc => " ORDER BY a.sold_price_lakh ASC NULLS LAST",
            AuctionSort::BasePriceDesc => " ORDER BY a.base_price_lakh DESC",
            AuctionSort::BidCountDesc => " ORDER BY a.bid_count DESC",
        }
    }
}

/// Filters and paging for the auction-result listing (alias `a`). The season
/// summary is computed independently of this filter.
#[derive(Debug, Clone, Default)]
pub struct AuctionFilter {
    pub sold: Option<bool>,
    pub category: Option<AuctionCategory>,
    pub sort: AuctionSort,
    pub limit: i64,
    pub offset: i64,
}

impl AuctionFilter {
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(sold) = self.sold {
            qb.push(" AND a.is_sold = ").push_bind(sold);
        }
        if let Some(category) = self.category {
            qb.push(" AND a.category = ").push_bind(category);
        }
    }

    pub fn apply_paging(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(self.sort.order_clause());
        qb.push(" LIMIT ").push_bind(self.limit);
        qb.push(" OFFSET ").push_bind(self.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sql_for<F: Fn(&mut QueryBuilder<'_, Postgres>)>(f: F) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 WHERE 1=1");
        f(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn empty_match_filter_adds_nothing() {
        let sql = sql_for(|qb| MatchFilter::default().apply(qb));
        assert_eq!(sql, "SELECT 1 WHERE 1=1");
    }

    #[test]
    fn match_filter_binds_every_value() {
        let filter = MatchFilter {
            season: Some(2023),
            team: Some(Uuid::new_v4()),
            status: Some(MatchStatus::Completed),
        };
        let sql = sql_for(|qb| filter.apply(qb));
        // All three predicates present, all values as placeholders.
        assert!(sql.contains("s.season_year = $1"));
        assert!(sql.contains("m.team1_id = $2"));
        assert!(sql.contains("m.team2_id = $3"));
        assert!(sql.contains("m.status = $4"));
        assert!(!sql.contains("2023"));
    }

    #[test]
    fn stats_filter_date_range() {
        let filter = StatsFilter {
            season: None,
            from: Some(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2023, 5, 31).unwrap()),
        };
        let sql = sql_for(|qb| filter.apply(qb));
        assert!(sql.contains("m.scheduled_at::date >= $1"));
        assert!(sql.contains("m.scheduled_at::date <= $2"));
    }

    #[test]
    fn auction_paging_appends_fixed_order_clause() {
        let filter = AuctionFilter {
            sold: Some(true),
            category: None,
            sort: AuctionSort::BidCountDesc,
            limit: 20,
            offset: 40,
        };
        let sql = sql_for(|qb| {
            filter.apply(qb);
            filter.apply_paging(qb);
        });
        assert!(sql.contains("a.is_sold = $1"));
        assert!(sql.contains("ORDER BY a.bid_count DESC"));
        assert!(sql.contains("LIMIT $2"));
        assert!(sql.contains("OFFSET $3"));
    }
}
