use std::collections::HashMap;

use core_types::{AuctionCategory, AuctionEntry};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rates::{percentage, RATE_DP};

/// Spend for one franchise across a season's auction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSpend {
    pub team_id: Uuid,
    pub team_name: String,
    pub players_bought: i64,
    pub total_spent_lakh: Decimal,
    pub average_price_lakh: Option<Decimal>,
}

/// Sold-versus-listed breakdown for one auction category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: AuctionCategory,
    pub total: i64,
    pub sold: i64,
    pub sold_percentage: Decimal,
    pub total_spent_lakh: Decimal,
}

/// The most expensive sale of the season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSale {
    pub player_id: Uuid,
    pub sold_price_lakh: Decimal,
    pub team_id: Option<Uuid>,
}

/// Season-wide auction summary. Always computed over the full unfiltered
/// season; the paged listing endpoint is independent of this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSummary {
    pub total_players: i64,
    pub sold: i64,
    pub unsold: i64,
    pub retained: i64,
    pub rtm: i64,
    pub total_spent_lakh: Decimal,
    pub average_sold_price_lakh: Option<Decimal>,
    pub top_sale: Option<TopSale>,
    pub per_team: Vec<TeamSpend>,
    pub per_category: Vec<CategoryBreakdown>,
}

/// Partitions a season's auction rows into sold/unsold buckets and computes
/// per-team spend and per-category breakdowns.
///
/// Unsold rows never contribute to spend totals or average sold price.
/// `retained`/`rtm` counts come from the caller (contract flags), since the
/// auction table only records lots that went under the hammer.
pub fn auction_summary(
    entries: &[AuctionEntry],
    team_names: &HashMap<Uuid, String>,
    retained: i64,
    rtm: i64,
) -> AuctionSummary {
    let mut sold = 0i64;
    let mut total_spent = Decimal::ZERO;
    let mut top_sale: Option<TopSale> = None;
    let mut per_team: HashMap<Uuid, TeamSpend> = HashMap::new();
    let mut per_category: HashMap<AuctionCategory, CategoryBreakdown> = HashMap::new();

    for entry in entries {
        let cat = per_category
            .entry(entry.category)
            .or_insert_with(|| CategoryBreakdown {
                category: entry.category,
                total: 0,
                sold: 0,
                sold_percentage: Decimal::ZERO,
                total_spent_lakh: Decimal::ZERO,
            });
        cat.total += 1;

        let Some(price) = entry.sold_price_lakh.filter(|_| entry.is_sold) else {
            continue;
        };
        sold += 1;
        total_spent += price;
        cat.sold += 1;
        cat.total_spent_lakh += price;

        if top_sale.as_ref().is_none_or(|t| price > t.sold_price_lakh) {
            top_sale = Some(TopSale {
                player_id: entry.player_id,
                sold_price_lakh: price,
                team_id: entry.team_id,
            });
        }

        if let Some(team_id) = entry.team_id {
            let spend = per_team.entry(team_id).or_insert_with(|| TeamSpend {
                team_id,
                team_name: team_names.get(&team_id).cloned().unwrap_or_default(),
                players_bought: 0,
                total_spent_lakh: Decimal::ZERO,
                average_price_lakh: None,
            });
            spend.players_bought += 1;
            spend.total_spent_lakh += price;
        }
    }

    let mut per_team: Vec<TeamSpend> = per_team.into_values().collect();
    for spend in &mut per_team {
        if spend.players_bought > 0 {
            spend.average_price_lakh =
                Some((spend.total_spent_lakh / Decimal::from(spend.players_bought)).round_dp(RATE_DP));
        }
    }
    per_team.sort_by(|a, b| {
        b.total_spent_lakh
            .cmp(&a.total_spent_lakh)
            .then(a.team_name.cmp(&b.team_name))
    });

    let mut per_category: Vec<CategoryBreakdown> = per_category.into_values().collect();
    for cat in &mut per_category {
        cat.sold_percentage = percentage(cat.sold, cat.total);
    }
    per_category.sort_by_key(|c| c.category as u8);

    let total_players = entries.len() as i64;
    AuctionSummary {
        total_players,
        sold,
        unsold: total_players - sold,
        retained,
        rtm,
        total_spent_lakh: total_spent,
        average_sold_price_lakh: if sold > 0 {
            Some((total_spent / Decimal::from(sold)).round_dp(RATE_DP))
        } else {
            None
        },
        top_sale,
        per_team,
        per_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn entry(
        category: AuctionCategory,
        base: Decimal,
        sold: Option<Decimal>,
        team: Option<Uuid>,
    ) -> AuctionEntry {
        AuctionEntry {
            id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            series_id: Uuid::new_v4(),
            base_price_lakh: base,
            sold_price_lakh: sold,
            team_id: team,
            is_sold: sold.is_some(),
            bid_count: 0,
            category,
        }
    }

    #[test]
    fn unsold_rows_excluded_from_spend_and_average() {
        let team = Uuid::new_v4();
        let names = HashMap::from([(team, "Team A".to_string())]);
        let entries = vec![
            entry(AuctionCategory::Capped, dec!(200), Some(dec!(800)), Some(team)),
            entry(AuctionCategory::Capped, dec!(100), None, None),
            entry(AuctionCategory::Uncapped, dec!(30), Some(dec!(30)), Some(team)),
        ];

        let s = auction_summary(&entries, &names, 0, 0);
        assert_eq!(s.total_players, 3);
        assert_eq!(s.sold, 2);
        assert_eq!(s.unsold, 1);
        assert_eq!(s.total_spent_lakh, dec!(830));
        assert_eq!(s.average_sold_price_lakh, Some(dec!(415.00)));
        assert_eq!(s.per_team.len(), 1);
        assert_eq!(s.per_team[0].players_bought, 2);
        assert_eq!(s.per_team[0].total_spent_lakh, dec!(830));
    }

    #[test]
    fn sold_percentage_per_category() {
        let team = Uuid::new_v4();
        let names = HashMap::new();
        let entries = vec![
            entry(AuctionCategory::Capped, dec!(200), Some(dec!(400)), Some(team)),
            entry(AuctionCategory::Capped, dec!(200), None, None),
            entry(AuctionCategory::Capped, dec!(200), Some(dec!(250)), Some(team)),
        ];
        let s = auction_summary(&entries, &names, 0, 0);
        let capped = s
            .per_category
            .iter()
            .find(|c| c.category == AuctionCategory::Capped)
            .unwrap();
        // 2 of 3 sold -> 66.67
        assert_eq!(capped.sold_percentage, dec!(66.67));
        assert_eq!(capped.total_spent_lakh, dec!(650));
    }

    #[test]
    fn empty_auction_is_all_zeroes() {
        let s = auction_summary(&[], &HashMap::new(), 0, 0);
        assert_eq!(s.total_players, 0);
        assert_eq!(s.average_sold_price_lakh, None);
        assert_eq!(s.top_sale, None);
        assert!(s.per_team.is_empty());
    }

    #[test]
    fn top_sale_is_highest_price() {
        let team = Uuid::new_v4();
        let entries = vec![
            entry(AuctionCategory::Marquee, dec!(200), Some(dec!(1700)), Some(team)),
            entry(AuctionCategory::Marquee, dec!(200), Some(dec!(2400)), Some(team)),
        ];
        let s = auction_summary(&entries, &HashMap::new(), 0, 0);
        assert_eq!(s.top_sale.unwrap().sold_price_lakh, dec!(2400));
    }
}
