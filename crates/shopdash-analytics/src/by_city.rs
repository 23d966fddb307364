//! Orders per delivery city.

use serde::{Deserialize, Serialize};
use shopdash_common::Order;
use std::collections::HashMap;
use tracing::debug;

/// Bucket for orders whose city is missing or blank.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Number of orders delivered to one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStat {
    pub city: String,
    pub count: u64,
}

/// Counts orders per city, in first-seen order, with blank cities under [`UNKNOWN_CITY`].
pub fn aggregate_by_city(orders: &[Order]) -> Vec<CityStat> {
    aggregate_by_city_with_label(orders, UNKNOWN_CITY)
}

/// Same as [`aggregate_by_city`] with a caller-chosen bucket for blank cities.
pub fn aggregate_by_city_with_label(orders: &[Order], unknown_label: &str) -> Vec<CityStat> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<CityStat> = Vec::new();

    for order in orders {
        let city = order
            .city
            .as_deref()
            .filter(|city| !city.trim().is_empty())
            .unwrap_or(unknown_label);

        match slots.get(city) {
            Some(&slot) => stats[slot].count += 1,
            None => {
                slots.insert(city, stats.len());
                stats.push(CityStat {
                    city: city.to_string(),
                    count: 1,
                });
            }
        }
    }

    debug!(orders = orders.len(), cities = stats.len(), "Aggregated orders by city");
    stats
}
