//! Everything the analytics page shows, derived from one fetch cycle.

use crate::by_city::{aggregate_by_city_with_label, CityStat, UNKNOWN_CITY};
use crate::by_month::{monthly_breakdown, MonthlyCount};
use crate::data_fetcher::DashboardData;
use crate::product_ranking::{rank_products_by_orders, ProductRanking};
use crate::review_matrix::{build_review_matrix, ReviewMatrix};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use shopdash_common::Result;
use shopdash_config::DashboardConfig;
use tracing::{info, instrument};

/// Parameters the aggregators need beyond the raw collections.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsOptions {
    /// Timezone months are read in.
    pub timezone: Tz,
    /// Bucket for orders without a city.
    pub unknown_city_label: String,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            unknown_city_label: UNKNOWN_CITY.to_string(),
        }
    }
}

impl AnalyticsOptions {
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Ok(Self {
            timezone: config.tz()?,
            unknown_city_label: config.unknown_city_label.clone(),
        })
    }
}

/// The stat cards at the top of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub products: usize,
    pub orders: usize,
    pub reviews: usize,
    /// Orders left out of the monthly chart.
    pub undated_orders: u64,
}

/// Derived view of one cycle's data. Never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub totals: Totals,
    pub city_stats: Vec<CityStat>,
    pub monthly: MonthlyCount,
    pub rankings: Vec<ProductRanking>,
    pub review_matrix: ReviewMatrix,
}

impl DashboardSnapshot {
    /// Runs every aggregator over `data`. Apart from `generated_at` the result depends
    /// only on `data` and `options`.
    #[instrument(skip_all, fields(orders = data.orders.len()))]
    pub fn from_data(
        data: &DashboardData,
        options: &AnalyticsOptions,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let months = monthly_breakdown(&data.orders, options.timezone);

        let snapshot = Self {
            generated_at,
            totals: Totals {
                products: data.products.len(),
                orders: data.orders.len(),
                reviews: data.reviews.len(),
                undated_orders: months.skipped,
            },
            city_stats: aggregate_by_city_with_label(&data.orders, &options.unknown_city_label),
            monthly: months.counts,
            rankings: rank_products_by_orders(&data.orders, &data.products),
            review_matrix: build_review_matrix(&data.reviews),
        };

        info!(
            cities = snapshot.city_stats.len(),
            ranked = snapshot.rankings.len(),
            reviewed_products = snapshot.review_matrix.len(),
            "Built dashboard snapshot"
        );
        snapshot
    }

    /// True when the backend had nothing to show at all.
    pub fn is_empty(&self) -> bool {
        self.totals.orders == 0 && self.totals.products == 0 && self.totals.reviews == 0
    }
}
