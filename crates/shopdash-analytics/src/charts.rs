//! Chart.js-shaped data for the four analytics charts.

use crate::by_city::CityStat;
use crate::by_month::MonthlyCount;
use crate::product_ranking::ProductRanking;
use crate::review_matrix::ReviewMatrix;
use crate::snapshot::DashboardSnapshot;
use serde::{Deserialize, Serialize};
use shopdash_common::MONTH_LABELS;

/// Labels of the review chart's x axis, one per note.
pub const NOTE_LABELS: [&str; 5] = ["1 star", "2 stars", "3 stars", "4 stars", "5 stars"];

/// How a chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

/// One series of values, aligned with the chart's labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
}

/// Chart payload in the `{ labels, datasets: [{ label, data }] }` form charting libraries take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    fn single(kind: ChartKind, title: &str, labels: Vec<String>, series: &str, data: Vec<u64>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            labels,
            datasets: vec![Dataset {
                label: series.to_string(),
                data,
            }],
        }
    }

    /// True when no dataset has a non-zero value.
    pub fn is_blank(&self) -> bool {
        self.datasets.iter().all(|set| set.data.iter().all(|&v| v == 0))
    }
}

/// Pie chart of orders per city.
pub fn city_chart(stats: &[CityStat]) -> ChartData {
    ChartData::single(
        ChartKind::Pie,
        "Orders by city",
        stats.iter().map(|stat| stat.city.clone()).collect(),
        "Orders",
        stats.iter().map(|stat| stat.count).collect(),
    )
}

/// Bar chart of orders per month, January first.
pub fn monthly_chart(monthly: &MonthlyCount) -> ChartData {
    ChartData::single(
        ChartKind::Bar,
        "Orders by month",
        MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
        "Orders",
        monthly.to_vec(),
    )
}

/// Bar chart of the most ordered products, cut to `limit` bars when given.
pub fn top_products_chart(rankings: &[ProductRanking], limit: Option<usize>) -> ChartData {
    let shown = &rankings[..limit.map_or(rankings.len(), |n| n.min(rankings.len()))];
    ChartData::single(
        ChartKind::Bar,
        "Most ordered products",
        shown.iter().map(|r| r.name.clone()).collect(),
        "Quantity ordered",
        shown.iter().map(|r| r.count).collect(),
    )
}

/// Grouped bar chart of reviews per note, one dataset per product.
pub fn reviews_chart(matrix: &ReviewMatrix) -> ChartData {
    ChartData {
        kind: ChartKind::Bar,
        title: "Reviews by note".to_string(),
        labels: NOTE_LABELS.iter().map(|l| l.to_string()).collect(),
        datasets: matrix
            .iter()
            .map(|(product, counts)| Dataset {
                label: product.to_string(),
                data: counts.to_vec(),
            })
            .collect(),
    }
}

/// All four charts of the analytics page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCharts {
    pub by_city: ChartData,
    pub by_month: ChartData,
    pub top_products: ChartData,
    pub reviews: ChartData,
}

impl DashboardCharts {
    pub fn from_snapshot(snapshot: &DashboardSnapshot, top_products_limit: Option<usize>) -> Self {
        Self {
            by_city: city_chart(&snapshot.city_stats),
            by_month: monthly_chart(&snapshot.monthly),
            top_products: top_products_chart(&snapshot.rankings, top_products_limit),
            reviews: reviews_chart(&snapshot.review_matrix),
        }
    }
}
