//! Terminal rendering of snapshots and view states.

use crate::cli::OutputFormat;
use crate::error::AppResult;
use shopdash_analytics::{DashboardSnapshot, ViewState, NOTE_LABELS};
use shopdash_common::{format_timestamp, truncate_string, MONTH_LABELS};

const NAME_WIDTH: usize = 28;

/// Renders a snapshot in the requested format.
pub fn render_snapshot(
    snapshot: &DashboardSnapshot,
    format: OutputFormat,
    top_products: Option<usize>,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Text => Ok(text_summary(snapshot, top_products)),
    }
}

/// Renders what the dashboard would display for `state`.
pub fn render_state(
    state: &ViewState,
    format: OutputFormat,
    top_products: Option<usize>,
) -> AppResult<String> {
    match state {
        ViewState::Loading => Ok("Loading dashboard data...".to_string()),
        ViewState::Empty => Ok("No orders, products or reviews yet.".to_string()),
        ViewState::Ready(snapshot) => render_snapshot(snapshot, format, top_products),
        ViewState::Failed { message, previous } => {
            let mut out = format!("Refresh failed: {message}");
            if let Some(snapshot) = previous {
                out.push_str(&format!(
                    "\nShowing data from {}\n\n",
                    format_timestamp(snapshot.generated_at)
                ));
                out.push_str(&render_snapshot(snapshot, format, top_products)?);
            }
            Ok(out)
        }
    }
}

fn name_cell(name: &str) -> String {
    format!("{:<width$}", truncate_string(name, NAME_WIDTH), width = NAME_WIDTH)
}

/// Plain text version of the analytics page.
pub fn text_summary(snapshot: &DashboardSnapshot, top_products: Option<usize>) -> String {
    let totals = &snapshot.totals;
    let mut out = format!(
        "ShopDash analytics, generated {}\n\nProducts: {}  Orders: {}  Reviews: {}\n",
        format_timestamp(snapshot.generated_at),
        totals.products,
        totals.orders,
        totals.reviews,
    );
    if totals.undated_orders > 0 {
        out.push_str(&format!(
            "({} orders without a valid date are not in the monthly chart)\n",
            totals.undated_orders
        ));
    }

    out.push_str("\nOrders by city\n");
    for stat in &snapshot.city_stats {
        out.push_str(&format!("  {} {:>6}\n", name_cell(&stat.city), stat.count));
    }

    out.push_str("\nOrders by month\n");
    for (label, count) in MONTH_LABELS.iter().zip(snapshot.monthly.iter()) {
        out.push_str(&format!("  {label} {count:>6}\n"));
    }

    out.push_str("\nMost ordered products\n");
    let shown = top_products.unwrap_or(snapshot.rankings.len());
    for (rank, ranking) in snapshot.rankings.iter().take(shown).enumerate() {
        out.push_str(&format!(
            "  {:>3}. {} {:>6}\n",
            rank + 1,
            name_cell(&ranking.name),
            ranking.count
        ));
    }

    out.push_str(&format!("\nReviews by note\n  {:<width$}", "", width = NAME_WIDTH));
    for label in NOTE_LABELS {
        out.push_str(&format!(" {label:>7}"));
    }
    out.push('\n');
    for (product, counts) in snapshot.review_matrix.iter() {
        out.push_str(&format!("  {}", name_cell(product)));
        for count in counts {
            out.push_str(&format!(" {count:>7}"));
        }
        out.push('\n');
    }

    out
}
