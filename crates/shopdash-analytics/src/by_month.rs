//! Orders per calendar month.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shopdash_common::{month_index, Order};
use tracing::{debug, warn};

/// Order counts per month, index 0 = January. Years are folded together.
pub type MonthlyCount = [u64; 12];

/// Monthly counts plus the number of orders that could not be placed in a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub counts: MonthlyCount,
    /// Orders whose `createdAt` is missing or unparseable.
    pub skipped: u64,
}

/// Counts orders per creation month as seen in `tz`. Undated orders are skipped.
pub fn aggregate_by_month(orders: &[Order], tz: Tz) -> MonthlyCount {
    monthly_breakdown(orders, tz).counts
}

/// Like [`aggregate_by_month`], also reporting how many orders were skipped.
pub fn monthly_breakdown(orders: &[Order], tz: Tz) -> MonthlyBreakdown {
    let mut breakdown = MonthlyBreakdown::default();

    for order in orders {
        match order.created_at.as_ref().and_then(|ts| ts.to_utc()) {
            Some(instant) => breakdown.counts[month_index(instant, tz)] += 1,
            None => breakdown.skipped += 1,
        }
    }

    if breakdown.skipped > 0 {
        warn!(
            skipped = breakdown.skipped,
            "Orders without a usable creation date left out of the monthly chart"
        );
    }
    debug!(orders = orders.len(), timezone = %tz, "Aggregated orders by month");
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shopdash_common::test_utils::{order, sample_orders};
    use shopdash_common::Timestamp;

    #[test]
    fn test_sample_orders() {
        let mut expected = [0u64; 12];
        expected[0] = 1;
        expected[1] = 1;
        assert_eq!(aggregate_by_month(&sample_orders(), chrono_tz::UTC), expected);
    }

    #[test]
    fn test_years_fold_into_same_month() {
        let orders = vec![
            order(None, "2023-12-31T10:00:00Z", &[]),
            order(None, "2024-12-01T10:00:00Z", &[]),
        ];
        assert_eq!(aggregate_by_month(&orders, chrono_tz::UTC)[11], 2);
    }

    #[test]
    fn test_display_timezone_moves_month_boundary() {
        let orders = vec![order(None, "2024-03-31T23:30:00Z", &[])];

        assert_eq!(aggregate_by_month(&orders, chrono_tz::UTC)[2], 1);
        let paris = aggregate_by_month(&orders, chrono_tz::Europe::Paris);
        assert_eq!(paris[2], 0);
        assert_eq!(paris[3], 1);
    }

    #[test]
    fn test_unparseable_dates_are_skipped() {
        let mut undated = order(None, "2024-01-01", &[]);
        undated.created_at = None;
        let orders = vec![
            order(None, "someday", &[]),
            undated,
            order(None, "2024-05-20", &[]),
        ];

        let breakdown = monthly_breakdown(&orders, chrono_tz::UTC);
        assert_eq!(breakdown.skipped, 2);
        assert_eq!(breakdown.counts.iter().sum::<u64>(), 1);
        assert_eq!(breakdown.counts[4], 1);
    }

    #[test]
    fn test_epoch_millis() {
        let mut from_millis = order(None, "", &[]);
        // 2024-07-04T00:00:00Z
        from_millis.created_at = Some(Timestamp::Millis(1_720_051_200_000));
        assert_eq!(aggregate_by_month(&[from_millis], chrono_tz::UTC)[6], 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate_by_month(&[], chrono_tz::UTC), [0; 12]);
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_order_count(
            dates in proptest::collection::vec((2020i32..2030, 1u32..=12, 1u32..=28), 0..64)
        ) {
            let texts: Vec<String> = dates
                .iter()
                .map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}T12:00:00Z"))
                .collect();
            let orders: Vec<_> = texts.iter().map(|t| order(None, t, &[])).collect();

            let counts = aggregate_by_month(&orders, chrono_tz::Africa::Tunis);
            prop_assert_eq!(counts.iter().sum::<u64>(), orders.len() as u64);
            prop_assert_eq!(counts, aggregate_by_month(&orders, chrono_tz::Africa::Tunis));
        }
    }
}
