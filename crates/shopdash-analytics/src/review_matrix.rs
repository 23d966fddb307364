//! Review counts per product and star rating.

use serde::ser::{Serialize, SerializeMap, Serializer};
use shopdash_common::Review;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Star buckets per product, index 0 = one star.
pub type NoteCounts = [u64; 5];

/// One product's row of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub product_name: String,
    pub counts: NoteCounts,
}

/// Product name → star counts, kept in the order products were first reviewed.
///
/// Serializes as a JSON object `{ "<product>": [one, two, three, four, five] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewMatrix {
    rows: Vec<ReviewRow>,
    index: HashMap<String, usize>,
}

impl ReviewMatrix {
    /// Star counts of a product, if it has been reviewed at all.
    pub fn get(&self, product_name: &str) -> Option<&NoteCounts> {
        self.index.get(product_name).map(|&row| &self.rows[row].counts)
    }

    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NoteCounts)> {
        self.rows.iter().map(|row| (row.product_name.as_str(), &row.counts))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of reviews counted, out-of-range notes excluded.
    pub fn total(&self) -> u64 {
        self.rows.iter().flat_map(|row| row.counts.iter()).sum()
    }

    fn row_mut(&mut self, product_name: &str) -> &mut NoteCounts {
        let slot = match self.index.get(product_name) {
            Some(&slot) => slot,
            None => {
                let slot = self.rows.len();
                self.index.insert(product_name.to_string(), slot);
                self.rows.push(ReviewRow {
                    product_name: product_name.to_string(),
                    counts: [0; 5],
                });
                slot
            }
        };
        &mut self.rows[slot].counts
    }
}

impl Serialize for ReviewMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.product_name, &row.counts)?;
        }
        map.end()
    }
}

/// Distributes reviews into per-product star buckets.
///
/// Every reviewed product gets a row, even when none of its notes fall in `1..=5`;
/// such notes (and missing ones) are not counted.
pub fn build_review_matrix(reviews: &[Review]) -> ReviewMatrix {
    let mut matrix = ReviewMatrix::default();
    let mut ignored = 0usize;

    for review in reviews {
        let counts = matrix.row_mut(&review.product_name);
        match review.note {
            Some(note @ 1..=5) => counts[(note - 1) as usize] += 1,
            _ => ignored += 1,
        }
    }

    if ignored > 0 {
        warn!(ignored, "Reviews with a note outside 1..=5 were not counted");
    }
    debug!(reviews = reviews.len(), products = matrix.len(), "Built review matrix");
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shopdash_common::test_utils::{review, sample_reviews};

    #[test]
    fn test_out_of_range_note_ignored() {
        let matrix = build_review_matrix(&[review("A", 0), review("A", 3)]);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get("A"), Some(&[0, 0, 1, 0, 0]));
    }

    #[test]
    fn test_rows_keep_first_seen_order() {
        let matrix = build_review_matrix(&sample_reviews());
        let names: Vec<&str> = matrix.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Soap", "Shampoo"]);
        assert_eq!(matrix.get("Soap"), Some(&[0, 0, 0, 1, 1]));
        assert_eq!(matrix.get("Shampoo"), Some(&[1, 0, 0, 0, 1]));
        assert_eq!(matrix.total(), 4);
    }

    #[test]
    fn test_product_with_only_invalid_notes_has_zero_row() {
        let mut missing = review("B", 1);
        missing.note = None;
        let matrix = build_review_matrix(&[review("A", 6), review("A", -2), missing]);

        assert_eq!(matrix.get("A"), Some(&[0; 5]));
        assert_eq!(matrix.get("B"), Some(&[0; 5]));
        assert_eq!(matrix.total(), 0);
    }

    #[test]
    fn test_serializes_as_object() {
        let matrix = build_review_matrix(&[review("Soap", 5), review("Oil", 2)]);
        assert_eq!(
            serde_json::to_string(&matrix).unwrap(),
            r#"{"Soap":[0,0,0,0,1],"Oil":[0,1,0,0,0]}"#
        );
    }

    #[test]
    fn test_empty_input() {
        let matrix = build_review_matrix(&[]);
        assert!(matrix.is_empty());
        assert_eq!(serde_json::to_string(&matrix).unwrap(), "{}");
    }

    proptest! {
        #[test]
        fn prop_only_valid_notes_counted(
            notes in proptest::collection::vec((0usize..3, -3i64..9), 0..64)
        ) {
            const NAMES: [&str; 3] = ["Soap", "Shampoo", "Oil"];
            let reviews: Vec<_> = notes.iter().map(|(p, n)| review(NAMES[*p], *n)).collect();

            let matrix = build_review_matrix(&reviews);
            let valid = notes.iter().filter(|(_, n)| (1..=5).contains(n)).count() as u64;
            prop_assert_eq!(matrix.total(), valid);
            prop_assert_eq!(matrix, build_review_matrix(&reviews));
        }
    }
}
