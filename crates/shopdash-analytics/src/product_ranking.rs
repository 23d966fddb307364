//! Most ordered products.

use serde::{Deserialize, Serialize};
use shopdash_common::{Order, Product, ProductId};
use std::collections::HashMap;
use tracing::debug;

/// Total ordered quantity of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRanking {
    pub product_id: ProductId,
    pub count: u64,
    /// Catalog title, or a placeholder naming the id when the product is gone.
    pub name: String,
}

/// Id → product lookup over a fetched catalog. The first product wins on duplicate ids.
#[derive(Debug)]
pub struct ProductIndex<'a> {
    by_id: HashMap<&'a ProductId, &'a Product>,
}

impl<'a> ProductIndex<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        let mut by_id = HashMap::with_capacity(products.len());
        for product in products {
            by_id.entry(&product.id).or_insert(product);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &ProductId) -> Option<&'a Product> {
        self.by_id.get(id).copied()
    }

    /// Title of the product, or `Unknown Product (<id>)`.
    pub fn display_name(&self, id: &ProductId) -> String {
        match self.get(id) {
            Some(product) => product.title.clone(),
            None => unknown_product_name(id),
        }
    }
}

/// Placeholder name for an id missing from the catalog.
pub fn unknown_product_name(id: &ProductId) -> String {
    format!("Unknown Product ({id})")
}

/// Sums line quantities per product across all orders and ranks them, highest first.
/// Totals saturate at `u64::MAX`.
///
/// Products with equal totals keep the order in which they were first seen in the
/// line items.
pub fn rank_products_by_orders(orders: &[Order], products: &[Product]) -> Vec<ProductRanking> {
    let mut slots: HashMap<&ProductId, usize> = HashMap::new();
    let mut totals: Vec<(&ProductId, u64)> = Vec::new();

    for item in orders.iter().flat_map(|order| order.products.iter()) {
        match slots.get(&item.id) {
            Some(&slot) => totals[slot].1 = totals[slot].1.saturating_add(item.quantity),
            None => {
                slots.insert(&item.id, totals.len());
                totals.push((&item.id, item.quantity));
            }
        }
    }

    let index = ProductIndex::new(products);
    let mut ranking: Vec<ProductRanking> = totals
        .into_iter()
        .map(|(id, count)| ProductRanking {
            product_id: id.clone(),
            count,
            name: index.display_name(id),
        })
        .collect();

    // `sort_by` is stable, which keeps first-seen order among ties.
    ranking.sort_by(|a, b| b.count.cmp(&a.count));

    debug!(
        products = ranking.len(),
        unresolved = ranking.iter().filter(|r| index.get(&r.product_id).is_none()).count(),
        "Ranked products by ordered quantity"
    );
    ranking
}
