//! Record types returned by the shop backend.
//!
//! Every field the dashboard does not strictly need is optional or defaulted so that a
//! single malformed record never fails the decode of a whole collection. Aggregators
//! decide how to treat the gaps.

use crate::lenient;
use crate::utils::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of a product (the `_id` of the catalog entry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    /// Borrows the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Creation time as sent by the backend.
///
/// Documents usually carry an ISO-8601 string; some exports use epoch milliseconds,
/// occasionally written as a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Epoch milliseconds.
    Millis(i64),
    /// Epoch milliseconds sent as a JSON float.
    FractionalMillis(f64),
    /// Textual date or date-time.
    Text(String),
}

impl Timestamp {
    /// Resolves the timestamp to an instant, or `None` when it cannot be parsed.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Self::FractionalMillis(ms) if ms.is_finite() => {
                DateTime::from_timestamp_millis(ms.round() as i64)
            }
            Self::FractionalMillis(_) => None,
            Self::Text(text) => parse_timestamp(text),
        }
    }
}

/// A single product reference inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product the line refers to.
    #[serde(default, deserialize_with = "lenient::product_id")]
    pub id: ProductId,
    /// Ordered quantity; missing or unusable quantities count as zero.
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub quantity: u64,
    /// Unit price at order time.
    #[serde(default, deserialize_with = "lenient::opt_float")]
    pub price: Option<f64>,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend document id.
    #[serde(rename = "_id", default, deserialize_with = "lenient::opt_text")]
    pub id: Option<String>,
    /// Delivery city; `None` or blank when the customer left it out.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub city: Option<String>,
    /// When the order was placed.
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<Timestamp>,
    /// Ordered line items.
    #[serde(default, deserialize_with = "lenient::records")]
    pub products: Vec<LineItem>,
    /// Order total as computed by the backend.
    #[serde(default, deserialize_with = "lenient::opt_float")]
    pub total_price: Option<f64>,
    /// Customer last name.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub name: Option<String>,
    /// Customer first name.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub prename: Option<String>,
    /// Customer email.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub email: Option<String>,
    /// Primary phone number.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub phone: Option<String>,
    /// Secondary phone number.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub second_phone: Option<String>,
    /// Delivery address.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub adresse: Option<String>,
    /// Free-form notes left by the customer.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub notes: Option<String>,
}

impl Order {
    /// Sum of all line quantities, saturating at `u64::MAX`.
    pub fn item_count(&self) -> u64 {
        self.products
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.quantity))
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend document id, the join key for order lines.
    #[serde(rename = "_id", default, deserialize_with = "lenient::product_id")]
    pub id: ProductId,
    /// Display name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_float")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub in_stock: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub category: Option<String>,
    /// Image path relative to the backend's upload directory.
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub img: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub description: Option<String>,
}

/// A customer rating of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", default, deserialize_with = "lenient::opt_text")]
    pub id: Option<String>,
    /// Display name of the rated product.
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_name: String,
    /// Star rating, expected in `1..=5`.
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub note: Option<i64>,
}
