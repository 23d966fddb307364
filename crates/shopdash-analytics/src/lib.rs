//! # ShopDash Analytics
//!
//! Fetches orders, products and reviews from the shop backend and turns them into the
//! data behind the analytics page: orders per city and per month, most ordered products
//! and review distribution per product.
//!
//! Aggregators are plain functions over slices; [`DashboardSnapshot`] runs them all and
//! [`DashboardSession`] keeps the latest result for readers.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod by_city;
pub mod by_month;
pub mod charts;
pub mod data_fetcher;
pub mod product_ranking;
pub mod review_matrix;
pub mod session;
pub mod snapshot;
pub mod traits;

pub use by_city::*;
pub use by_month::*;
pub use charts::*;
pub use data_fetcher::*;
pub use product_ranking::*;
pub use review_matrix::*;
pub use session::*;
pub use snapshot::*;
pub use traits::*;
