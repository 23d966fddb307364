//! # ShopDash
//!
//! Command line front end of the shop analytics dashboard: fetches orders, products and
//! reviews from the admin backend and prints the aggregated dashboard or its chart data.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;
pub mod report;

pub use app::*;
pub use cli::*;
pub use error::*;
pub use report::*;
