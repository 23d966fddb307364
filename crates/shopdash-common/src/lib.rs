//! # ShopDash Common
//!
//! Record types, errors, logging and small helpers shared by every ShopDash crate.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod lenient;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, ShopDashError};
pub use lenient::{decode_collection, Lenient};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
