//! # ShopDash Config
//!
//! Configuration loading (YAML or TOML plus `SHOPDASH_*` environment overrides),
//! validation, and a hot-swappable cache for long-running refresh loops.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
