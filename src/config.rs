//! Configuration loader and schema types.
//!
//! Settings come from an optional TOML file plus `MUSICLIB__` environment
//! overrides; see [`Settings`] for the precedence rules.

mod load;
mod schema;

pub use schema::*;
