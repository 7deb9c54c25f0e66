//! Shared test fixtures for lineup crates.
//!
//! - [`swimmer`] - terse swimmer and record builders
//! - [`pools`] - small hand-made pools with known answers
//! - [`random`] - seeded synthetic pools for property and cross-check tests
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! lineup-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use lineup_test::{man, woman, pools::freestyle_men_50};
//! use lineup_test::random::random_pool;
//! ```

pub mod pools;
pub mod random;
pub mod swimmer;

pub use swimmer::{man, record, woman};
