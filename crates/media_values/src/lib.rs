//! Media Values - typed primitive values for media metadata.
//!
//! This crate provides the atoms that higher-level metadata properties are
//! built from: exact rationals and coded enumerations, with their canonical
//! text and binary forms. Configuration and logging support live alongside.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub use error::{ValueError, ValueResult};
pub use models::{parse_rational, CodedEnumeration, Rational};

#[doc(hidden)]
pub use serde as __serde;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
