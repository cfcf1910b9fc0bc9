//! # Configuration Module
//!
//! Centralizes the allocation defaults used by the materializer so that
//! related values (inline slot count, buffer capacities and their caps) stay
//! next to each other, with compile-time checks on their relationships.
//!
//! ## Module Organization
//!
//! - [`constants`]: numeric defaults and limits

pub mod constants;
pub use constants::*;
