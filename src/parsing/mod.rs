//! # Text Parsing for Typed Slots
//!
//! Drivers that speak a text protocol (SQLite stores dates as TEXT) hand the
//! cursor strings for temporal columns. This module turns those strings into
//! the fixed-width representations held by temporal slots, and formats them
//! back for display.
//!
//! ## Module Structure
//!
//! - `temporal`: DATE / TIME / TIMESTAMP parsing and formatting
//!
//! ## Error Handling
//!
//! All parsing functions return `eyre::Result` with the rejected input in
//! the message, e.g. `"invalid date format '15/01/2024': expected YYYY-MM-DD"`.

mod temporal;

pub use temporal::{
    days_from_civil, days_to_micros, format_date, format_time, format_timestamp, parse_date,
    parse_time, parse_timestamp, MICROS_PER_DAY, MICROS_PER_SECOND,
};
