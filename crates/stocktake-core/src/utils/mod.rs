//! Utility functions for display formatting.

pub mod format;

pub use format::{format_currency, or_placeholder, truncate_string};
