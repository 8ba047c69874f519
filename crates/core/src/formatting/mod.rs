//! Formatting module - pure display helpers for amounts and dates.

mod currency;
mod date;

pub use currency::format_currency;
pub use date::{format_date, DateStyle};
