//! Stats module - Descriptive statistics for the report views

mod calculator;

pub use calculator::{Histogram, StatsCalculator};
