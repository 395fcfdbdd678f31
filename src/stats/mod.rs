//! Stats module - Series statistics

mod calculator;

pub use calculator::{Correlation, SeriesStats, StatsCalculator, SIGNIFICANCE_THRESHOLD};
