//! Statistics Calculator Module
//! Descriptive statistics over yearly series and cross-country correlation.

use crate::data::{Field, YearValue, Yearly};
use rayon::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

/// Significance threshold for the correlation t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Statistics for a single yearly metric.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesStats {
    pub metric: String,
    pub count: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub p05: f64,
    /// Least-squares slope, units per year.
    pub slope_per_year: f64,
    /// Last value minus first value, in year order.
    pub total_change: f64,
}

impl Default for SeriesStats {
    fn default() -> Self {
        Self {
            metric: String::new(),
            count: 0,
            first_year: None,
            last_year: None,
            mean: f64::NAN,
            median: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p95: f64::NAN,
            p05: f64::NAN,
            slope_per_year: f64::NAN,
            total_change: f64::NAN,
        }
    }
}

/// Pearson correlation between two columns of the same table.
#[derive(Debug, Clone, Serialize)]
pub struct Correlation {
    pub x_metric: String,
    pub y_metric: String,
    pub count: usize,
    pub coefficient: f64,
    pub p_value: f64,
    pub is_significant: bool,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for a (year, value) series.
    pub fn compute_descriptive_stats(metric: &str, series: &[YearValue]) -> SeriesStats {
        let n = series.len();
        if n == 0 {
            return SeriesStats {
                metric: metric.to_string(),
                ..SeriesStats::default()
            };
        }

        let mut ordered = series.to_vec();
        ordered.sort_by_key(|p| p.year);
        let values: Vec<f64> = ordered.iter().map(|p| p.value).collect();

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let std_dev = if n > 1 { values.iter().std_dev() } else { 0.0 };

        SeriesStats {
            metric: metric.to_string(),
            count: n,
            first_year: ordered.first().map(|p| p.year),
            last_year: ordered.last().map(|p| p.year),
            mean: values.iter().mean(),
            median,
            std_dev,
            min: sorted[0],
            max: sorted[n - 1],
            p95: Self::percentile(&sorted, 95.0),
            p05: Self::percentile(&sorted, 5.0),
            slope_per_year: Self::linear_slope(&ordered),
            total_change: values[n - 1] - values[0],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Ordinary least-squares slope of value against year.
    pub fn linear_slope(series: &[YearValue]) -> f64 {
        if series.len() < 2 {
            return f64::NAN;
        }
        let years: Vec<f64> = series.iter().map(|p| f64::from(p.year)).collect();
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();

        let var_years = years.iter().variance();
        if var_years == 0.0 {
            return f64::NAN;
        }
        years.iter().covariance(values.iter()) / var_years
    }

    /// Pearson correlation with a two-tailed t-test on `n - 2` degrees of freedom.
    pub fn pearson_correlation<R, X, Y>(table: &[R], x: X, y: Y) -> Correlation
    where
        X: Field<R>,
        Y: Field<R>,
    {
        let xs: Vec<f64> = table.iter().map(|r| x.value(r)).collect();
        let ys: Vec<f64> = table.iter().map(|r| y.value(r)).collect();
        let n = xs.len();

        let mut result = Correlation {
            x_metric: x.name().to_string(),
            y_metric: y.name().to_string(),
            count: n,
            coefficient: f64::NAN,
            p_value: f64::NAN,
            is_significant: false,
        };

        if n < 3 {
            return result;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return result; // Constant column, correlation undefined
        }

        let r = (xs.iter().covariance(ys.iter()) / (sx * sy)).clamp(-1.0, 1.0);
        result.coefficient = r;

        let df = (n - 2) as f64;
        let t = r * (df / (1.0 - r * r)).sqrt();

        if let Ok(dist) = StudentsT::new(0.0, 1.0, df) {
            let p_value = 2.0 * (1.0 - dist.cdf(t.abs()));
            result.p_value = p_value;
            result.is_significant = p_value <= SIGNIFICANCE_THRESHOLD;
        }

        result
    }

    /// Compute statistics for every listed column in parallel.
    ///
    /// Output order follows `fields`.
    pub fn compute_all_stats_parallel<R, F>(table: &[R], fields: &[F]) -> Vec<SeriesStats>
    where
        R: Yearly + Sync,
        F: Field<R> + Send + Sync,
    {
        fields
            .par_iter()
            .map(|field| {
                let series: Vec<YearValue> = table
                    .iter()
                    .map(|r| YearValue {
                        year: r.year(),
                        value: field.value(r),
                    })
                    .collect();
                Self::compute_descriptive_stats(field.name(), &series)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CountryField, Datasets, HealthField, TrendField};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_descriptive_stats_on_consumption() {
        let datasets = Datasets::build().unwrap();
        let stats = StatsCalculator::compute_all_stats_parallel(
            datasets.yearly_trends(),
            &[TrendField::LitersPerCapita],
        );
        let liters = &stats[0];
        assert_eq!(liters.metric, "liters_per_capita");
        assert_eq!(liters.count, 24);
        assert_eq!(liters.first_year, Some(2000));
        assert_eq!(liters.last_year, Some(2023));
        assert_eq!(liters.min, 8.3);
        assert_eq!(liters.max, 13.5);
        assert!(close(liters.total_change, 8.3 - 13.5));
        assert!(liters.slope_per_year < 0.0);
        assert!(liters.std_dev > 0.0);
    }

    #[test]
    fn test_slope_of_exact_line() {
        let series: Vec<YearValue> = (2010..2024)
            .map(|y| YearValue::from((y, 100.0 - 2.0 * f64::from(y - 2010))))
            .collect();
        assert!(close(StatsCalculator::linear_slope(&series), -2.0));
        assert!(StatsCalculator::linear_slope(&series[..1]).is_nan());
    }

    #[test]
    fn test_percentile_and_median() {
        let series: Vec<YearValue> = [1.0, 2.0, 3.0, 4.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| YearValue::from((2000 + i as i32, v)))
            .collect();
        let stats = StatsCalculator::compute_descriptive_stats("x", &series);
        assert!(close(stats.median, 2.5));
        assert!(close(stats.mean, 2.5));
        assert!(close(stats.p95, 3.85));
        assert!(close(stats.p05, 1.15));
    }

    #[test]
    fn test_empty_series_yields_nan_stats() {
        let stats = StatsCalculator::compute_descriptive_stats("empty", &[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.metric, "empty");
        assert!(stats.mean.is_nan());
        assert!(stats.first_year.is_none());
    }

    #[test]
    fn test_parallel_stats_follow_field_order() {
        let datasets = Datasets::build().unwrap();
        let stats = StatsCalculator::compute_all_stats_parallel(
            datasets.health_impact(),
            HealthField::ALL,
        );
        let names: Vec<&str> = stats.iter().map(|s| s.metric.as_str()).collect();
        let expected: Vec<&str> = HealthField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, expected);
        assert!(stats.iter().all(|s| s.count == 14));
    }

    #[test]
    fn test_price_vs_consumption_correlation() {
        let datasets = Datasets::build().unwrap();
        let corr = StatsCalculator::pearson_correlation(
            datasets.international_comparison(),
            CountryField::BeerPriceEur,
            CountryField::LitersPerCapita,
        );
        assert_eq!(corr.count, 8);
        assert!(corr.coefficient >= -1.0 && corr.coefficient <= 1.0);
        assert!(corr.coefficient < 0.0);
        assert!(corr.p_value >= 0.0 && corr.p_value <= 1.0);
    }

    #[test]
    fn test_correlation_needs_three_points() {
        let datasets = Datasets::build().unwrap();
        let corr = StatsCalculator::pearson_correlation(
            &datasets.international_comparison()[..2],
            CountryField::BeerPriceEur,
            CountryField::LitersPerCapita,
        );
        assert!(corr.coefficient.is_nan());
        assert!(!corr.is_significant);
    }
}
