//! Frame Conversion Module
//! Turns typed tables into Polars DataFrames for charting and CSV export.

use super::provider::Datasets;
use super::records::*;
use super::records::Field;
use super::views::{PolicyOverlayRow, ViewBuilder};
use crate::error::Result;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn year_column<R: Yearly>(rows: &[R]) -> Column {
    Column::new(
        "year".into(),
        rows.iter().map(|r| r.year()).collect::<Vec<i32>>(),
    )
}

fn field_column<R, F: Field<R>>(rows: &[R], field: F) -> Column {
    Column::new(
        field.name().into(),
        rows.iter().map(|r| field.value(r)).collect::<Vec<f64>>(),
    )
}

/// Converts dashboard tables to DataFrames.
pub struct Frames;

impl Frames {
    pub fn yearly_trends(rows: &[YearlyTrend]) -> Result<DataFrame> {
        let mut columns = vec![year_column(rows)];
        columns.extend(TrendField::ALL.iter().map(|&f| field_column(rows, f)));
        Ok(DataFrame::new(columns)?)
    }

    pub fn health_impact(rows: &[HealthImpactTrend]) -> Result<DataFrame> {
        let mut columns = vec![year_column(rows)];
        columns.extend(HealthField::ALL.iter().map(|&f| field_column(rows, f)));
        Ok(DataFrame::new(columns)?)
    }

    pub fn policy_timeline(rows: &[PolicyEvent]) -> Result<DataFrame> {
        let df = DataFrame::new(vec![
            Column::new(
                "date".into(),
                rows.iter().map(|p| p.date.to_string()).collect::<Vec<String>>(),
            ),
            year_column(rows),
            Column::new(
                "category".into(),
                rows.iter()
                    .map(|p| p.category.label())
                    .collect::<Vec<&str>>(),
            ),
            Column::new(
                "title".into(),
                rows.iter().map(|p| p.title.as_str()).collect::<Vec<&str>>(),
            ),
            Column::new(
                "description".into(),
                rows.iter()
                    .map(|p| p.description.as_str())
                    .collect::<Vec<&str>>(),
            ),
        ])?;
        Ok(df)
    }

    pub fn regional_snapshot(rows: &[RegionalSnapshot]) -> Result<DataFrame> {
        let mut columns = vec![Column::new(
            "region".into(),
            rows.iter().map(|r| r.region.as_str()).collect::<Vec<&str>>(),
        )];
        columns.extend(RegionField::ALL.iter().map(|&f| field_column(rows, f)));
        columns.push(Column::new(
            "latitude".into(),
            rows.iter()
                .map(|r| r.coordinates.map(|c| c.latitude))
                .collect::<Vec<Option<f64>>>(),
        ));
        columns.push(Column::new(
            "longitude".into(),
            rows.iter()
                .map(|r| r.coordinates.map(|c| c.longitude))
                .collect::<Vec<Option<f64>>>(),
        ));
        Ok(DataFrame::new(columns)?)
    }

    pub fn international_comparison(rows: &[CountryComparison]) -> Result<DataFrame> {
        let df = DataFrame::new(vec![
            Column::new(
                "country".into(),
                rows.iter().map(|c| c.country.as_str()).collect::<Vec<&str>>(),
            ),
            field_column(rows, CountryField::LitersPerCapita),
            field_column(rows, CountryField::BeerPriceEur),
            field_column(rows, CountryField::AlcoholMortalityThousands),
            field_column(rows, CountryField::PreventionSpendPerCapitaEur),
            Column::new(
                CountryField::LegalDrinkingAge.name().into(),
                rows.iter()
                    .map(|c| i32::from(c.legal_drinking_age))
                    .collect::<Vec<i32>>(),
            ),
        ])?;
        Ok(df)
    }

    /// Overlay rows; policy columns are null for years without a policy.
    pub fn policy_overlay(rows: &[PolicyOverlayRow]) -> Result<DataFrame> {
        let df = DataFrame::new(vec![
            Column::new(
                "year".into(),
                rows.iter().map(|r| r.trend.year).collect::<Vec<i32>>(),
            ),
            Column::new(
                TrendField::LitersPerCapita.name().into(),
                rows.iter()
                    .map(|r| r.trend.liters_per_capita)
                    .collect::<Vec<f64>>(),
            ),
            Column::new(
                "category".into(),
                rows.iter()
                    .map(|r| r.policy.as_ref().map(|p| p.category.label()))
                    .collect::<Vec<Option<&str>>>(),
            ),
            Column::new(
                "title".into(),
                rows.iter()
                    .map(|r| r.policy.as_ref().map(|p| p.title.as_str()))
                    .collect::<Vec<Option<&str>>>(),
            ),
        ])?;
        Ok(df)
    }

    /// A single (year, value) series, e.g. the consumption projection.
    pub fn year_values(value_name: &str, points: &[YearValue]) -> Result<DataFrame> {
        let df = DataFrame::new(vec![
            year_column(points),
            Column::new(
                value_name.into(),
                points.iter().map(|p| p.value).collect::<Vec<f64>>(),
            ),
        ])?;
        Ok(df)
    }

    /// Transform multi-column data to long format (stack operation).
    ///
    /// Output columns: [id_col, "metric", "value"]; NaN values are dropped.
    pub fn stack_to_long(df: &DataFrame, id_col: &str, value_cols: &[&str]) -> Result<DataFrame> {
        let mut ids: Vec<i32> = Vec::new();
        let mut metrics: Vec<String> = Vec::new();
        let mut values: Vec<f64> = Vec::new();

        let id_i32 = df.column(id_col)?.cast(&DataType::Int32)?;
        let id_ca = id_i32.i32()?;

        for value_col in value_cols {
            let value_f64 = df.column(value_col)?.cast(&DataType::Float64)?;
            let value_ca = value_f64.f64()?;

            for i in 0..df.height() {
                if let (Some(id), Some(v)) = (id_ca.get(i), value_ca.get(i)) {
                    if !v.is_nan() {
                        ids.push(id);
                        metrics.push(value_col.to_string());
                        values.push(v);
                    }
                }
            }
        }

        let long = DataFrame::new(vec![
            Column::new(id_col.into(), ids),
            Column::new("metric".into(), metrics),
            Column::new("value".into(), values),
        ])?;

        Ok(long)
    }

    /// Filter a long-format DataFrame for one metric.
    pub fn filter_by_metric(df: &DataFrame, metric: &str) -> Result<DataFrame> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col("metric").eq(lit(metric)))
            .collect()?;
        Ok(filtered)
    }

    pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
        let mut file = fs::File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
        Ok(())
    }

    /// Write every base table, the policy overlay, the projection and the
    /// long-format health table as CSV files under `dir`.
    pub fn export_all(datasets: &Datasets, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let health = Self::health_impact(datasets.health_impact())?;
        let health_metrics: Vec<&str> = HealthField::ALL.iter().map(|f| f.name()).collect();
        let health_long = Self::stack_to_long(&health, "year", &health_metrics)?;

        let overlay =
            ViewBuilder::join_policy_to_trend(datasets.yearly_trends(), datasets.policy_timeline());
        let first = datasets.projection_anchors().first().map(|a| a.year);
        let last = datasets.projection_anchors().last().map(|a| a.year);
        let projection = match (first, last) {
            (Some(first), Some(last)) => {
                ViewBuilder::projection_series(first, last, datasets.projection_anchors())?
            }
            _ => Vec::new(),
        };

        let mut frames = vec![
            ("yearly_trends", Self::yearly_trends(datasets.yearly_trends())?),
            ("policy_timeline", Self::policy_timeline(datasets.policy_timeline())?),
            ("regional_snapshot", Self::regional_snapshot(datasets.regional_snapshot())?),
            (
                "international_comparison",
                Self::international_comparison(datasets.international_comparison())?,
            ),
            ("health_impact", health),
            ("health_impact_long", health_long),
            ("policy_overlay", Self::policy_overlay(&overlay)?),
            (
                "consumption_projection",
                Self::year_values(TrendField::LitersPerCapita.name(), &projection)?,
            ),
        ];

        let mut written = Vec::with_capacity(frames.len());
        for (name, df) in frames.iter_mut() {
            let path = dir.join(format!("{}.csv", name));
            Self::write_csv(df, &path)?;
            log::debug!("Exported {} ({} rows) to {}", name, df.height(), path.display());
            written.push(path);
        }

        log::info!("Exported {} tables to {}", written.len(), dir.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yearly_trend_frame_shape() {
        let datasets = Datasets::build().unwrap();
        let df = Frames::yearly_trends(datasets.yearly_trends()).unwrap();
        assert_eq!(df.height(), 24);
        assert_eq!(df.width(), 1 + TrendField::ALL.len());
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names[0], "year");
        assert_eq!(names[1], "liters_per_capita");
    }

    #[test]
    fn test_overlay_frame_has_nulls_for_years_without_policy() {
        let datasets = Datasets::build().unwrap();
        let overlay =
            ViewBuilder::join_policy_to_trend(datasets.yearly_trends(), datasets.policy_timeline());
        let df = Frames::policy_overlay(&overlay).unwrap();
        assert_eq!(df.height(), overlay.len());
        let without_policy = overlay.iter().filter(|r| r.policy.is_none()).count();
        assert_eq!(df.column("title").unwrap().null_count(), without_policy);
    }

    #[test]
    fn test_stack_to_long_and_filter() {
        let datasets = Datasets::build().unwrap();
        let df = Frames::health_impact(datasets.health_impact()).unwrap();
        let metrics = ["alcohol_deaths_thousands", "road_accidents_thousands"];
        let long = Frames::stack_to_long(&df, "year", &metrics).unwrap();
        assert_eq!(long.height(), 28);
        assert_eq!(long.width(), 3);

        let deaths = Frames::filter_by_metric(&long, "alcohol_deaths_thousands").unwrap();
        assert_eq!(deaths.height(), 14);
        let first = deaths.column("value").unwrap().f64().unwrap().get(0);
        assert_eq!(first, Some(49.0));

        assert!(Frames::stack_to_long(&df, "year", &["no_such_column"]).is_err());
    }

    #[test]
    fn test_empty_tables_give_empty_frames() {
        let df = Frames::yearly_trends(&[]).unwrap();
        assert_eq!(df.height(), 0);
        let long = Frames::stack_to_long(&df, "year", &["liters_per_capita"]).unwrap();
        assert_eq!(long.height(), 0);
    }

    #[test]
    fn test_export_all_writes_csv_files() {
        let datasets = Datasets::build().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let written = Frames::export_all(&datasets, dir.path()).unwrap();
        assert_eq!(written.len(), 8);
        assert!(written.iter().all(|p| p.exists()));

        let trends = std::fs::read_to_string(dir.path().join("yearly_trends.csv")).unwrap();
        let mut lines = trends.lines();
        assert!(lines.next().unwrap().starts_with("year,liters_per_capita"));
        assert_eq!(lines.count(), 24);
    }
}
