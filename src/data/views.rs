//! Derived View Module
//! Pure reshaping of the base tables into presentation-ready views.

use super::provider::YearBounds;
use super::records::*;
use crate::error::{DashboardError, Result};
use serde::Serialize;

/// Latest value of a yearly metric against the year before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearOverYear {
    pub metric: &'static str,
    pub latest_year: i32,
    pub previous_year: i32,
    pub latest: f64,
    pub previous: f64,
    pub delta: f64,
}

impl YearOverYear {
    /// Signed delta the way headline cards show it, e.g. `-0.2L vs 2022`.
    pub fn formatted_delta(&self, unit: &str) -> String {
        format!("{:+.1}{} vs {}", self.delta, unit, self.previous_year)
    }
}

/// One row of the policy overlay: a trend year with at most one policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyOverlayRow {
    pub trend: YearlyTrend,
    pub policy: Option<PolicyEvent>,
}

/// A record paired with a non-negative size derived from one of its columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Magnitude<R> {
    pub record: R,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeColumn<R> {
    /// Name of the derived column.
    pub name: String,
    /// Column the magnitude was taken from.
    pub source: &'static str,
    pub rows: Vec<Magnitude<R>>,
}

/// Legend group for one policy category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyLegendEntry {
    pub category: PolicyCategory,
    pub label: &'static str,
    pub color: String,
    pub events: Vec<PolicyEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub consumption_2023: f64,
}

/// A milestone next to the projected consumption for its year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneCheck {
    pub milestone: Milestone,
    pub projected: f64,
    /// Projection at or below the milestone ceiling
    pub reached: bool,
}

/// Builds derived views. Every function is reproducible from its inputs.
pub struct ViewBuilder;

impl ViewBuilder {
    /// Most recent record and the one immediately before it, by year.
    ///
    /// Returns `(latest, previous)`; fails with `NotFound` below two records.
    pub fn latest_vs_previous<R: Yearly>(table: &[R]) -> Result<(&R, &R)> {
        let mut ordered: Vec<&R> = table.iter().collect();
        ordered.sort_by_key(|r| r.year());

        match ordered.as_slice() {
            [.., previous, latest] => Ok((*latest, *previous)),
            _ => Err(DashboardError::NotFound(format!(
                "need at least 2 yearly records, found {}",
                table.len()
            ))),
        }
    }

    /// Year-over-year change of one column.
    pub fn year_over_year<R: Yearly, F: Field<R>>(table: &[R], field: F) -> Result<YearOverYear> {
        let (latest, previous) = Self::latest_vs_previous(table)
            .map_err(|_| DashboardError::NotFound(format!("history for `{}`", field.name())))?;

        let latest_value = field.value(latest);
        let previous_value = field.value(previous);

        Ok(YearOverYear {
            metric: field.name(),
            latest_year: latest.year(),
            previous_year: previous.year(),
            latest: latest_value,
            previous: previous_value,
            delta: latest_value - previous_value,
        })
    }

    /// Left join of the yearly trend with the policy timeline on year.
    ///
    /// Every trend row appears once per policy of its year, or once with no
    /// policy. Policies outside the trend years are dropped.
    pub fn join_policy_to_trend(
        trend: &[YearlyTrend],
        policies: &[PolicyEvent],
    ) -> Vec<PolicyOverlayRow> {
        let mut rows = Vec::with_capacity(trend.len());

        for year_row in trend {
            let mut matched = false;
            for policy in policies.iter().filter(|p| p.year() == year_row.year) {
                rows.push(PolicyOverlayRow {
                    trend: year_row.clone(),
                    policy: Some(policy.clone()),
                });
                matched = true;
            }
            if !matched {
                rows.push(PolicyOverlayRow {
                    trend: year_row.clone(),
                    policy: None,
                });
            }
        }

        log::debug!(
            "Policy overlay: {} trend years, {} policies -> {} rows",
            trend.len(),
            policies.len(),
            rows.len()
        );
        rows
    }

    /// Stable sort by one column; ties keep their original order.
    pub fn rank_by<R: Clone, F: Field<R>>(table: &[R], field: F, ascending: bool) -> Vec<R> {
        let mut ranked = table.to_vec();
        ranked.sort_by(|a, b| {
            let order = field.value(a).total_cmp(&field.value(b));
            if ascending {
                order
            } else {
                order.reverse()
            }
        });
        ranked
    }

    /// Non-negative magnitude column for area/size encodings.
    pub fn absolute<R: Clone, F: Field<R>>(
        table: &[R],
        field: F,
        new_field: &str,
    ) -> MagnitudeColumn<R> {
        let rows = table
            .iter()
            .map(|record| {
                let magnitude = field.value(record).abs();
                Magnitude {
                    record: record.clone(),
                    // NaN has no size
                    magnitude: if magnitude.is_nan() { 0.0 } else { magnitude },
                }
            })
            .collect();

        MagnitudeColumn {
            name: new_field.to_string(),
            source: field.name(),
            rows,
        }
    }

    /// One value per year in `start..=end`, linearly interpolated between anchors.
    ///
    /// Anchor years return the anchor value unchanged. Years outside the
    /// anchor span are rejected rather than extrapolated.
    pub fn projection_series(
        start: i32,
        end: i32,
        anchors: &[YearValue],
    ) -> Result<Vec<YearValue>> {
        let (Some(first), Some(last)) = (anchors.first(), anchors.last()) else {
            return Ok(Vec::new());
        };

        if let Some(pair) = anchors.windows(2).find(|pair| pair[1].year <= pair[0].year) {
            return Err(DashboardError::InvalidAnchors(format!(
                "anchor years must be strictly increasing ({} then {})",
                pair[0].year, pair[1].year
            )));
        }

        if start > end || start < first.year || end > last.year {
            return Err(DashboardError::InvalidRange {
                start,
                end,
                min: first.year,
                max: last.year,
            });
        }

        let series = (start..=end)
            .map(|year| {
                let value = match anchors.binary_search_by_key(&year, |a| a.year) {
                    Ok(idx) => anchors[idx].value,
                    Err(idx) => {
                        // start/end checks guarantee 0 < idx < len
                        let lo = anchors[idx - 1];
                        let hi = anchors[idx];
                        let span = f64::from(hi.year) - f64::from(lo.year);
                        let t = (f64::from(year) - f64::from(lo.year)) / span;
                        lo.value + (hi.value - lo.value) * t
                    }
                };
                YearValue { year, value }
            })
            .collect();

        Ok(series)
    }

    /// Records with `start <= year <= end`; both ends must lie inside `bounds`.
    pub fn filter_years<R: Yearly + Clone>(
        table: &[R],
        bounds: YearBounds,
        start: i32,
        end: i32,
    ) -> Result<Vec<R>> {
        if start > end || !bounds.contains(start) || !bounds.contains(end) {
            return Err(DashboardError::InvalidRange {
                start,
                end,
                min: bounds.first,
                max: bounds.last,
            });
        }

        Ok(table
            .iter()
            .filter(|r| (start..=end).contains(&r.year()))
            .cloned()
            .collect())
    }

    /// One column as a (year, value) series.
    pub fn series<R: Yearly, F: Field<R>>(table: &[R], field: F) -> Vec<YearValue> {
        table
            .iter()
            .map(|r| YearValue {
                year: r.year(),
                value: field.value(r),
            })
            .collect()
    }

    /// Policies grouped per category, in legend order. Empty categories are kept.
    pub fn group_by_category(policies: &[PolicyEvent]) -> Vec<PolicyLegendEntry> {
        PolicyCategory::ALL
            .iter()
            .map(|&category| PolicyLegendEntry {
                category,
                label: category.label(),
                color: category.hex_color(),
                events: policies
                    .iter()
                    .filter(|p| p.category == category)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Regions that carry coordinates.
    pub fn map_points(regions: &[RegionalSnapshot]) -> Vec<MapPoint> {
        regions
            .iter()
            .filter_map(|r| {
                let point = r.coordinates?;
                Some(MapPoint {
                    region: r.region.clone(),
                    latitude: point.latitude,
                    longitude: point.longitude,
                    consumption_2023: r.consumption_2023,
                })
            })
            .collect()
    }

    /// Check each milestone against the projected value for its year.
    /// Milestones for years `series` does not cover are left out.
    pub fn check_milestones(series: &[YearValue], milestones: &[Milestone]) -> Vec<MilestoneCheck> {
        milestones
            .iter()
            .filter_map(|m| {
                let point = series.iter().find(|p| p.year == m.year)?;
                Some(MilestoneCheck {
                    milestone: m.clone(),
                    projected: point.value,
                    reached: point.value <= m.max_liters_per_capita,
                })
            })
            .collect()
    }
}
