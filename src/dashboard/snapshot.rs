//! Dashboard Snapshot
//! Everything the presentation shell renders for one set of controls.

use super::controls::{DashboardControls, FocusArea};
use super::metrics::{key_metrics, KeyMetric};
use crate::data::*;
use crate::error::Result;
use crate::stats::{Correlation, SeriesStats, StatsCalculator};
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionSection {
    pub trends: Vec<YearlyTrend>,
    pub stats: Vec<SeriesStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicySection {
    pub overlay: Vec<PolicyOverlayRow>,
    pub legend: Vec<PolicyLegendEntry>,
    /// Delay vs amplitude bubbles, sized by the absolute impact.
    pub impacts: MagnitudeColumn<PolicyImpact>,
    pub strategies: Vec<StrategyAssessment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthSection {
    /// Control range clamped to the health table years; empty if disjoint.
    pub trends: Vec<HealthImpactTrend>,
    pub stats: Vec<SeriesStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionalSection {
    pub by_consumption: Vec<RegionalSnapshot>,
    pub by_delta: Vec<RegionalSnapshot>,
    pub map: Vec<MapPoint>,
    pub european: Vec<EuropeanConsumption>,
    pub profiles: Vec<ConsumerProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InternationalSection {
    pub by_consumption: Vec<CountryComparison>,
    pub price_vs_consumption: Correlation,
    pub policy_adoption: Vec<PolicyAdoption>,
    /// Investment vs reduction bubbles, sized by the absolute reduction.
    pub performance: MagnitudeColumn<NationalPerformance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionSection {
    pub series: Vec<YearValue>,
    pub target: f64,
    pub reaches_target: bool,
    /// Intermediate and 2030 goals checked against `series`
    pub milestones: Vec<MilestoneCheck>,
    pub roadmap: Vec<RoadmapStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Local>,
    pub controls: DashboardControls,
    pub key_metrics: Vec<KeyMetric>,
    pub consumption: Option<ConsumptionSection>,
    pub policies: Option<PolicySection>,
    pub health: Option<HealthSection>,
    pub regional: Option<RegionalSection>,
    pub international: Option<InternationalSection>,
    pub projection: Option<ProjectionSection>,
}

impl DashboardSnapshot {
    /// Run the full pipeline for `controls`. Sections outside the focus are `None`.
    pub fn build(datasets: &Datasets, controls: &DashboardControls) -> Result<Self> {
        controls.validate()?;

        let window = ViewBuilder::filter_years(
            datasets.yearly_trends(),
            NATIONAL_YEARS,
            controls.start_year,
            controls.end_year,
        )?;

        let consumption = if controls.has_focus(FocusArea::Consumption) {
            Some(ConsumptionSection {
                stats: StatsCalculator::compute_all_stats_parallel(&window, TrendField::ALL),
                trends: window.clone(),
            })
        } else {
            None
        };

        let policies = if controls.has_focus(FocusArea::Policies) {
            Some(PolicySection {
                overlay: ViewBuilder::join_policy_to_trend(&window, datasets.policy_timeline()),
                legend: ViewBuilder::group_by_category(datasets.policy_timeline()),
                impacts: ViewBuilder::absolute(
                    datasets.policy_impacts(),
                    PolicyImpactField::ConsumptionImpact,
                    "impact_abs",
                ),
                strategies: datasets.strategies().to_vec(),
            })
        } else {
            None
        };

        let health = if controls.has_focus(FocusArea::HealthImpact) {
            let trends = match HEALTH_YEARS.clamp_range(controls.start_year, controls.end_year) {
                Some((start, end)) => {
                    ViewBuilder::filter_years(datasets.health_impact(), HEALTH_YEARS, start, end)?
                }
                None => {
                    log::warn!(
                        "Range {}-{} has no health data ({}-{})",
                        controls.start_year,
                        controls.end_year,
                        HEALTH_YEARS.first,
                        HEALTH_YEARS.last
                    );
                    Vec::new()
                }
            };
            Some(HealthSection {
                stats: StatsCalculator::compute_all_stats_parallel(&trends, HealthField::ALL),
                trends,
            })
        } else {
            None
        };

        let regional = if controls.has_focus(FocusArea::Regional) {
            let regions = datasets.regional_snapshot();
            Some(RegionalSection {
                by_consumption: ViewBuilder::rank_by(regions, RegionField::Consumption2023, true),
                by_delta: ViewBuilder::rank_by(regions, RegionField::Delta2010To2023, true),
                map: ViewBuilder::map_points(regions),
                european: datasets.european_consumption().to_vec(),
                profiles: datasets.consumer_profiles().to_vec(),
            })
        } else {
            None
        };

        let international = if controls.has_focus(FocusArea::International) {
            let countries = datasets.international_comparison();
            Some(InternationalSection {
                by_consumption: ViewBuilder::rank_by(
                    countries,
                    CountryField::LitersPerCapita,
                    true,
                ),
                price_vs_consumption: StatsCalculator::pearson_correlation(
                    countries,
                    CountryField::BeerPriceEur,
                    CountryField::LitersPerCapita,
                ),
                policy_adoption: datasets.policy_adoption().to_vec(),
                performance: ViewBuilder::absolute(
                    datasets.national_performance(),
                    PerformanceField::Reduction10Years,
                    "reduction_abs",
                ),
            })
        } else {
            None
        };

        let projection = if controls.show_projections {
            let series = ViewBuilder::projection_series(
                PROJECTION_YEARS.first,
                PROJECTION_YEARS.last,
                datasets.projection_anchors(),
            )?;
            let reaches_target = series
                .last()
                .is_some_and(|p| p.value <= CONSUMPTION_TARGET_2030);
            Some(ProjectionSection {
                milestones: ViewBuilder::check_milestones(&series, datasets.milestones()),
                series,
                target: CONSUMPTION_TARGET_2030,
                reaches_target,
                roadmap: datasets.roadmap().to_vec(),
            })
        } else {
            None
        };

        let snapshot = Self {
            generated_at: Local::now(),
            controls: controls.clone(),
            key_metrics: key_metrics(datasets.yearly_trends())?,
            consumption,
            policies,
            health,
            regional,
            international,
            projection,
        };

        log::info!(
            "Snapshot built for {}-{} with focus [{}]",
            controls.start_year,
            controls.end_year,
            controls
                .focus
                .iter()
                .map(|f| f.label())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    fn all_focus() -> DashboardControls {
        DashboardControls {
            focus: FocusArea::ALL.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_controls_snapshot() {
        let datasets = Datasets::build().unwrap();
        let snapshot = DashboardSnapshot::build(&datasets, &DashboardControls::default()).unwrap();

        assert_eq!(snapshot.key_metrics.len(), 4);
        let consumption = snapshot.consumption.as_ref().unwrap();
        assert_eq!(consumption.trends.len(), 24);
        assert_eq!(consumption.stats.len(), TrendField::ALL.len());

        let policies = snapshot.policies.as_ref().unwrap();
        assert_eq!(policies.overlay.len(), 24);
        assert_eq!(policies.legend.len(), 4);
        assert!(policies.impacts.rows.iter().all(|r| r.magnitude >= 0.0));

        assert!(snapshot.health.is_none());
        assert!(snapshot.regional.is_none());
        assert!(snapshot.international.is_none());

        let projection = snapshot.projection.as_ref().unwrap();
        assert_eq!(projection.series.len(), 11);
        assert!(projection.reaches_target);
        let reached: Vec<(i32, bool)> = projection
            .milestones
            .iter()
            .map(|c| (c.milestone.year, c.reached))
            .collect();
        assert_eq!(reached, vec![(2025, false), (2027, false), (2030, true)]);
    }

    #[test]
    fn test_all_focus_sections() {
        let datasets = Datasets::build().unwrap();
        let snapshot = DashboardSnapshot::build(&datasets, &all_focus()).unwrap();

        let regional = snapshot.regional.as_ref().unwrap();
        assert_eq!(regional.by_consumption[0].region, "Île-de-France");
        assert_eq!(regional.by_consumption[12].region, "Corse");
        assert_eq!(regional.by_delta[0].region, "Pays de la Loire");
        assert_eq!(regional.map.len(), 13);

        let international = snapshot.international.as_ref().unwrap();
        assert_eq!(international.by_consumption[0].country, "Italie");
        assert_eq!(international.by_consumption[7].country, "Russie");
        assert_eq!(international.performance.rows.len(), 6);

        let health = snapshot.health.as_ref().unwrap();
        assert_eq!(health.trends.len(), 14);
    }

    #[test]
    fn test_window_limits_overlay_and_clamps_health() {
        let datasets = Datasets::build().unwrap();
        let controls = DashboardControls {
            start_year: 2005,
            end_year: 2012,
            ..all_focus()
        };
        let snapshot = DashboardSnapshot::build(&datasets, &controls).unwrap();

        let policies = snapshot.policies.as_ref().unwrap();
        assert_eq!(policies.overlay.len(), 8);
        let with_policy: Vec<i32> = policies
            .overlay
            .iter()
            .filter(|r| r.policy.is_some())
            .map(|r| r.trend.year)
            .collect();
        assert_eq!(with_policy, vec![2009]);

        let health = snapshot.health.as_ref().unwrap();
        assert_eq!(health.trends.len(), 3);
        assert_eq!(health.trends[0].year, 2010);

        // Key metrics always describe the latest national year
        assert_eq!(snapshot.key_metrics[0].change.latest_year, 2023);
    }

    #[test]
    fn test_health_window_empty_when_disjoint() {
        let datasets = Datasets::build().unwrap();
        let controls = DashboardControls {
            start_year: 2000,
            end_year: 2005,
            focus: vec![FocusArea::HealthImpact],
            show_projections: false,
            ..Default::default()
        };
        let snapshot = DashboardSnapshot::build(&datasets, &controls).unwrap();
        let health = snapshot.health.unwrap();
        assert!(health.trends.is_empty());
        assert!(health.stats.iter().all(|s| s.count == 0));
        assert!(snapshot.projection.is_none());
    }

    #[test]
    fn test_invalid_controls_are_rejected() {
        let datasets = Datasets::build().unwrap();
        let controls = DashboardControls {
            start_year: 2015,
            end_year: 2030,
            ..Default::default()
        };
        assert!(matches!(
            DashboardSnapshot::build(&datasets, &controls),
            Err(DashboardError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let datasets = Datasets::build().unwrap();
        let snapshot = DashboardSnapshot::build(&datasets, &all_focus()).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["key_metrics"][0]["display_delta"], "-0.2L vs 2022");
        assert_eq!(json["policies"]["legend"][0]["category"], "prevention");
        assert!(json["policies"]["overlay"][0]["policy"].is_null());
    }
}
