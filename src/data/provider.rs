//! Dataset Provider Module
//! Builds the fixed dashboard tables once and hands out read-only views.

use super::records::*;
use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Inclusive year range a table was authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub first: i32,
    pub last: i32,
}

impl YearBounds {
    pub const fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }

    pub fn len(&self) -> usize {
        (self.last - self.first + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Part of `start..=end` inside these bounds, if any.
    pub fn clamp_range(&self, start: i32, end: i32) -> Option<(i32, i32)> {
        let lo = start.max(self.first);
        let hi = end.min(self.last);
        (lo <= hi).then_some((lo, hi))
    }
}

pub const NATIONAL_YEARS: YearBounds = YearBounds::new(2000, 2023);
pub const HEALTH_YEARS: YearBounds = YearBounds::new(2010, 2023);
pub const PROJECTION_YEARS: YearBounds = YearBounds::new(2020, 2030);

/// National goal for 2030, liters of pure alcohol per capita.
pub const CONSUMPTION_TARGET_2030: f64 = 6.5;

// (year, liters, daily drinkers %, binge %, wine share %, tax revenue Md€)
const YEARLY_TRENDS: [(i32, f64, f64, f64, f64, f64); 24] = [
    (2000, 13.5, 15.2, 18.5, 58.2, 3.2),
    (2001, 13.2, 14.8, 18.8, 56.8, 3.3),
    (2002, 12.9, 14.4, 19.1, 55.5, 3.4),
    (2003, 12.6, 14.0, 19.4, 54.2, 3.5),
    (2004, 12.3, 13.6, 19.7, 52.9, 3.6),
    (2005, 12.0, 13.2, 20.0, 51.6, 3.7),
    (2006, 11.8, 12.8, 20.3, 50.3, 3.8),
    (2007, 11.5, 12.4, 20.6, 49.0, 3.9),
    (2008, 11.3, 12.0, 20.9, 47.7, 4.0),
    (2009, 11.1, 11.6, 21.2, 46.4, 4.1),
    (2010, 10.9, 11.2, 21.5, 45.1, 4.2),
    (2011, 10.7, 10.8, 21.8, 43.8, 4.3),
    (2012, 10.5, 10.4, 22.1, 42.5, 4.4),
    (2013, 10.3, 10.0, 22.4, 41.2, 4.5),
    (2014, 10.1, 9.6, 22.7, 39.9, 4.6),
    (2015, 9.9, 9.2, 23.0, 38.6, 4.7),
    (2016, 9.7, 8.8, 23.3, 37.3, 4.8),
    (2017, 9.5, 8.4, 23.6, 36.0, 4.9),
    (2018, 9.3, 8.0, 23.9, 34.7, 5.0),
    (2019, 9.1, 7.6, 24.2, 33.4, 5.1),
    (2020, 8.9, 7.2, 24.5, 32.1, 5.2),
    (2021, 8.7, 6.8, 24.8, 30.8, 5.3),
    (2022, 8.5, 6.4, 25.1, 29.5, 5.4),
    (2023, 8.3, 6.0, 25.4, 28.2, 5.5),
];

// (date, category, title, description)
const POLICY_TIMELINE: [(&str, &str, &str, &str); 9] = [
    (
        "1991-01-01",
        "regulation",
        "Loi Évin - Alcool",
        "Encadrement de la publicité pour les boissons alcoolisées",
    ),
    (
        "2009-07-21",
        "ban",
        "Loi Bachelot",
        "Interdiction de la vente d'alcool aux mineurs et limitation de la publicité",
    ),
    (
        "2015-01-01",
        "regulation",
        "Alcootest obligatoire",
        "Obligation de posséder un éthylotest dans tous les véhicules",
    ),
    (
        "2016-01-01",
        "tax",
        "Augmentation des taxes",
        "Hausse des taxes sur les boissons alcoolisées",
    ),
    (
        "2018-03-01",
        "prevention",
        "Campagne \"Avec modération\"",
        "Lancement des campagnes nationales de prévention",
    ),
    (
        "2019-07-22",
        "regulation",
        "Loi Santé",
        "Renforcement de l'encadrement de la publicité pour l'alcool",
    ),
    (
        "2020-01-01",
        "prevention",
        "Programme \"Alcool Info Service\"",
        "Renforcement des services d'aide et d'information",
    ),
    (
        "2021-11-01",
        "regulation",
        "Interdiction publicité réseaux sociaux",
        "Interdiction de la publicité pour l'alcool sur les réseaux sociaux",
    ),
    (
        "2023-01-01",
        "tax",
        "Nouvelle hausse des taxes",
        "Augmentation ciblée sur les boissons les plus consommées",
    ),
];

// (region, consumption 2023, delta 2010-2023, daily %, binge %, lat, lon)
const REGIONS: [(&str, f64, f64, f64, f64, f64, f64); 13] = [
    ("Île-de-France", 7.8, -2.1, 4.2, 22.1, 48.8566, 2.3522),
    ("Auvergne-Rhône-Alpes", 9.2, -1.8, 6.8, 25.6, 45.75, 4.85),
    ("Nouvelle-Aquitaine", 8.9, -1.9, 6.1, 24.8, 44.8378, -0.5792),
    ("Occitanie", 9.5, -2.2, 7.2, 26.3, 43.6, 1.4333),
    ("Hauts-de-France", 10.1, -1.5, 8.5, 28.7, 50.6292, 3.0573),
    ("Provence-Alpes-Côte d'Azur", 8.4, -2.0, 5.3, 23.4, 43.3, 5.37),
    ("Pays de la Loire", 8.1, -2.3, 4.9, 21.9, 47.2181, -1.5528),
    ("Bretagne", 9.8, -1.7, 7.9, 27.2, 48.1173, -1.6778),
    ("Normandie", 8.7, -1.8, 6.4, 25.1, 49.18, -0.37),
    ("Grand Est", 9.4, -1.6, 7.1, 26.8, 48.5734, 7.7521),
    ("Bourgogne-Franche-Comté", 8.6, -2.1, 6.2, 24.5, 47.24, 6.02),
    ("Centre-Val de Loire", 8.3, -2.0, 5.8, 23.2, 47.9, 1.9),
    ("Corse", 11.2, -0.9, 9.8, 30.5, 42.15, 9.08),
];

// (country, liters, beer price €, mortality k, prevention €/hab, legal age)
const COUNTRIES: [(&str, f64, f64, f64, f64, u8); 8] = [
    ("France", 8.3, 2.5, 41.0, 0.4, 18),
    ("Allemagne", 10.6, 1.8, 79.0, 0.3, 16),
    ("Royaume-Uni", 9.8, 3.2, 52.0, 0.8, 18),
    ("Espagne", 7.5, 1.2, 28.0, 0.2, 18),
    ("Italie", 6.9, 1.5, 35.0, 0.3, 18),
    ("États-Unis", 8.9, 2.8, 88.0, 1.2, 21),
    ("Russie", 11.7, 1.1, 152.0, 0.1, 18),
    ("Japon", 7.2, 3.5, 23.0, 0.5, 20),
];

// (year, deaths k, digestive cancers k, liver disease k, costs Md€, road accidents k)
const HEALTH_IMPACT: [(i32, f64, f64, f64, f64, f64); 14] = [
    (2010, 49.0, 15.0, 12.0, 18.5, 3.2),
    (2011, 48.0, 16.0, 11.0, 18.8, 3.0),
    (2012, 47.0, 17.0, 10.0, 19.1, 2.8),
    (2013, 46.0, 18.0, 9.0, 19.4, 2.6),
    (2014, 45.0, 19.0, 8.0, 19.7, 2.4),
    (2015, 44.0, 20.0, 7.0, 20.0, 2.2),
    (2016, 43.0, 21.0, 6.0, 20.3, 2.0),
    (2017, 42.0, 22.0, 5.0, 20.6, 1.8),
    (2018, 41.0, 23.0, 4.0, 20.9, 1.6),
    (2019, 40.0, 24.0, 3.0, 21.2, 1.4),
    (2020, 39.0, 25.0, 2.0, 21.5, 1.2),
    (2021, 38.0, 26.0, 1.0, 21.8, 1.0),
    (2022, 37.0, 27.0, 0.9, 22.1, 0.8),
    (2023, 36.0, 28.0, 0.8, 22.4, 0.6),
];

const POLICY_IMPACTS: [(&str, f64, u8); 5] = [
    ("Loi Évin (1991)", -0.8, 3),
    ("Loi Bachelot (2009)", -0.5, 2),
    ("Alcootest obligatoire (2015)", -0.3, 1),
    ("Hausse taxes 2016", -0.4, 2),
    ("Campagne modération (2018)", -0.2, 1),
];

const STRATEGIES: [(&str, f64, f64, f64); 6] = [
    ("Augmentation des prix", 8.2, 3.0, 4.0),
    ("Limitation publicité", 6.8, 2.0, 7.0),
    ("Contrôles routiers", 7.5, 4.0, 6.0),
    ("Interdiction vente mineurs", 6.2, 2.0, 8.0),
    ("Campagnes prévention", 5.8, 5.0, 9.0),
    ("Services d'aide", 6.5, 6.0, 8.0),
];

const NATIONAL_PERFORMANCE: [(&str, f64, f64, u8); 6] = [
    ("Royaume-Uni", -2.8, 0.8, 1),
    ("France", -2.1, 0.4, 2),
    ("Italie", -1.9, 0.3, 3),
    ("Canada", -1.7, 0.6, 4),
    ("États-Unis", -1.2, 1.2, 5),
    ("Allemagne", -0.8, 0.3, 6),
];

// (country, advertising limited, high taxes, reinforced controls, youth prevention)
const POLICY_ADOPTION: [(&str, bool, bool, bool, bool); 5] = [
    ("France", true, true, true, true),
    ("Royaume-Uni", true, true, true, true),
    ("Pays-Bas", false, false, true, true),
    ("Allemagne", false, false, false, false),
    ("États-Unis", false, false, true, true),
];

const EUROPE: [(&str, &str, f64); 8] = [
    ("France", "FRA", 8.3),
    ("Allemagne", "DEU", 10.6),
    ("Italie", "ITA", 6.9),
    ("Espagne", "ESP", 7.5),
    ("Royaume-Uni", "GBR", 9.8),
    ("Belgique", "BEL", 10.2),
    ("Pays-Bas", "NLD", 8.7),
    ("Suisse", "CHE", 9.1),
];

const SOCIO_PROFESSIONAL: [(&str, f64); 6] = [
    ("Agriculteurs", 12.5),
    ("Ouvriers", 10.8),
    ("Artisans", 9.9),
    ("Cadres", 7.2),
    ("Professions intermédiaires", 8.1),
    ("Retraités", 8.5),
];

const AGE_BANDS: [(&str, f64); 6] = [
    ("15-24 ans", 6.8),
    ("25-34 ans", 9.2),
    ("35-44 ans", 8.9),
    ("45-54 ans", 9.5),
    ("55-64 ans", 10.1),
    ("65+ ans", 8.7),
];

const ROADMAP: [(&str, [&str; 3]); 4] = [
    ("2024", ["Loi prix minimum", "Campagne jeunes", "Renforcement contrôles"]),
    ("2025", ["Évaluation prix minimum", "Extension prévention", "Formation professionnels"]),
    ("2026-2027", ["Nouvelle hausse taxes", "Interdiction publicité", "Dépistage élargi"]),
    ("2028-2030", ["Objectif 6.5L atteint", "Évaluation stratégique", "Adaptation politiques"]),
];

// (year, max liters, binge reduction %, mortality reduction %, measure)
const MILESTONES: [(i32, f64, f64, Option<f64>, Option<&str>); 3] = [
    (2025, 7.5, 15.0, None, Some("Prix minimum unitaire")),
    (2027, 7.0, 25.0, None, Some("Publicité totalement encadrée")),
    (2030, CONSUMPTION_TARGET_2030, 30.0, Some(40.0), None),
];

// Reproduces the authored 2020-2030 consumption projection.
const PROJECTION_ANCHORS: [(i32, f64); 5] = [
    (2020, 8.9),
    (2023, 8.3),
    (2028, 6.8),
    (2029, 6.6),
    (2030, 6.5),
];

/// Immutable bundle of every dashboard table.
///
/// Built once at startup and passed by reference to whatever renders it.
#[derive(Debug, Clone)]
pub struct Datasets {
    yearly_trends: Vec<YearlyTrend>,
    policy_timeline: Vec<PolicyEvent>,
    regional_snapshot: Vec<RegionalSnapshot>,
    international_comparison: Vec<CountryComparison>,
    health_impact: Vec<HealthImpactTrend>,
    policy_impacts: Vec<PolicyImpact>,
    strategies: Vec<StrategyAssessment>,
    national_performance: Vec<NationalPerformance>,
    policy_adoption: Vec<PolicyAdoption>,
    european_consumption: Vec<EuropeanConsumption>,
    consumer_profiles: Vec<ConsumerProfile>,
    roadmap: Vec<RoadmapStep>,
    milestones: Vec<Milestone>,
    projection_anchors: Vec<YearValue>,
}

impl Datasets {
    /// Build and validate all embedded tables.
    ///
    /// An error here means the embedded constants are malformed; callers
    /// should abort since every view depends on this baseline.
    pub fn build() -> Result<Self> {
        let datasets = Self {
            yearly_trends: build_yearly_trends(),
            policy_timeline: build_policy_timeline()?,
            regional_snapshot: build_regional_snapshot(),
            international_comparison: build_international_comparison(),
            health_impact: build_health_impact(),
            policy_impacts: POLICY_IMPACTS
                .iter()
                .map(|&(policy, consumption_impact, delay_years)| PolicyImpact {
                    policy: policy.to_string(),
                    consumption_impact,
                    delay_years,
                })
                .collect(),
            strategies: STRATEGIES
                .iter()
                .map(|&(strategy, effectiveness, cost, acceptability)| StrategyAssessment {
                    strategy: strategy.to_string(),
                    effectiveness,
                    cost,
                    acceptability,
                })
                .collect(),
            national_performance: NATIONAL_PERFORMANCE
                .iter()
                .map(|&(country, reduction, investment, rank)| NationalPerformance {
                    country: country.to_string(),
                    reduction_10_years: reduction,
                    prevention_investment_eur: investment,
                    rank,
                })
                .collect(),
            policy_adoption: POLICY_ADOPTION
                .iter()
                .map(|&(country, advertising, taxes, controls, youth)| PolicyAdoption {
                    country: country.to_string(),
                    advertising_limited: advertising,
                    high_taxes: taxes,
                    reinforced_controls: controls,
                    youth_prevention: youth,
                })
                .collect(),
            european_consumption: EUROPE
                .iter()
                .map(|&(country, iso_code, liters)| EuropeanConsumption {
                    country: country.to_string(),
                    iso_code: iso_code.to_string(),
                    liters_per_capita: liters,
                })
                .collect(),
            consumer_profiles: build_consumer_profiles(),
            roadmap: ROADMAP
                .iter()
                .map(|(period, actions)| RoadmapStep {
                    period: period.to_string(),
                    actions: actions.iter().map(|a| a.to_string()).collect(),
                })
                .collect(),
            milestones: MILESTONES
                .iter()
                .map(|&(year, liters, binge, mortality, measure)| Milestone {
                    year,
                    max_liters_per_capita: liters,
                    binge_reduction_pct: binge,
                    mortality_reduction_pct: mortality,
                    measure: measure.map(str::to_string),
                })
                .collect(),
            projection_anchors: PROJECTION_ANCHORS.iter().map(|&a| a.into()).collect(),
        };

        datasets.validate()?;

        log::info!(
            "Datasets ready: {} trend years, {} policies, {} regions, {} countries, {} health years",
            datasets.yearly_trends.len(),
            datasets.policy_timeline.len(),
            datasets.regional_snapshot.len(),
            datasets.international_comparison.len(),
            datasets.health_impact.len()
        );

        Ok(datasets)
    }

    pub fn yearly_trends(&self) -> &[YearlyTrend] {
        &self.yearly_trends
    }

    pub fn policy_timeline(&self) -> &[PolicyEvent] {
        &self.policy_timeline
    }

    pub fn regional_snapshot(&self) -> &[RegionalSnapshot] {
        &self.regional_snapshot
    }

    pub fn international_comparison(&self) -> &[CountryComparison] {
        &self.international_comparison
    }

    pub fn health_impact(&self) -> &[HealthImpactTrend] {
        &self.health_impact
    }

    pub fn policy_impacts(&self) -> &[PolicyImpact] {
        &self.policy_impacts
    }

    pub fn strategies(&self) -> &[StrategyAssessment] {
        &self.strategies
    }

    pub fn national_performance(&self) -> &[NationalPerformance] {
        &self.national_performance
    }

    pub fn policy_adoption(&self) -> &[PolicyAdoption] {
        &self.policy_adoption
    }

    pub fn european_consumption(&self) -> &[EuropeanConsumption] {
        &self.european_consumption
    }

    pub fn consumer_profiles(&self) -> &[ConsumerProfile] {
        &self.consumer_profiles
    }

    pub fn roadmap(&self) -> &[RoadmapStep] {
        &self.roadmap
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn projection_anchors(&self) -> &[YearValue] {
        &self.projection_anchors
    }

    fn validate(&self) -> Result<()> {
        check_year_coverage("yearly_trends", &self.yearly_trends, NATIONAL_YEARS)?;
        for t in &self.yearly_trends {
            for field in TrendField::ALL {
                check_value("yearly_trends", t.year, field.name(), field.value(t))?;
            }
            for pct in [t.daily_drinker_pct, t.binge_drinking_pct, t.wine_share_pct] {
                check_percentage("yearly_trends", t.year, pct)?;
            }
        }

        check_year_coverage("health_impact", &self.health_impact, HEALTH_YEARS)?;
        for h in &self.health_impact {
            for field in HealthField::ALL {
                check_value("health_impact", h.year, field.name(), field.value(h))?;
            }
        }

        if self
            .policy_timeline
            .windows(2)
            .any(|pair| pair[1].date < pair[0].date)
        {
            return Err(DashboardError::malformed(
                "policy_timeline",
                "events are not ordered by date",
            ));
        }

        check_unique(
            "regional_snapshot",
            self.regional_snapshot.iter().map(|r| r.region.as_str()),
        )?;
        for r in &self.regional_snapshot {
            if !r.consumption_2023.is_finite() || r.consumption_2023 < 0.0 {
                return Err(DashboardError::malformed(
                    "regional_snapshot",
                    format!("{}: invalid consumption {}", r.region, r.consumption_2023),
                ));
            }
            if !r.delta_2010_to_2023.is_finite() {
                return Err(DashboardError::malformed(
                    "regional_snapshot",
                    format!("{}: non-finite delta", r.region),
                ));
            }
            for pct in [r.daily_drinker_pct, r.binge_drinking_pct] {
                if !(0.0..=100.0).contains(&pct) {
                    return Err(DashboardError::malformed(
                        "regional_snapshot",
                        format!("{}: percentage {} outside 0-100", r.region, pct),
                    ));
                }
            }
        }

        check_unique(
            "international_comparison",
            self.international_comparison.iter().map(|c| c.country.as_str()),
        )?;

        if self
            .projection_anchors
            .windows(2)
            .any(|pair| pair[1].year <= pair[0].year)
        {
            return Err(DashboardError::malformed(
                "projection_anchors",
                "anchor years must be strictly increasing",
            ));
        }

        for m in &self.milestones {
            if !PROJECTION_YEARS.contains(m.year) {
                return Err(DashboardError::malformed(
                    "milestones",
                    format!("{} outside projection years", m.year),
                ));
            }
            check_value("milestones", m.year, "max_liters_per_capita", m.max_liters_per_capita)?;
            check_percentage("milestones", m.year, m.binge_reduction_pct)?;
            if let Some(pct) = m.mortality_reduction_pct {
                check_percentage("milestones", m.year, pct)?;
            }
        }
        if self.milestones.windows(2).any(|pair| pair[1].year <= pair[0].year) {
            return Err(DashboardError::malformed(
                "milestones",
                "milestone years must be strictly increasing",
            ));
        }

        Ok(())
    }
}

fn build_yearly_trends() -> Vec<YearlyTrend> {
    YEARLY_TRENDS
        .iter()
        .map(|&(year, liters, daily, binge, wine, tax)| YearlyTrend {
            year,
            liters_per_capita: liters,
            daily_drinker_pct: daily,
            binge_drinking_pct: binge,
            wine_share_pct: wine,
            tax_revenue_billion_eur: tax,
        })
        .collect()
}

fn build_policy_timeline() -> Result<Vec<PolicyEvent>> {
    POLICY_TIMELINE
        .iter()
        .map(|&(date, category, title, description)| -> Result<PolicyEvent> {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                DashboardError::malformed("policy_timeline", format!("{}: {}", title, e))
            })?;
            let category = category
                .parse::<PolicyCategory>()
                .map_err(|e| DashboardError::malformed("policy_timeline", e))?;
            Ok(PolicyEvent {
                date,
                category,
                title: title.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}

fn build_regional_snapshot() -> Vec<RegionalSnapshot> {
    REGIONS
        .iter()
        .map(
            |&(region, consumption, delta, daily, binge, latitude, longitude)| RegionalSnapshot {
                region: region.to_string(),
                consumption_2023: consumption,
                delta_2010_to_2023: delta,
                daily_drinker_pct: daily,
                binge_drinking_pct: binge,
                coordinates: Some(GeoPoint {
                    latitude,
                    longitude,
                }),
            },
        )
        .collect()
}

fn build_international_comparison() -> Vec<CountryComparison> {
    COUNTRIES
        .iter()
        .map(
            |&(country, liters, beer, mortality, prevention, age)| CountryComparison {
                country: country.to_string(),
                liters_per_capita: liters,
                beer_price_eur: beer,
                alcohol_mortality_thousands: mortality,
                prevention_spend_per_capita_eur: prevention,
                legal_drinking_age: age,
            },
        )
        .collect()
}

fn build_health_impact() -> Vec<HealthImpactTrend> {
    HEALTH_IMPACT
        .iter()
        .map(
            |&(year, deaths, cancers, liver, costs, road)| HealthImpactTrend {
                year,
                alcohol_deaths_thousands: deaths,
                digestive_cancers_thousands: cancers,
                liver_disease_thousands: liver,
                health_costs_billion_eur: costs,
                road_accidents_thousands: road,
            },
        )
        .collect()
}

fn build_consumer_profiles() -> Vec<ConsumerProfile> {
    let socio = SOCIO_PROFESSIONAL
        .iter()
        .map(|&(segment, liters)| (ProfileDimension::SocioProfessional, segment, liters));
    let ages = AGE_BANDS
        .iter()
        .map(|&(segment, liters)| (ProfileDimension::AgeBand, segment, liters));

    socio
        .chain(ages)
        .map(|(dimension, segment, liters)| ConsumerProfile {
            dimension,
            segment: segment.to_string(),
            liters_per_capita: liters,
        })
        .collect()
}

/// Exactly one record per year of `bounds`, in ascending order.
fn check_year_coverage<R: Yearly>(
    table: &'static str,
    records: &[R],
    bounds: YearBounds,
) -> Result<()> {
    if records.len() != bounds.len() {
        return Err(DashboardError::malformed(
            table,
            format!(
                "expected {} years ({}-{}), found {}",
                bounds.len(),
                bounds.first,
                bounds.last,
                records.len()
            ),
        ));
    }
    for (expected, record) in (bounds.first..=bounds.last).zip(records) {
        if record.year() != expected {
            return Err(DashboardError::malformed(
                table,
                format!("expected year {}, found {}", expected, record.year()),
            ));
        }
    }
    Ok(())
}

fn check_value(table: &'static str, year: i32, column: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DashboardError::malformed(
            table,
            format!("{} {}: invalid value {}", year, column, value),
        ));
    }
    Ok(())
}

fn check_percentage(table: &'static str, year: i32, pct: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(DashboardError::malformed(
            table,
            format!("{}: percentage {} outside 0-100", year, pct),
        ));
    }
    Ok(())
}

fn check_unique<'a>(table: &'static str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(DashboardError::malformed(
                table,
                format!("duplicate entry `{}`", name),
            ));
        }
    }
    Ok(())
}
