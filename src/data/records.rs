//! Dataset Records Module
//! Fixed-shape records for every dashboard table, plus typed field selectors.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// A record keyed by calendar year.
pub trait Yearly {
    fn year(&self) -> i32;
}

/// A numeric column of a record type.
///
/// Field selectors replace string column lookups: every derived view takes
/// one of these instead of a column name.
pub trait Field<R>: Copy {
    /// Column name used in frames and exported files.
    fn name(&self) -> &'static str;
    fn value(&self, record: &R) -> f64;
}

macro_rules! record_fields {
    (
        $(#[$meta:meta])*
        $name:ident for $record:ty {
            $($variant:ident => $label:literal, |$r:ident| $expr:expr;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];
        }

        impl Field<$record> for $name {
            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            fn value(&self, record: &$record) -> f64 {
                match self {
                    $($name::$variant => {
                        let $r = record;
                        $expr
                    })+
                }
            }
        }
    };
}

/// National consumption indicators for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTrend {
    pub year: i32,
    pub liters_per_capita: f64,
    pub daily_drinker_pct: f64,
    pub binge_drinking_pct: f64,
    pub wine_share_pct: f64,
    pub tax_revenue_billion_eur: f64,
}

impl Yearly for YearlyTrend {
    fn year(&self) -> i32 {
        self.year
    }
}

record_fields! {
    /// Numeric columns of [`YearlyTrend`].
    TrendField for YearlyTrend {
        LitersPerCapita => "liters_per_capita", |r| r.liters_per_capita;
        DailyDrinkerPct => "daily_drinker_pct", |r| r.daily_drinker_pct;
        BingeDrinkingPct => "binge_drinking_pct", |r| r.binge_drinking_pct;
        WineSharePct => "wine_share_pct", |r| r.wine_share_pct;
        TaxRevenueBillionEur => "tax_revenue_billion_eur", |r| r.tax_revenue_billion_eur;
    }
}

/// Policy family. Closed set, drives both colouring and legend grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyCategory {
    Prevention,
    Tax,
    Regulation,
    Ban,
}

impl PolicyCategory {
    /// Legend order.
    pub const ALL: [PolicyCategory; 4] = [
        PolicyCategory::Prevention,
        PolicyCategory::Tax,
        PolicyCategory::Regulation,
        PolicyCategory::Ban,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PolicyCategory::Prevention => "Prévention",
            PolicyCategory::Tax => "Fiscalité",
            PolicyCategory::Regulation => "Réglementation",
            PolicyCategory::Ban => "Interdiction",
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PolicyCategory::Prevention => (40, 167, 69),  // Green
            PolicyCategory::Tax => (0, 123, 255),         // Blue
            PolicyCategory::Regulation => (111, 66, 193), // Purple
            PolicyCategory::Ban => (220, 53, 69),         // Red
        }
    }

    /// Colour as `#rrggbb`.
    pub fn hex_color(&self) -> String {
        let (r, g, b) = self.color();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl std::str::FromStr for PolicyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prevention" => Ok(PolicyCategory::Prevention),
            "tax" => Ok(PolicyCategory::Tax),
            "regulation" => Ok(PolicyCategory::Regulation),
            "ban" => Ok(PolicyCategory::Ban),
            other => Err(format!("unknown policy category `{}`", other)),
        }
    }
}

/// A dated public-policy measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyEvent {
    pub date: NaiveDate,
    pub category: PolicyCategory,
    pub title: String,
    pub description: String,
}

impl Yearly for PolicyEvent {
    fn year(&self) -> i32 {
        self.date.year()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// 2023 snapshot for one administrative region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalSnapshot {
    pub region: String,
    pub consumption_2023: f64,
    pub delta_2010_to_2023: f64,
    pub daily_drinker_pct: f64,
    pub binge_drinking_pct: f64,
    /// Only set for regions drawn on the map.
    pub coordinates: Option<GeoPoint>,
}

record_fields! {
    /// Numeric columns of [`RegionalSnapshot`].
    RegionField for RegionalSnapshot {
        Consumption2023 => "consumption_2023", |r| r.consumption_2023;
        Delta2010To2023 => "delta_2010_to_2023", |r| r.delta_2010_to_2023;
        DailyDrinkerPct => "daily_drinker_pct", |r| r.daily_drinker_pct;
        BingeDrinkingPct => "binge_drinking_pct", |r| r.binge_drinking_pct;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryComparison {
    pub country: String,
    pub liters_per_capita: f64,
    pub beer_price_eur: f64,
    pub alcohol_mortality_thousands: f64,
    pub prevention_spend_per_capita_eur: f64,
    pub legal_drinking_age: u8,
}

record_fields! {
    /// Numeric columns of [`CountryComparison`].
    CountryField for CountryComparison {
        LitersPerCapita => "liters_per_capita", |r| r.liters_per_capita;
        BeerPriceEur => "beer_price_eur", |r| r.beer_price_eur;
        AlcoholMortalityThousands => "alcohol_mortality_thousands", |r| r.alcohol_mortality_thousands;
        PreventionSpendPerCapitaEur => "prevention_spend_per_capita_eur", |r| r.prevention_spend_per_capita_eur;
        LegalDrinkingAge => "legal_drinking_age", |r| f64::from(r.legal_drinking_age);
    }
}

/// Health consequences for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthImpactTrend {
    pub year: i32,
    pub alcohol_deaths_thousands: f64,
    pub digestive_cancers_thousands: f64,
    pub liver_disease_thousands: f64,
    pub health_costs_billion_eur: f64,
    pub road_accidents_thousands: f64,
}

impl Yearly for HealthImpactTrend {
    fn year(&self) -> i32 {
        self.year
    }
}

record_fields! {
    /// Numeric columns of [`HealthImpactTrend`].
    HealthField for HealthImpactTrend {
        AlcoholDeathsThousands => "alcohol_deaths_thousands", |r| r.alcohol_deaths_thousands;
        DigestiveCancersThousands => "digestive_cancers_thousands", |r| r.digestive_cancers_thousands;
        LiverDiseaseThousands => "liver_disease_thousands", |r| r.liver_disease_thousands;
        HealthCostsBillionEur => "health_costs_billion_eur", |r| r.health_costs_billion_eur;
        RoadAccidentsThousands => "road_accidents_thousands", |r| r.road_accidents_thousands;
    }
}

/// Estimated effect of a major policy on consumption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyImpact {
    pub policy: String,
    /// Liters per capita per year, negative means a reduction.
    pub consumption_impact: f64,
    pub delay_years: u8,
}

record_fields! {
    PolicyImpactField for PolicyImpact {
        ConsumptionImpact => "consumption_impact", |r| r.consumption_impact;
        DelayYears => "delay_years", |r| f64::from(r.delay_years);
    }
}

/// Scored prevention strategy (0-10 scales).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyAssessment {
    pub strategy: String,
    pub effectiveness: f64,
    pub cost: f64,
    pub acceptability: f64,
}

record_fields! {
    StrategyField for StrategyAssessment {
        Effectiveness => "effectiveness", |r| r.effectiveness;
        Cost => "cost", |r| r.cost;
        Acceptability => "acceptability", |r| r.acceptability;
    }
}

/// Ten-year outcome of a national strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationalPerformance {
    pub country: String,
    pub reduction_10_years: f64,
    pub prevention_investment_eur: f64,
    pub rank: u8,
}

record_fields! {
    PerformanceField for NationalPerformance {
        Reduction10Years => "reduction_10_years", |r| r.reduction_10_years;
        PreventionInvestmentEur => "prevention_investment_eur", |r| r.prevention_investment_eur;
        Rank => "rank", |r| f64::from(r.rank);
    }
}

/// Which policy levers a country has adopted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyAdoption {
    pub country: String,
    pub advertising_limited: bool,
    pub high_taxes: bool,
    pub reinforced_controls: bool,
    pub youth_prevention: bool,
}

impl PolicyAdoption {
    pub fn adopted_count(&self) -> usize {
        [
            self.advertising_limited,
            self.high_taxes,
            self.reinforced_controls,
            self.youth_prevention,
        ]
        .iter()
        .filter(|&&adopted| adopted)
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EuropeanConsumption {
    pub country: String,
    pub iso_code: String,
    pub liters_per_capita: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileDimension {
    SocioProfessional,
    AgeBand,
}

/// Consumption of one population segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerProfile {
    pub dimension: ProfileDimension,
    pub segment: String,
    pub liters_per_capita: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapStep {
    pub period: String,
    pub actions: Vec<String>,
}

/// A national goal on the way to 2030.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestone {
    pub year: i32,
    /// Consumption ceiling, liters of pure alcohol per capita
    pub max_liters_per_capita: f64,
    /// Targeted binge drinking reduction, percent
    pub binge_reduction_pct: f64,
    pub mortality_reduction_pct: Option<f64>,
    pub measure: Option<String>,
}

impl Yearly for Milestone {
    fn year(&self) -> i32 {
        self.year
    }
}

/// A (year, value) pair, used both for anchors and series points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

impl Yearly for YearValue {
    fn year(&self) -> i32 {
        self.year
    }
}

impl From<(i32, f64)> for YearValue {
    fn from((year, value): (i32, f64)) -> Self {
        Self { year, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_selectors_read_named_columns() {
        let trend = YearlyTrend {
            year: 2023,
            liters_per_capita: 8.3,
            daily_drinker_pct: 6.0,
            binge_drinking_pct: 25.4,
            wine_share_pct: 28.2,
            tax_revenue_billion_eur: 5.5,
        };
        assert_eq!(TrendField::LitersPerCapita.value(&trend), 8.3);
        assert_eq!(TrendField::TaxRevenueBillionEur.name(), "tax_revenue_billion_eur");
        assert_eq!(TrendField::ALL.len(), 5);
    }

    #[test]
    fn test_policy_category_parsing_and_colors() {
        assert_eq!("tax".parse::<PolicyCategory>(), Ok(PolicyCategory::Tax));
        assert!("lobbying".parse::<PolicyCategory>().is_err());
        assert_eq!(PolicyCategory::Prevention.hex_color(), "#28a745");
        assert_eq!(PolicyCategory::Ban.label(), "Interdiction");
    }

    #[test]
    fn test_policy_event_year_comes_from_date() {
        let event = PolicyEvent {
            date: NaiveDate::from_ymd_opt(2009, 7, 21).unwrap(),
            category: PolicyCategory::Ban,
            title: "Loi Bachelot".to_string(),
            description: String::new(),
        };
        assert_eq!(event.year(), 2009);
    }

    #[test]
    fn test_adopted_count() {
        let adoption = PolicyAdoption {
            country: "Pays-Bas".to_string(),
            advertising_limited: false,
            high_taxes: false,
            reinforced_controls: true,
            youth_prevention: true,
        };
        assert_eq!(adoption.adopted_count(), 2);
    }
}
