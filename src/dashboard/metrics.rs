//! Headline key metrics shown above the dashboard tabs.

use crate::data::{TrendField, ViewBuilder, YearOverYear, YearlyTrend};
use crate::error::Result;
use serde::Serialize;

/// One headline card: latest value and signed change against the year before.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetric {
    pub label: &'static str,
    /// Unit of the delta; the value carries the longer display suffix.
    pub unit: &'static str,
    pub change: YearOverYear,
    /// A decrease is the good direction ("inverse" delta colouring).
    pub lower_is_better: bool,
    pub display_value: String,
    pub display_delta: String,
}

impl KeyMetric {
    pub fn is_improvement(&self) -> bool {
        if self.lower_is_better {
            self.change.delta < 0.0
        } else {
            self.change.delta > 0.0
        }
    }
}

// (field, label, delta unit, value suffix, lower is better)
const HEADLINE: [(TrendField, &str, &str, &str, bool); 4] = [
    (TrendField::LitersPerCapita, "Consommation d'alcool", "L", "L/pers/an", true),
    (TrendField::DailyDrinkerPct, "Buveurs Quotidiens", "%", "%", true),
    (TrendField::BingeDrinkingPct, "Binge Drinking", "%", "%", true),
    (TrendField::TaxRevenueBillionEur, "Recettes Fiscales", "Md€", "Md€", false),
];

/// Headline cards for the national trend table.
pub fn key_metrics(trends: &[YearlyTrend]) -> Result<Vec<KeyMetric>> {
    HEADLINE
        .iter()
        .map(|&(field, label, unit, suffix, lower_is_better)| -> Result<KeyMetric> {
            let change = ViewBuilder::year_over_year(trends, field)?;
            Ok(KeyMetric {
                label,
                unit,
                display_value: format!("{:.1}{}", change.latest, suffix),
                display_delta: change.formatted_delta(unit),
                change,
                lower_is_better,
            })
        })
        .collect()
}
