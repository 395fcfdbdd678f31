//! Dashboard Controls
//! User-selected analysis settings the shell passes to every render.

use crate::data::NATIONAL_YEARS;
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pause between automatic re-renders in the original dashboard.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Longest accepted refresh interval: one day.
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 86_400;

/// Analysis domains the user can focus on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    Consumption,
    Policies,
    HealthImpact,
    Regional,
    International,
}

impl FocusArea {
    pub const ALL: [FocusArea; 5] = [
        FocusArea::Consumption,
        FocusArea::Policies,
        FocusArea::HealthImpact,
        FocusArea::Regional,
        FocusArea::International,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::Consumption => "Consommation",
            FocusArea::Policies => "Politiques",
            FocusArea::HealthImpact => "Impact santé",
            FocusArea::Regional => "Disparités régionales",
            FocusArea::International => "Comparaisons internationales",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardControls {
    pub start_year: i32,
    pub end_year: i32,
    pub focus: Vec<FocusArea>,
    pub show_projections: bool,
    pub auto_refresh: bool,
    pub refresh_interval_secs: u64,
}

impl Default for DashboardControls {
    fn default() -> Self {
        Self {
            start_year: NATIONAL_YEARS.first,
            end_year: NATIONAL_YEARS.last,
            focus: vec![FocusArea::Consumption, FocusArea::Policies],
            show_projections: true,
            auto_refresh: false,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl DashboardControls {
    /// Check the year range against the national table and the refresh interval.
    pub fn validate(&self) -> Result<()> {
        if self.start_year > self.end_year
            || !NATIONAL_YEARS.contains(self.start_year)
            || !NATIONAL_YEARS.contains(self.end_year)
        {
            return Err(DashboardError::InvalidRange {
                start: self.start_year,
                end: self.end_year,
                min: NATIONAL_YEARS.first,
                max: NATIONAL_YEARS.last,
            });
        }
        if self.refresh_interval_secs == 0 {
            return Err(DashboardError::InvalidConfig(
                "refresh_interval_secs must be positive".to_string(),
            ));
        }
        if self.refresh_interval_secs > MAX_REFRESH_INTERVAL_SECS {
            return Err(DashboardError::InvalidConfig(format!(
                "refresh_interval_secs must be at most {}, got {}",
                MAX_REFRESH_INTERVAL_SECS, self.refresh_interval_secs
            )));
        }
        Ok(())
    }

    pub fn has_focus(&self, area: FocusArea) -> bool {
        self.focus.contains(&area)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sidebar() {
        let controls = DashboardControls::default();
        assert_eq!(controls.start_year, 2000);
        assert_eq!(controls.end_year, 2023);
        assert!(controls.has_focus(FocusArea::Consumption));
        assert!(controls.has_focus(FocusArea::Policies));
        assert!(!controls.has_focus(FocusArea::Regional));
        assert!(controls.show_projections);
        assert!(!controls.auto_refresh);
        assert_eq!(controls.refresh_interval(), Duration::from_secs(300));
        assert!(controls.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let reversed = DashboardControls {
            start_year: 2020,
            end_year: 2010,
            ..Default::default()
        };
        assert!(matches!(
            reversed.validate(),
            Err(DashboardError::InvalidRange { .. })
        ));

        let too_early = DashboardControls {
            start_year: 1995,
            ..Default::default()
        };
        assert!(too_early.validate().is_err());

        let no_interval = DashboardControls {
            refresh_interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            no_interval.validate(),
            Err(DashboardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_caps_refresh_interval() {
        let one_day = DashboardControls {
            auto_refresh: true,
            refresh_interval_secs: MAX_REFRESH_INTERVAL_SECS,
            ..Default::default()
        };
        assert!(one_day.validate().is_ok());

        let forever = DashboardControls {
            auto_refresh: true,
            refresh_interval_secs: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(
            forever.validate(),
            Err(DashboardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_deserialize_partial_controls() {
        let controls: DashboardControls =
            serde_json::from_str(r#"{"start_year": 2010, "focus": ["regional", "health_impact"]}"#)
                .unwrap();
        assert_eq!(controls.start_year, 2010);
        assert_eq!(controls.end_year, 2023);
        assert_eq!(
            controls.focus,
            vec![FocusArea::Regional, FocusArea::HealthImpact]
        );
        assert_eq!(FocusArea::HealthImpact.label(), "Impact santé");
    }
}
