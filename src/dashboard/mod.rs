//! Dashboard module - controls, headline metrics, snapshots and auto-refresh

mod controls;
mod metrics;
mod refresh;
mod snapshot;

pub use controls::{
    DashboardControls, FocusArea, DEFAULT_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS,
};
pub use metrics::{key_metrics, KeyMetric};
pub use refresh::{RefreshHandle, RefreshScheduler};
pub use snapshot::{
    ConsumptionSection, DashboardSnapshot, HealthSection, InternationalSection, PolicySection,
    ProjectionSection, RegionalSection,
};
