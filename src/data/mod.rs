//! Data module - embedded tables, derived views and frame conversion

mod frames;
mod provider;
mod records;
mod views;

pub use frames::Frames;
pub use provider::{
    Datasets, YearBounds, CONSUMPTION_TARGET_2030, HEALTH_YEARS, NATIONAL_YEARS, PROJECTION_YEARS,
};
pub use records::*;
pub use views::{
    MapPoint, Magnitude, MagnitudeColumn, MilestoneCheck, PolicyLegendEntry, PolicyOverlayRow,
    ViewBuilder, YearOverYear,
};
