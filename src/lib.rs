//! Alcohol Dashboard - data layer for the France alcohol consumption dashboard
//!
//! Embedded datasets, derived views and the snapshot pipeline a presentation
//! shell renders.

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod stats;

pub use config::DashboardConfig;
pub use dashboard::{DashboardControls, DashboardSnapshot, FocusArea};
pub use data::{Datasets, Frames, ViewBuilder};
pub use error::{DashboardError, Result};
