//! Error types shared by the dataset provider and the view builder.

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid range: {start}-{end} (allowed {min}-{max})")]
    InvalidRange { start: i32, end: i32, min: i32, max: i32 },
    #[error("Invalid projection anchors: {0}")]
    InvalidAnchors(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Malformed dataset `{table}`: {reason}")]
    MalformedDataset { table: &'static str, reason: String },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    pub(crate) fn malformed(table: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedDataset {
            table,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
