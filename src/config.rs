//! Configuration for the dashboard binary.

use crate::dashboard::DashboardControls;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration, read from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Initial analysis controls
    pub controls: DashboardControls,
    /// Directory receiving CSV exports; no export when unset
    pub export_dir: Option<PathBuf>,
    /// Pretty-print snapshot JSON
    pub pretty: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            controls: DashboardControls::default(),
            export_dir: None,
            pretty: true,
        }
    }
}

impl DashboardConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.controls.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Config file when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FocusArea;
    use crate::error::DashboardError;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_partial_config() {
        let file = write_config(
            r#"{
                "controls": {"start_year": 2010, "focus": ["international"], "auto_refresh": true},
                "export_dir": "out"
            }"#,
        );
        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.controls.start_year, 2010);
        assert_eq!(config.controls.end_year, 2023);
        assert_eq!(config.controls.focus, vec![FocusArea::International]);
        assert!(config.controls.auto_refresh);
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
        assert!(config.pretty);
    }

    #[test]
    fn test_load_rejects_out_of_range_controls() {
        let file = write_config(r#"{"controls": {"end_year": 2031}}"#);
        assert!(matches!(
            DashboardConfig::load(file.path()),
            Err(DashboardError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_load_reports_bad_json_and_missing_files() {
        let file = write_config("{ not json");
        assert!(matches!(
            DashboardConfig::load(file.path()),
            Err(DashboardError::Json(_))
        ));
        assert!(matches!(
            DashboardConfig::load(Path::new("/nonexistent/dashboard.json")),
            Err(DashboardError::Io(_))
        ));
    }

    #[test]
    fn test_defaults_without_path() {
        let config = DashboardConfig::load_or_default(None).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(config.export_dir.is_none());
    }
}
