use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::LoadOptions;
use crate::data::views::ViewLimits;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "movie_dash.json";

/// Dashboard settings.  Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV opened at startup.
    pub data_path: PathBuf,
    /// Columns searched by the actor filter.  Unset means "detect by name".
    pub actor_columns: Option<Vec<String>>,
    pub top_genres: usize,
    pub top_revenue: usize,
    /// Height of the filtered-data grid in points.
    pub table_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("movies.csv"),
            actor_columns: None,
            top_genres: 10,
            top_revenue: 10,
            table_height: 300.0,
        }
    }
}

impl DashboardConfig {
    /// Read `path`, or return defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Ignoring settings file: {e:#}");
            Self::default()
        })
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            actor_columns: self.actor_columns.clone(),
        }
    }

    pub fn view_limits(&self) -> ViewLimits {
        ViewLimits {
            top_genres: self.top_genres,
            top_revenue: self.top_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DashboardConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "actor_columns": ["Star1", "Star2"], "top_revenue": 5 }"#)
            .unwrap();

        let cfg = DashboardConfig::load(&path).unwrap();
        assert_eq!(cfg.top_revenue, 5);
        assert_eq!(cfg.top_genres, 10);
        assert_eq!(cfg.data_path, PathBuf::from("movies.csv"));
        assert_eq!(
            cfg.load_options().actor_columns,
            Some(vec!["Star1".to_string(), "Star2".to_string()])
        );
    }

    #[test]
    fn malformed_file_is_an_error_but_load_or_default_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = DashboardConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
        assert_eq!(DashboardConfig::load_or_default(&path), DashboardConfig::default());
    }
}
