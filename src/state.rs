use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::Criteria;
use crate::data::handle::DatasetHandle;
use crate::data::model::MovieDataset;
use crate::data::views::{compute_views, ViewLimits, Views};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    handle: DatasetHandle,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<MovieDataset>>,

    /// Current filter inputs, edited by the side panel.
    pub criteria: Criteria,

    /// Views for `criteria` (cached until the inputs change).
    pub views: Option<Views>,

    /// Genre colours for the scatter plot.
    pub color_map: ColorMap,

    pub limits: ViewLimits,

    /// Height of the filtered-data grid.
    pub table_height: f32,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            handle: DatasetHandle::new(config.data_path.clone(), config.load_options()),
            dataset: None,
            criteria: Criteria::default(),
            views: None,
            color_map: ColorMap::default(),
            limits: config.view_limits(),
            table_height: config.table_height,
            status_message: None,
        }
    }

    /// Fetch the dataset through the handle.  A new dataset resets the
    /// criteria; an unchanged one keeps them.
    pub fn load(&mut self) {
        match self.handle.get() {
            Ok(ds) => {
                let unchanged = self
                    .dataset
                    .as_ref()
                    .is_some_and(|old| Arc::ptr_eq(old, &ds));
                if !unchanged {
                    if ds.is_empty() {
                        log::warn!("No movies left after cleaning {}", self.handle.path().display());
                    }
                    self.set_dataset(ds);
                }
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.dataset = None;
                self.views = None;
            }
        }
    }

    /// Switch to another file (File → Open…).
    pub fn open(&mut self, path: PathBuf) {
        self.handle.set_path(path);
        self.load();
    }

    /// Drop the cached dataset and read the file again.
    pub fn reload(&mut self) {
        self.handle.invalidate();
        self.load();
    }

    /// Ingest a newly loaded dataset, initialise criteria and colours.
    fn set_dataset(&mut self, dataset: Arc<MovieDataset>) {
        self.criteria = Criteria::for_dataset(&dataset);
        self.color_map = ColorMap::new(
            dataset
                .movies
                .iter()
                .filter_map(|m| dataset.genre(m)),
        );
        self.dataset = Some(dataset);
        self.recompute();
    }

    /// Restore default criteria for the current dataset.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = Criteria::for_dataset(ds);
            self.recompute();
        }
    }

    /// Rerun the whole pipeline for the current criteria.
    pub fn recompute(&mut self) {
        self.views = self
            .dataset
            .as_ref()
            .map(|ds| compute_views(ds, &self.criteria, self.limits));
        if let Some(v) = &self.views {
            log::debug!("{} movies match {:?}", v.filtered.len(), self.criteria);
        }
    }

    pub fn data_path(&self) -> &Path {
        self.handle.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::GenreSelector;

    const CSV: &str = "\
Series_Title,Genre,Released_Year,IMDB_Rating,Gross,Star1
A,Drama,2000,9.5,100,Al Pacino
B,Drama|Comedy,2010,6.2,50,Bill Murray
C,Action,1995,8.0,200,Keanu Reeves
";

    fn state_with(contents: &str) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        std::fs::write(&path, contents).unwrap();
        let config = DashboardConfig {
            data_path: path,
            ..Default::default()
        };
        let mut state = AppState::new(&config);
        state.load();
        (dir, state)
    }

    #[test]
    fn load_initialises_criteria_and_views() {
        let (_dir, state) = state_with(CSV);
        assert!(state.status_message.is_none());
        assert_eq!(state.criteria.year_range, Some((1995, 2010)));
        assert_eq!(state.views.as_ref().unwrap().filtered, vec![0, 1, 2]);
    }

    #[test]
    fn criteria_change_then_recompute() {
        let (_dir, mut state) = state_with(CSV);
        state.criteria.genre = GenreSelector::Exact("Drama".into());
        state.recompute();
        assert_eq!(state.views.as_ref().unwrap().filtered, vec![0]);

        state.reset_filters();
        assert_eq!(state.criteria.genre, GenreSelector::All);
        assert_eq!(state.views.as_ref().unwrap().filtered.len(), 3);
    }

    #[test]
    fn loading_again_keeps_criteria_when_file_unchanged() {
        let (_dir, mut state) = state_with(CSV);
        state.criteria.title_query = "a".into();
        state.recompute();
        state.load();
        assert_eq!(state.criteria.title_query, "a");
    }

    #[test]
    fn missing_file_sets_status_message() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            data_path: dir.path().join("missing.csv"),
            ..Default::default()
        };
        let mut state = AppState::new(&config);
        state.load();
        assert!(state.dataset.is_none());
        assert!(state.views.is_none());
        assert!(state.status_message.unwrap().contains("not found"));
    }
}
