use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::color::RegionColors;
use crate::config::AppConfig;
use crate::data::filter::{filter, FilterControls, FilterCriteria, FilteredResult};
use crate::data::loader::load_file;
use crate::data::model::{AirportTable, Category, Region};
use crate::data::stats::{
    category_counts, elevation_spread_by_region, mean_elevation_by_region, region_summaries,
    CategoryCounts, ElevationSpread, RegionSummary,
};

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// Everything the charts and counters need for one filter selection.
/// Rebuilt on each filter change, never patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Indices into the table of the rows passing the filter.
    pub visible_indices: Vec<usize>,
    pub count: usize,
    pub mean_elevation: BTreeMap<Region, f64>,
    pub region_summaries: Vec<RegionSummary>,
    pub category_counts: CategoryCounts,
    pub spreads: BTreeMap<Region, ElevationSpread>,
}

impl DashboardView {
    /// The view shown when no dataset is available.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build(result: &FilteredResult<'_>) -> Self {
        DashboardView {
            visible_indices: result.indices.clone(),
            count: result.count,
            mean_elevation: mean_elevation_by_region(result),
            region_summaries: region_summaries(result),
            category_counts: category_counts(result),
            spreads: elevation_spread_by_region(result),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None when the source could not be loaded).
    pub table: Option<AirportTable>,

    /// Where the current table came from; used by Reload.
    pub source_path: PathBuf,

    /// Current side-panel selection.
    pub controls: FilterControls,

    /// Selection restored by "Reset filters".
    pub default_controls: FilterControls,

    pub elevation_slider_max: f64,

    /// Output of the last pipeline run.
    pub view: DashboardView,

    pub colors: RegionColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state from config without touching the filesystem.
    pub fn new(config: &AppConfig) -> Self {
        let controls = FilterControls::with_ceiling(config.default_elevation_ceiling);
        Self {
            table: None,
            source_path: config.data_path.clone(),
            default_controls: controls.clone(),
            controls,
            elevation_slider_max: config.elevation_slider_max,
            view: DashboardView::empty(),
            colors: RegionColors::default(),
            status_message: None,
        }
    }

    /// Load a dataset and run the pipeline on it. On failure the table is
    /// cleared and the view becomes the empty view; nothing downstream runs.
    pub fn load(&mut self, path: &Path) {
        self.source_path = path.to_path_buf();
        match load_file(path) {
            Ok(table) => {
                log::info!("Loaded {} airports from {}", table.len(), path.display());
                if table.is_empty() {
                    log::warn!("{} holds no New England airports", path.display());
                }
                self.table = Some(table);
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                self.table = None;
                self.view = DashboardView::empty();
            }
        }
    }

    pub fn reload(&mut self) {
        let path = self.source_path.clone();
        self.load(&path);
    }

    /// Run filter → aggregate for `criteria` and replace the view.
    pub fn render(&mut self, criteria: &FilterCriteria) {
        self.view = match &self.table {
            Some(table) => {
                let result = filter(table, criteria);
                log::debug!("Filter matched {} of {} airports", result.count, table.len());
                DashboardView::build(&result)
            }
            None => DashboardView::empty(),
        };
    }

    /// Re-run the pipeline with criteria built from the current controls.
    pub fn refilter(&mut self) {
        let criteria = self.controls.criteria();
        self.render(&criteria);
    }

    /// Rows of the current view, borrowed from the table.
    pub fn visible_records(&self) -> Option<FilteredResult<'_>> {
        self.table
            .as_ref()
            .map(|t| FilteredResult::from_indices(t, &self.view.visible_indices))
    }

    // -- Control event handlers --

    pub fn set_region(&mut self, region: Region, selected: bool) {
        if selected {
            self.controls.regions.insert(region);
        } else {
            self.controls.regions.remove(&region);
        }
        self.refilter();
    }

    pub fn select_all_regions(&mut self) {
        self.controls.regions = Region::ALL.into_iter().collect();
        self.refilter();
    }

    pub fn select_no_regions(&mut self) {
        self.controls.regions.clear();
        self.refilter();
    }

    pub fn set_category(&mut self, category: Category, selected: bool) {
        if selected {
            self.controls.categories.insert(category);
        } else {
            self.controls.categories.remove(&category);
        }
        self.refilter();
    }

    pub fn select_all_categories(&mut self) {
        self.controls.categories = Category::ALL.into_iter().collect();
        self.refilter();
    }

    pub fn select_no_categories(&mut self) {
        self.controls.categories.clear();
        self.refilter();
    }

    pub fn set_elevation_ceiling(&mut self, ceiling: f64) {
        self.controls.elevation_ceiling = ceiling.clamp(0.0, self.elevation_slider_max);
        self.refilter();
    }

    pub fn set_commercial_only(&mut self, commercial_only: bool) {
        self.controls.commercial_only = commercial_only;
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.controls = self.default_controls.clone();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,iso_region,municipality,scheduled_service\n\
        1,KBOS,large_airport,Logan,42.36,-71.0,20,US-MA,Boston,yes\n\
        2,KBTV,medium_airport,Burlington,44.47,-73.15,335,US-VT,Burlington,yes\n\
        3,1B0,small_airport,Dexter,45.0,-69.3,-5,US-ME,Dexter,no\n\
        4,2B2,small_airport,Hill,44.0,-71.5,2600,US-NH,Lincoln,no\n\
        5,KJFK,large_airport,Kennedy,40.6,-73.8,13,US-NY,New York,yes\n";

    fn loaded_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_england_airports.csv");
        std::fs::write(&path, CSV).unwrap();
        let mut state = AppState::new(&AppConfig::default());
        state.load(&path);
        (dir, state)
    }

    #[test]
    fn test_load_runs_pipeline_with_defaults() {
        let (_dir, state) = loaded_state();
        assert_eq!(state.table.as_ref().map(|t| t.len()), Some(4));
        // Hill is above the 2000 ft default ceiling; Dexter has a missing
        // elevation and still passes.
        assert_eq!(state.view.count, 3);
        assert_eq!(state.view.category_counts.total(), 3);
        assert_eq!(state.view.mean_elevation.get(&Region::Maine), None);
        assert!(state
            .view
            .region_summaries
            .iter()
            .any(|s| s.region == Region::Maine && s.count == 1));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_missing_source_presents_empty_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(&AppConfig::default());
        state.load(&dir.path().join("absent.csv"));

        assert!(state.table.is_none());
        assert_eq!(state.view, DashboardView::empty());
        assert!(state.visible_records().is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("not found")));

        state.refilter();
        assert_eq!(state.view.count, 0);
    }

    #[test]
    fn test_failed_reload_clears_previous_table() {
        let (dir, mut state) = loaded_state();
        std::fs::remove_file(dir.path().join("new_england_airports.csv")).unwrap();
        state.reload();
        assert!(state.table.is_none());
        assert_eq!(state.view.count, 0);
    }

    #[test]
    fn test_control_handlers_refilter() {
        let (_dir, mut state) = loaded_state();

        state.set_commercial_only(true);
        assert_eq!(state.view.count, 2);

        state.set_region(Region::Vermont, false);
        assert_eq!(state.view.count, 1);

        state.set_elevation_ceiling(3000.0);
        state.set_commercial_only(false);
        assert_eq!(state.view.count, 3);

        state.select_no_categories();
        assert_eq!(state.view.count, 0);
        state.set_category(Category::Small, true);
        assert_eq!(state.view.count, 2);

        state.reset_filters();
        assert_eq!(state.controls, FilterControls::default());
        assert_eq!(state.view.count, 3);
    }

    #[test]
    fn test_visible_records_follow_view() {
        let (_dir, state) = loaded_state();
        let visible = state.visible_records().unwrap();
        let ids: Vec<i64> = visible.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
