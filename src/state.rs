use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::data::cache::TableCache;
use crate::data::filter::{
    chart_series, distinct_years, filter_by_year, ChartSeries, ColumnLayout, FilteredView,
};
use crate::data::loader::LoadError;
use crate::data::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Loaded dataset
// ---------------------------------------------------------------------------

/// A table that loaded and whose required columns were found.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub path: PathBuf,
    pub table: Arc<Table>,
    pub layout: ColumnLayout,
    /// Selector entries, most recent first.
    pub years: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Tables read so far, by path.
    pub cache: TableCache,

    /// Current dataset (None until a file loads).
    pub dataset: Option<Dataset>,

    pub selected_year: Option<CellValue>,

    /// Source-table indices of the rows for `selected_year` (cached).
    pub visible_rows: Vec<usize>,

    /// Regional bars for `selected_year`, total row removed (cached).
    pub chart: ChartSeries,

    /// "Show full source data" toggle.
    pub show_all: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cache: TableCache::new(),
            dataset: None,
            selected_year: None,
            visible_rows: Vec::new(),
            chart: ChartSeries::default(),
            show_all: false,
            status_message: None,
        }
    }

    /// Open the file named in the settings, if any.
    pub fn open_configured(&mut self) {
        if let Some(path) = self.settings.data_path.clone() {
            self.open(&path);
        }
    }

    /// Load `path` (through the cache) and select its most recent year, or
    /// keep the current selection when the new data still has it.
    /// On failure the previous dataset is dropped and one message naming the
    /// path is shown instead.
    pub fn open(&mut self, path: &Path) {
        match self.load_dataset(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => self.report_load_error(&e),
        }
    }

    /// Drop every cached table. The dataset on screen stays until the next
    /// open or reload.
    pub fn clear_cache(&mut self) {
        log::info!("Clearing {} cached table(s)", self.cache.len());
        self.cache.clear();
    }

    /// Re-read the current file from disk.
    pub fn reload(&mut self) {
        let Some(path) = self.dataset.as_ref().map(|ds| ds.path.clone()) else {
            return;
        };
        self.cache.invalidate(&path);
        self.open(&path);
    }

    fn load_dataset(&mut self, path: &Path) -> Result<Dataset, LoadError> {
        let table = self.cache.load(path)?;
        let s = &self.settings;
        let layout =
            ColumnLayout::resolve(&table, path, &s.year_column, &s.region_column, &s.value_column)?;
        let years = distinct_years(&table, layout.year);
        Ok(Dataset {
            path: path.to_path_buf(),
            table,
            layout,
            years,
        })
    }

    fn set_dataset(&mut self, dataset: Dataset) {
        let keep = self
            .selected_year
            .as_ref()
            .is_some_and(|year| dataset.years.contains(year));
        if !keep {
            self.selected_year = dataset.years.first().cloned();
        }
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    fn report_load_error(&mut self, err: &LoadError) {
        log::error!("Failed to load data from {}: {err}", err.path().display());
        self.dataset = None;
        self.selected_year = None;
        self.visible_rows.clear();
        self.chart = ChartSeries::default();
        self.status_message = Some(format!("Error: {err}"));
    }

    pub fn select_year(&mut self, year: CellValue) {
        self.selected_year = Some(year);
        self.refilter();
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    /// The rows of the selected year, borrowed from the current table.
    pub fn filtered_view(&self) -> Option<FilteredView<'_>> {
        let ds = self.dataset.as_ref()?;
        let year = self.selected_year.as_ref()?;
        Some(filter_by_year(&ds.table, ds.layout.year, year))
    }

    /// Recompute `visible_rows` and `chart` after a selection change.
    pub fn refilter(&mut self) {
        let (rows, chart) = match (self.filtered_view(), &self.dataset) {
            (Some(view), Some(ds)) => {
                if view.is_empty() {
                    log::debug!("No rows for {:?}", self.selected_year);
                }
                let chart = chart_series(&view, &ds.layout, &self.settings.total_label);
                (view.indices().to_vec(), chart)
            }
            _ => (Vec::new(), ChartSeries::default()),
        };
        self.visible_rows = rows;
        self.chart = chart;
    }

    /// Write the rows of the selected year to `path` as CSV, header included.
    /// Fields are written exactly as they were read.
    pub fn export_view(&self, path: &Path) -> Result<usize> {
        let ds = self.dataset.as_ref().context("no dataset loaded")?;
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(&ds.table.headers)?;
        for &i in &self.visible_rows {
            writer.write_record(&ds.table.rows[i].raw)?;
        }
        writer.flush()?;
        Ok(self.visible_rows.len())
    }
}
