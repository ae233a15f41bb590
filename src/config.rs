use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const SETTINGS_ENV: &str = "LABOR_DASHBOARD_SETTINGS";
pub const CSV_ENV: &str = "LABOR_DASHBOARD_CSV";
pub const TOTAL_LABEL_ENV: &str = "LABOR_DASHBOARD_TOTAL_LABEL";
pub const FONT_ENV: &str = "LABOR_DASHBOARD_FONT";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Startup configuration. Every field has a default so a settings file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CSV to open on launch.
    pub data_path: Option<PathBuf>,
    pub year_column: String,
    pub region_column: String,
    /// Economically-active population, thousands of persons.
    pub value_column: String,
    /// Region value marking the aggregate row, left out of the chart.
    pub total_label: String,
    /// Extra font (e.g. one with Hangul glyphs) appended to egui's fallbacks.
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: None,
            year_column: "년도".to_string(),
            region_column: "지역".to_string(),
            value_column: "경제활동인구 (천명)".to_string(),
            total_label: "계".to_string(),
            font_path: None,
        }
    }
}

impl Settings {
    /// Settings from the process environment and command line.
    pub fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(|key| std::env::var(key).ok(), &args)
    }

    /// Layer defaults, the JSON settings file, environment variables and the
    /// first positional argument, in increasing precedence.
    pub fn from_sources(env: impl Fn(&str) -> Option<String>, args: &[String]) -> Result<Self> {
        let mut settings = match env(SETTINGS_ENV) {
            Some(file) => Self::from_file(Path::new(&file))?,
            None => Self::default(),
        };

        if let Some(path) = env(CSV_ENV) {
            settings.data_path = Some(PathBuf::from(path));
        }
        if let Some(label) = env(TOTAL_LABEL_ENV) {
            settings.total_label = label;
        }
        if let Some(font) = env(FONT_ENV) {
            settings.font_path = Some(PathBuf::from(font));
        }
        if let Some(path) = args.first() {
            settings.data_path = Some(PathBuf::from(path));
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        let columns = [
            ("year_column", &self.year_column),
            ("region_column", &self.region_column),
            ("value_column", &self.value_column),
        ];
        for (key, name) in columns {
            if name.trim().is_empty() {
                bail!("{key} must not be empty");
            }
        }
        if self.year_column == self.region_column
            || self.year_column == self.value_column
            || self.region_column == self.value_column
        {
            bail!(
                "year, region and value columns must differ (got '{}', '{}', '{}')",
                self.year_column,
                self.region_column,
                self.value_column
            );
        }
        if self.total_label.is_empty() {
            bail!("total_label must not be empty");
        }
        if self.data_path.is_none() {
            log::warn!("No data file configured; set {CSV_ENV} or pass a path, or use File → Open…");
        }
        Ok(())
    }
}
