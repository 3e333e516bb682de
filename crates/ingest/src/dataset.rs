use std::fs::{self, File};
use std::path::PathBuf;

use citypath_core::DataConfig;
use tracing::info;

use crate::error::IngestError;
use crate::region::{lookup, parse_region, Region};

/// A data directory with a states list and one region file per state.
#[derive(Debug, Clone)]
pub struct DataSet {
    root: PathBuf,
    states_file: String,
}

impl DataSet {
    pub fn new(root: impl Into<PathBuf>, states_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            states_file: states_file.into(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.data_dir.clone(), config.states_file.clone())
    }

    pub fn states_path(&self) -> PathBuf {
        self.root.join(&self.states_file)
    }

    /// `<root>/<state>/<state>.csv`
    pub fn region_path(&self, state: &str) -> PathBuf {
        self.root.join(state).join(format!("{}.csv", state))
    }

    /// State names, one per line, blank lines skipped.
    pub fn states(&self) -> Result<Vec<String>, IngestError> {
        let path = self.states_path();
        let content = fs::read_to_string(&path).map_err(|source| IngestError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Resolve a state by 1-based number or case-insensitive name.
    pub fn resolve_state(&self, query: &str) -> Result<String, IngestError> {
        let states = self.states()?;
        lookup(&states, query)
            .map(|i| states[i].clone())
            .ok_or_else(|| IngestError::UnknownState(query.trim().to_string()))
    }

    pub fn load_region(&self, state: &str) -> Result<Region, IngestError> {
        let path = self.region_path(state);
        let file = File::open(&path).map_err(|source| IngestError::Io {
            path: path.clone(),
            source,
        })?;
        let region = parse_region(state, file)?;
        info!(
            state,
            cities = region.city_count(),
            path = %path.display(),
            "Loaded region"
        );
        Ok(region)
    }
}
