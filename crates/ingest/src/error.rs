use std::path::PathBuf;

use citypath_core::SsspError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("region {0} has no header row")]
    MissingHeader(String),

    #[error("region {0} lists no cities")]
    NoCities(String),

    #[error("line {line} ({city}): expected {expected} cells, found {found}")]
    RowLength {
        line: u64,
        city: String,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column {column}: cannot parse weight {value:?}")]
    BadWeight {
        row: String,
        column: String,
        value: String,
    },

    #[error("region {region} lists {cities} cities but has {rows} matrix rows")]
    RowCount {
        region: String,
        cities: usize,
        rows: usize,
    },

    #[error("unknown state {0:?}")]
    UnknownState(String),

    #[error("unknown city {0:?}")]
    UnknownCity(String),

    #[error(transparent)]
    Graph(#[from] SsspError),
}
