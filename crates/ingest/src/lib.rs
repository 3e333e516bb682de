//! Loads the state list and per-region city distance matrices from CSV files.
//!
//! Layout under the data directory:
//!
//! ```text
//! States.csv                 one state name per line
//! <State>/<State>.csv        header `<corner>,City1,...,CityN`, then N rows
//!                            `CityName,w1,...,wN`; `-1` marks a missing road
//! ```

pub mod dataset;
pub mod error;
pub mod region;

pub use dataset::DataSet;
pub use error::IngestError;
pub use region::{lookup, parse_region, Region, NO_ROAD_MARKER};
