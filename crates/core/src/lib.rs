pub mod config;
pub mod error;
pub mod graph;

pub use config::{Config, DataConfig, EngineConfig};
pub use error::*;
pub use graph::{DistanceMatrix, Graph, NodeIndex, NO_EDGE};
