use std::io::Read;

use citypath_core::{DistanceMatrix, Graph, NodeIndex, SsspError, NO_EDGE};
use tracing::{debug, warn};

use crate::error::IngestError;

/// Cell value that means "no direct road" in the input files.
pub const NO_ROAD_MARKER: f64 = -1.0;

/// One state's cities and their road distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub cities: Vec<String>,
    pub matrix: DistanceMatrix,
}

impl Region {
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Resolve a city by 1-based row number or case-insensitive name.
    pub fn city_index(&self, query: &str) -> Result<NodeIndex, IngestError> {
        lookup(&self.cities, query).ok_or_else(|| IngestError::UnknownCity(query.trim().to_string()))
    }

    /// Resolve a comma-separated list of cities.
    pub fn city_indices(&self, list: &str) -> Result<Vec<NodeIndex>, IngestError> {
        list.split(',')
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| self.city_index(q))
            .collect()
    }

    /// Graph over this region's matrix, starting at `start`.
    pub fn graph_from(&self, start: NodeIndex) -> Result<Graph, SsspError> {
        Graph::new(self.matrix.clone(), start)
    }
}

/// Match `query` against `names` as a 1-based number first, then by
/// case-insensitive name.
pub fn lookup(names: &[String], query: &str) -> Option<usize> {
    let query = query.trim();
    if let Ok(n) = query.parse::<usize>() {
        return (1..=names.len()).contains(&n).then(|| n - 1);
    }
    names.iter().position(|name| name.eq_ignore_ascii_case(query))
}

fn parse_weight(cell: &str) -> Option<f64> {
    let value: f64 = cell.parse().ok()?;
    if value == NO_ROAD_MARKER {
        Some(NO_EDGE)
    } else {
        Some(value)
    }
}

/// Parse a region CSV: a header naming the cities, then one row per city.
pub fn parse_region<R: Read>(name: &str, reader: R) -> Result<Region, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = rdr.records();

    let header = records
        .next()
        .ok_or_else(|| IngestError::MissingHeader(name.to_string()))??;
    // First header cell is the corner label, not a city.
    let cities: Vec<String> = header.iter().skip(1).map(str::to_string).collect();
    if cities.is_empty() {
        return Err(IngestError::NoCities(name.to_string()));
    }

    let mut rows = Vec::with_capacity(cities.len());
    for record in records {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row_city = record.get(0).unwrap_or_default().to_string();

        if record.len() != cities.len() + 1 {
            return Err(IngestError::RowLength {
                line,
                city: row_city,
                expected: cities.len() + 1,
                found: record.len(),
            });
        }
        if let Some(expected) = cities.get(rows.len()) {
            if !expected.eq_ignore_ascii_case(&row_city) {
                warn!(region = name, line, row = %row_city, column = %expected, "row label differs from header");
            }
        }

        let weights = record
            .iter()
            .skip(1)
            .zip(&cities)
            .map(|(cell, column)| {
                parse_weight(cell).ok_or_else(|| IngestError::BadWeight {
                    row: row_city.clone(),
                    column: column.clone(),
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(weights);
    }

    if rows.len() != cities.len() {
        return Err(IngestError::RowCount {
            region: name.to_string(),
            cities: cities.len(),
            rows: rows.len(),
        });
    }

    let matrix = DistanceMatrix::from_rows(rows)?;
    debug!(region = name, cities = cities.len(), roads = matrix.edge_count(), "region parsed");

    Ok(Region {
        name: name.to_string(),
        cities,
        matrix,
    })
}
