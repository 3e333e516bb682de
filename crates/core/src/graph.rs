use crate::error::{GraphDefect, SsspError};

/// Index of a node (city) in the distance matrix.
pub type NodeIndex = usize;

/// Weight stored for "no edge". Also the tentative distance of an unreached node.
pub const NO_EDGE: f64 = f64::INFINITY;

/// Dense N×N matrix of non-negative edge weights, stored row-major.
///
/// Entry `(i, j)` is the weight of the edge `i -> j`, or [`NO_EDGE`].
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    weights: Vec<f64>,
}

impl DistanceMatrix {
    /// Build a matrix from rows, rejecting non-square input, NaN entries and
    /// negative finite weights.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SsspError> {
        let size = rows.len();
        let mut weights = Vec::with_capacity(size * size);

        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GraphDefect::NotSquare {
                    row: from,
                    len: row.len(),
                    expected: size,
                }
                .into());
            }
            for (to, weight) in row.into_iter().enumerate() {
                if weight.is_nan() {
                    return Err(GraphDefect::NotANumber { from, to }.into());
                }
                if weight < 0.0 {
                    return Err(GraphDefect::NegativeWeight { from, to, weight }.into());
                }
                weights.push(weight);
            }
        }

        Ok(Self { size, weights })
    }

    /// Matrix with no edges at all (every entry is [`NO_EDGE`]).
    pub fn disconnected(size: usize) -> Self {
        Self {
            size,
            weights: vec![NO_EDGE; size * size],
        }
    }

    pub fn node_count(&self) -> usize {
        self.size
    }

    /// Weight of `from -> to`, [`NO_EDGE`] if there is none.
    #[inline]
    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        self.weights[from * self.size + to]
    }

    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        let w = self.weight(from, to);
        w.is_finite().then_some(w)
    }

    pub fn row(&self, from: NodeIndex) -> &[f64] {
        &self.weights[from * self.size..(from + 1) * self.size]
    }

    /// Number of finite off-diagonal entries.
    pub fn edge_count(&self) -> usize {
        (0..self.size)
            .map(|from| {
                self.row(from)
                    .iter()
                    .enumerate()
                    .filter(|&(to, w)| to != from && w.is_finite())
                    .count()
            })
            .sum()
    }
}

/// A validated distance matrix together with the start node of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    matrix: DistanceMatrix,
    source: NodeIndex,
}

impl Graph {
    pub fn new(matrix: DistanceMatrix, source: NodeIndex) -> Result<Self, SsspError> {
        let node_count = matrix.node_count();
        if source >= node_count {
            return Err(GraphDefect::SourceOutOfRange {
                start: source,
                node_count,
            }
            .into());
        }
        Ok(Self { matrix, source })
    }

    /// Validate raw rows and the source in one step.
    pub fn from_rows(rows: Vec<Vec<f64>>, source: NodeIndex) -> Result<Self, SsspError> {
        Self::new(DistanceMatrix::from_rows(rows)?, source)
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn node_count(&self) -> usize {
        self.matrix.node_count()
    }

    #[inline]
    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        self.matrix.weight(from, to)
    }

    /// Same matrix, different start node.
    pub fn with_source(&self, source: NodeIndex) -> Result<Self, SsspError> {
        Self::new(self.matrix.clone(), source)
    }
}
