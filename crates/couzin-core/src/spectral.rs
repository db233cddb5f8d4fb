//! Graph Laplacians and algebraic connectivity.
//!
//! `L = D - A` where `D` holds column sums of `A` (in-degree). For a
//! symmetric adjacency this is the ordinary degree. In-degree is used for
//! directed k-nearest graphs because out-degree is `k` for every node and
//! carries no structural signal.
//!
//! The Fiedler value is the second-smallest eigenvalue of `L` (real part
//! for directed graphs). A graph counts as connected when it exceeds a
//! small tolerance that absorbs floating-point noise around zero.
//! Near-tolerance values are reported as computed.

use crate::adjacency::AdjacencyMatrix;
use crate::error::{CouzinError, Result};
use nalgebra::{DMatrix, DVector, SymmetricEigen};
use serde::Serialize;

/// Default tolerance for [`Laplacian::is_connected`].
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// A graph Laplacian (or a difference of Laplacians).
#[derive(Debug, Clone, PartialEq)]
pub struct Laplacian {
    matrix: DMatrix<f64>,
    /// Whether the matrix is symmetric, which selects the eigen solver.
    symmetric: bool,
}

impl Laplacian {
    /// Build `D - A` from an adjacency matrix. The input is not modified.
    pub fn from_adjacency(adjacency: &AdjacencyMatrix) -> Self {
        let n = adjacency.n();
        let mut matrix = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            for j in adjacency.neighbors(i) {
                matrix[(i, j)] = -1.0;
            }
        }
        for j in 0..n {
            matrix[(j, j)] = adjacency.in_degree(j) as f64;
        }
        Self {
            matrix,
            symmetric: adjacency.is_symmetric(),
        }
    }

    /// Wrap an arbitrary square matrix.
    pub fn from_matrix(matrix: DMatrix<f64>) -> Result<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(CouzinError::dimension_mismatch(matrix.nrows(), matrix.ncols()));
        }
        let symmetric = matrix == matrix.transpose();
        Ok(Self { matrix, symmetric })
    }

    pub fn n(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// `self - other`, e.g. `L_rep - L_att`.
    pub fn difference(&self, other: &Laplacian) -> Result<Laplacian> {
        if self.n() != other.n() {
            return Err(CouzinError::dimension_mismatch(self.n(), other.n()));
        }
        Ok(Laplacian {
            matrix: &self.matrix - &other.matrix,
            symmetric: self.symmetric && other.symmetric,
        })
    }

    /// `L · v`.
    pub fn apply(&self, v: &DVector<f64>) -> Result<DVector<f64>> {
        if v.len() != self.n() {
            return Err(CouzinError::dimension_mismatch(self.n(), v.len()));
        }
        Ok(&self.matrix * v)
    }

    /// Row sums of the matrix.
    pub fn row_sums(&self) -> Vec<f64> {
        self.matrix.row_iter().map(|r| r.sum()).collect()
    }

    /// Off-diagonal nonzero entries.
    pub fn off_diagonal_nonzeros(&self) -> usize {
        let n = self.n();
        let mut count = 0;
        for i in 0..n {
            for j in 0..n {
                if i != j && self.matrix[(i, j)] != 0.0 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Eigenvalues sorted ascending (real parts for non-symmetric input).
    pub fn eigenvalues(&self) -> Vec<f64> {
        if self.n() == 0 {
            return Vec::new();
        }
        let mut values: Vec<f64> = if self.symmetric {
            SymmetricEigen::new(self.matrix.clone())
                .eigenvalues
                .iter()
                .copied()
                .collect()
        } else {
            self.matrix
                .complex_eigenvalues()
                .iter()
                .map(|c| c.re)
                .collect()
        };
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    /// Algebraic connectivity: the second-smallest eigenvalue.
    ///
    /// `None` when the graph has fewer than two nodes.
    pub fn fiedler(&self) -> Option<f64> {
        self.eigenvalues().get(1).copied()
    }

    /// Whether the Fiedler value exceeds `tolerance`. Graphs with fewer
    /// than two nodes are trivially connected.
    pub fn is_connected(&self, tolerance: f64) -> bool {
        match self.fiedler() {
            Some(value) => value > tolerance,
            None => true,
        }
    }
}

/// Summary of one Laplacian for time-series logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectivityMetrics {
    pub fiedler: Option<f64>,
    pub connected: bool,
    /// Weakly connected components of the underlying adjacency.
    pub components: usize,
    pub edges: usize,
    /// Mean number of outgoing edges per agent.
    pub average_degree: f64,
}

impl ConnectivityMetrics {
    pub fn measure(adjacency: &AdjacencyMatrix, tolerance: f64) -> Self {
        let laplacian = Laplacian::from_adjacency(adjacency);
        let fiedler = laplacian.fiedler();
        let n = adjacency.n();
        Self {
            fiedler,
            connected: laplacian.is_connected(tolerance),
            components: adjacency.component_count(),
            edges: adjacency.edge_count(),
            average_degree: if n > 0 {
                adjacency.nonzero_count() as f64 / n as f64
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2D;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-7
    }

    #[test]
    fn two_agent_scenario() {
        let pts = [Vector2D::new(0.0, 0.0), Vector2D::new(3.0, 0.0)];
        let a = AdjacencyMatrix::from_radius(&pts, 5.0, 0.0);
        let l = Laplacian::from_adjacency(&a);
        assert_eq!(l.get(0, 0), 1.0);
        assert_eq!(l.get(0, 1), -1.0);
        assert_eq!(l.get(1, 0), -1.0);
        assert_eq!(l.get(1, 1), 1.0);

        let ev = l.eigenvalues();
        assert!(close(ev[0], 0.0) && close(ev[1], 2.0), "eigenvalues {:?}", ev);
        assert!(l.is_connected(DEFAULT_TOLERANCE));
    }

    #[test]
    fn three_distant_agents_are_disconnected() {
        let pts = [
            Vector2D::new(0.0, 0.0),
            Vector2D::new(10.0, 0.0),
            Vector2D::new(20.0, 0.0),
        ];
        let a = AdjacencyMatrix::from_radius(&pts, 5.0, 0.0);
        assert_eq!(a.nonzero_count(), 0);
        let l = Laplacian::from_adjacency(&a);
        assert!(l.matrix().iter().all(|&v| v == 0.0));
        assert!(!l.is_connected(DEFAULT_TOLERANCE));
    }

    #[test]
    fn symmetric_rows_sum_to_zero() {
        let a = AdjacencyMatrix::from_rows(&[
            vec![0, 1, 1, 0],
            vec![1, 0, 1, 0],
            vec![1, 1, 0, 1],
            vec![0, 0, 1, 0],
        ]);
        let l = Laplacian::from_adjacency(&a);
        assert!(l.is_symmetric());
        for s in l.row_sums() {
            assert!(close(s, 0.0));
        }
    }

    #[test]
    fn directed_laplacian_uses_in_degree() {
        // 0 -> 1, 2 -> 1: node 1 has in-degree 2.
        let a = AdjacencyMatrix::from_rows(&[vec![0, 1, 0], vec![0, 0, 0], vec![0, 1, 0]]);
        let l = Laplacian::from_adjacency(&a);
        assert!(!l.is_symmetric());
        assert_eq!(l.get(1, 1), 2.0);
        assert_eq!(l.get(0, 0), 0.0);
        assert_eq!(l.get(0, 1), -1.0);
        // Columns of an in-degree Laplacian sum to zero.
        for j in 0..3 {
            let col: f64 = (0..3).map(|i| l.get(i, j)).sum();
            assert!(close(col, 0.0));
        }
    }

    #[test]
    fn path_graph_fiedler_value() {
        // Path on 3 nodes: eigenvalues 0, 1, 3.
        let a = AdjacencyMatrix::from_rows(&[vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
        let l = Laplacian::from_adjacency(&a);
        let f = l.fiedler().unwrap();
        assert!(close(f, 1.0), "fiedler = {}", f);
    }

    #[test]
    fn directed_cycle_is_connected() {
        let a = AdjacencyMatrix::from_rows(&[vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]]);
        let l = Laplacian::from_adjacency(&a);
        // Eigenvalues 0 and 1.5 ± i·√3/2.
        let f = l.fiedler().unwrap();
        assert!(close(f, 1.5), "fiedler = {}", f);
        assert!(l.is_connected(DEFAULT_TOLERANCE));
    }

    #[test]
    fn single_node_has_no_fiedler_value() {
        let l = Laplacian::from_adjacency(&AdjacencyMatrix::zeros(1, true));
        assert_eq!(l.fiedler(), None);
        assert!(l.is_connected(DEFAULT_TOLERANCE));
    }

    #[test]
    fn difference_requires_matching_sizes() {
        let a = Laplacian::from_adjacency(&AdjacencyMatrix::zeros(2, true));
        let b = Laplacian::from_adjacency(&AdjacencyMatrix::zeros(3, true));
        assert!(a.difference(&b).is_err());
    }

    #[test]
    fn metrics_report_components_and_degree() {
        let a = AdjacencyMatrix::from_rows(&[
            vec![0, 1, 0, 0],
            vec![1, 0, 0, 0],
            vec![0, 0, 0, 1],
            vec![0, 0, 1, 0],
        ]);
        let m = ConnectivityMetrics::measure(&a, DEFAULT_TOLERANCE);
        assert_eq!(m.components, 2);
        assert_eq!(m.edges, 2);
        assert!(!m.connected);
        assert!(close(m.average_degree, 1.0));
    }
}
