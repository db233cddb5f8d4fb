//! Adjacency — the interaction graph induced by agent proximity.
//!
//! Two flavors are built from agent positions:
//! - **metric** (radius band): symmetric, `a[i][j] = 1` iff
//!   `min_r <= d(i, j) < max_r`
//! - **topological** (k nearest): directed, `a[i][j] = 1` iff `j` is one
//!   of the `k` nearest others of `i`
//!
//! The diagonal is always zero.

use crate::types::AgentIndex;
use crate::vector::Vector2D;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use serde::Serialize;
use std::cmp::Ordering;

/// An n×n matrix over {0, 1}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacencyMatrix {
    n: usize,
    /// Row-major entries.
    cells: Vec<bool>,
    /// Whether the matrix was built symmetric by construction.
    symmetric: bool,
}

impl AdjacencyMatrix {
    /// An empty (edgeless) matrix.
    pub fn zeros(n: usize, symmetric: bool) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
            symmetric,
        }
    }

    /// Build from explicit rows. Nonzero entries become edges; the
    /// diagonal is ignored. Symmetry is detected from the content.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let n = rows.len();
        let mut m = Self::zeros(n, false);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate().take(n) {
                if i != j && v != 0 {
                    m.cells[i * n + j] = true;
                }
            }
        }
        m.symmetric = (0..n).all(|i| (0..n).all(|j| m.get(i, j) == m.get(j, i)));
        m
    }

    /// Symmetric adjacency over a radius band `[min_radius, max_radius)`.
    ///
    /// Each unordered pair is evaluated once. O(n²).
    pub fn from_radius(positions: &[Vector2D], max_radius: f64, min_radius: f64) -> Self {
        let n = positions.len();
        let mut m = Self::zeros(n, true);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = positions[i].distance_to(&positions[j]);
                if d >= min_radius && d < max_radius {
                    m.cells[i * n + j] = true;
                    m.cells[j * n + i] = true;
                }
            }
        }
        m
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.n + j]
    }

    /// Add the directed edge `i -> j`. Self-loops are ignored.
    pub fn set(&mut self, i: usize, j: usize) {
        if i != j {
            self.cells[i * self.n + j] = true;
        }
    }

    /// Indices `j` with `a[i][j] = 1`, ascending.
    pub fn neighbors(&self, i: usize) -> Vec<AgentIndex> {
        self.row(i)
            .iter()
            .enumerate()
            .filter_map(|(j, &on)| on.then_some(j))
            .collect()
    }

    /// Row sum (outgoing edges).
    pub fn out_degree(&self, i: usize) -> usize {
        self.row(i).iter().filter(|&&on| on).count()
    }

    /// Column sum (incoming edges).
    pub fn in_degree(&self, j: usize) -> usize {
        (0..self.n).filter(|&i| self.get(i, j)).count()
    }

    /// Number of nonzero entries.
    pub fn nonzero_count(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }

    /// Number of edges: unordered pairs when symmetric, arcs otherwise.
    pub fn edge_count(&self) -> usize {
        if self.symmetric {
            self.nonzero_count() / 2
        } else {
            self.nonzero_count()
        }
    }

    /// Entries as 0/1 rows, for renderers and loggers.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.n)
            .map(|i| self.row(i).iter().map(|&on| on as u8).collect())
            .collect()
    }

    /// The interaction graph as a petgraph graph (one arc per entry).
    pub fn to_graph(&self) -> Graph<AgentIndex, (), Directed> {
        let mut graph = Graph::with_capacity(self.n, self.nonzero_count());
        let nodes: Vec<NodeIndex> = (0..self.n).map(|i| graph.add_node(i)).collect();
        for i in 0..self.n {
            for j in self.neighbors(i) {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
        graph
    }

    /// Number of (weakly) connected components of the interaction graph.
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.to_graph())
    }

    fn row(&self, i: usize) -> &[bool] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }
}

/// Result of a k-nearest query: the directed adjacency plus each agent's
/// neighbour set, returned explicitly rather than cached on the agents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestNeighbors {
    pub adjacency: AdjacencyMatrix,
    /// `sets[i]` holds the k nearest others of agent `i`, nearest first.
    pub sets: Vec<Vec<AgentIndex>>,
}

impl NearestNeighbors {
    /// Select the `k` nearest others of every agent.
    ///
    /// Ties are broken by index. `k` is capped at `n - 1`. O(n² log n).
    pub fn from_positions(positions: &[Vector2D], k: usize) -> Self {
        let n = positions.len();
        let k = k.min(n.saturating_sub(1));
        let mut adjacency = AdjacencyMatrix::zeros(n, false);
        let mut sets = Vec::with_capacity(n);

        for (i, p) in positions.iter().enumerate() {
            let mut others: Vec<(f64, AgentIndex)> = positions
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, q)| (p.distance_to(q), j))
                .collect();
            others.sort_by(|a, b| match a.0.total_cmp(&b.0) {
                Ordering::Equal => a.1.cmp(&b.1),
                ord => ord,
            });
            let nearest: Vec<AgentIndex> = others.into_iter().take(k).map(|(_, j)| j).collect();
            for &j in &nearest {
                adjacency.set(i, j);
            }
            sets.push(nearest);
        }

        Self { adjacency, sets }
    }

    pub fn neighbors_of(&self, i: AgentIndex) -> &[AgentIndex] {
        &self.sets[i]
    }
}
