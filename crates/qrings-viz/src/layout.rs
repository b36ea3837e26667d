//! Grid layout for coupling graphs.
//!
//! Qubits are placed in reading order on a square grid:
//!
//! ```text
//!   grid_size = ceil(sqrt(num_nodes))
//!   row = i / grid_size,  col = i % grid_size
//!   position(i) = (col, -row)
//! ```
//!
//! so qubit 0 sits top-left and indices grow left-to-right, then downward.

use std::collections::BTreeMap;

use crate::graph::CouplingGraph;

/// Padding added around the coordinate bounding box, in grid units.
pub const MARGIN: f64 = 0.5;

/// Smallest `g` with `g * g >= n`.
pub fn grid_size(num_nodes: usize) -> usize {
    let mut g = (num_nodes as f64).sqrt() as usize;
    while g * g < num_nodes {
        g += 1;
    }
    while g > 0 && (g - 1) * (g - 1) >= num_nodes {
        g -= 1;
    }
    g
}

/// Axis-aligned bounds in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Planar position of every qubit in a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    grid_size: usize,
    positions: BTreeMap<u32, (i64, i64)>,
}

impl GridLayout {
    /// Lay out the nodes of `graph`.
    pub fn for_graph(graph: &CouplingGraph) -> Self {
        Self::for_nodes(graph.nodes(), graph.node_count())
    }

    /// Lay out `nodes`, sizing the grid for `num_nodes`.
    pub fn for_nodes(nodes: impl IntoIterator<Item = u32>, num_nodes: usize) -> Self {
        let grid_size = grid_size(num_nodes);
        let positions = nodes
            .into_iter()
            .map(|qubit| (qubit, position(qubit, grid_size)))
            .collect();
        Self {
            grid_size,
            positions,
        }
    }

    /// Side length of the grid.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Position of one qubit.
    pub fn position(&self, qubit: u32) -> Option<(i64, i64)> {
        self.positions.get(&qubit).copied()
    }

    /// All positions, ordered by qubit index.
    pub fn positions(&self) -> impl Iterator<Item = (u32, (i64, i64))> + '_ {
        self.positions.iter().map(|(&q, &p)| (q, p))
    }

    /// Number of placed qubits.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bounding box of all positions padded by [`MARGIN`]. An empty layout
    /// is treated as a single point at the origin.
    pub fn padded_bounds(&self) -> Bounds {
        let mut xs = self.positions.values().map(|&(x, _)| x);
        let mut ys = self.positions.values().map(|&(_, y)| y);
        let (x_min, x_max) = min_max(&mut xs);
        let (y_min, y_max) = min_max(&mut ys);
        Bounds {
            x_min: x_min as f64 - MARGIN,
            x_max: x_max as f64 + MARGIN,
            y_min: y_min as f64 - MARGIN,
            y_max: y_max as f64 + MARGIN,
        }
    }
}

fn position(qubit: u32, grid_size: usize) -> (i64, i64) {
    let i = qubit as usize;
    let row = i / grid_size;
    let col = i % grid_size;
    (col as i64, -(row as i64))
}

fn min_max(values: &mut impl Iterator<Item = i64>) -> (i64, i64) {
    values.fold(None, |acc: Option<(i64, i64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
    .unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use qrings_hal::CouplingMap;

    #[test]
    fn test_grid_size_small() {
        assert_eq!(grid_size(0), 0);
        assert_eq!(grid_size(1), 1);
        assert_eq!(grid_size(2), 2);
        assert_eq!(grid_size(3), 2);
        assert_eq!(grid_size(4), 2);
        assert_eq!(grid_size(5), 3);
    }

    #[test]
    fn test_grid_size_128_qubits() {
        assert_eq!(grid_size(128), 12);
        assert_eq!(grid_size(144), 12);
        assert_eq!(grid_size(145), 13);
        assert_eq!(grid_size(200), 15);
    }

    #[test]
    fn test_three_node_layout() {
        let map = CouplingMap::new(vec![(0, 1), (1, 0), (0, 2), (2, 0)]);
        let graph = CouplingGraph::from_coupling_map(&map);
        let layout = GridLayout::for_graph(&graph);

        assert_eq!(layout.grid_size(), 2);
        assert_eq!(layout.position(0), Some((0, 0)));
        assert_eq!(layout.position(1), Some((1, 0)));
        assert_eq!(layout.position(2), Some((0, -1)));
        assert_eq!(layout.position(3), None);
    }

    #[test]
    fn test_padded_bounds() {
        let layout = GridLayout::for_nodes([0, 1, 2], 3);
        let b = layout.padded_bounds();
        assert_eq!((b.x_min, b.x_max), (-0.5, 1.5));
        assert_eq!((b.y_min, b.y_max), (-1.5, 0.5));
    }

    #[test]
    fn test_empty_layout_bounds() {
        let layout = GridLayout::for_graph(&CouplingGraph::default());
        assert!(layout.is_empty());
        assert_eq!(layout.grid_size(), 0);
        let b = layout.padded_bounds();
        assert_eq!((b.width(), b.height()), (1.0, 1.0));
    }

    #[test]
    fn test_reading_order_for_128() {
        let layout = GridLayout::for_nodes(0..128, 128);
        assert_eq!(layout.position(11), Some((11, 0)));
        assert_eq!(layout.position(12), Some((0, -1)));
        assert_eq!(layout.position(127), Some((7, -10)));
    }

    proptest! {
        #[test]
        fn prop_grid_size_is_ceil_sqrt(n in 0usize..100_000) {
            let g = grid_size(n);
            prop_assert!(g * g >= n);
            prop_assert!(g == 0 || (g - 1) * (g - 1) < n);
        }

        #[test]
        fn prop_dense_layout_fits_grid(n in 1u32..400) {
            let layout = GridLayout::for_nodes(0..n, n as usize);
            let g = layout.grid_size() as i64;
            for (_, (x, y)) in layout.positions() {
                prop_assert!((0..g).contains(&x));
                prop_assert!((-(g - 1)..=0).contains(&y));
            }
        }

        #[test]
        fn prop_layout_depends_only_on_index_and_count(
            qubits in proptest::collection::btree_set(0u32..64, 1..20)
        ) {
            let forward = GridLayout::for_nodes(qubits.iter().copied(), qubits.len());
            let reverse = GridLayout::for_nodes(qubits.iter().rev().copied(), qubits.len());
            prop_assert_eq!(forward, reverse);
        }
    }
}
