// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::{Cell, Chain, Complex};

/// A cell complex with explicitly stored boundary and coboundary chains.
///
/// Cells are identified by their index into the construction data, which must
/// already be ordered by dimension so ids are contiguous per dimension. The
/// coboundary table is derived from the boundaries by transposition. Storage
/// is one chain per cell in each direction, so the complex must be small
/// enough for explicit storage; the cubical complex avoids this through its
/// product structure.
///
/// # Examples
///
/// ```rust
/// use conmat::{CellComplex, Chain, Complex};
///
/// // Two vertices joined by an edge.
/// let complex = CellComplex::new(
///     vec![0, 0, 1],
///     vec![Chain::new(), Chain::new(), Chain::from([0, 1])],
/// );
/// assert_eq!(complex.dimension(), 1);
/// assert_eq!(complex.boundary(&Chain::from([2])), Chain::from([0, 1]));
/// assert_eq!(complex.coboundary(&Chain::from([0])), Chain::from([2]));
/// ```
#[derive(Clone, Debug)]
pub struct CellComplex {
    begin: Vec<Cell>,
    boundaries: Vec<Chain>,
    coboundaries: Vec<Chain>,
}

impl CellComplex {
    /// Create a cell complex from per-cell dimensions and boundary chains.
    ///
    /// `cell_dims` must be non-decreasing so that ids are contiguous by
    /// dimension, and every boundary chain of cell `x` may only contain cells
    /// of dimension `cell_dims[x] - 1`.
    ///
    /// # Panics
    /// Panics if the vector lengths differ or if `cell_dims` is not sorted.
    #[must_use]
    pub fn new(cell_dims: Vec<usize>, boundaries: Vec<Chain>) -> Self {
        assert_eq!(cell_dims.len(), boundaries.len(), "cell count mismatch");
        assert!(
            cell_dims.windows(2).all(|pair| pair[0] <= pair[1]),
            "cells must be ordered by dimension"
        );

        let dimension = cell_dims.last().copied().unwrap_or(0);
        let mut begin = vec![0 as Cell; dimension + 2];
        for &dim in &cell_dims {
            begin[dim + 1] += 1;
        }
        for dim in 0..=dimension {
            begin[dim + 1] += begin[dim];
        }

        let mut coboundaries = vec![Chain::new(); boundaries.len()];
        for (cell, boundary) in boundaries.iter().enumerate() {
            for face in boundary.iter() {
                debug_assert!(
                    cell_dims[face as usize] + 1 == cell_dims[cell],
                    "boundary cell of wrong dimension"
                );
                coboundaries[face as usize] += cell as Cell;
            }
        }

        Self {
            begin,
            boundaries,
            coboundaries,
        }
    }

    fn cell_dims(&self) -> Vec<usize> {
        let mut dims = Vec::with_capacity(self.boundaries.len());
        for dim in 0..=self.dimension() {
            dims.extend(std::iter::repeat(dim).take(self.size_of_dim(dim) as usize));
        }
        dims
    }
}

impl Complex for CellComplex {
    fn dimension(&self) -> usize {
        self.begin.len() - 2
    }

    fn begin(&self, dim: usize) -> Cell {
        self.begin[dim]
    }

    fn column(&self, cell: Cell, callback: &mut dyn FnMut(Cell)) {
        for face in self.boundaries[cell as usize].iter() {
            callback(face);
        }
    }

    fn row(&self, cell: Cell, callback: &mut dyn FnMut(Cell)) {
        for coface in self.coboundaries[cell as usize].iter() {
            callback(coface);
        }
    }
}

// Serialized as the construction data; the coboundary table is rebuilt on
// deserialization.
impl Serialize for CellComplex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.cell_dims(), &self.boundaries).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellComplex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (cell_dims, boundaries) = <(Vec<usize>, Vec<Chain>)>::deserialize(deserializer)?;
        Ok(CellComplex::new(cell_dims, boundaries))
    }
}
