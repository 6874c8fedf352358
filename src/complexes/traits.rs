// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Range;

use crate::complexes::cubical::CubicalComplex;
use crate::homology::MorseComplex;
use crate::{Cell, Chain};

/// The capability expected of every cell complex consumed by the reduction
/// engine.
///
/// Cells are identified by contiguous non-negative integers partitioned by
/// dimension: the cells of dimension `d` occupy the id range
/// `begin(d)..begin(d + 1)`, with the sentinel `begin(dimension() + 1)`
/// equal to the total number of cells. The boundary matrix is exposed
/// column-wise and row-wise through callbacks; a callback is invoked once per
/// incidence occurrence, so over the two-element field an even number of
/// invocations for the same cell contributes nothing.
///
/// Implementations must be immutable once constructed; the engine shares them
/// freely behind [`std::rc::Rc`].
pub trait Complex {
    /// The dimension of the complex. Every cell has dimension at most this,
    /// and `begin` must accept arguments up to `dimension() + 1`.
    fn dimension(&self) -> usize;

    /// The first cell id of dimension `dim`, for `dim` in
    /// `0..=dimension() + 1`.
    fn begin(&self, dim: usize) -> Cell;

    /// Invoke `callback` once per nonzero incidence in column `cell` of the
    /// boundary matrix, i.e. per face occurrence of `cell`.
    fn column(&self, cell: Cell, callback: &mut dyn FnMut(Cell));

    /// Invoke `callback` once per nonzero incidence in row `cell` of the
    /// boundary matrix, i.e. per coface occurrence of `cell`.
    fn row(&self, cell: Cell, callback: &mut dyn FnMut(Cell));

    /// The total number of cells.
    fn size(&self) -> Cell {
        self.begin(self.dimension() + 1)
    }

    /// The number of cells of dimension `dim`.
    fn size_of_dim(&self, dim: usize) -> Cell {
        self.begin(dim + 1) - self.begin(dim)
    }

    /// The id range of the cells of dimension `dim`.
    fn cells(&self, dim: usize) -> Range<Cell> {
        self.begin(dim)..self.begin(dim + 1)
    }

    /// The dimension of `cell`, recovered from the `begin` table.
    fn cell_dim(&self, cell: Cell) -> usize {
        debug_assert!(cell < self.size(), "cell out of range");
        let mut dim = 0;
        while self.begin(dim + 1) <= cell {
            dim += 1;
        }
        dim
    }

    /// The boundary of `chain`, one dimension down.
    fn boundary(&self, chain: &Chain) -> Chain {
        let mut result = Chain::new();
        for cell in chain.iter() {
            self.column(cell, &mut |face| result += face);
        }
        result
    }

    /// The coboundary of `chain`, one dimension up.
    fn coboundary(&self, chain: &Chain) -> Chain {
        let mut result = Chain::new();
        for cell in chain.iter() {
            self.row(cell, &mut |coface| result += coface);
        }
        result
    }

    /// Downcast to a cubical complex, if this is one. The matching factory
    /// dispatches on this tag.
    fn as_cubical(&self) -> Option<&CubicalComplex> {
        None
    }

    /// Downcast to a Morse complex, if this is one.
    fn as_morse(&self) -> Option<&MorseComplex> {
        None
    }
}
