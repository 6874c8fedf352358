// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::mem::take;
use std::rc::Rc;

use tracing::{debug, info};

use crate::{
    Cell, Complex, CubicalComplex, GradedComplex, MatchingError, MatchingOptions, MorseMatching,
    Priority,
};

/// A template-based acyclic partial matching for cubical complexes.
///
/// The matching is defined implicitly by the product structure: a cell
/// proposes mates by flipping one axis of its shape at a fixed position, in
/// ascending axis order, and accepts the first proposal that is not fringe,
/// has the same grade, and would itself be critical at every lower axis
/// bound. Nothing is stored per cell; `mate` recomputes the answer on
/// demand, with recursion depth bounded by the ambient dimension. See
/// Harker, Mischaikow, Spendlove, *Morse Theoretic Templates for High
/// Dimensional Homology Computation*.
///
/// Construction walks the cells once per dimension to record the critical
/// cells. During the walk only upward proposals are considered, and kings
/// discovered in dimension `d` are cached so the pass over dimension `d + 1`
/// skips them outright.
pub struct CubicalMorseMatching {
    graded: Rc<GradedComplex>,
    type_size: u64,
    dimension: usize,
    cap: usize,
    begin: Vec<Cell>,
    reindex: Vec<(Cell, Cell)>,
}

impl CubicalMorseMatching {
    /// Compute the matching on `graded`, whose underlying complex must be
    /// cubical.
    ///
    /// # Errors
    /// [`MatchingError::ConstructionMismatch`] if the complex is not
    /// cubical.
    pub fn new(
        graded: Rc<GradedComplex>,
        options: &MatchingOptions,
    ) -> Result<Self, MatchingError> {
        let Some(complex) = graded.complex().as_cubical() else {
            return Err(MatchingError::ConstructionMismatch);
        };
        let dimension = complex.dimension();
        let cap = options.match_dim.map_or(dimension, |dim| dim.min(dimension));
        let type_size = complex.type_size();
        debug!(cells = complex.size(), cap, "cubical morse matching");

        let search = MateSearch {
            complex,
            graded: &graded,
            cap,
        };

        let mut begin = Vec::with_capacity(cap + 2);
        let mut reindex = Vec::new();
        let mut index: Cell = 0;
        let mut next_kings: HashSet<Cell> = HashSet::new();

        for dim in 0..=cap {
            begin.push(index);
            let prev_kings = take(&mut next_kings);

            for cell in complex.cells(dim) {
                if complex.rightfringe(cell)
                    || (options.truncate && graded.value(cell) > options.max_grade)
                    || prev_kings.contains(&cell)
                {
                    continue;
                }
                let mate = search.mate(cell, dimension, true);
                if mate == cell {
                    reindex.push((cell, index));
                    index += 1;
                } else {
                    next_kings.insert(mate);
                }
            }
        }
        begin.push(index);

        info!(
            cells = complex.size(),
            critical = index,
            "cubical morse matching complete"
        );

        Ok(Self {
            graded,
            type_size,
            dimension,
            cap,
            begin,
            reindex,
        })
    }

    fn search(&self) -> MateSearch<'_> {
        MateSearch {
            complex: self
                .graded
                .complex()
                .as_cubical()
                .expect("complex kind verified at construction"),
            graded: &self.graded,
            cap: self.cap,
        }
    }
}

impl MorseMatching for CubicalMorseMatching {
    fn mate(&self, cell: Cell) -> Cell {
        self.search().mate(cell, self.dimension, false)
    }

    fn priority(&self, cell: Cell) -> Priority {
        (self.type_size - cell % self.type_size) as Priority
    }

    fn critical_cells(&self) -> (&[Cell], &[(Cell, Cell)]) {
        (&self.begin, &self.reindex)
    }
}

struct MateSearch<'a> {
    complex: &'a CubicalComplex,
    graded: &'a GradedComplex,
    cap: usize,
}

impl MateSearch<'_> {
    /// The mate of `cell` with proposals restricted to axes below `bound`.
    /// With `initial` set, only upward proposals (kings) are considered;
    /// acceptance testing recurses at full resolution.
    fn mate(&self, cell: Cell, bound: usize, initial: bool) -> Cell {
        if self.complex.rightfringe(cell) || self.complex.cell_dim(cell) > self.cap {
            return cell;
        }
        let shape = self.complex.cell_shape(cell);
        let pos = self.complex.cell_pos(cell);

        for axis in 0..bound {
            let bit = 1u32 << axis;
            if initial && shape & bit != 0 {
                continue;
            }
            let proposed = self.complex.cell_from(shape ^ bit, pos);
            if !self.complex.rightfringe(proposed)
                && self.complex.cell_dim(proposed) <= self.cap
                && self.graded.value(proposed) == self.graded.value(cell)
                && proposed == self.mate(proposed, axis, false)
            {
                return proposed;
            }
        }
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellComplex, Chain, Complex, Grade};

    fn grid_graded(boxes: Vec<u64>, grades: impl Fn(&CubicalComplex, Cell) -> Grade) -> Rc<GradedComplex> {
        let complex = Rc::new(CubicalComplex::new(boxes));
        let values: Vec<Grade> = (0..complex.size()).map(|cell| grades(&complex, cell)).collect();
        Rc::new(GradedComplex::from_values(complex, values))
    }

    #[test]
    fn rejects_non_cubical_complexes() {
        let complex = CellComplex::new(vec![0], vec![Chain::new()]);
        let graded = Rc::new(GradedComplex::from_values(Rc::new(complex), vec![0]));
        assert_eq!(
            CubicalMorseMatching::new(graded, &MatchingOptions::default()).err(),
            Some(MatchingError::ConstructionMismatch)
        );
    }

    #[test]
    fn trivial_grading_reduces_grid_to_a_point() {
        let graded = grid_graded(vec![3, 4], |_, _| 0);
        let matching =
            CubicalMorseMatching::new(Rc::clone(&graded), &MatchingOptions::default()).unwrap();

        let (begin, reindex) = matching.critical_cells();
        assert_eq!(begin, &[0, 1, 1, 1]);
        assert_eq!(reindex, &[(11, 0)]);
    }

    #[test]
    fn truncated_grid_matches_expected_critical_cells() {
        // 2-cells graded 1, everything else 0; matching truncated at 0.
        let graded = grid_graded(vec![3, 4], |complex, cell| {
            if complex.cell_dim(cell) == 2 { 1 } else { 0 }
        });
        let options = MatchingOptions {
            truncate: true,
            max_grade: 0,
            ..MatchingOptions::default()
        };
        let matching = CubicalMorseMatching::new(Rc::clone(&graded), &options).unwrap();

        let (begin, reindex) = matching.critical_cells();
        assert_eq!(begin, &[0, 1, 7, 7]);
        assert_eq!(
            reindex,
            &[(11, 0), (24, 1), (25, 2), (27, 3), (28, 4), (30, 5), (31, 6)]
        );
    }

    #[test]
    fn matching_is_an_involution() {
        let graded = grid_graded(vec![3, 4], |complex, cell| {
            if complex.cell_dim(cell) == 2 { 1 } else { 0 }
        });
        let matching =
            CubicalMorseMatching::new(Rc::clone(&graded), &MatchingOptions::default()).unwrap();

        let complex = graded.complex();
        for cell in 0..complex.size() {
            let mate = matching.mate(cell);
            assert_eq!(matching.mate(mate), cell);
            if mate != cell {
                let diff = complex.cell_dim(mate).abs_diff(complex.cell_dim(cell));
                assert_eq!(diff, 1);
                assert_eq!(graded.value(mate), graded.value(cell));
            }
        }
    }

    #[test]
    fn fringe_cells_are_never_matched() {
        let graded = grid_graded(vec![3, 4], |_, _| 0);
        let matching =
            CubicalMorseMatching::new(Rc::clone(&graded), &MatchingOptions::default()).unwrap();

        let complex = graded.complex().as_cubical().unwrap();
        for cell in 0..complex.size() {
            if complex.rightfringe(cell) {
                assert_eq!(matching.mate(cell), cell);
            }
        }
        let (_, reindex) = matching.critical_cells();
        assert!(reindex.iter().all(|&(old, _)| !complex.rightfringe(old)));
    }

    #[test]
    fn match_dim_caps_the_matching() {
        let graded = grid_graded(vec![3, 4], |_, _| 0);
        let options = MatchingOptions {
            match_dim: Some(1),
            ..MatchingOptions::default()
        };
        let matching = CubicalMorseMatching::new(Rc::clone(&graded), &options).unwrap();

        // Without the squares, the six interior vertical edges survive along
        // with the corner vertex, as in the truncated grading.
        let (begin, reindex) = matching.critical_cells();
        assert_eq!(begin, &[0, 1, 7]);
        assert_eq!(reindex.len(), 7);
        // Cells above the cap are their own mate and are not listed.
        let complex = graded.complex();
        for cell in complex.cells(2) {
            assert_eq!(matching.mate(cell), cell);
        }
    }
}
