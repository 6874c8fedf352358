// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    Cell, Chain, Complex, GradedComplex, MatchingError, MatchingOptions, MorseMatching, Priority,
};

/// Sentinel for cells not yet (or never) matched.
const UNMATCHED: Cell = Cell::MAX;

/// A coreduction-driven acyclic partial matching for arbitrary complexes.
///
/// The algorithm maintains, for every eligible cell, the number of its
/// unexcised same-grade boundary cells. Cells whose count reaches one form a
/// coreduction pair with their unique unmatched face and both are excised;
/// when no such pair exists, a cell with count zero is excised alone as an
/// ace. Excising a cell decrements the counts of its same-grade cofaces,
/// which drives the cascade. Every eligible cell is excised exactly once, so
/// the loop runs in linearly many steps.
///
/// Priorities are assigned in excision order within each grade
/// (`value * eligible_count + step`), which makes them a linear extension of
/// the induced flow: the queens uncovered by pushing through a king were
/// excised strictly earlier than the king's own queen.
///
/// The matching is stored in flat tables after construction, so queries are
/// constant time and the graded complex is not retained.
pub struct GenericMorseMatching {
    mate: Vec<Cell>,
    priority: Vec<Priority>,
    begin: Vec<Cell>,
    reindex: Vec<(Cell, Cell)>,
}

impl GenericMorseMatching {
    /// Compute the matching on `graded` with the given options.
    ///
    /// # Errors
    /// [`MatchingError::GradingClosureViolated`] if a boundary cell has a
    /// strictly greater grade than its cell;
    /// [`MatchingError::InvariantViolated`] if a coreducible cell fails to
    /// yield exactly one unmatched face.
    pub fn new(
        graded: &GradedComplex,
        options: &MatchingOptions,
    ) -> Result<Self, MatchingError> {
        let complex = graded.complex();
        let dimension = complex.dimension();
        let cap = options.match_dim.map_or(dimension, |dim| dim.min(dimension));

        let mut state = MatchingState {
            graded,
            options,
            top_begin: complex.begin(cap),
            size: complex.begin(cap + 1),
            eligible_count: 0,
            step: 0,
            mate: Vec::new(),
            priority: Vec::new(),
            boundary_count: Vec::new(),
            coreducible: HashSet::new(),
            ace_candidates: HashSet::new(),
        };
        debug!(cells = state.size, cap, "generic morse matching");

        state.initialize()?;
        state.run()?;

        // Critical cells in ascending dimension, reindexed contiguously.
        let mut begin = Vec::with_capacity(cap + 2);
        let mut reindex = Vec::new();
        let mut index: Cell = 0;
        for dim in 0..=cap {
            begin.push(index);
            for cell in complex.cells(dim) {
                if state.eligible(cell) && state.mate[cell as usize] == cell {
                    reindex.push((cell, index));
                    index += 1;
                }
            }
        }
        begin.push(index);

        info!(
            cells = state.size,
            critical = index,
            "generic morse matching complete"
        );

        Ok(Self {
            mate: state.mate,
            priority: state.priority,
            begin,
            reindex,
        })
    }
}

impl MorseMatching for GenericMorseMatching {
    fn mate(&self, cell: Cell) -> Cell {
        match self.mate.get(cell as usize) {
            Some(&mate) if mate != UNMATCHED => mate,
            _ => cell,
        }
    }

    fn priority(&self, cell: Cell) -> Priority {
        self.priority.get(cell as usize).copied().unwrap_or(0)
    }

    fn critical_cells(&self) -> (&[Cell], &[(Cell, Cell)]) {
        (&self.begin, &self.reindex)
    }
}

struct MatchingState<'a> {
    graded: &'a GradedComplex,
    options: &'a MatchingOptions,
    /// First cell of the top matched dimension; such cells are not matched
    /// upward, so their coboundary is not consulted.
    top_begin: Cell,
    /// One past the last cell of the top matched dimension.
    size: Cell,
    eligible_count: i64,
    step: i64,
    mate: Vec<Cell>,
    priority: Vec<Priority>,
    boundary_count: Vec<usize>,
    coreducible: HashSet<Cell>,
    ace_candidates: HashSet<Cell>,
}

impl MatchingState<'_> {
    fn eligible(&self, cell: Cell) -> bool {
        !self.options.truncate || self.graded.value(cell) <= self.options.max_grade
    }

    /// The boundary of `cell` restricted to cells of equal grade. Cells of
    /// strictly lower grade are dropped; a cell of strictly greater grade is
    /// a closure violation.
    fn graded_boundary(&self, cell: Cell) -> Result<Chain, MatchingError> {
        let value = self.graded.value(cell);
        let mut result = Chain::new();
        for face in self
            .graded
            .complex()
            .boundary(&Chain::from([cell]))
            .iter()
        {
            let face_value = self.graded.value(face);
            if face_value > value {
                return Err(MatchingError::GradingClosureViolated { cell, face });
            }
            if face_value == value {
                result += face;
            }
        }
        Ok(result)
    }

    /// The coboundary of `cell` restricted to cells of equal grade, empty
    /// for cells of the top matched dimension.
    fn graded_coboundary(&self, cell: Cell) -> Chain {
        let mut result = Chain::new();
        if cell >= self.top_begin {
            return result;
        }
        let value = self.graded.value(cell);
        for coface in self
            .graded
            .complex()
            .coboundary(&Chain::from([cell]))
            .iter()
        {
            if self.graded.value(coface) == value {
                result += coface;
            }
        }
        result
    }

    fn initialize(&mut self) -> Result<(), MatchingError> {
        let size = self.size as usize;
        self.mate = vec![UNMATCHED; size];
        self.priority = vec![0; size];
        self.boundary_count = vec![0; size];

        for cell in 0..self.size {
            if !self.eligible(cell) {
                continue;
            }
            self.eligible_count += 1;
            let count = self.graded_boundary(cell)?.len();
            self.boundary_count[cell as usize] = count;
            match count {
                0 => {
                    self.ace_candidates.insert(cell);
                }
                1 => {
                    self.coreducible.insert(cell);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Excise `cell`: assign its priority, retire it from the working sets,
    /// and update the boundary counts of its same-grade cofaces.
    fn process(&mut self, cell: Cell) {
        self.priority[cell as usize] =
            self.graded.value(cell) * self.eligible_count + self.step;
        self.step += 1;
        self.coreducible.remove(&cell);
        self.ace_candidates.remove(&cell);

        for coface in self.graded_coboundary(cell).iter() {
            // Same grade implies same eligibility, so ineligible cofaces
            // never had their counts initialized.
            if !self.eligible(coface) {
                continue;
            }
            let index = coface as usize;
            self.boundary_count[index] -= 1;
            match self.boundary_count[index] {
                0 => {
                    self.coreducible.remove(&coface);
                    self.ace_candidates.insert(coface);
                }
                1 => {
                    self.coreducible.insert(coface);
                }
                _ => {}
            }
        }
    }

    fn run(&mut self) -> Result<(), MatchingError> {
        while self.step < self.eligible_count {
            if let Some(&king) = self.coreducible.iter().next() {
                self.coreducible.remove(&king);
                if self.mate[king as usize] != UNMATCHED {
                    // Stale entry re-inserted by a count transition after the
                    // cell was already excised.
                    continue;
                }

                let mut queen = None;
                for face in self.graded_boundary(king)?.iter() {
                    if self.mate[face as usize] == UNMATCHED
                        && queen.replace(face).is_some()
                    {
                        return Err(MatchingError::InvariantViolated { cell: king });
                    }
                }
                let queen = queen.ok_or(MatchingError::InvariantViolated { cell: king })?;

                self.mate[king as usize] = queen;
                self.mate[queen as usize] = king;
                // The queen must be excised first so the king's re-entry into
                // the working sets is undone by its own excision.
                self.process(queen);
                self.process(king);
            } else {
                let &ace = self
                    .ace_candidates
                    .iter()
                    .next()
                    .expect("no ace candidate while unexcised cells remain");
                self.ace_candidates.remove(&ace);
                if self.mate[ace as usize] != UNMATCHED {
                    continue;
                }
                self.mate[ace as usize] = ace;
                self.process(ace);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{CellComplex, Complex};

    fn graded(complex: CellComplex, grades: Vec<crate::Grade>) -> GradedComplex {
        GradedComplex::from_values(Rc::new(complex), grades)
    }

    fn line_segment() -> CellComplex {
        CellComplex::new(
            vec![0, 0, 1],
            vec![Chain::new(), Chain::new(), Chain::from([0, 1])],
        )
    }

    fn solid_triangle() -> CellComplex {
        CellComplex::new(
            vec![0, 0, 0, 1, 1, 1, 2],
            vec![
                Chain::new(),
                Chain::new(),
                Chain::new(),
                Chain::from([0, 1]),
                Chain::from([1, 2]),
                Chain::from([2, 0]),
                Chain::from([3, 4, 5]),
            ],
        )
    }

    #[test]
    fn line_segment_matching() {
        let graded = graded(line_segment(), vec![0, 0, 0]);
        let matching = GenericMorseMatching::new(&graded, &MatchingOptions::default()).unwrap();

        // The edge pairs with one endpoint; the other vertex is the ace.
        let (begin, reindex) = matching.critical_cells();
        assert_eq!(begin, &[0, 1, 1]);
        assert_eq!(reindex.len(), 1);
        assert_eq!(reindex[0].1, 0);
        assert!(matching.is_king(2));
        assert_eq!((0..3).filter(|&x| matching.is_critical(x)).count(), 1);
    }

    #[test]
    fn matching_is_an_involution() {
        let graded = graded(solid_triangle(), vec![0; 7]);
        let matching = GenericMorseMatching::new(&graded, &MatchingOptions::default()).unwrap();

        for cell in 0..7 {
            assert_eq!(matching.mate(matching.mate(cell)), cell);
        }
        // Contractible, so a single critical vertex remains.
        let (begin, reindex) = matching.critical_cells();
        assert_eq!(begin, &[0, 1, 1, 1]);
        assert_eq!(reindex.len(), 1);
    }

    #[test]
    fn queens_in_king_boundaries_have_smaller_priority() {
        let graded = graded(solid_triangle(), vec![0; 7]);
        let matching = GenericMorseMatching::new(&graded, &MatchingOptions::default()).unwrap();
        let complex = graded.complex();

        for queen in (0..7).filter(|&x| matching.is_queen(x)) {
            let king = matching.mate(queen);
            for face in complex.boundary(&Chain::from([king])).iter() {
                if face != queen && matching.is_queen(face) {
                    assert!(matching.priority(face) < matching.priority(queen));
                }
            }
        }
    }

    #[test]
    fn match_dim_caps_the_matching() {
        let graded = graded(solid_triangle(), vec![0; 7]);
        let options = MatchingOptions {
            match_dim: Some(1),
            ..MatchingOptions::default()
        };
        let matching = GenericMorseMatching::new(&graded, &options).unwrap();

        // Only the hollow triangle is matched: one vertex and one edge
        // survive, and the 2-cell is not listed.
        let (begin, reindex) = matching.critical_cells();
        assert_eq!(begin, &[0, 1, 2]);
        assert_eq!(reindex.len(), 2);
        assert!(matching.is_critical(6));
        assert!(reindex.iter().all(|&(old, _)| old != 6));
    }

    #[test]
    fn truncation_skips_high_grades() {
        // Edge and one vertex graded above the cutoff.
        let graded = graded(line_segment(), vec![0, 1, 1]);
        let options = MatchingOptions {
            truncate: true,
            max_grade: 0,
            ..MatchingOptions::default()
        };
        let matching = GenericMorseMatching::new(&graded, &options).unwrap();

        let (_, reindex) = matching.critical_cells();
        assert_eq!(reindex, &[(0, 0)]);
        // Truncated cells are their own mate but are not listed.
        assert!(matching.is_critical(1));
        assert!(matching.is_critical(2));
    }

    #[test]
    fn closure_violation_is_reported() {
        // The edge has a smaller grade than one of its endpoints.
        let graded = graded(line_segment(), vec![0, 5, 1]);
        let result = GenericMorseMatching::new(&graded, &MatchingOptions::default());
        assert_eq!(
            result.err(),
            Some(MatchingError::GradingClosureViolated { cell: 2, face: 1 })
        );
    }
}
