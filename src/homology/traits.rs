// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use crate::homology::cubical::CubicalMorseMatching;
use crate::homology::generic::GenericMorseMatching;
use crate::{Cell, Complex, Grade, GradedComplex, MatchingError, Priority};

/// An acyclic partial matching on the cells of a complex, the combinatorial
/// surrogate for a discrete Morse function.
///
/// The matching pairs *queen* cells with *king* cells of exactly one greater
/// dimension and the same grade; unmatched cells are *aces* (critical).
/// Because cell ids ascend with dimension, the trichotomy is recovered from
/// id order: a queen is smaller than its mate, a king greater, an ace equal.
///
/// Flipping each matched edge of the grade-preserving Hasse diagram must
/// leave the diagram acyclic. The [`MorseMatching::priority`] values
/// serialize the induced flow: whenever queen `q` is matched to king `k`,
/// no queen in the boundary of `k` may compare greater than `q`.
/// [`crate::MorseComplex`] relies on this, together with acyclicity, to
/// terminate.
pub trait MorseMatching {
    /// The mate of `cell`: its matched partner, or `cell` itself if the cell
    /// is critical or was excluded from matching (fringe, truncated, or
    /// above the dimension cap).
    fn mate(&self, cell: Cell) -> Cell;

    /// The priority of `cell`, ordering queens within the flow.
    fn priority(&self, cell: Cell) -> Priority;

    /// The critical cells, reindexed: a begin table with one entry per
    /// matched dimension plus a sentinel, and `(old, new)` pairs in
    /// ascending new id, contiguous by dimension.
    fn critical_cells(&self) -> (&[Cell], &[(Cell, Cell)]);

    /// Whether `cell` is critical.
    fn is_critical(&self, cell: Cell) -> bool {
        self.mate(cell) == cell
    }

    /// Whether `cell` is a queen: matched upward.
    fn is_queen(&self, cell: Cell) -> bool {
        cell < self.mate(cell)
    }

    /// Whether `cell` is a king: matched downward.
    fn is_king(&self, cell: Cell) -> bool {
        cell > self.mate(cell)
    }
}

/// Configuration shared by both matching backends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatchingOptions {
    /// Cap matching at this dimension: cells of strictly greater dimension
    /// are neither matched nor listed as critical, and homology below the
    /// cap remains correct. `None` matches the full complex.
    pub match_dim: Option<usize>,

    /// When set, skip every cell whose grade exceeds [`Self::max_grade`];
    /// such cells are neither matched nor listed as critical.
    pub truncate: bool,

    /// The largest grade still matched when [`Self::truncate`] is set.
    pub max_grade: Grade,
}

/// Compute an acyclic partial matching on `graded`, dispatching to the
/// cubical backend when the underlying complex is cubical and to the generic
/// coreduction backend otherwise.
///
/// # Errors
/// [`MatchingError::GradingClosureViolated`] if the grading violates the
/// closure property; [`MatchingError::InvariantViolated`] if the coreduction
/// state corrupts (a bug, not a usage error).
pub fn compute_matching(
    graded: &Rc<GradedComplex>,
    options: &MatchingOptions,
) -> Result<Rc<dyn MorseMatching>, MatchingError> {
    if graded.complex().as_cubical().is_some() {
        Ok(Rc::new(CubicalMorseMatching::new(Rc::clone(graded), options)?))
    } else {
        Ok(Rc::new(GenericMorseMatching::new(graded, options)?))
    }
}
