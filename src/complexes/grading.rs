// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grading constructions for cubical complexes.
//!
//! Gradings are returned as one grade per cell, ready for
//! [`crate::GradedComplex::from_values`]. Both constructions satisfy the
//! closure property by design: a face's top star contains its cofaces' top
//! stars, and a closure is closed under taking faces.

use crate::{Cell, Complex, CubicalComplex, Grade};

/// Extend grades given on the top-dimensional cells to the whole complex:
/// the grade of a cell is the minimum grade over its top star.
///
/// `top_grades` holds one grade per top-dimensional cell, indexed by
/// `cell - begin(dimension())`.
///
/// # Panics
/// Panics if `top_grades` does not have one entry per top-dimensional cell.
#[must_use]
pub fn construct_grading(complex: &CubicalComplex, top_grades: &[Grade]) -> Vec<Grade> {
    let top_dim = complex.dimension();
    let top_begin = complex.begin(top_dim);
    assert_eq!(
        top_grades.len() as Cell,
        complex.size_of_dim(top_dim),
        "one grade required per top-dimensional cell"
    );

    (0..complex.size())
        .map(|cell| {
            complex
                .topstar(cell)
                .into_iter()
                .map(|top| top_grades[(top - top_begin) as usize])
                .min()
                .expect("top star is never empty")
        })
        .collect()
}

/// Grade the cells in the closure of `included` with 0 and all others with 1.
#[must_use]
pub fn inclusion_grading(
    complex: &CubicalComplex,
    included: impl IntoIterator<Item = Cell>,
) -> Vec<Grade> {
    let closed = complex.closure(included);
    (0..complex.size())
        .map(|cell| if closed.contains(&cell) { 0 } else { 1 })
        .collect()
}
