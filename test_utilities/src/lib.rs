// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Complex builders shared by the integration tests and benchmarks.

use std::rc::Rc;

use conmat::{Cell, CellComplex, Chain, Complex, CubicalComplex, Grade, GradedComplex};

/// Two vertices joined by a single edge, all grade 0.
pub fn line_segment() -> CellComplex {
    CellComplex::new(
        vec![0, 0, 1],
        vec![Chain::new(), Chain::new(), Chain::from([0, 1])],
    )
}

/// Three vertices and three edges forming a cycle, all grade 0.
pub fn circle() -> CellComplex {
    CellComplex::new(
        vec![0, 0, 0, 1, 1, 1],
        vec![
            Chain::new(),
            Chain::new(),
            Chain::new(),
            Chain::from([0, 1]),
            Chain::from([1, 2]),
            Chain::from([2, 0]),
        ],
    )
}

/// A solid triangle: the circle with a 2-cell filling it.
pub fn solid_triangle() -> CellComplex {
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

/// A square split into two triangles along a diagonal, with grades such that
/// the grade-0 subcomplex is the hollow triangle on vertices 0, 1, 2.
///
/// Cells: vertices 0-3, then edges 01, 12, 20, 23, 30, then the triangles
/// 012 and 023. Grades: the hollow triangle 012 at 0, everything else at 1.
pub fn split_square() -> (CellComplex, Vec<Grade>) {
    let complex = CellComplex::new(
        vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2],
        vec![
            Chain::new(),
            Chain::new(),
            Chain::new(),
            Chain::new(),
            Chain::from([0, 1]),
            Chain::from([1, 2]),
            Chain::from([2, 0]),
            Chain::from([2, 3]),
            Chain::from([3, 0]),
            Chain::from([4, 5, 6]),
            Chain::from([6, 7, 8]),
        ],
    );
    let grades = vec![0, 0, 0, 1, 0, 0, 0, 1, 1, 1, 1];
    (complex, grades)
}

/// The unit square as a cubical complex: four vertices, four edges and one
/// face of interest, padded by fringe cells.
pub fn unit_square() -> CubicalComplex {
    CubicalComplex::new(vec![2, 2])
}

/// The 3x4 vertex grid used by the original test suite: 12 positions per
/// shape, vertices `0..12`, axis-0 edges `12..24`, axis-1 edges `24..36`,
/// squares `36..48`.
pub fn grid_3x4() -> CubicalComplex {
    CubicalComplex::new(vec![3, 4])
}

/// Grades for a cubical complex keeping cells of dimension below two at
/// grade 0 and the 2-cells at grade 1.
pub fn grades_by_top_dim(complex: &CubicalComplex) -> Vec<Grade> {
    (0..complex.size())
        .map(|cell: Cell| if complex.cell_dim(cell) == 2 { 1 } else { 0 })
        .collect()
}

/// Wrap a complex with a trivial (all zero) grading.
pub fn trivially_graded(complex: impl Complex + 'static) -> Rc<GradedComplex> {
    Rc::new(GradedComplex::new(Rc::new(complex), |_| 0))
}

/// Wrap a complex with explicit per-cell grades.
pub fn graded_by_values(complex: impl Complex + 'static, grades: Vec<Grade>) -> Rc<GradedComplex> {
    Rc::new(GradedComplex::from_values(Rc::new(complex), grades))
}
