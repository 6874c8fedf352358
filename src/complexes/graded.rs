// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::rc::Rc;

use crate::{Cell, Complex, Grade};

/// A cell complex together with a total integer grading on its cells.
///
/// The grading must satisfy the closure property: for every cell `x` and
/// every `y` in the boundary of `x`, `value(y) <= value(x)`. The property is
/// the caller's obligation; the matching layer verifies it lazily and reports
/// [`crate::MatchingError::GradingClosureViolated`] when it fails.
///
/// The complex is held behind [`Rc`] so reduction stages can share their
/// bases without copying; both complex and grading are immutable.
pub struct GradedComplex {
    complex: Rc<dyn Complex>,
    value: Box<dyn Fn(Cell) -> Grade>,
}

impl GradedComplex {
    /// Create a graded complex from a grading function.
    pub fn new(complex: Rc<dyn Complex>, value: impl Fn(Cell) -> Grade + 'static) -> Self {
        Self {
            complex,
            value: Box::new(value),
        }
    }

    /// Create a graded complex from one grade per cell.
    ///
    /// # Panics
    /// Panics if `values` does not have one entry per cell.
    pub fn from_values(complex: Rc<dyn Complex>, values: Vec<Grade>) -> Self {
        assert_eq!(values.len() as Cell, complex.size(), "grade count mismatch");
        Self::new(complex, move |cell| values[cell as usize])
    }

    /// The underlying complex.
    pub fn complex(&self) -> &Rc<dyn Complex> {
        &self.complex
    }

    /// The grade of `cell`.
    pub fn value(&self, cell: Cell) -> Grade {
        (self.value)(cell)
    }
}

impl Debug for GradedComplex {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GradedComplex")
            .field("size", &self.complex.size())
            .field("dimension", &self.complex.dimension())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellComplex, Chain};

    #[test]
    fn values_by_vector() {
        let complex: Rc<dyn Complex> = Rc::new(CellComplex::new(
            vec![0, 0, 1],
            vec![Chain::new(), Chain::new(), Chain::from([0, 1])],
        ));
        let graded = GradedComplex::from_values(Rc::clone(&complex), vec![0, 3, 3]);
        assert_eq!(graded.value(0), 0);
        assert_eq!(graded.value(2), 3);
        assert_eq!(graded.complex().size(), 3);
    }

    #[test]
    #[should_panic(expected = "grade count mismatch")]
    fn wrong_value_count_panics() {
        let complex: Rc<dyn Complex> = Rc::new(CellComplex::new(
            vec![0, 0],
            vec![Chain::new(), Chain::new()],
        ));
        GradedComplex::from_values(complex, vec![0]);
    }
}
