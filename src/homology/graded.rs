// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use crate::{
    Complex, Grade, GradedComplex, MatchingError, MatchingOptions, MorseComplex, MorseMatching,
    compute_matching,
};

/// Reduce a graded complex by one matching round, transferring grades to the
/// Morse complex through inclusion.
///
/// Each critical cell inherits the grade of the base cell it includes to;
/// the closure property carries over because induced boundary entries only
/// arise from flow paths within a single grade.
///
/// # Errors
/// Propagates [`MatchingError`] from the matching construction.
pub fn morse_graded_complex(
    base: &Rc<GradedComplex>,
    options: &MatchingOptions,
) -> Result<Rc<GradedComplex>, MatchingError> {
    let matching = compute_matching(base, options)?;
    Ok(morse_graded_complex_from_matching(base, matching))
}

/// As [`morse_graded_complex`], with the matching supplied by the caller.
pub fn morse_graded_complex_from_matching(
    base: &Rc<GradedComplex>,
    matching: Rc<dyn MorseMatching>,
) -> Rc<GradedComplex> {
    let complex = Rc::new(MorseComplex::new(Rc::clone(base.complex()), matching));
    let values: Vec<Grade> = (0..complex.size())
        .map(|cell| base.value(complex.include_cell(cell)))
        .collect();
    Rc::new(GradedComplex::from_values(complex, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellComplex, Chain, Complex};

    #[test]
    fn grades_transfer_through_inclusion() {
        // An edge graded 1 with endpoints graded 0 and 1: the coreduction
        // pairs the edge with its grade-1 endpoint, leaving the grade-0
        // vertex critical at its own grade.
        let complex: Rc<dyn Complex> = Rc::new(CellComplex::new(
            vec![0, 0, 1],
            vec![Chain::new(), Chain::new(), Chain::from([0, 1])],
        ));
        let base = Rc::new(GradedComplex::from_values(complex, vec![0, 1, 1]));
        let reduced = morse_graded_complex(&base, &MatchingOptions::default()).unwrap();

        assert_eq!(reduced.complex().size(), 1);
        let morse = reduced.complex().as_morse().unwrap();
        assert_eq!(morse.include_cell(0), 0);
        assert_eq!(reduced.value(0), 0);
    }
}
