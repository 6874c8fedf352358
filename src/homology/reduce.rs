// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use tracing::info;

use crate::homology::graded::morse_graded_complex;
use crate::{
    Complex, GradedComplex, MatchingError, MatchingOptions, MorseComplex, compute_matching,
};

/// Reduce `base` to a fixed point of the Morse reduction under the trivial
/// grading. The result has the same homology as `base` (below `match_dim`
/// when one is given) and admits no further reduction; for a complex whose
/// reduction stabilizes at empty boundary, its cell counts per dimension are
/// the Betti numbers.
///
/// Each round's size is strictly smaller until the fixed point, so the loop
/// terminates after at most `base.size()` rounds.
///
/// # Errors
/// Propagates [`MatchingError`] from the matching construction.
pub fn homology(
    base: Rc<dyn Complex>,
    match_dim: Option<usize>,
) -> Result<Rc<dyn Complex>, MatchingError> {
    let options = MatchingOptions {
        match_dim,
        ..MatchingOptions::default()
    };

    let mut current = base;
    let mut round = 0;
    loop {
        let graded = Rc::new(GradedComplex::new(Rc::clone(&current), |_| 0));
        let matching = compute_matching(&graded, &options)?;
        let next = Rc::new(MorseComplex::new(Rc::clone(&current), matching));
        round += 1;
        info!(round, size = next.size(), "homology reduction round");
        if next.size() == current.size() {
            return Ok(current);
        }
        current = next;
    }
}

/// Iterate the graded Morse reduction to a fixed point: the connection
/// matrix of `base`. The result is the minimal graded complex with the same
/// graded homology, reachable through the matchings selected by `options`.
///
/// # Errors
/// Propagates [`MatchingError`] from the matching construction.
pub fn connection_matrix(
    base: Rc<GradedComplex>,
    options: &MatchingOptions,
) -> Result<Rc<GradedComplex>, MatchingError> {
    let mut current = base;
    let mut round = 0;
    loop {
        let next = morse_graded_complex(&current, options)?;
        round += 1;
        info!(
            round,
            size = next.complex().size(),
            "connection matrix round"
        );
        if next.complex().size() == current.complex().size() {
            return Ok(current);
        }
        current = next;
    }
}

/// As [`connection_matrix`], returning the whole tower of intermediate
/// graded complexes: the initial complex first, each strictly smaller stage
/// after it, ending with the stable fixed point.
///
/// # Errors
/// Propagates [`MatchingError`] from the matching construction.
pub fn connection_matrix_tower(
    base: Rc<GradedComplex>,
    options: &MatchingOptions,
) -> Result<Vec<Rc<GradedComplex>>, MatchingError> {
    let mut tower = vec![Rc::clone(&base)];
    let mut current = base;
    loop {
        let next = morse_graded_complex(&current, options)?;
        if next.complex().size() == current.complex().size() {
            return Ok(tower);
        }
        tower.push(Rc::clone(&next));
        current = next;
    }
}
