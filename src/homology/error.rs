// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::Cell;

/// Error type for matching construction failures.
///
/// All variants are reported synchronously from the failing constructor and
/// are fatal to that operation. No shared state has been mutated when one is
/// returned, so the caller may retry with corrected inputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchingError {
    /// A cubical matching was handed a complex that is not cubical.
    ConstructionMismatch,

    /// A boundary neighbor has a strictly greater grade than its cell; the
    /// caller-supplied grading violates the closure property.
    GradingClosureViolated {
        /// The cell whose boundary was inspected.
        cell: Cell,
        /// The offending boundary cell of greater grade.
        face: Cell,
    },

    /// A coreducible cell failed to yield exactly one unmatched boundary
    /// neighbor; the matching state is corrupted.
    InvariantViolated {
        /// The coreducible cell in question.
        cell: Cell,
    },
}

impl Display for MatchingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ConstructionMismatch => {
                write!(
                    f,
                    "cubical morse matching must be constructed with a cubical complex"
                )
            }
            Self::GradingClosureViolated { cell, face } => {
                write!(
                    f,
                    "grading closure property failed: boundary cell {face} of cell {cell} has \
                    greater grade"
                )
            }
            Self::InvariantViolated { cell } => {
                write!(
                    f,
                    "coreducible cell {cell} does not have exactly one unmatched boundary cell"
                )
            }
        }
    }
}

impl Error for MatchingError {}
