// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `conmat` crate computes discrete Morse reductions of finite cell
//! complexes over the two-element field: given a graded complex, it builds
//! an acyclic partial matching on its cells, constructs the reduced Morse
//! complex with the induced boundary operator and the chain maps relating
//! the two, and iterates the reduction to a fixed point: the connection
//! matrix used in topological data analysis and Conley theory.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use conmat::{
//!     CubicalComplex, GradedComplex, MatchingOptions, connection_matrix,
//! };
//!
//! // The unit square reduces to a single critical vertex.
//! let complex = Rc::new(CubicalComplex::new(vec![2, 2]));
//! let graded = Rc::new(GradedComplex::new(complex, |_| 0));
//! let reduced = connection_matrix(graded, &MatchingOptions::default()).unwrap();
//! assert_eq!(reduced.complex().size(), 1);
//! ```

#![warn(missing_docs)]

pub use crate::algebra::Chain;
pub use crate::complexes::{
    CellComplex, Complex, CubicalComplex, GradedComplex, construct_grading, inclusion_grading,
};
pub use crate::homology::{
    CubicalMorseMatching, GenericMorseMatching, MatchingError, MatchingOptions, MorseComplex,
    MorseMatching, compute_matching, connection_matrix, connection_matrix_tower, homology,
    morse_graded_complex, morse_graded_complex_from_matching,
};

/// Identifier of a cell within a complex: contiguous per complex and
/// partitioned by dimension.
pub type Cell = u64;

/// The grade of a cell in a graded complex.
pub type Grade = i64;

/// The priority of a cell within a matching, serializing the induced flow.
pub type Priority = i64;

mod algebra;
mod complexes;
mod homology;
