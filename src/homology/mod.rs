// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use cubical::CubicalMorseMatching;
pub use error::MatchingError;
pub use generic::GenericMorseMatching;
pub use graded::{morse_graded_complex, morse_graded_complex_from_matching};
pub use morse_complex::MorseComplex;
pub use reduce::{connection_matrix, connection_matrix_tower, homology};
pub use traits::{MatchingOptions, MorseMatching, compute_matching};

mod cubical;
mod error;
mod generic;
mod graded;
mod morse_complex;
mod reduce;
mod traits;
