// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use cell_complex::CellComplex;
pub use cubical::CubicalComplex;
pub use graded::GradedComplex;
pub use grading::{construct_grading, inclusion_grading};
pub use traits::Complex;

mod cell_complex;
mod cubical;
mod graded;
mod grading;
mod traits;
