// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-point reduction scenarios: Betti numbers of small complexes,
//! connection matrices of the graded split square, and truncated towers.

use std::fs;
use std::rc::Rc;

use conmat::{
    CellComplex, Chain, Complex, Grade, GradedComplex, MatchingOptions, connection_matrix,
    connection_matrix_tower, homology,
};
use serde::Deserialize;
use test_utilities::{circle, line_segment, solid_triangle, split_square, unit_square};

#[test]
fn betti_numbers_of_small_complexes() {
    // A line segment contracts to a point.
    let reduced = homology(Rc::new(line_segment()), None).unwrap();
    assert_eq!(reduced.size(), 1);
    assert_eq!(reduced.size_of_dim(0), 1);

    // A circle has Betti numbers (1, 1).
    let reduced = homology(Rc::new(circle()), None).unwrap();
    assert_eq!(reduced.size_of_dim(0), 1);
    assert_eq!(reduced.size_of_dim(1), 1);

    // A solid triangle contracts to a point.
    let reduced = homology(Rc::new(solid_triangle()), None).unwrap();
    assert_eq!(reduced.size(), 1);
    assert_eq!(reduced.size_of_dim(0), 1);

    // The unit square, through the cubical backend, contracts to a point.
    let reduced = homology(Rc::new(unit_square()), None).unwrap();
    assert_eq!(reduced.size(), 1);
    assert_eq!(reduced.size_of_dim(0), 1);
}

#[test]
fn homology_below_the_dimension_cap() {
    // Capping at dimension 1 sees only the hollow triangle; homology below
    // the cap (dimension 0) is still that of the solid triangle.
    let reduced = homology(Rc::new(solid_triangle()), Some(1)).unwrap();
    assert_eq!(reduced.dimension(), 1);
    assert_eq!(reduced.size_of_dim(0), 1);
}

#[test]
fn split_square_connection_matrix() {
    let (complex, grades) = split_square();
    let base = Rc::new(GradedComplex::from_values(Rc::new(complex), grades));
    let reduced = connection_matrix(base, &MatchingOptions::default()).unwrap();
    let morse = reduced.complex();

    // Two critical cells at grade 0 (the hollow triangle) and one at
    // grade 1 (the 2-cell whose boundary closed the circle).
    assert_eq!(morse.size(), 3);
    assert_eq!(morse.size_of_dim(0), 1);
    assert_eq!(morse.size_of_dim(1), 1);
    assert_eq!(morse.size_of_dim(2), 1);
    assert_eq!(reduced.value(0), 0);
    assert_eq!(reduced.value(1), 0);
    assert_eq!(reduced.value(2), 1);

    // The induced boundary descends the filtration: the grade-1 2-cell
    // kills the grade-0 circle.
    assert_eq!(morse.boundary(&Chain::from([2])), Chain::from([1]));
    assert_eq!(morse.coboundary(&Chain::from([1])), Chain::from([2]));
    assert_eq!(morse.boundary(&Chain::from([1])), Chain::new());
}

#[test]
fn truncated_split_square_tower() {
    let (complex, grades) = split_square();
    let base = Rc::new(GradedComplex::from_values(Rc::new(complex), grades));
    let options = MatchingOptions {
        truncate: true,
        max_grade: 0,
        ..MatchingOptions::default()
    };
    let tower = connection_matrix_tower(Rc::clone(&base), &options).unwrap();

    // The grade-0 circle stabilizes after one round.
    assert_eq!(tower.len(), 2);
    assert!(Rc::ptr_eq(&tower[0], &base));
    let fixed_point = tower.last().unwrap();
    assert_eq!(fixed_point.complex().size(), 2);
    for cell in 0..fixed_point.complex().size() {
        assert_eq!(fixed_point.value(cell), 0);
    }

    // The tower's fixed point agrees with the direct reduction.
    let reduced = connection_matrix(base, &options).unwrap();
    assert_eq!(reduced.complex().size(), fixed_point.complex().size());
}

#[derive(Deserialize)]
struct Fixture {
    complex: CellComplex,
    grades: Vec<Grade>,
}

#[test]
fn connection_matrix_of_serialized_complex() {
    let serialized = fs::read_to_string("testing/complexes/split_square.json")
        .expect("testing complex file not found");
    let fixture: Fixture =
        serde_json::from_str(&serialized).expect("testing complex could not be deserialized");

    let base = Rc::new(GradedComplex::from_values(
        Rc::new(fixture.complex),
        fixture.grades,
    ));
    let reduced = connection_matrix(base, &MatchingOptions::default()).unwrap();
    assert_eq!(reduced.complex().size(), 3);
    assert_eq!(
        reduced.complex().boundary(&Chain::from([2])),
        Chain::from([1])
    );
}
