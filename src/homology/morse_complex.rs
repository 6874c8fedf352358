// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;

use crate::{Cell, Chain, Complex, MorseMatching, Priority};

/// The reduced complex induced by an acyclic partial matching: its cells are
/// the critical cells of the base complex, reindexed contiguously, and its
/// boundary operator is the base boundary pushed through the flow.
///
/// The Morse complex has the same graded homology as its base (below the
/// matching's dimension cap). Besides being a [`Complex`] itself, so that
/// reductions can be iterated, it exposes the chain-level maps relating the
/// two complexes: [`MorseComplex::include`]/[`MorseComplex::project`]
/// translate between the two id spaces, while [`MorseComplex::lift`] and
/// [`MorseComplex::lower`] are chain maps inducing the homology isomorphism.
/// The boundary and coboundary of every critical cell are precomputed at
/// construction; all other state is shared with the base.
pub struct MorseComplex {
    base: Rc<dyn Complex>,
    matching: Rc<dyn MorseMatching>,
    begin: Vec<Cell>,
    include: Vec<Cell>,
    project: HashMap<Cell, Cell>,
    boundaries: Vec<Chain>,
    coboundaries: Vec<Chain>,
}

impl MorseComplex {
    /// Build the Morse complex of `base` induced by `matching`.
    pub fn new(base: Rc<dyn Complex>, matching: Rc<dyn MorseMatching>) -> Self {
        let (begin, reindex) = {
            let (begin, reindex) = matching.critical_cells();
            (begin.to_vec(), reindex.to_vec())
        };

        let mut include = Vec::with_capacity(reindex.len());
        let mut project = HashMap::with_capacity(reindex.len());
        for &(old, new) in &reindex {
            debug_assert_eq!(new as usize, include.len(), "reindex table out of order");
            include.push(old);
            project.insert(old, new);
        }

        let mut complex = Self {
            base,
            matching,
            begin,
            include,
            project,
            boundaries: Vec::new(),
            coboundaries: Vec::new(),
        };

        let size = complex.include.len();
        let mut boundaries = Vec::with_capacity(size);
        for ace in 0..size {
            let included = Chain::from([complex.include[ace]]);
            boundaries.push(complex.lower(&complex.base.boundary(&included)));
        }

        let mut coboundaries = vec![Chain::new(); size];
        for (ace, boundary) in boundaries.iter().enumerate() {
            for face in boundary.iter() {
                coboundaries[face as usize] += ace as Cell;
            }
        }

        complex.boundaries = boundaries;
        complex.coboundaries = coboundaries;
        complex
    }

    /// The base complex this Morse complex reduces.
    pub fn base(&self) -> &Rc<dyn Complex> {
        &self.base
    }

    /// The matching that induced this Morse complex.
    pub fn matching(&self) -> &Rc<dyn MorseMatching> {
        &self.matching
    }

    /// The base-complex cell corresponding to the Morse-complex cell `cell`.
    pub fn include_cell(&self, cell: Cell) -> Cell {
        self.include[cell as usize]
    }

    /// Replace each Morse-complex cell with its base-complex counterpart.
    /// Not a chain map; see [`MorseComplex::lift`] for one.
    pub fn include(&self, chain: &Chain) -> Chain {
        let mut result = Chain::new();
        for cell in chain.iter() {
            result += self.include[cell as usize];
        }
        result
    }

    /// Replace each critical base-complex cell with its Morse-complex
    /// counterpart, dropping non-critical cells. Not a chain map; see
    /// [`MorseComplex::lower`] for one.
    pub fn project(&self, chain: &Chain) -> Chain {
        let mut result = Chain::new();
        for cell in chain.iter() {
            if let Some(&new) = self.project.get(&cell) {
                result += new;
            }
        }
        result
    }

    /// Push the base chain `input` along the matching until no queen can be
    /// cancelled, returning `(canonical, gamma)` with
    /// `canonical + base.boundary(gamma) = input` and `canonical` supported
    /// away from queens.
    ///
    /// Queens are consumed in descending priority; pushing through a king
    /// only introduces queens that compare no greater, and the acyclicity of
    /// the matching rules out revisiting one, so the loop terminates.
    pub fn flow(&self, input: &Chain) -> (Chain, Chain) {
        let mut canonical = Chain::new();
        let mut gamma = Chain::new();
        let mut queens: BinaryHeap<(Priority, Cell)> = BinaryHeap::new();

        for cell in input.iter() {
            if self.matching.is_queen(cell) {
                queens.push((self.matching.priority(cell), cell));
            }
            canonical += cell;
        }

        while let Some((_, queen)) = queens.pop() {
            // The queen may have been cancelled since it was pushed.
            if !canonical.contains(queen) {
                continue;
            }
            let king = self.matching.mate(queen);
            gamma += king;
            self.base.column(king, &mut |face| {
                if self.matching.is_queen(face) {
                    queens.push((self.matching.priority(face), face));
                }
                canonical += face;
            });
        }

        debug_assert!(!canonical.iter().any(|cell| self.matching.is_queen(cell)));
        (canonical, gamma)
    }

    /// The dual of [`MorseComplex::flow`]: kings and queens change roles,
    /// coboundaries replace boundaries, and priorities are consumed in
    /// ascending order.
    pub fn coflow(&self, input: &Chain) -> (Chain, Chain) {
        let mut cocanonical = Chain::new();
        let mut cogamma = Chain::new();
        let mut kings: BinaryHeap<Reverse<(Priority, Cell)>> = BinaryHeap::new();

        for cell in input.iter() {
            if self.matching.is_king(cell) {
                kings.push(Reverse((self.matching.priority(cell), cell)));
            }
            cocanonical += cell;
        }

        while let Some(Reverse((_, king))) = kings.pop() {
            if !cocanonical.contains(king) {
                continue;
            }
            let queen = self.matching.mate(king);
            cogamma += queen;
            self.base.row(queen, &mut |coface| {
                if self.matching.is_king(coface) {
                    kings.push(Reverse((self.matching.priority(coface), coface)));
                }
                cocanonical += coface;
            });
        }

        debug_assert!(!cocanonical.iter().any(|cell| self.matching.is_king(cell)));
        (cocanonical, cogamma)
    }

    /// Lower the base chain `chain` to the Morse complex. This is a chain
    /// map: it commutes with the boundary operators.
    pub fn lower(&self, chain: &Chain) -> Chain {
        let (canonical, _) = self.flow(chain);
        self.project(&canonical)
    }

    /// Lift the Morse chain `chain` to a canonical representative in the
    /// base complex. This is a chain map: it commutes with the boundary
    /// operators, and `lower(lift(c)) = c`.
    pub fn lift(&self, chain: &Chain) -> Chain {
        let included = self.include(chain);
        let (_, gamma) = self.flow(&self.base.boundary(&included));
        included + gamma
    }

    /// Lower the base cochain `chain` to the Morse complex; the cochain map
    /// dual to [`MorseComplex::lower`].
    pub fn colower(&self, chain: &Chain) -> Chain {
        let (cocanonical, _) = self.coflow(chain);
        self.project(&cocanonical)
    }

    /// Lift the Morse cochain `chain` to the base complex; the cochain map
    /// dual to [`MorseComplex::lift`].
    pub fn colift(&self, chain: &Chain) -> Chain {
        let included = self.include(chain);
        let (_, cogamma) = self.coflow(&self.base.coboundary(&included));
        included + cogamma
    }
}

impl Complex for MorseComplex {
    fn dimension(&self) -> usize {
        self.begin.len() - 2
    }

    fn begin(&self, dim: usize) -> Cell {
        self.begin[dim]
    }

    fn column(&self, cell: Cell, callback: &mut dyn FnMut(Cell)) {
        for face in self.boundaries[cell as usize].iter() {
            callback(face);
        }
    }

    fn row(&self, cell: Cell, callback: &mut dyn FnMut(Cell)) {
        for coface in self.coboundaries[cell as usize].iter() {
            callback(coface);
        }
    }

    fn boundary(&self, chain: &Chain) -> Chain {
        let mut result = Chain::new();
        for cell in chain.iter() {
            result += &self.boundaries[cell as usize];
        }
        result
    }

    fn coboundary(&self, chain: &Chain) -> Chain {
        let mut result = Chain::new();
        for cell in chain.iter() {
            result += &self.coboundaries[cell as usize];
        }
        result
    }

    fn as_morse(&self) -> Option<&MorseComplex> {
        Some(self)
    }
}
