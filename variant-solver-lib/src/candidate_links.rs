//! Contains [`CandidateLinks`] for storing a set of linked candidates.

use crate::prelude::*;
use bitvec::prelude::*;

/// A set of candidates, stored as one bit per candidate of the board.
///
/// One of these per candidate forms the adjacency rows of the weak-link
/// graph; the same structure is used as a scratch set when intersecting
/// neighborhoods during cell forcing and tuple scans.
#[derive(Clone, Debug)]
pub struct CandidateLinks {
    links: BitVec,
    size: usize,
}

impl CandidateLinks {
    /// Creates an empty set sized for the given board.
    pub fn new(size: usize) -> Self {
        let num_candidates = size * size * size;
        Self {
            links: bitvec!(0; num_candidates),
            size,
        }
    }

    /// Returns true if the candidate is in the set.
    pub fn is_linked(&self, candidate: CandidateIndex) -> bool {
        self.links[candidate.index()]
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.links.not_any()
    }

    /// Sets the membership of the given candidate.
    ///
    /// Returns true if the membership changed.
    pub fn set(&mut self, candidate: CandidateIndex, value: bool) -> bool {
        if self.is_linked(candidate) == value {
            return false;
        }

        self.links.set(candidate.index(), value);

        true
    }

    /// Unions the other set into this one.
    pub fn union(&mut self, other: &Self) {
        self.links |= &other.links;
    }

    /// Intersects this set with the other one.
    pub fn intersect(&mut self, other: &Self) {
        self.links &= &other.links;
    }

    /// Returns an iterator over the candidates in the set.
    pub fn links(&self) -> impl Iterator<Item = CandidateIndex> + '_ {
        let cu = CellUtility::new(self.size);
        self.links.iter_ones().map(move |i| cu.candidate_index(i))
    }
}

impl std::fmt::Display for CandidateLinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CandidateLinks {{")?;
        for candidate in self.links() {
            write!(f, " {}", candidate)?;
        }
        write!(f, " }}")
    }
}
