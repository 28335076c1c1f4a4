//! Contains [`WeakLinks`], the graph of binary mutual exclusions between
//! candidates.

use crate::prelude::*;

/// The weak-link graph of a board.
///
/// An edge between candidates A and B means they cannot both hold. The graph
/// is undirected, irreflexive, and idempotent on insert; it is stored as a
/// dense adjacency of one [`CandidateLinks`] row per candidate.
#[derive(Clone, Debug)]
pub struct WeakLinks {
    links: Vec<CandidateLinks>,
    total: usize,
}

impl WeakLinks {
    /// Creates an empty graph sized for the given board.
    pub fn new(size: usize) -> Self {
        let num_candidates = size * size * size;
        Self {
            links: vec![CandidateLinks::new(size); num_candidates],
            total: 0,
        }
    }

    /// Adds an edge between the two candidates.
    ///
    /// Inserting an edge that already exists does nothing; a self edge is
    /// rejected (callers treat a self link as "this candidate is impossible"
    /// and eliminate it instead). Returns the number of directed links added.
    pub fn add(&mut self, candidate0: CandidateIndex, candidate1: CandidateIndex) -> usize {
        if candidate0 == candidate1 {
            return 0;
        }

        let mut added = 0;
        if self.links[candidate0.index()].set(candidate1, true) {
            added += 1;
        }
        if self.links[candidate1.index()].set(candidate0, true) {
            added += 1;
        }
        self.total += added;
        added
    }

    /// Returns true if the two candidates are linked.
    pub fn is_linked(&self, candidate0: CandidateIndex, candidate1: CandidateIndex) -> bool {
        self.links[candidate0.index()].is_linked(candidate1)
    }

    /// The adjacency row of the given candidate.
    pub fn links_for(&self, candidate: CandidateIndex) -> &CandidateLinks {
        &self.links[candidate.index()]
    }

    /// The total number of directed links in the graph.
    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_is_symmetric_and_idempotent() {
        let cu = CellUtility::new(9);
        let mut links = WeakLinks::new(9);
        let a = cu.candidate(cu.cell(0, 0), 1);
        let b = cu.candidate(cu.cell(4, 4), 1);

        assert_eq!(links.add(a, b), 2);
        assert!(links.is_linked(a, b));
        assert!(links.is_linked(b, a));
        assert_eq!(links.add(a, b), 0);
        assert_eq!(links.add(b, a), 0);
        assert_eq!(links.total(), 2);
    }

    #[test]
    fn test_self_link_rejected() {
        let cu = CellUtility::new(9);
        let mut links = WeakLinks::new(9);
        let a = cu.candidate(cu.cell(0, 0), 1);
        assert_eq!(links.add(a, a), 0);
        assert!(!links.is_linked(a, a));
        assert_eq!(links.total(), 0);
    }
}
