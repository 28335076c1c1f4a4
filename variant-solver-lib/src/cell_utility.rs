//! Contains [`CellUtility`] which has methods for working with cells.

use crate::{candidate_index::CandidateIndex, cell_index::CellIndex};
use itertools::Itertools;

/// A utility struct for working with cells of a specific board size.
///
/// Storing the size in the struct avoids passing it to every function.
#[derive(Copy, Clone, Debug)]
pub struct CellUtility {
    size: usize,
}

impl CellUtility {
    /// Creates a new instance.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Gets the size of the board.
    pub fn size(self) -> usize {
        self.size
    }

    /// Gets the number of cells in the board.
    pub fn cell_count(self) -> usize {
        self.size * self.size
    }

    /// Gets the number of candidates in the board.
    pub fn candidate_count(self) -> usize {
        self.cell_count() * self.size
    }

    /// Creates a [`CellIndex`] from a row and column index.
    pub fn cell(self, row: usize, col: usize) -> CellIndex {
        CellIndex::from_rc(row, col, self.size)
    }

    /// Creates a [`CellIndex`] from a linear index.
    pub fn cell_index(self, index: usize) -> CellIndex {
        CellIndex::new(index, self.size)
    }

    /// Creates a [`CandidateIndex`] from a cell and value.
    pub fn candidate(self, cell: CellIndex, value: usize) -> CandidateIndex {
        CandidateIndex::from_cv(cell, value)
    }

    /// Creates a [`CandidateIndex`] from a linear index.
    pub fn candidate_index(self, index: usize) -> CandidateIndex {
        CandidateIndex::new(index, self.size)
    }

    /// Creates an iterator over all cells in the board.
    pub fn all_cells(self) -> impl Iterator<Item = CellIndex> {
        (0..self.cell_count()).map(move |i| self.cell_index(i))
    }

    /// Creates an iterator over all candidates in the board.
    pub fn all_candidates(self) -> impl Iterator<Item = CandidateIndex> {
        (0..self.candidate_count()).map(move |i| self.candidate_index(i))
    }

    /// Returns the candidate pairs for each value within the given cells.
    ///
    /// These are exactly the weak links needed for a group of cells in which
    /// values cannot repeat.
    ///
    /// # Example
    /// ```
    /// # use variant_solver_lib::cell_utility::CellUtility;
    /// let cu = CellUtility::new(9);
    /// let cells = vec![cu.cell(0, 0), cu.cell(0, 1), cu.cell(0, 2)];
    /// let pairs = cu.candidate_pairs(&cells);
    /// assert_eq!(pairs.len(), 27);
    /// let cand1r1c1 = cu.candidate(cu.cell(0, 0), 1);
    /// let cand1r1c2 = cu.candidate(cu.cell(0, 1), 1);
    /// assert!(pairs.contains(&(cand1r1c1, cand1r1c2)));
    /// ```
    pub fn candidate_pairs(self, cells: &[CellIndex]) -> Vec<(CandidateIndex, CandidateIndex)> {
        let mut result = Vec::new();
        for val in 1..=self.size {
            for cell_pair in cells.iter().combinations(2) {
                result.push((cell_pair[0].candidate(val), cell_pair[1].candidate(val)));
            }
        }
        result
    }

    /// Generates a compact description of a group of cells.
    ///
    /// - If they all share a row: `r1c123`
    /// - If they all share a column: `r123c1`
    /// - Otherwise rows with identical column sets are merged into groups
    ///   like `r12c45,r3c6`
    ///
    /// For boards larger than 9x9 the row/column numbers within a group are
    /// comma separated.
    ///
    /// # Example
    /// ```
    /// # use variant_solver_lib::cell_utility::CellUtility;
    /// let cu = CellUtility::new(9);
    /// let cells = vec![cu.cell(0, 0), cu.cell(0, 1), cu.cell(0, 2)];
    /// assert_eq!(cu.compact_name(&cells), "r1c123");
    /// ```
    pub fn compact_name(self, cells: &[CellIndex]) -> String {
        let cell_separator = if self.size <= 9 { "" } else { "," };
        let group_separator = ",";

        if cells.is_empty() {
            return String::new();
        }

        if cells.len() == 1 {
            return cells[0].to_string();
        }

        let cells: Vec<(usize, usize)> = cells.iter().sorted().map(|cell| cell.rc()).collect();

        // If all share a row, list the columns
        let first_row = cells[0].0;
        if cells.iter().all(|cell| cell.0 == first_row) {
            return format!(
                "r{}c{}",
                first_row + 1,
                cells.iter().map(|cell| cell.1 + 1).join(cell_separator)
            );
        }

        // If all share a column, list the rows
        let first_col = cells[0].1;
        if cells.iter().all(|cell| cell.1 == first_col) {
            return format!(
                "r{}c{}",
                cells.iter().map(|cell| cell.0 + 1).join(cell_separator),
                first_col + 1
            );
        }

        // Mixed rows and columns: merge rows with identical column sets
        let mut cols_per_row: Vec<Vec<usize>> = vec![vec![]; self.size];
        for cell in cells {
            cols_per_row[cell.0].push(cell.1 + 1);
        }
        for cols in cols_per_row.iter_mut() {
            cols.sort_unstable();
        }

        let mut groups: Vec<String> = Vec::new();
        for i in 0..self.size {
            if cols_per_row[i].is_empty() {
                continue;
            }

            let mut rows_in_group: Vec<usize> = vec![i + 1];
            for j in i + 1..self.size {
                if cols_per_row[j] == cols_per_row[i] {
                    rows_in_group.push(j + 1);
                    cols_per_row[j].clear();
                }
            }

            groups.push(format!(
                "r{}c{}",
                rows_in_group.iter().join(cell_separator),
                cols_per_row[i].iter().join(cell_separator)
            ));
        }

        groups.join(group_separator)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_compact_name() {
        let cu = CellUtility::new(9);
        assert_eq!(cu.compact_name(&[]), "");
        assert_eq!(cu.compact_name(&[cu.cell(0, 0)]), "r1c1");
        assert_eq!(
            cu.compact_name(&[cu.cell(0, 0), cu.cell(0, 1), cu.cell(0, 2)]),
            "r1c123"
        );
        assert_eq!(
            cu.compact_name(&[cu.cell(0, 0), cu.cell(1, 0), cu.cell(2, 0)]),
            "r123c1"
        );
        assert_eq!(
            cu.compact_name(&[cu.cell(0, 0), cu.cell(1, 1), cu.cell(2, 2)]),
            "r1c1,r2c2,r3c3"
        );
        assert_eq!(
            cu.compact_name(&[
                cu.cell(0, 0),
                cu.cell(0, 1),
                cu.cell(0, 2),
                cu.cell(1, 0),
                cu.cell(2, 0)
            ]),
            "r1c123,r23c1"
        );
        assert_eq!(
            cu.compact_name(&[cu.cell(0, 3), cu.cell(1, 3), cu.cell(0, 4), cu.cell(1, 4)]),
            "r12c45"
        );
    }

    #[test]
    fn test_compact_name_large_board() {
        let cu = CellUtility::new(16);
        assert_eq!(cu.compact_name(&[cu.cell(9, 9)]), "r10c10");
        assert_eq!(
            cu.compact_name(&[cu.cell(0, 9), cu.cell(0, 11)]),
            "r1c10,12"
        );
    }
}
