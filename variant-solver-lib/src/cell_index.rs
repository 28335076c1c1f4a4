//! Contains [`CellIndex`] for representing the location of a cell on the board.

use crate::candidate_index::CandidateIndex;

/// The location of a cell, stored as `row * size + col` along with the board
/// size so that row/column math and candidate conversion need no extra
/// parameters.
#[derive(Clone, Copy, Debug)]
pub struct CellIndex {
    index: usize,
    size: usize,
}

impl CellIndex {
    /// Creates a new instance from a linear index.
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    /// Creates a new instance from a row and column index (0-based).
    ///
    /// # Example
    /// ```
    /// # use variant_solver_lib::cell_index::CellIndex;
    /// assert_eq!(CellIndex::from_rc(0, 0, 9).index(), 0);
    /// assert_eq!(CellIndex::from_rc(1, 2, 9).index(), 11);
    /// assert_eq!(CellIndex::from_rc(8, 8, 9).index(), 80);
    /// ```
    pub fn from_rc(row: usize, col: usize, size: usize) -> Self {
        Self {
            index: row * size + col,
            size,
        }
    }

    /// Gets the linear index of the cell.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Gets the size of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the row of the cell (0-based).
    pub fn row(&self) -> usize {
        self.index / self.size
    }

    /// Gets the column of the cell (0-based).
    pub fn col(&self) -> usize {
        self.index % self.size
    }

    /// Gets the row and column of the cell (0-based).
    pub fn rc(&self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Gets the [`CandidateIndex`] for the given value in this cell.
    pub fn candidate(&self, value: usize) -> CandidateIndex {
        CandidateIndex::from_cv(*self, value)
    }

    /// Gets the cell offset by the given number of rows and columns, if it is
    /// still on the board.
    ///
    /// # Example
    /// ```
    /// # use variant_solver_lib::cell_index::CellIndex;
    /// let cell = CellIndex::from_rc(0, 0, 9);
    /// assert_eq!(cell.offset(1, 2), Some(CellIndex::from_rc(1, 2, 9)));
    /// assert_eq!(cell.offset(-1, 0), None);
    /// ```
    pub fn offset(&self, row_offset: isize, col_offset: isize) -> Option<CellIndex> {
        let row = self.row() as isize + row_offset;
        let col = self.col() as isize + col_offset;
        if row < 0 || row >= self.size as isize || col < 0 || col >= self.size as isize {
            None
        } else {
            Some(CellIndex::from_rc(row as usize, col as usize, self.size))
        }
    }

    /// The uppercase name of the cell, as used in logical step messages.
    ///
    /// # Example
    /// ```
    /// # use variant_solver_lib::cell_index::CellIndex;
    /// assert_eq!(CellIndex::from_rc(0, 3, 9).name(), "R1C4");
    /// ```
    pub fn name(&self) -> String {
        format!("R{}C{}", self.row() + 1, self.col() + 1)
    }
}

impl std::fmt::Display for CellIndex {
    /// The lowercase compact form, as used in elimination lists.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}c{}", self.row() + 1, self.col() + 1)
    }
}

impl Eq for CellIndex {}

impl PartialEq for CellIndex {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Ord for CellIndex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl PartialOrd for CellIndex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for CellIndex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cell_index() {
        let cell = CellIndex::new(40, 9);
        assert_eq!(cell.rc(), (4, 4));
        assert_eq!(cell.to_string(), "r5c5");
        assert_eq!(cell.name(), "R5C5");
        assert_eq!(cell.candidate(5).index(), 364);
    }

    #[test]
    fn test_offset() {
        let cell = CellIndex::from_rc(4, 4, 9);
        assert_eq!(cell.offset(2, 1), Some(CellIndex::from_rc(6, 5, 9)));
        assert_eq!(cell.offset(-4, -4), Some(CellIndex::from_rc(0, 0, 9)));
        assert_eq!(cell.offset(5, 0), None);
        assert_eq!(cell.offset(0, -5), None);
    }
}
