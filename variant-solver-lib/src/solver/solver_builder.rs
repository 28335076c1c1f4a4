//! Contains the [`SolverBuilder`] struct for building a [`Solver`].

use itertools::Itertools;

use crate::prelude::*;

use std::{collections::HashMap, sync::Arc};

/// Builds a [`Solver`]: collects the board size, regions, constraints,
/// givens, and pencil marks, then assembles and finalizes the board.
///
/// Givens and pencil marks are applied after constraint initialization, so a
/// contradiction among them surfaces as a build error.
#[derive(Clone)]
pub struct SolverBuilder {
    size: usize,
    regions: Vec<usize>,
    constraints: Vec<Arc<dyn Constraint>>,
    givens: Vec<(CellIndex, usize)>,
    given_pencilmarks: Vec<(CellIndex, u32)>,
    center_pencilmarks: Vec<(CellIndex, u32)>,
    custom_info: HashMap<String, String>,
    errors: Vec<String>,
}

impl SolverBuilder {
    /// Creates a new solver builder for a board of the given size.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            regions: Vec::new(),
            constraints: Vec::new(),
            givens: Vec::new(),
            given_pencilmarks: Vec::new(),
            center_pencilmarks: Vec::new(),
            custom_info: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Sets the region index of each cell, in row-major order.
    ///
    /// An empty vector keeps the default boxes. A vector of the correct
    /// length in which every cell carries the same index disables box
    /// regions entirely.
    #[must_use]
    pub fn with_regions(mut self, regions: Vec<usize>) -> Self {
        let size = self.size;
        let num_cells = size * size;

        if regions.is_empty() {
            return self;
        }

        if regions.len() == num_cells && regions.iter().all(|&region| region == regions[0]) {
            return self.with_no_regions();
        }

        if regions.len() != num_cells {
            self.errors.push(format!(
                "Region vector is of length {}, expected {}",
                regions.len(),
                num_cells
            ));
            return self;
        }
        for region in 0..size {
            let count = regions.iter().filter(|&&index| index == region).count();
            if count != size {
                self.errors.push(format!(
                    "Region vector contains {} instances of region index {}, expected {}",
                    count, region, size
                ));
                return self;
            }
        }
        self.regions = regions;
        self
    }

    /// Disables box regions; only rows, columns, and constraints remain.
    #[must_use]
    pub fn with_no_regions(mut self) -> Self {
        // A single all-covering region index is rejected by the board's
        // region registry, leaving no boxes.
        self.regions = vec![0; self.size * self.size];
        self
    }

    /// Replaces the list of constraints to use.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Vec<Arc<dyn Constraint>>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Appends a constraint to the list of constraints to use.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Arc<dyn Constraint>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends a given value.
    #[must_use]
    pub fn with_given(mut self, cell: CellIndex, value: usize) -> Self {
        self.givens.push((cell, value));
        self
    }

    /// Appends multiple given values.
    #[must_use]
    pub fn with_givens(mut self, givens: &[(CellIndex, usize)]) -> Self {
        self.givens.extend(givens);
        self
    }

    /// Appends givens from a string in row-major order, with `0` or any
    /// non-digit for an empty cell. Above size 9 every value takes the same
    /// number of characters, zero padded (`01` for 1).
    #[must_use]
    pub fn with_givens_string(mut self, givens: &str) -> Self {
        let cu = CellUtility::new(self.size);
        if self.size <= 9 {
            if givens.len() != cu.cell_count() {
                self.errors.push("Invalid givens string length".to_owned());
                return self;
            }

            self.givens.extend(givens.chars().enumerate().filter_map(|(i, c)| {
                let value = c.to_digit(10)?;
                if value == 0 {
                    None
                } else {
                    Some((cu.cell_index(i), value as usize))
                }
            }));
        } else {
            let num_digits = self.size.to_string().len();
            if givens.len() != cu.cell_count() * num_digits {
                self.errors.push("Invalid givens string length".to_owned());
                return self;
            }

            let chunks = givens.chars().chunks(num_digits);
            self.givens
                .extend(chunks.into_iter().enumerate().filter_map(|(i, chunk)| {
                    let value = chunk.collect::<String>().parse::<usize>().ok()?;
                    if value == 0 {
                        None
                    } else {
                        Some((cu.cell_index(i), value))
                    }
                }));
        }
        self
    }

    /// Restricts a cell to the given pencil-marked values.
    #[must_use]
    pub fn with_given_pencilmarks(mut self, cell: CellIndex, values: &[usize]) -> Self {
        self.given_pencilmarks.push((cell, values_mask(values)));
        self
    }

    /// Restricts a cell to its center pencil-marked values. Center marks are
    /// solver-visible state rather than puzzle rules; callers include them
    /// for logical queries and omit them for brute-force ones.
    #[must_use]
    pub fn with_center_pencilmarks(mut self, cell: CellIndex, values: &[usize]) -> Self {
        self.center_pencilmarks.push((cell, values_mask(values)));
        self
    }

    /// Attaches an opaque key/value for the query layer to read back.
    #[must_use]
    pub fn with_custom_info(mut self, key: &str, value: &str) -> Self {
        self.custom_info.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Builds the solver: creates the board, initializes and finalizes the
    /// constraints, and applies givens and pencil marks.
    pub fn build(self) -> Result<Solver, String> {
        if !self.errors.is_empty() {
            return Err(self.errors.join(", "));
        }

        let mut board = Board::new(self.size, &self.regions, self.constraints);
        board.finalize_constraints()?;

        for (cell, value) in self.givens {
            if !board.set_as_given(cell, value) {
                return Err(format!("Failed to set given {}{}", value, cell));
            }
        }

        for (cell, mask) in self
            .given_pencilmarks
            .into_iter()
            .chain(self.center_pencilmarks)
        {
            if board.keep_cell_mask(cell, mask).is_invalid() {
                return Err(format!(
                    "Pencil marks leave {} without candidates",
                    cell.name()
                ));
            }
        }

        Ok(Solver::from_parts(board, self.custom_info))
    }
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new(9)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_solver_default() {
        let solver = SolverBuilder::default().build().unwrap();
        let board = solver.board();

        assert_eq!(board.size(), 9);
        assert_eq!(board.non_given_count(), 81);
        assert!(!board.is_solved());
        assert_eq!(board.regions().len(), 27);
        assert_eq!(board.constraints().len(), 0);
    }

    #[test]
    fn test_solver_no_regions() {
        let solver = SolverBuilder::default().with_no_regions().build().unwrap();
        assert_eq!(solver.board().regions().len(), 18);
    }

    #[test]
    fn test_bad_region_vector() {
        assert!(SolverBuilder::new(9)
            .with_regions(vec![0; 80])
            .build()
            .is_err());

        let mut regions = default_regions(9);
        regions[0] = 1;
        assert!(SolverBuilder::new(9).with_regions(regions).build().is_err());
    }

    #[test]
    fn test_conflicting_givens_fail_to_build() {
        let cu = CellUtility::new(9);
        let result = SolverBuilder::new(9)
            .with_given(cu.cell(0, 0), 5)
            .with_given(cu.cell(0, 1), 5)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_givens_string() {
        let solver = SolverBuilder::new(9)
            .with_givens_string(
                "123000000000000000000000000000000000000000000000000000000000000000000000000000000",
            )
            .build()
            .unwrap();
        let cu = solver.cell_utility();
        assert!(solver.board().is_given(cu.cell(0, 0)));
        assert_eq!(solver.board().value(cu.cell(0, 0)), 1);
        assert_eq!(solver.board().value(cu.cell(0, 2)), 3);
        assert!(!solver.board().is_given(cu.cell(0, 3)));
        assert_eq!(min_value(solver.board().candidates(cu.cell(0, 3))), 4);
    }

    #[test]
    fn test_givens_string_large() {
        let mut givens = String::from("0112");
        givens.push_str(&"00".repeat(12 * 12 - 2));
        let solver = SolverBuilder::new(12)
            .with_givens_string(&givens)
            .build()
            .unwrap();
        let cu = solver.cell_utility();
        assert_eq!(solver.board().value(cu.cell(0, 0)), 1);
        assert_eq!(solver.board().value(cu.cell(0, 1)), 12);
    }
}
