//! Contains [`PuzzleParser`] for turning a [`BoardData`] into a [`Solver`].

use itertools::Itertools;
use variant_solver_lib::prelude::*;

use crate::board_data::{BoardData, CellParser};
use crate::constraint_builder::ConstraintBuilder;

/// The largest grid whose masks plus given flag fit the mask type.
pub const MAX_SIZE: usize = 31;

/// Parses a [`BoardData`] into a ready [`Solver`].
///
/// Center pencil marks and non-given values are solver progress, not puzzle
/// rules; they are applied only when `treat_pencilmarks_as_given` is set,
/// which logical queries do and brute-force queries do not.
pub struct PuzzleParser {
    cells: CellParser,
    constraints: ConstraintBuilder,
}

impl PuzzleParser {
    /// Creates a parser with the standard constraint catalogue.
    pub fn new() -> Self {
        Self {
            cells: CellParser::new(),
            constraints: ConstraintBuilder::standard(),
        }
    }

    /// Creates a parser with a custom constraint registry.
    pub fn with_constraints(constraints: ConstraintBuilder) -> Self {
        Self {
            cells: CellParser::new(),
            constraints,
        }
    }

    pub fn parse_board(
        &self,
        data: &BoardData,
        treat_pencilmarks_as_given: bool,
    ) -> Result<Solver, String> {
        let size = data.size;
        if size == 0 || size > MAX_SIZE {
            return Err(format!("Unsupported grid size: {}", size));
        }
        if data.grid.len() != size || data.grid.iter().any(|row| row.len() != size) {
            return Err(format!("Grid must be {0}x{0}", size));
        }

        let cu = CellUtility::new(size);
        let boxes = default_regions(size);
        let regions: Vec<usize> = data
            .grid
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, entry)| entry.region.unwrap_or(boxes[index]))
            .collect();

        let mut builder = SolverBuilder::new(size).with_regions(regions);

        for (index, entry) in data.grid.iter().flatten().enumerate() {
            let cell = cu.cell_index(index);

            if entry.value >= 1 && entry.value <= size {
                if entry.given {
                    builder = builder.with_given(cell, entry.value);
                } else if treat_pencilmarks_as_given {
                    // Solver progress: pinned to one candidate but promoted
                    // through the normal naked single path.
                    builder = builder.with_center_pencilmarks(cell, &[entry.value]);
                }
            }

            if !entry.given_pencil_marks.is_empty() {
                builder = builder.with_given_pencilmarks(cell, &entry.given_pencil_marks);
            }
            if treat_pencilmarks_as_given && !entry.center_pencil_marks.is_empty() {
                builder = builder.with_center_pencilmarks(cell, &entry.center_pencil_marks);
            }
        }

        builder = builder.with_custom_info("OriginalCenterMarks", &original_center_marks(data));
        builder = builder.with_constraints(self.constraints.build(data, &self.cells)?);
        builder.build()
    }
}

impl Default for PuzzleParser {
    fn default() -> Self {
        Self::new()
    }
}

/// The center marks of the input, one cell per `;`, values joined with `,`.
/// Cells holding a value render empty, matching the encoding of a solved
/// cell.
fn original_center_marks(data: &BoardData) -> String {
    data.grid
        .iter()
        .flatten()
        .map(|entry| {
            if entry.value >= 1 && entry.value <= data.size {
                String::new()
            } else {
                entry
                    .center_pencil_marks
                    .iter()
                    .sorted()
                    .join(",")
            }
        })
        .join(";")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board_data::GridCell;

    fn givens_grid(size: usize, givens: &[(usize, usize, usize)]) -> BoardData {
        let mut data = BoardData::empty(size);
        for &(row, col, value) in givens {
            data.grid[row][col] = GridCell {
                value,
                given: true,
                ..GridCell::default()
            };
        }
        data
    }

    #[test]
    fn test_parse_givens() {
        let data = givens_grid(9, &[(0, 0, 1), (0, 1, 2)]);
        let solver = PuzzleParser::new().parse_board(&data, false).unwrap();
        let cu = solver.cell_utility();
        assert!(solver.board().is_given(cu.cell(0, 0)));
        assert_eq!(solver.board().value(cu.cell(0, 1)), 2);
    }

    #[test]
    fn test_non_given_values_only_apply_to_logical_queries() {
        let mut data = BoardData::empty(9);
        data.grid[0][0].value = 5;

        let brute = PuzzleParser::new().parse_board(&data, false).unwrap();
        assert_eq!(
            brute.board().candidates(CellIndex::from_rc(0, 0, 9)),
            all_values_mask(9)
        );

        let logical = PuzzleParser::new().parse_board(&data, true).unwrap();
        assert_eq!(
            logical.board().candidates(CellIndex::from_rc(0, 0, 9)),
            value_mask(5)
        );
        assert!(!logical.board().is_given(CellIndex::from_rc(0, 0, 9)));
    }

    #[test]
    fn test_custom_regions() {
        let mut data = BoardData::empty(4);
        // Rows as regions: region index = row
        for row in 0..4 {
            for col in 0..4 {
                data.grid[row][col].region = Some(row);
            }
        }
        let solver = PuzzleParser::new().parse_board(&data, false).unwrap();
        // Row-shaped regions duplicate the built-in rows, so only rows and
        // columns remain.
        assert_eq!(solver.board().regions().len(), 8);
    }

    #[test]
    fn test_conflicting_givens_are_a_build_error() {
        let data = givens_grid(9, &[(0, 0, 5), (0, 1, 5)]);
        assert!(PuzzleParser::new().parse_board(&data, false).is_err());
    }

    #[test]
    fn test_wrong_grid_shape() {
        let mut data = BoardData::empty(9);
        data.grid.pop();
        assert!(PuzzleParser::new().parse_board(&data, false).is_err());
    }
}
