//! Contains [`ConstraintBuilder`], the registry mapping puzzle-format keys to
//! constraint factories.

use std::sync::Arc;
use variant_solver_lib::prelude::*;

use crate::board_data::{BoardData, CellParser};

/// A factory producing the constraints for one puzzle-format key.
///
/// The factory reads its own entries out of the [`BoardData`] and returns
/// one constraint instance per entry, or none when the key is absent.
pub type ConstraintFactory =
    fn(&BoardData, &CellParser) -> Result<Vec<Arc<dyn Constraint>>, String>;

/// A registry of puzzle-format keys and their constraint factories.
///
/// Invoked once per puzzle to populate a board; registration order decides
/// constraint order on the board.
pub struct ConstraintBuilder {
    factories: Vec<(&'static str, ConstraintFactory)>,
}

impl ConstraintBuilder {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Creates a registry with the standard constraint catalogue.
    pub fn standard() -> Self {
        let mut builder = Self::new();
        builder.register("diagonal+", build_diagonal_p);
        builder.register("diagonal-", build_diagonal_n);
        builder.register("antiknight", build_antiknight);
        builder.register("antiking", build_antiking);
        builder.register("extraregion", build_extra_regions);
        builder.register("killercage", build_killer_cages);
        builder.register("clone", build_clones);
        builder
    }

    /// Registers a factory for a puzzle-format key. Re-registering a key
    /// replaces the previous factory in place.
    pub fn register(&mut self, key: &'static str, factory: ConstraintFactory) {
        match self.factories.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = factory,
            None => self.factories.push((key, factory)),
        }
    }

    /// The registered keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.iter().map(|(key, _)| *key)
    }

    /// Builds every constraint the puzzle asks for.
    pub fn build(
        &self,
        data: &BoardData,
        cells: &CellParser,
    ) -> Result<Vec<Arc<dyn Constraint>>, String> {
        let mut constraints = Vec::new();
        for (_, factory) in &self.factories {
            constraints.extend(factory(data, cells)?);
        }
        Ok(constraints)
    }
}

impl Default for ConstraintBuilder {
    fn default() -> Self {
        Self::standard()
    }
}

fn build_diagonal_p(
    data: &BoardData,
    _cells: &CellParser,
) -> Result<Vec<Arc<dyn Constraint>>, String> {
    if !data.diagonal_p {
        return Ok(Vec::new());
    }
    Ok(vec![Arc::new(
        crate::non_repeat_constraint::NonRepeatConstraint::from_diagonalp(data.size),
    )])
}

fn build_diagonal_n(
    data: &BoardData,
    _cells: &CellParser,
) -> Result<Vec<Arc<dyn Constraint>>, String> {
    if !data.diagonal_n {
        return Ok(Vec::new());
    }
    Ok(vec![Arc::new(
        crate::non_repeat_constraint::NonRepeatConstraint::from_diagonaln(data.size),
    )])
}

fn build_antiknight(
    data: &BoardData,
    _cells: &CellParser,
) -> Result<Vec<Arc<dyn Constraint>>, String> {
    if !data.antiknight {
        return Ok(Vec::new());
    }
    Ok(vec![Arc::new(
        crate::chess_constraint::ChessConstraint::anti_knight(),
    )])
}

fn build_antiking(
    data: &BoardData,
    _cells: &CellParser,
) -> Result<Vec<Arc<dyn Constraint>>, String> {
    if !data.antiking {
        return Ok(Vec::new());
    }
    Ok(vec![Arc::new(
        crate::chess_constraint::ChessConstraint::anti_king(),
    )])
}

fn build_extra_regions(
    data: &BoardData,
    cells: &CellParser,
) -> Result<Vec<Arc<dyn Constraint>>, String> {
    let mut constraints: Vec<Arc<dyn Constraint>> = Vec::new();
    for entry in &data.extraregion {
        let region_cells = cells.parse_cells(&entry.cells, data.size)?;
        let name = format!(
            "Extra Region at {}",
            region_cells
                .iter()
                .min()
                .map(|cell| cell.name())
                .unwrap_or_default()
        );
        constraints.push(Arc::new(
            crate::non_repeat_constraint::NonRepeatConstraint::new(&name, region_cells),
        ));
    }
    Ok(constraints)
}

fn build_killer_cages(
    data: &BoardData,
    cells: &CellParser,
) -> Result<Vec<Arc<dyn Constraint>>, String> {
    let mut constraints: Vec<Arc<dyn Constraint>> = Vec::new();
    for entry in &data.killercage {
        let cage_cells = cells.parse_cells(&entry.cells, data.size)?;
        constraints.push(Arc::new(
            crate::killer_cage_constraint::KillerCageConstraint::new(cage_cells, entry.value),
        ));
    }
    Ok(constraints)
}

fn build_clones(
    data: &BoardData,
    cells: &CellParser,
) -> Result<Vec<Arc<dyn Constraint>>, String> {
    let mut constraints: Vec<Arc<dyn Constraint>> = Vec::new();
    for entry in &data.clones {
        let sources = cells.parse_cells(&entry.cells, data.size)?;
        let clones = cells.parse_cells(&entry.clone_cells, data.size)?;
        if sources.len() != clones.len() {
            return Err("Clone groups must pair up cell for cell".to_owned());
        }
        let name = match sources.first() {
            Some(cell) => format!("Clone at {}", cell.name()),
            None => continue,
        };
        let pairs = sources.into_iter().zip(clones).collect();
        constraints.push(Arc::new(crate::clone_constraint::CloneConstraint::new(
            &name, pairs,
        )));
    }
    Ok(constraints)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_standard_keys() {
        let builder = ConstraintBuilder::standard();
        let keys: Vec<&str> = builder.keys().collect();
        assert_eq!(
            keys,
            vec![
                "diagonal+",
                "diagonal-",
                "antiknight",
                "antiking",
                "extraregion",
                "killercage",
                "clone"
            ]
        );
    }

    #[test]
    fn test_build_from_data() {
        let mut data = BoardData::empty(9);
        data.antiknight = true;
        data.killercage.push(crate::board_data::CageData {
            cells: vec!["R1C1".to_owned(), "R1C2".to_owned()],
            value: Some(10),
        });

        let builder = ConstraintBuilder::standard();
        let constraints = builder.build(&data, &CellParser::new()).unwrap();
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].specific_name(), "Anti-Knight");
        assert_eq!(constraints[1].specific_name(), "Killer Cage at R1C1");
    }

    #[test]
    fn test_register_replaces() {
        let mut builder = ConstraintBuilder::standard();
        let count = builder.keys().count();
        builder.register("antiknight", |_, _| Ok(Vec::new()));
        assert_eq!(builder.keys().count(), count);
    }

    #[test]
    fn test_bad_cell_reference() {
        let mut data = BoardData::empty(9);
        data.extraregion.push(crate::board_data::CellsData {
            cells: vec!["R1C10".to_owned()],
        });
        let builder = ConstraintBuilder::standard();
        assert!(builder.build(&data, &CellParser::new()).is_err());
    }
}
