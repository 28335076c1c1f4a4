//! Contains [`BoardData`], the JSON puzzle input format, and [`CellParser`]
//! for the `"R1C1"`-style cell references it uses.

use regex::Regex;
use serde::{Deserialize, Serialize};
use variant_solver_lib::prelude::*;

fn default_size() -> usize {
    9
}

/// A puzzle as supplied by the host: grid size, per-cell values and pencil
/// marks, region assignments, and the constraint-specific entries keyed by
/// constraint name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardData {
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub grid: Vec<Vec<GridCell>>,
    #[serde(rename = "diagonal+", default)]
    pub diagonal_p: bool,
    #[serde(rename = "diagonal-", default)]
    pub diagonal_n: bool,
    #[serde(default)]
    pub antiknight: bool,
    #[serde(default)]
    pub antiking: bool,
    #[serde(default)]
    pub extraregion: Vec<CellsData>,
    #[serde(default)]
    pub killercage: Vec<CageData>,
    #[serde(rename = "clone", default)]
    pub clones: Vec<CloneData>,
}

impl BoardData {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|err| err.to_string())
    }

    /// An empty grid of the given size with default regions.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            title: String::new(),
            author: String::new(),
            grid: vec![vec![GridCell::default(); size]; size],
            diagonal_p: false,
            diagonal_n: false,
            antiknight: false,
            antiking: false,
            extraregion: Vec::new(),
            killercage: Vec::new(),
            clones: Vec::new(),
        }
    }
}

/// One cell of the input grid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridCell {
    /// The value in the cell; 0 for none.
    #[serde(default)]
    pub value: usize,
    /// Whether the value is a given rather than solver progress.
    #[serde(default)]
    pub given: bool,
    /// The region index of the cell; absent cells use the default boxes.
    #[serde(default)]
    pub region: Option<usize>,
    #[serde(rename = "givenPencilMarks", default)]
    pub given_pencil_marks: Vec<usize>,
    #[serde(rename = "centerPencilMarks", default)]
    pub center_pencil_marks: Vec<usize>,
}

/// A plain group of cells, as used by extra regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellsData {
    pub cells: Vec<String>,
}

/// A killer cage: cells plus an optional sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CageData {
    pub cells: Vec<String>,
    #[serde(default)]
    pub value: Option<usize>,
}

/// A clone: two equal-length groups of paired cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneData {
    pub cells: Vec<String>,
    #[serde(rename = "cloneCells")]
    pub clone_cells: Vec<String>,
}

/// Parses `"R1C1"`-style cell references.
#[derive(Clone, Debug)]
pub struct CellParser {
    cell_regex: Regex,
}

impl CellParser {
    pub fn new() -> Self {
        Self {
            cell_regex: Regex::new(r"^[rR](\d+)[cC](\d+)$").expect("cell pattern is valid"),
        }
    }

    /// Parses a single cell reference for a board of the given size.
    pub fn parse_cell(&self, text: &str, size: usize) -> Result<CellIndex, String> {
        let captures = self
            .cell_regex
            .captures(text)
            .ok_or_else(|| format!("Invalid cell reference: {}", text))?;
        let row: usize = captures[1]
            .parse()
            .map_err(|_| format!("Invalid cell reference: {}", text))?;
        let col: usize = captures[2]
            .parse()
            .map_err(|_| format!("Invalid cell reference: {}", text))?;
        if row == 0 || col == 0 || row > size || col > size {
            return Err(format!("Cell reference out of bounds: {}", text));
        }
        Ok(CellIndex::from_rc(row - 1, col - 1, size))
    }

    /// Parses a list of cell references.
    pub fn parse_cells(&self, texts: &[String], size: usize) -> Result<Vec<CellIndex>, String> {
        texts
            .iter()
            .map(|text| self.parse_cell(text, size))
            .collect()
    }
}

impl Default for CellParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_cell() {
        let parser = CellParser::new();
        assert_eq!(
            parser.parse_cell("R1C1", 9).unwrap(),
            CellIndex::from_rc(0, 0, 9)
        );
        assert_eq!(
            parser.parse_cell("r5c9", 9).unwrap(),
            CellIndex::from_rc(4, 8, 9)
        );
        assert_eq!(
            parser.parse_cell("R16C16", 16).unwrap(),
            CellIndex::from_rc(15, 15, 16)
        );
        assert!(parser.parse_cell("R0C1", 9).is_err());
        assert!(parser.parse_cell("R10C1", 9).is_err());
        assert!(parser.parse_cell("C1R1", 9).is_err());
        assert!(parser.parse_cell("banana", 9).is_err());
    }

    #[test]
    fn test_board_data_json() {
        let json = r#"{
            "size": 9,
            "grid": [],
            "diagonal+": true,
            "killercage": [{"cells": ["R1C1", "R1C2"], "value": 10}],
            "clone": [{"cells": ["R1C1"], "cloneCells": ["R9C9"]}]
        }"#;
        let data = BoardData::from_json(json).unwrap();
        assert_eq!(data.size, 9);
        assert!(data.diagonal_p);
        assert!(!data.diagonal_n);
        assert_eq!(data.killercage.len(), 1);
        assert_eq!(data.killercage[0].value, Some(10));
        assert_eq!(data.clones[0].clone_cells, vec!["R9C9".to_owned()]);
    }
}
