//! Contains [`Board`] which represents a puzzle's size, ruleset, and current
//! solve state.

use itertools::Itertools;
use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::prelude::*;

/// The state of a puzzle board.
///
/// A board owns the per-cell candidate masks, the pending naked-singles
/// queue, and the constraint state table. The ruleset (weak links, regions,
/// constraints, and the memo table) lives in [`BoardData`] behind an `Arc`
/// and is shared between a board and its clones: the ruleset can only change
/// while the board has never been cloned, which is the case during
/// construction and constraint initialization.
///
/// Cloning a board is therefore cheap, which the backtracking search relies
/// on. Use [`Board::deep_clone`] for the rare sub-board that must mutate the
/// ruleset itself.
///
/// Every mutation primitive maintains the enforcement invariant: all weak
/// link and constraint consequences implied by the current masks have been
/// applied, up to the one mutation in progress.
#[derive(Clone)]
pub struct Board {
    cells: Vec<u32>,
    non_given_count: usize,
    pending_singles: VecDeque<CellIndex>,
    constraint_states: Vec<StateSlot>,
    data: Arc<BoardData>,
}

/// Key to a constraint state slot, returned by [`Board::register_state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateKey(usize);

/// One slot of the constraint state table.
///
/// Cloning a board shares the state and resets the ownership flag, so a
/// branch pays for a deep state copy only on its first write to the slot.
struct StateSlot {
    state: Arc<dyn ConstraintState>,
    owned: bool,
}

impl Clone for StateSlot {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            owned: false,
        }
    }
}

/// The immutable ruleset of a board: its dimensions, weak-link graph,
/// regions, constraints, and memo table.
pub struct BoardData {
    size: usize,
    num_cells: usize,
    num_candidates: usize,
    all_values: u32,
    given_bit: u32,
    weak_links: WeakLinks,
    regions: Vec<Arc<Region>>,
    regions_by_cell: Vec<Vec<Arc<Region>>>,
    constraints: Vec<Arc<dyn Constraint>>,
    finalized: bool,
    memo: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl Clone for BoardData {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            num_cells: self.num_cells,
            num_candidates: self.num_candidates,
            all_values: self.all_values,
            given_bit: self.given_bit,
            weak_links: self.weak_links.clone(),
            regions: self.regions.clone(),
            regions_by_cell: self.regions_by_cell.clone(),
            constraints: self.constraints.clone(),
            finalized: self.finalized,
            memo: Mutex::new(self.memo.lock().expect("memo table lock poisoned").clone()),
        }
    }
}

impl Board {
    /// Creates a new board with the standard row, column, and box regions
    /// plus the given constraints. The board is not usable for solving until
    /// [`Board::finalize_constraints`] has run.
    ///
    /// `regions` assigns a region index to each cell in row-major order; pass
    /// an empty slice for the default boxes. A region vector where every cell
    /// has the same index disables box regions entirely.
    pub fn new(size: usize, regions: &[usize], constraints: Vec<Arc<dyn Constraint>>) -> Board {
        let cu = CellUtility::new(size);
        let num_cells = size * size;
        let num_candidates = num_cells * size;

        let data = BoardData {
            size,
            num_cells,
            num_candidates,
            all_values: all_values_mask(size),
            given_bit: given_bit(size),
            weak_links: WeakLinks::new(size),
            regions: Vec::new(),
            regions_by_cell: vec![Vec::new(); num_cells],
            constraints,
            finalized: false,
            memo: Mutex::new(HashMap::new()),
        };

        let mut board = Board {
            cells: vec![data.all_values; num_cells],
            non_given_count: num_cells,
            pending_singles: VecDeque::new(),
            constraint_states: Vec::new(),
            data: Arc::new(data),
        };

        for row in 0..size {
            let cells: Vec<CellIndex> = (0..size).map(|col| cu.cell(row, col)).collect();
            board.add_region(&format!("Row {}", row + 1), &cells, RegionKind::Row, None, true);
        }
        for col in 0..size {
            let cells: Vec<CellIndex> = (0..size).map(|row| cu.cell(row, col)).collect();
            board.add_region(
                &format!("Column {}", col + 1),
                &cells,
                RegionKind::Col,
                None,
                true,
            );
        }

        let regions = if regions.len() == num_cells {
            regions.to_vec()
        } else {
            default_regions(size)
        };
        let mut cells_by_region: HashMap<usize, Vec<CellIndex>> = HashMap::new();
        for cell in cu.all_cells() {
            cells_by_region
                .entry(regions[cell.index()])
                .or_default()
                .push(cell);
        }
        for (&region, cells) in cells_by_region.iter().sorted_by_key(|(&region, _)| region) {
            board.add_region(
                &format!("Region {}", region + 1),
                cells,
                RegionKind::Region,
                None,
                true,
            );
        }

        board
    }

    /// Clones the board along with a private copy of its ruleset, for
    /// sub-boards whose constraints must mutate weak links or regions.
    pub fn deep_clone(&self) -> Board {
        Board {
            cells: self.cells.clone(),
            non_given_count: self.non_given_count,
            pending_singles: self.pending_singles.clone(),
            constraint_states: self.constraint_states.clone(),
            data: Arc::new(BoardData::clone(&self.data)),
        }
    }

    fn data_mut(&mut self) -> &mut BoardData {
        Arc::get_mut(&mut self.data)
            .expect("board ruleset cannot change once the board has been cloned")
    }

    /// Runs every constraint's `init` until none of them changes the board,
    /// then runs every constraint's `finalize` exactly once and freezes the
    /// ruleset. Must be called exactly once, before any givens are applied.
    pub fn finalize_constraints(&mut self) -> Result<(), String> {
        assert!(
            !self.data.finalized,
            "finalize_constraints may only be called once"
        );

        let mut inited = vec![false; self.data.constraints.len()];
        loop {
            let mut changed = false;
            let count = self.data.constraints.len();
            inited.resize(count, false);

            for idx in 0..count {
                let constraint = self.data.constraints[idx].clone();
                let is_repeat = inited[idx];
                inited[idx] = true;
                match constraint.init(self, is_repeat) {
                    LogicResult::Invalid => {
                        return Err(format!(
                            "{} has found the board is invalid.",
                            constraint.specific_name()
                        ));
                    }
                    LogicResult::Changed => changed = true,
                    _ => {}
                }
            }

            // Constraints added by other constraints still need their first init.
            if !changed && self.data.constraints.len() == count {
                break;
            }
        }

        let constraints = self.data.constraints.clone();
        for constraint in constraints {
            if constraint.finalize(self).is_invalid() {
                return Err(format!(
                    "{} has found the board is invalid.",
                    constraint.specific_name()
                ));
            }
        }

        self.data_mut().finalized = true;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.data.size
    }

    pub fn num_cells(&self) -> usize {
        self.data.num_cells
    }

    pub fn num_candidates(&self) -> usize {
        self.data.num_candidates
    }

    pub fn all_values_mask(&self) -> u32 {
        self.data.all_values
    }

    pub fn given_bit(&self) -> u32 {
        self.data.given_bit
    }

    pub fn is_finalized(&self) -> bool {
        self.data.finalized
    }

    pub fn cell_utility(&self) -> CellUtility {
        CellUtility::new(self.data.size)
    }

    pub fn all_cells(&self) -> impl Iterator<Item = CellIndex> {
        self.cell_utility().all_cells()
    }

    /// The number of cells that have not been set as given.
    pub fn non_given_count(&self) -> usize {
        self.non_given_count
    }

    /// True once every cell has been set as a given.
    pub fn is_solved(&self) -> bool {
        self.non_given_count == 0
    }

    pub fn weak_links(&self) -> &WeakLinks {
        &self.data.weak_links
    }

    pub fn regions(&self) -> &[Arc<Region>] {
        &self.data.regions
    }

    pub fn regions_for_cell(&self, cell: CellIndex) -> &[Arc<Region>] {
        &self.data.regions_by_cell[cell.index()]
    }

    pub fn regions_for_cell_of_kind(
        &self,
        cell: CellIndex,
        kind: &RegionKind,
    ) -> impl Iterator<Item = &Arc<Region>> {
        let kind = kind.clone();
        self.data.regions_by_cell[cell.index()]
            .iter()
            .filter(move |region| *region.kind() == kind)
    }

    pub fn constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.data.constraints
    }

    /// The raw mask of the cell, including the given flag.
    pub fn cell_mask(&self, cell: CellIndex) -> u32 {
        self.cells[cell.index()]
    }

    /// The candidate bits of the cell, with the given flag stripped.
    pub fn candidates(&self, cell: CellIndex) -> u32 {
        self.cells[cell.index()] & self.data.all_values
    }

    pub fn is_given(&self, cell: CellIndex) -> bool {
        self.cells[cell.index()] & self.data.given_bit != 0
    }

    /// The value of the cell. Meaningful for givens and single-candidate
    /// cells; otherwise returns the smallest remaining candidate.
    pub fn value(&self, cell: CellIndex) -> usize {
        get_value(self.candidates(cell))
    }

    pub fn has_candidate(&self, candidate: CandidateIndex) -> bool {
        let (cell, value) = candidate.cell_index_and_value();
        has_value(self.candidates(cell), value)
    }

    pub fn all_cell_candidates(&self) -> impl Iterator<Item = (CellIndex, u32)> + '_ {
        self.all_cells().map(move |cell| (cell, self.candidates(cell)))
    }

    /// Removes and returns the next queued naked single, if any.
    pub fn take_pending_single(&mut self) -> Option<CellIndex> {
        self.pending_singles.pop_front()
    }

    pub fn has_pending_singles(&self) -> bool {
        !self.pending_singles.is_empty()
    }

    /// Registers a no-repeat region.
    ///
    /// Returns false without registering when the region has more cells than
    /// the board size, or when the same originating constraint has already
    /// registered the same cells. When `add_weak_links` is set, a weak link
    /// is added between every pair of same-value candidates in the region.
    pub fn add_region(
        &mut self,
        name: &str,
        cells: &[CellIndex],
        kind: RegionKind,
        from_constraint: Option<String>,
        add_weak_links: bool,
    ) -> bool {
        if cells.len() > self.data.size {
            return false;
        }

        let region = Region::new(name, cells, kind, from_constraint);
        if self.data.regions.iter().any(|existing| {
            existing.from_constraint() == region.from_constraint()
                && existing.cells() == region.cells()
        }) {
            return false;
        }

        let region = Arc::new(region);
        let data = self.data_mut();
        for &cell in region.cells() {
            data.regions_by_cell[cell.index()].push(region.clone());
        }
        data.regions.push(region.clone());

        if add_weak_links {
            let cu = self.cell_utility();
            for (candidate0, candidate1) in cu.candidate_pairs(region.cells()) {
                self.add_weak_link(candidate0, candidate1);
            }
        }

        true
    }

    /// Adds a weak link between two candidates.
    ///
    /// A link of a candidate to itself means the candidate is impossible and
    /// eliminates it immediately instead of creating an edge. Returns false
    /// if that elimination emptied a cell.
    pub fn add_weak_link(
        &mut self,
        candidate0: CandidateIndex,
        candidate1: CandidateIndex,
    ) -> bool {
        if candidate0 == candidate1 {
            let (cell, value) = candidate0.cell_index_and_value();
            return !self.clear_value(cell, value).is_invalid();
        }

        self.data_mut().weak_links.add(candidate0, candidate1);
        true
    }

    /// Adds a constraint during initialization. Sub-constraints registered
    /// this way get their own `init` calls before finalization completes.
    pub fn add_constraint(&mut self, constraint: Arc<dyn Constraint>) {
        self.data_mut().constraints.push(constraint);
    }

    /// Registers a slot of backtrackable constraint state and returns its
    /// key. Must happen during constraint initialization so that every clone
    /// of the board carries the slot.
    pub fn register_state(&mut self, state: Box<dyn ConstraintState>) -> StateKey {
        assert!(
            !self.data.finalized,
            "constraint state must be registered before finalization"
        );
        let key = StateKey(self.constraint_states.len());
        self.constraint_states.push(StateSlot {
            state: Arc::from(state),
            owned: true,
        });
        key
    }

    /// Reads a constraint state slot.
    pub fn state<T: ConstraintState>(&self, key: StateKey) -> &T {
        // as_ref before as_any: the call must reach the boxed state, not the
        // Arc wrapper, which the blanket ConstraintState impl also covers.
        self.constraint_states[key.0]
            .state
            .as_ref()
            .as_any()
            .downcast_ref::<T>()
            .expect("constraint state type mismatch")
    }

    /// Gets mutable access to a constraint state slot, copying the state the
    /// first time a branch writes to it.
    pub fn state_mut<T: ConstraintState>(&mut self, key: StateKey) -> &mut T {
        let slot = &mut self.constraint_states[key.0];
        if !slot.owned || Arc::strong_count(&slot.state) > 1 {
            slot.state = Arc::from(slot.state.as_ref().clone_state());
            slot.owned = true;
        }
        Arc::get_mut(&mut slot.state)
            .expect("state is uniquely owned after copy-on-write")
            .as_any_mut()
            .downcast_mut::<T>()
            .expect("constraint state type mismatch")
    }

    /// Looks up a memo shared by all clones of this board.
    pub fn memo(&self, key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.data
            .memo
            .lock()
            .expect("memo table lock poisoned")
            .get(key)
            .cloned()
    }

    /// Stores a memo shared by all clones of this board. Memos are write-once
    /// results of expensive computations; storing the same key twice keeps
    /// the newer value.
    pub fn store_memo(&self, key: &str, value: Arc<dyn Any + Send + Sync>) {
        self.data
            .memo
            .lock()
            .expect("memo table lock poisoned")
            .insert(key.to_owned(), value);
    }

    /// Replaces the candidates of the cell and enforces the consequences.
    pub fn set_cell_mask(&mut self, cell: CellIndex, mask: u32) -> LogicResult {
        self.apply_mask(cell, mask & self.data.all_values)
    }

    /// Intersects the candidates of the cell with `keep`.
    pub fn keep_cell_mask(&mut self, cell: CellIndex, keep: u32) -> LogicResult {
        self.apply_mask(cell, self.candidates(cell) & keep)
    }

    /// Removes the candidates in `clear` from the cell.
    pub fn clear_cell_mask(&mut self, cell: CellIndex, clear: u32) -> LogicResult {
        self.apply_mask(cell, self.candidates(cell) & !clear)
    }

    /// Removes a single value from the cell.
    pub fn clear_value(&mut self, cell: CellIndex, value: usize) -> LogicResult {
        self.clear_cell_mask(cell, value_mask(value))
    }

    /// Removes a single candidate.
    pub fn clear_candidate(&mut self, candidate: CandidateIndex) -> LogicResult {
        let (cell, value) = candidate.cell_index_and_value();
        self.clear_value(cell, value)
    }

    /// Restricts the cell to a single value without marking it given.
    pub fn enforce_value(&mut self, cell: CellIndex, value: usize) -> LogicResult {
        self.keep_cell_mask(cell, value_mask(value))
    }

    /// Restricts a candidate's cell to just that candidate.
    pub fn enforce_candidate(&mut self, candidate: CandidateIndex) -> LogicResult {
        let (cell, value) = candidate.cell_index_and_value();
        self.enforce_value(cell, value)
    }

    fn apply_mask(&mut self, cell: CellIndex, new_mask: u32) -> LogicResult {
        let index = cell.index();
        let orig_mask = self.cells[index] & self.data.all_values;
        if new_mask == 0 {
            self.cells[index] = new_mask;
            return LogicResult::Invalid;
        }
        if new_mask == orig_mask {
            return LogicResult::None;
        }

        self.cells[index] = new_mask | (self.cells[index] & self.data.given_bit);

        if value_count(new_mask) == 1 && !self.is_given(cell) {
            self.pending_singles.push_back(cell);
        }

        // Constraints may react to each removed candidate by mutating other
        // cells, which recursively enforces.
        let removed = orig_mask & !new_mask;
        let data = self.data.clone();
        for value in values_from_mask(removed) {
            for constraint in data.constraints.iter() {
                if !constraint.enforce_candidate_elim(self, cell, value) {
                    return LogicResult::Invalid;
                }
            }
        }

        LogicResult::Changed
    }

    /// Promotes a cell to a given value.
    ///
    /// If the cell is already given this succeeds exactly when the value
    /// matches. Otherwise the value must still be a candidate; the cell is
    /// locked to it, every weakly-linked candidate in other cells is cleared,
    /// and every constraint's `enforce` runs. Returns false on any
    /// contradiction along the way.
    pub fn set_as_given(&mut self, cell: CellIndex, value: usize) -> bool {
        assert!(
            self.data.finalized,
            "set_as_given may not be called before constraints are finalized"
        );

        let index = cell.index();
        if self.is_given(cell) {
            return self.value(cell) == value;
        }
        if !has_value(self.candidates(cell), value) {
            return false;
        }

        self.cells[index] = value_mask(value) | self.data.given_bit;
        self.non_given_count -= 1;

        let data = self.data.clone();
        let candidate = cell.candidate(value);
        for linked in data.weak_links.links_for(candidate).links() {
            if linked.cell_index() != cell
                && self.has_candidate(linked)
                && self.clear_candidate(linked).is_invalid()
            {
                return false;
            }
        }

        for constraint in data.constraints.iter() {
            if !constraint.enforce(self, cell, value) {
                return false;
            }
        }

        true
    }
}

impl Default for Board {
    /// An empty, finalized 9x9 board with standard boxes and no extra
    /// constraints.
    fn default() -> Self {
        let mut board = Board::new(9, &[], vec![]);
        board
            .finalize_constraints()
            .expect("empty board cannot be invalid");
        board
    }
}

impl std::hash::Hash for Board {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in self.all_cells() {
            let mask = self.candidates(cell);
            if value_count(mask) == 1 {
                write!(f, "{}", get_value(mask))?;
            } else {
                write!(f, ".")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_board9() {
        let board = Board::default();
        assert_eq!(board.size(), 9);
        assert_eq!(board.num_cells(), 81);
        assert_eq!(board.num_candidates(), 729);
        assert_eq!(board.regions().len(), 27);
        // Every candidate sees 8 cell peers, 8 row peers, 8 column peers,
        // and 4 box peers outside its row and column.
        assert_eq!(
            board.weak_links().total(),
            ((board.size() - 1) * 4 - 4) * board.num_candidates()
        );
    }

    #[test]
    fn test_board16() {
        let mut board = Board::new(16, &[], vec![]);
        board.finalize_constraints().unwrap();
        assert_eq!(board.size(), 16);
        assert_eq!(board.num_cells(), 256);
        assert_eq!(board.num_candidates(), 4096);
        assert_eq!(board.regions().len(), 48);
        assert_eq!(
            board.weak_links().total(),
            ((board.size() - 1) * 4 - 6) * board.num_candidates()
        );
    }

    #[test]
    fn test_set_as_given_propagates() {
        let mut board = Board::default();
        let cu = board.cell_utility();

        assert!(board.set_as_given(cu.cell(0, 0), 5));
        assert!(board.is_given(cu.cell(0, 0)));
        assert_eq!(board.value(cu.cell(0, 0)), 5);
        assert_eq!(board.non_given_count(), 80);

        // 5 is gone from the row, the column, and the box
        assert!(!has_value(board.candidates(cu.cell(0, 8)), 5));
        assert!(!has_value(board.candidates(cu.cell(8, 0)), 5));
        assert!(!has_value(board.candidates(cu.cell(2, 2)), 5));
        // ...but not from an unrelated cell
        assert!(has_value(board.candidates(cu.cell(4, 4)), 5));

        // A second 5 in the same row is impossible
        assert!(!board.set_as_given(cu.cell(0, 1), 5));

        // Re-setting the same given succeeds, a different value fails
        let mut board = Board::default();
        assert!(board.set_as_given(cu.cell(0, 0), 5));
        assert!(board.set_as_given(cu.cell(0, 0), 5));
        assert!(!board.set_as_given(cu.cell(0, 0), 6));
    }

    #[test]
    fn test_pending_singles_queue() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cell = cu.cell(4, 4);

        assert!(!board.has_pending_singles());
        assert!(board
            .keep_cell_mask(cell, values_mask(&[1, 2]))
            .is_changed());
        assert!(!board.has_pending_singles());

        assert!(board.clear_value(cell, 1).is_changed());
        assert!(board.has_pending_singles());
        assert_eq!(board.take_pending_single(), Some(cell));
        assert_eq!(board.take_pending_single(), None);
    }

    #[test]
    fn test_empty_mask_is_invalid() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let cell = cu.cell(0, 0);

        assert!(board.keep_cell_mask(cell, value_mask(3)).is_changed());
        assert!(board.clear_value(cell, 3).is_invalid());
    }

    #[test]
    fn test_region_rejection() {
        let mut board = Board::new(9, &[], vec![]);
        let cu = board.cell_utility();

        // A duplicate of a built-in row is rejected
        let row: Vec<CellIndex> = (0..9).map(|col| cu.cell(0, col)).collect();
        assert!(!board.add_region("Row 1 again", &row, RegionKind::Row, None, true));

        // The same cells from a constraint are a different registration
        assert!(board.add_region(
            "Renban",
            &row,
            RegionKind::Custom("renban".into()),
            Some("Renban at r1c1".into()),
            false
        ));

        // Oversized regions are rejected
        let too_many: Vec<CellIndex> = (0..10).map(|i| cu.cell_index(i)).collect();
        assert!(!board.add_region("Too big", &too_many, RegionKind::Row, None, false));
    }

    #[test]
    fn test_state_copy_on_write() {
        #[derive(Clone)]
        struct Counter {
            count: usize,
        }

        let mut board = Board::new(9, &[], vec![]);
        let key = board.register_state(Box::new(Counter { count: 0 }));
        board.finalize_constraints().unwrap();

        let mut clone = board.clone();
        clone.state_mut::<Counter>(key).count = 5;

        assert_eq!(board.state::<Counter>(key).count, 0);
        assert_eq!(clone.state::<Counter>(key).count, 5);

        // Cloning the writer shares until the next write
        let mut second = clone.clone();
        second.state_mut::<Counter>(key).count = 7;
        assert_eq!(clone.state::<Counter>(key).count, 5);
        assert_eq!(second.state::<Counter>(key).count, 7);

        // A clone's writes do not leak back into the branch it came from
        clone.state_mut::<Counter>(key).count = 6;
        assert_eq!(second.state::<Counter>(key).count, 7);
        assert_eq!(clone.state::<Counter>(key).count, 6);
    }

    #[test]
    fn test_memo_shared_across_clones() {
        let board = Board::default();
        assert!(board.memo("combos").is_none());

        board.store_memo("combos", Arc::new(vec![1usize, 2, 3]));
        let clone = board.clone();
        let memo = clone.memo("combos").unwrap();
        let values = memo.downcast_ref::<Vec<usize>>().unwrap();
        assert_eq!(values, &vec![1, 2, 3]);
    }

    #[test]
    fn test_weak_link_self_eliminates() {
        let mut board = Board::new(9, &[], vec![]);
        let cu = board.cell_utility();
        let candidate = cu.candidate(cu.cell(0, 0), 1);

        assert!(board.add_weak_link(candidate, candidate));
        assert!(!board.has_candidate(candidate));
        assert!(!board.weak_links().is_linked(candidate, candidate));
    }
}
