use crate::piece::Position;
use crate::shapes::ShapeKind;

pub const GRID_ROWS: usize = 20;
pub const GRID_COLS: usize = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CellState {
    #[default]
    Empty,
    Filled(ShapeKind),
}

impl CellState {
    /// Integer view of the cell: 0 when empty, otherwise the kind's id.
    pub fn id(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Filled(kind) => kind.id(),
        }
    }

    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }
}

/// Fixed 20x10 board. Row 0 is the top, column 0 the left.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: [[CellState; GRID_COLS]; GRID_ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Empty; GRID_COLS]; GRID_ROWS],
        }
    }

    pub fn rows(&self) -> &[[CellState; GRID_COLS]; GRID_ROWS] {
        &self.cells
    }

    /// Empties every cell.
    pub fn initialize(&mut self) {
        self.cells = [[CellState::Empty; GRID_COLS]; GRID_ROWS];
    }

    pub fn is_cell_outside(&self, row: i16, column: i16) -> bool {
        row < 0 || row >= GRID_ROWS as i16 || column < 0 || column >= GRID_COLS as i16
    }

    pub fn get(&self, row: i16, column: i16) -> Option<CellState> {
        if self.is_cell_outside(row, column) {
            return None;
        }
        Some(self.cells[row as usize][column as usize])
    }

    /// A cell outside the board is never empty.
    pub fn is_cell_empty(&self, row: i16, column: i16) -> bool {
        self.get(row, column).is_some_and(CellState::is_empty)
    }

    /// Inside the board and unoccupied. Bounds are tested first.
    pub fn is_cell_free(&self, row: i16, column: i16) -> bool {
        !self.is_cell_outside(row, column) && self.is_cell_empty(row, column)
    }

    /// Fit test for a candidate placement.
    pub fn fits(&self, cells: &[Position]) -> bool {
        cells.iter().all(|p| self.is_cell_free(p.row, p.column))
    }

    pub fn set(&mut self, row: usize, column: usize, cell: CellState) {
        self.cells[row][column] = cell;
    }

    /// Writes `kind` into every listed cell. Callers pass a placement that
    /// already passed `fits`; cells off the board are skipped.
    pub fn lock(&mut self, cells: &[Position], kind: ShapeKind) {
        for p in cells {
            if !self.is_cell_outside(p.row, p.column) {
                self.cells[p.row as usize][p.column as usize] = CellState::Filled(kind);
            }
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| !cell.is_empty())
    }

    pub fn filled_count_in_row(&self, row: usize) -> usize {
        self.cells[row].iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn total_filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    /// Removes every full row and lets the rows above fall into place.
    ///
    /// Single bottom-up pass: each non-full row moves down by the number of
    /// full rows found below it, so every row that was full before the call
    /// is cleared exactly once.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut completed = 0;
        for row in (0..GRID_ROWS).rev() {
            if self.is_row_full(row) {
                self.clear_row(row);
                completed += 1;
            } else if completed > 0 {
                self.move_row_down(row, completed);
            }
        }
        completed as u32
    }

    fn clear_row(&mut self, row: usize) {
        self.cells[row] = [CellState::Empty; GRID_COLS];
    }

    fn move_row_down(&mut self, row: usize, by: usize) {
        self.cells[row + by] = self.cells[row];
        self.clear_row(row);
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn empty_grid() -> Grid {
        Grid::new()
    }

    pub fn fill_row(grid: &mut Grid, row: usize) {
        for column in 0..GRID_COLS {
            grid.set(row, column, CellState::Filled(ShapeKind::T));
        }
    }

    pub fn fill_row_with_gap(grid: &mut Grid, row: usize, gap_column: usize) {
        for column in 0..GRID_COLS {
            if column != gap_column {
                grid.set(row, column, CellState::Filled(ShapeKind::T));
            }
        }
    }
}
