use crate::bag::{Bag, PieceProvider};
use crate::grid::{CellState, Grid, GRID_COLS, GRID_ROWS};
use crate::piece::Piece;

// ============================================================================
// Configuration
// ============================================================================

// Scoring
pub const SCORE_SINGLE: u32 = 100;
pub const SCORE_DOUBLE: u32 = 300;
pub const SCORE_TRIPLE: u32 = 500;
pub const SCORE_QUAD: u32 = 700;
pub const SOFT_DROP_BONUS: u32 = 1;

pub fn line_clear_score(rows: u32) -> u32 {
    match rows {
        1 => SCORE_SINGLE,
        2 => SCORE_DOUBLE,
        3 => SCORE_TRIPLE,
        4 => SCORE_QUAD,
        _ => 0,
    }
}

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Playing,
    GameOver,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Rotated,
    LinesCleared(u32),
    GameOver,
}

/// One discrete input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Left,
    Right,
    Down,
    Rotate,
    Restart,
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    grid: Grid,
    current: Piece,
    next: Piece,
    score: u32,
    state: GameState,
    provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_provider(Box::new(Bag::from_entropy()))
    }

    /// Deterministic session: the same seed always deals the same pieces.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_provider(Box::new(Bag::seeded(seed)))
    }

    pub fn with_provider(mut provider: Box<dyn PieceProvider>) -> Self {
        let current = Piece::spawn(provider.next_piece());
        let next = Piece::spawn(provider.next_piece());
        Self {
            grid: Grid::new(),
            current,
            next,
            score: 0,
            state: GameState::Playing,
            provider,
            events: Vec::new(),
        }
    }

    /// Starts from an arbitrary board and current piece; `next` comes from
    /// the provider.
    pub fn with_grid(grid: Grid, current: Piece, mut provider: Box<dyn PieceProvider>) -> Self {
        let next = Piece::spawn(provider.next_piece());
        Self {
            grid,
            current,
            next,
            score: 0,
            state: GameState::Playing,
            provider,
            events: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Locked cells with the current piece overlaid.
    pub fn render_grid(&self) -> [[CellState; GRID_COLS]; GRID_ROWS] {
        let mut visual = *self.grid.rows();
        for p in self.current.cells() {
            if !self.grid.is_cell_outside(p.row, p.column) {
                visual[p.row as usize][p.column as usize] = CellState::Filled(self.current.kind);
            }
        }
        visual
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    pub fn handle(&mut self, command: Option<Command>) {
        match command {
            Some(Command::Left) => {
                self.move_left();
            }
            Some(Command::Right) => {
                self.move_right();
            }
            Some(Command::Down) => {
                self.move_down();
            }
            Some(Command::Rotate) => {
                self.rotate();
            }
            Some(Command::Restart) => self.reset(),
            None => {}
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_transition(self.current.moved(0, -1))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_transition(self.current.moved(0, 1))
    }

    /// Soft drop. Awards the per-step bonus on success; locks the piece
    /// when it cannot move further.
    pub fn move_down(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        if self.try_transition(self.current.moved(1, 0)) {
            self.score += SOFT_DROP_BONUS;
            true
        } else {
            self.lock();
            false
        }
    }

    /// Gravity step: like `move_down` but without the bonus.
    pub fn tick(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        if !self.try_transition(self.current.moved(1, 0)) {
            self.lock();
        }
    }

    pub fn rotate(&mut self) -> bool {
        let rotated = self.try_transition(self.current.rotated());
        if rotated {
            self.events.push(GameEvent::Rotated);
        }
        rotated
    }

    /// Commits `candidate` as the current piece only if it fits. No-op once
    /// the game is over.
    fn try_transition(&mut self, candidate: Piece) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        if self.grid.fits(&candidate.cells()) {
            self.current = candidate;
            true
        } else {
            false
        }
    }

    fn lock(&mut self) {
        self.grid.lock(&self.current.cells(), self.current.kind);
        self.current = self.next;
        if self.grid.fits(&self.current.cells()) {
            self.next = Piece::spawn(self.provider.next_piece());
        } else {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
        }

        let rows = self.grid.clear_full_rows();
        if rows > 0 {
            self.score += line_clear_score(rows);
            self.events.push(GameEvent::LinesCleared(rows));
        }
    }

    /// Fresh board, fresh bag cycle, score zero. Accepted in any state.
    pub fn reset(&mut self) {
        self.grid.initialize();
        self.provider.refill();
        self.current = Piece::spawn(self.provider.next_piece());
        self.next = Piece::spawn(self.provider.next_piece());
        self.score = 0;
        self.state = GameState::Playing;
        self.events.clear();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::SequencePieceProvider;
    use crate::grid::test_helpers::*;
    use crate::shapes::ShapeKind;

    fn sequence(kinds: &[ShapeKind]) -> Box<dyn PieceProvider> {
        Box::new(SequencePieceProvider::new(kinds.to_vec()))
    }

    #[test]
    fn scoring_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 700);
        assert_eq!(line_clear_score(5), 0);
    }

    #[test]
    fn new_game_is_playing_with_spawned_pieces() {
        let game = Game::with_provider(sequence(&[ShapeKind::T, ShapeKind::I]));
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(*game.current_piece(), Piece::spawn(ShapeKind::T));
        assert_eq!(*game.next_piece(), Piece::spawn(ShapeKind::I));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn tick_has_no_bonus() {
        let mut game = Game::with_provider(sequence(&[ShapeKind::O]));
        let row = game.current_piece().position.row;
        game.tick();
        assert_eq!(game.current_piece().position.row, row + 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn handle_none_is_noop() {
        let mut game = Game::with_grid(empty_grid(), Piece::new_at(ShapeKind::T, 5, 4), sequence(&[ShapeKind::O]));
        game.handle(None);
        assert_eq!(game.current_piece().position.row, 5);
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn transitions_commit_the_proposed_piece() {
        let piece = Piece::new_at(ShapeKind::T, 5, 4);
        let mut game = Game::with_grid(empty_grid(), piece, sequence(&[ShapeKind::O]));

        assert!(game.move_left());
        assert_eq!(*game.current_piece(), piece.moved(0, -1));
        assert!(game.rotate());
        assert_eq!(*game.current_piece(), piece.moved(0, -1).rotated());
        assert!(game.move_down());
        assert_eq!(*game.current_piece(), piece.moved(1, -1).rotated());
    }

    #[test]
    fn lock_promotes_next_and_draws_another() {
        let mut game = Game::with_grid(
            empty_grid(),
            Piece::new_at(ShapeKind::O, 18, 0),
            sequence(&[ShapeKind::I, ShapeKind::Z]),
        );
        assert!(!game.move_down());
        assert_eq!(game.current_piece().kind, ShapeKind::I);
        assert_eq!(game.next_piece().kind, ShapeKind::Z);
        assert_eq!(game.grid().total_filled_cells(), 4);
    }
}
