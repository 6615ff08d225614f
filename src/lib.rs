pub mod bag;
pub mod game;
pub mod grid;
pub mod piece;
pub mod shapes;

pub use bag::{Bag, PieceProvider, SequencePieceProvider};
pub use game::{Command, Game, GameEvent, GameState};
pub use grid::{CellState, Grid, GRID_COLS, GRID_ROWS};
pub use piece::{Piece, Position};
pub use shapes::ShapeKind;
