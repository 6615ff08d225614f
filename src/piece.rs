use crate::shapes::ShapeKind;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub row: i16,
    pub column: i16,
}

impl Position {
    pub fn new(row: i16, column: i16) -> Self {
        Self { row, column }
    }
}

/// A movable instance of a shape kind.
///
/// `move_by`, `rotate` and `undo_rotation` never check legality; the game
/// decides whether to keep the result.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: ShapeKind,
    pub rotation: usize,
    pub position: Position,
}

impl Piece {
    /// A piece at the catalog spawn offset, rotation 0.
    pub fn spawn(kind: ShapeKind) -> Self {
        let (row, column) = kind.def().spawn;
        Self::new_at(kind, row, column)
    }

    pub fn new_at(kind: ShapeKind, row: i16, column: i16) -> Self {
        Self {
            kind,
            rotation: 0,
            position: Position { row, column },
        }
    }

    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    /// Absolute cells, in the shape's canonical order.
    pub fn cells(&self) -> Vec<Position> {
        self.kind
            .cells(self.rotation)
            .iter()
            .map(|&(dr, dc)| Position {
                row: self.position.row + dr,
                column: self.position.column + dc,
            })
            .collect()
    }

    pub fn move_by(&mut self, d_row: i16, d_column: i16) {
        self.position.row += d_row;
        self.position.column += d_column;
    }

    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.kind.rotation_count();
    }

    pub fn undo_rotation(&mut self) {
        let count = self.kind.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }

    pub fn moved(&self, d_row: i16, d_column: i16) -> Self {
        let mut piece = *self;
        piece.move_by(d_row, d_column);
        piece
    }

    pub fn rotated(&self) -> Self {
        let mut piece = *self;
        piece.rotate();
        piece
    }
}
