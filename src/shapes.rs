//! Shape catalog.
//!
//! Every kind is pure data: an id (also the color index used by the
//! renderer), its rotation states as relative `(row, column)` offsets, the
//! spawn offset and the offset used when drawing it in the "next" box.

// ============================================================================
// Types
// ============================================================================

/// Relative `(row, column)` offset.
pub type Offset = (i16, i16);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShapeKind {
    L,
    J,
    I,
    O,
    S,
    T,
    Z,
    C,
}

#[derive(Debug)]
pub struct ShapeDef {
    pub id: u8,
    /// Rotation states in clockwise order.
    pub rotations: &'static [&'static [Offset]],
    pub spawn: Offset,
    pub preview: Offset,
}

// ============================================================================
// Catalog
// ============================================================================

static L_DEF: ShapeDef = ShapeDef {
    id: 1,
    rotations: &[
        &[(0, 2), (1, 0), (1, 1), (1, 2)],
        &[(0, 1), (1, 1), (2, 1), (2, 2)],
        &[(1, 0), (1, 1), (1, 2), (2, 0)],
        &[(0, 0), (0, 1), (1, 1), (2, 1)],
    ],
    spawn: (0, 3),
    preview: (0, 0),
};

static J_DEF: ShapeDef = ShapeDef {
    id: 2,
    rotations: &[
        &[(0, 0), (1, 0), (1, 1), (1, 2)],
        &[(0, 1), (0, 2), (1, 1), (2, 1)],
        &[(1, 0), (1, 1), (1, 2), (2, 2)],
        &[(0, 1), (1, 1), (2, 0), (2, 1)],
    ],
    spawn: (0, 3),
    preview: (0, 0),
};

static I_DEF: ShapeDef = ShapeDef {
    id: 3,
    rotations: &[
        &[(1, 0), (1, 1), (1, 2), (1, 3)],
        &[(0, 2), (1, 2), (2, 2), (3, 2)],
        &[(2, 0), (2, 1), (2, 2), (2, 3)],
        &[(0, 1), (1, 1), (2, 1), (3, 1)],
    ],
    spawn: (-1, 3),
    preview: (-1, 0),
};

// Single state: rotating an O is a no-op.
static O_DEF: ShapeDef = ShapeDef {
    id: 4,
    rotations: &[&[(0, 0), (0, 1), (1, 0), (1, 1)]],
    spawn: (0, 4),
    preview: (0, 1),
};

static S_DEF: ShapeDef = ShapeDef {
    id: 5,
    rotations: &[
        &[(0, 1), (0, 2), (1, 0), (1, 1)],
        &[(0, 1), (1, 1), (1, 2), (2, 2)],
        &[(1, 1), (1, 2), (2, 0), (2, 1)],
        &[(0, 0), (1, 0), (1, 1), (2, 1)],
    ],
    spawn: (0, 3),
    preview: (0, 0),
};

static T_DEF: ShapeDef = ShapeDef {
    id: 6,
    rotations: &[
        &[(0, 1), (1, 0), (1, 1), (1, 2)],
        &[(0, 1), (1, 1), (1, 2), (2, 1)],
        &[(1, 0), (1, 1), (1, 2), (2, 1)],
        &[(0, 1), (1, 0), (1, 1), (2, 1)],
    ],
    spawn: (0, 3),
    preview: (0, 0),
};

static Z_DEF: ShapeDef = ShapeDef {
    id: 7,
    rotations: &[
        &[(0, 0), (0, 1), (1, 1), (1, 2)],
        &[(0, 2), (1, 1), (1, 2), (2, 1)],
        &[(1, 0), (1, 1), (2, 1), (2, 2)],
        &[(0, 1), (1, 0), (1, 1), (2, 0)],
    ],
    spawn: (0, 3),
    preview: (0, 0),
};

// Five cells, opening right in the spawn state.
static C_DEF: ShapeDef = ShapeDef {
    id: 8,
    rotations: &[
        &[(0, 0), (0, 1), (1, 0), (2, 0), (2, 1)],
        &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)],
        &[(0, 1), (0, 2), (1, 2), (2, 1), (2, 2)],
        &[(1, 0), (1, 2), (2, 0), (2, 1), (2, 2)],
    ],
    spawn: (0, 3),
    preview: (0, 0),
};

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
        ShapeKind::C,
    ];

    pub fn def(self) -> &'static ShapeDef {
        match self {
            ShapeKind::L => &L_DEF,
            ShapeKind::J => &J_DEF,
            ShapeKind::I => &I_DEF,
            ShapeKind::O => &O_DEF,
            ShapeKind::S => &S_DEF,
            ShapeKind::T => &T_DEF,
            ShapeKind::Z => &Z_DEF,
            ShapeKind::C => &C_DEF,
        }
    }

    pub fn id(self) -> u8 {
        self.def().id
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn rotation_count(self) -> usize {
        self.def().rotations.len()
    }

    /// Offsets of the given rotation state, wrapped into range.
    pub fn cells(self, rotation: usize) -> &'static [Offset] {
        let rotations = self.def().rotations;
        rotations[rotation % rotations.len()]
    }
}
