use serde::{Deserialize, Serialize};

/// Anchor position where every new piece appears.
///
/// Horizontally centered on the 10-column board, on the top visible row.
pub const SPAWN_POSITION: Position = Position::new(4, 0);

/// A falling piece (tetromino) with kind, rotation and anchor position.
///
/// Pieces are plain values: movement and rotation produce new `Piece`
/// instances, and the board decides whether they are legal.
///
/// # Coordinate System
///
/// - `x` grows rightward (columns), `y` grows downward (rows)
/// - `(0, 0)` is the top-left cell of the visible board
/// - Negative `y` lies above the visible board
///
/// # Example
///
/// ```
/// use stackfall_engine::{Piece, PieceKind, Position, Rotation};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!(piece.position(), Position::new(4, 0));
///
/// let rotated = piece.rotated_to(Rotation::Deg90, piece.position());
/// assert_eq!(rotated.rotation(), Rotation::Deg90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    position: Position,
}

impl Piece {
    /// Creates a piece of the given kind at [`SPAWN_POSITION`] in spawn orientation.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::Deg0,
            position: SPAWN_POSITION,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn moved_to(self, position: Position) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub const fn rotated_to(self, rotation: Rotation, position: Position) -> Self {
        Self {
            rotation,
            position,
            ..self
        }
    }

    /// Returns the absolute cells covered by this piece.
    #[must_use]
    pub fn cells(&self) -> [Position; 4] {
        self.cells_at(self.position, self.rotation)
    }

    /// Returns the absolute cells this piece would cover at another position
    /// and rotation.
    ///
    /// Each canonical offset is turned `rotation.turns()` times with
    /// `(x, y) → (y, -x)` and then translated by `position`. The O-piece is
    /// never turned.
    #[must_use]
    pub fn cells_at(&self, position: Position, rotation: Rotation) -> [Position; 4] {
        let turns = if self.kind == PieceKind::O {
            0
        } else {
            rotation.turns()
        };
        self.kind.offsets().map(|(mut x, mut y)| {
            for _ in 0..turns {
                (x, y) = (y, -x);
            }
            position.offset(x, y)
        })
    }
}

/// Position of a piece anchor or a single cell on the board.
///
/// Signed so that cells above the visible board (`y < 0`) and kick candidates
/// left of the wall can be represented before they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    x: i8,
    y: i8,
}

impl Position {
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i8 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i8 {
        self.y
    }

    #[must_use]
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub const fn left(self) -> Self {
        self.offset(-1, 0)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        self.offset(1, 0)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        self.offset(0, 1)
    }
}

/// Rotation state of a piece.
///
/// Each step is one application of the `(x, y) → (y, -x)` transform.
/// [`Rotation::next`] wraps around after [`Rotation::Deg270`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Spawn orientation.
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Number of quarter turns away from the spawn orientation (0-3).
    #[must_use]
    pub const fn turns(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::T,
        Self::Z,
    ];

    /// Returns the four canonical `(x, y)` offsets of the unrotated shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::O.offsets(), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    /// ```
    #[must_use]
    pub const fn offsets(self) -> [(i8, i8); 4] {
        PIECE_OFFSETS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

const PIECE_OFFSETS: [[(i8, i8); 4]; PieceKind::LEN] = [
    // I-piece
    [(-1, 0), (0, 0), (1, 0), (2, 0)],
    // J-piece
    [(-1, 0), (0, 0), (1, 0), (-1, 1)],
    // L-piece
    [(-1, 0), (0, 0), (1, 0), (1, 1)],
    // O-piece
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    // S-piece
    [(0, 0), (1, 0), (-1, 1), (0, 1)],
    // T-piece
    [(-1, 0), (0, 0), (1, 0), (0, 1)],
    // Z-piece
    [(-1, 0), (0, 0), (0, 1), (1, 1)],
];
