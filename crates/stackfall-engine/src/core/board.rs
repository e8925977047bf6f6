use super::piece::{Piece, PieceKind, Position, Rotation};

/// Number of visible rows.
pub const ROWS: usize = 20;
/// Number of columns.
pub const COLS: usize = 10;

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked block left behind by a piece of this kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Block::Empty => None,
            Block::Piece(kind) => Some(kind),
        }
    }
}

/// A single board row.
pub type Row = [Block; COLS];

const EMPTY_ROW: Row = [Block::Empty; COLS];

/// Result of stamping a piece into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum FillOutcome {
    /// Every cell landed on the visible board.
    Placed,
    /// At least one cell was above the visible board.
    ToppedOut,
}

/// Fixed `ROWS × COLS` grid of locked blocks.
///
/// Row 0 is the top of the board. The falling piece is not part of the board
/// until it is stamped with [`Board::fill_piece`].
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::new(PieceKind::O);
/// assert!(board.is_valid(&piece, piece.position(), piece.rotation()));
///
/// board.fill_piece(&piece);
/// assert!(board.is_colliding(&piece));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; ROWS],
    };

    #[must_use]
    pub fn rows(&self) -> &[Row; ROWS] {
        &self.rows
    }

    /// Returns the block at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn block(&self, x: usize, y: usize) -> Block {
        self.rows[y][x]
    }

    /// Overwrites the block at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    pub fn set_block(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Returns the `(column, row)` indices of a position on the visible board.
    fn index(position: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(position.x()).ok().filter(|&x| x < COLS)?;
        let y = usize::try_from(position.y()).ok().filter(|&y| y < ROWS)?;
        Some((x, y))
    }

    /// Returns whether `piece` may occupy `position` with `rotation`.
    ///
    /// Every cell must lie within the side walls and above the floor. Cells
    /// above the visible board are always allowed; visible cells must be empty.
    #[must_use]
    pub fn is_valid(&self, piece: &Piece, position: Position, rotation: Rotation) -> bool {
        piece.cells_at(position, rotation).into_iter().all(|cell| {
            if !usize::try_from(cell.x()).is_ok_and(|x| x < COLS) {
                return false;
            }
            if cell.y() < 0 {
                return true;
            }
            // Rows past the floor have no index.
            Self::index(cell).is_some_and(|(x, y)| self.rows[y][x].is_empty())
        })
    }

    /// Returns whether `piece` overlaps a wall, the floor or a locked block.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        !self.is_valid(piece, piece.position(), piece.rotation())
    }

    /// Stamps the piece's cells into the board.
    ///
    /// Visible cells that are still empty receive the piece's kind. Cells above
    /// the board cannot be stored and make the result [`FillOutcome::ToppedOut`].
    pub fn fill_piece(&mut self, piece: &Piece) -> FillOutcome {
        let mut outcome = FillOutcome::Placed;
        for cell in piece.cells() {
            if cell.y() < 0 {
                outcome = FillOutcome::ToppedOut;
                continue;
            }
            if let Some((x, y)) = Self::index(cell)
                && self.rows[y][x].is_empty()
            {
                self.rows[y][x] = Block::Piece(piece.kind());
            }
        }
        outcome
    }

    /// Clears filled rows and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. A filled row is removed, an empty row is
    /// inserted at the top, and the same row index is examined again because
    /// the rows above have shifted into it.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        let mut y = ROWS;
        while y > 0 {
            let row = y - 1;
            if is_filled(&self.rows[row]) {
                self.rows[..=row].rotate_right(1);
                self.rows[0] = EMPTY_ROW;
                count += 1;
            } else {
                y -= 1;
            }
        }
        count
    }
}

fn is_filled(row: &Row) -> bool {
    row.iter().all(|b| !b.is_empty())
}
