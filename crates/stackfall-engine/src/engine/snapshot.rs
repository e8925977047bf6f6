use crate::{
    GameStats, SessionState,
    core::{
        board::{Block, Board, COLS, ROWS},
        piece::{Piece, PieceKind},
        preview::PreviewGrid,
    },
};

/// A cell as presented to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewBlock {
    #[default]
    Empty,
    /// Block locked into the board.
    Locked(PieceKind),
    /// Cell covered by the falling piece.
    Active(PieceKind),
}

impl ViewBlock {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == ViewBlock::Empty
    }
}

/// Renderable projection of a [`GameSession`](crate::GameSession).
///
/// Built by [`GameSession::snapshot`](crate::GameSession::snapshot). Taking
/// two snapshots without a command in between yields equal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    state: SessionState,
    rows: [[ViewBlock; COLS]; ROWS],
    falling_piece: Option<Piece>,
    preview: Option<PreviewGrid>,
    stats: GameStats,
    message: &'static str,
}

impl Snapshot {
    pub(crate) fn new(
        state: SessionState,
        board: &Board,
        falling_piece: Option<Piece>,
        preview: Option<PreviewGrid>,
        stats: GameStats,
        message: &'static str,
    ) -> Self {
        let mut rows = board.rows().map(|row| {
            row.map(|block| match block {
                Block::Empty => ViewBlock::Empty,
                Block::Piece(kind) => ViewBlock::Locked(kind),
            })
        });
        if let Some(piece) = falling_piece {
            for cell in piece.cells() {
                let (Ok(x), Ok(y)) = (usize::try_from(cell.x()), usize::try_from(cell.y())) else {
                    continue;
                };
                if let Some(block) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *block = ViewBlock::Active(piece.kind());
                }
            }
        }
        Self {
            state,
            rows,
            falling_piece,
            preview,
            stats,
            message,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Board rows with the falling piece's visible cells overlaid.
    #[must_use]
    pub fn rows(&self) -> &[[ViewBlock; COLS]; ROWS] {
        &self.rows
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&PreviewGrid> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Status text for the player; empty when there is nothing to say.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }
}
