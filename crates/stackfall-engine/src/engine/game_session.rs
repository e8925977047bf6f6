use std::time::Duration;

use log::{debug, info};

use crate::{
    PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, PieceKind, Position},
        preview::PreviewGrid,
    },
};

use super::{
    game_stats::GameStats,
    piece_buffer::{PieceBuffer, PieceSeed},
    snapshot::Snapshot,
};

pub const PAUSED_MESSAGE: &str = "PAUSED";
pub const GAME_OVER_MESSAGE: &str = "GAME OVER! Press Enter to restart";

/// Offsets tried in order when a rotation collides.
///
/// This is a simplified kick list, not the Super Rotation System: the same
/// six candidates apply to every piece and every rotation state.
const ROTATION_KICKS: [(i8, i8); 6] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0), (0, -1)];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Not started yet, or the last game ended.
    #[default]
    Idle,
    Active,
    Paused,
}

/// Player and timer inputs accepted by [`GameSession::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    /// Gravity timer fired.
    Tick,
}

/// What happened to the falling piece on a downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    Moved,
    Locked,
}

/// Instruction for the host's recurring gravity timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TimerRequest {
    /// Cancel any pending tick and fire every `Duration` from now on.
    Restart(Duration),
    /// Cancel the timer.
    Stop,
}

/// One play session: board, falling piece, piece sequence and statistics.
///
/// All state changes go through the command handlers (or [`Self::apply`]).
/// Commands that are not legal in the current state are silent no-ops.
///
/// The session does not own a clock. After each command the host calls
/// [`Self::take_timer_request`] and reschedules its gravity timer, feeding
/// [`Command::Tick`] back in when it fires.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Command, GameSession, TimerRequest};
/// use std::time::Duration;
///
/// let mut session = GameSession::new();
/// session.apply(Command::Start);
/// assert!(session.state().is_active());
/// assert_eq!(
///     session.take_timer_request(),
///     Some(TimerRequest::Restart(Duration::from_millis(1000)))
/// );
///
/// session.apply(Command::HardDrop);
/// assert!(session.stats().score() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    falling_piece: Option<Piece>,
    next_kind: Option<PieceKind>,
    piece_buffer: PieceBuffer,
    stats: GameStats,
    state: SessionState,
    message: &'static str,
    timer_request: Option<TimerRequest>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates an idle session whose pieces come from a randomly seeded bag.
    #[must_use]
    pub fn new() -> Self {
        Self::with_piece_buffer(PieceBuffer::new())
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_piece_buffer(PieceBuffer::with_seed(seed))
    }

    fn with_piece_buffer(piece_buffer: PieceBuffer) -> Self {
        Self {
            board: Board::EMPTY,
            falling_piece: None,
            next_kind: None,
            piece_buffer,
            stats: GameStats::new(),
            state: SessionState::Idle,
            message: "",
            timer_request: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the locked blocks, for arranging test scenarios.
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next_kind
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.stats.drop_interval()
    }

    /// Returns the pending gravity timer change, if any, and clears it.
    pub fn take_timer_request(&mut self) -> Option<TimerRequest> {
        self.timer_request.take()
    }

    /// Builds the renderable projection of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.state,
            &self.board,
            self.falling_piece,
            self.next_kind.map(PreviewGrid::new),
            self.stats.clone(),
            self.message,
        )
    }

    /// Dispatches a command to its handler.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Tick => self.tick(),
        }
    }

    /// Starts a new game from any state.
    ///
    /// The board and statistics are reset; the piece bag carries over.
    pub fn start(&mut self) {
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        self.message = "";
        self.state = SessionState::Active;
        self.next_kind = Some(self.piece_buffer.pop_next());
        debug!("game started");

        self.spawn_piece();
        if self.state.is_active() {
            self.timer_request = Some(TimerRequest::Restart(self.drop_interval()));
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Active => {
                self.state = SessionState::Paused;
                self.message = PAUSED_MESSAGE;
            }
            SessionState::Paused => {
                self.state = SessionState::Active;
                self.message = "";
            }
            SessionState::Idle => {}
        }
    }

    /// Gravity step.
    pub fn tick(&mut self) {
        if self.state.is_active() {
            self.move_down();
        }
    }

    pub fn move_left(&mut self) {
        if self.state.is_active() {
            _ = self.try_shift(Position::left);
        }
    }

    pub fn move_right(&mut self) {
        if self.state.is_active() {
            _ = self.try_shift(Position::right);
        }
    }

    /// Moves the piece down one row, awarding 1 point if it did not lock.
    pub fn soft_drop(&mut self) {
        if self.state.is_active() && self.move_down().is_moved() {
            self.stats.add_drop_points(1);
        }
    }

    /// Drops the piece until it locks, awarding 2 points per row descended.
    pub fn hard_drop(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let mut rows = 0;
        while self.move_down().is_moved() {
            rows += 1;
        }
        self.stats.add_drop_points(rows * 2);
    }

    pub fn rotate(&mut self) {
        if self.state.is_active() {
            _ = self.try_rotate();
        }
    }

    fn try_shift(&mut self, step: fn(Position) -> Position) -> Result<(), PieceCollisionError> {
        let piece = self.falling_piece.ok_or(PieceCollisionError)?;
        let position = step(piece.position());
        if !self.board.is_valid(&piece, position, piece.rotation()) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = Some(piece.moved_to(position));
        Ok(())
    }

    fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.falling_piece.ok_or(PieceCollisionError)?;
        let rotation = piece.rotation().next();
        let position = ROTATION_KICKS
            .iter()
            .map(|&(dx, dy)| piece.position().offset(dx, dy))
            .find(|&position| self.board.is_valid(&piece, position, rotation))
            .ok_or(PieceCollisionError)?;
        self.falling_piece = Some(piece.rotated_to(rotation, position));
        Ok(())
    }

    /// Steps the falling piece down, locking it when it cannot move.
    fn move_down(&mut self) -> DropOutcome {
        let Some(piece) = self.falling_piece else {
            return DropOutcome::Locked;
        };
        let position = piece.position().down();
        if self.board.is_valid(&piece, position, piece.rotation()) {
            self.falling_piece = Some(piece.moved_to(position));
            return DropOutcome::Moved;
        }
        self.lock(piece);
        DropOutcome::Locked
    }

    fn lock(&mut self, piece: Piece) {
        let outcome = self.board.fill_piece(&piece);
        debug!(
            "locked {} at ({}, {}) {:?}",
            piece.kind().as_char(),
            piece.position().x(),
            piece.position().y(),
            piece.rotation()
        );
        if outcome.is_topped_out() {
            self.end_game();
            return;
        }
        self.clear_lines();
        self.spawn_piece();
    }

    fn clear_lines(&mut self) {
        let cleared_lines = self.board.clear_lines();
        if cleared_lines > 0 {
            debug!("cleared {cleared_lines} line(s)");
        }
        let Some(level) = self.stats.complete_piece_drop(cleared_lines) else {
            return;
        };
        debug!("level up: {level}, drop interval {:?}", self.drop_interval());
        if !self.state.is_idle() {
            self.timer_request = Some(TimerRequest::Restart(self.drop_interval()));
        }
    }

    fn spawn_piece(&mut self) {
        let kind = self
            .next_kind
            .take()
            .unwrap_or_else(|| self.piece_buffer.pop_next());
        let piece = Piece::new(kind);
        self.falling_piece = Some(piece);
        self.next_kind = Some(self.piece_buffer.pop_next());

        if self.board.is_colliding(&piece) {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        info!(
            "game over: score {}, lines {}, level {}",
            self.stats.score(),
            self.stats.total_cleared_lines(),
            self.stats.level()
        );
        self.timer_request = Some(TimerRequest::Stop);
        self.state = SessionState::Idle;
        self.next_kind = None;
        self.message = GAME_OVER_MESSAGE;
    }
}
