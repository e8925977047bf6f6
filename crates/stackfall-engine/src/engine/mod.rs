//! Game engine logic and state management.
//!
//! This module drives the core data structures to implement the game:
//!
//! - [`GameSession`] - The controller: state machine, commands, scoring
//! - [`GameStats`] - Score, cleared lines, level and gravity interval
//! - [`PieceBuffer`] - 7-bag piece generation
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`Snapshot`] - Renderable projection of a session
//!
//! # Game Flow
//!
//! 1. [`GameSession::start`] resets the board and spawns the first piece
//! 2. The player moves and rotates the falling piece
//! 3. Gravity ticks (or a drop) lock the piece when it cannot descend
//! 4. Full rows are cleared, score and level update, the next piece spawns
//! 5. Repeat until a piece cannot be placed (game over)
//!
//! # Example
//!
//! ```
//! use stackfall_engine::{Command, GameSession};
//!
//! let mut session = GameSession::new();
//! session.apply(Command::Start);
//! session.apply(Command::MoveLeft);
//! session.apply(Command::Rotate);
//! session.apply(Command::HardDrop);
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.stats().completed_pieces(), 1);
//! ```

pub use self::{game_session::*, game_stats::*, piece_buffer::*, snapshot::*};

mod game_session;
mod game_stats;
mod piece_buffer;
mod snapshot;
