//! End-to-end and randomized checks of the game session through its public API.

use std::collections::HashSet;

use proptest::prelude::*;
use stackfall_engine::{
    Block, Board, COLS, Command, GameSession, Piece, PieceBuffer, PieceKind, PieceSeed, ROWS,
    drop_interval,
};

fn started(seed: [u8; 16]) -> GameSession {
    let mut session = GameSession::with_seed(PieceSeed::from_bytes(seed));
    session.apply(Command::Start);
    session
}

/// Returns the piece moved straight down as far as it can go.
fn landing(board: &Board, piece: Piece) -> Piece {
    let mut landed = piece;
    loop {
        let below = landed.position().down();
        if !board.is_valid(&landed, below, landed.rotation()) {
            return landed;
        }
        landed = landed.moved_to(below);
    }
}

fn cell_index(x: i8, y: i8) -> (usize, usize) {
    (usize::try_from(x).unwrap(), usize::try_from(y).unwrap())
}

fn filled_cells(board: &Board) -> usize {
    board.rows().iter().flatten().filter(|b| !b.is_empty()).count()
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::TogglePause),
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::SoftDrop),
        Just(Command::Rotate),
        Just(Command::HardDrop),
        Just(Command::Tick),
        Just(Command::Tick),
    ]
}

#[test]
fn hard_left_then_hard_drop_lands_against_wall_and_floor() {
    for seed in 0..PieceKind::LEN * 3 {
        let mut session = started([u8::try_from(seed).unwrap(); 16]);
        for _ in 0..COLS {
            session.apply(Command::MoveLeft);
        }
        let piece = *session.falling_piece().unwrap();
        let min_x = piece.cells().iter().map(|c| c.x()).min().unwrap();
        assert_eq!(min_x, 0, "{:?}", piece.kind());

        let expected = landing(session.board(), piece);
        assert_eq!(
            expected.cells().iter().map(|c| c.y()).max(),
            Some(i8::try_from(ROWS - 1).unwrap())
        );

        session.apply(Command::HardDrop);
        for cell in expected.cells() {
            let (x, y) = cell_index(cell.x(), cell.y());
            assert_eq!(session.board().block(x, y), Block::Piece(piece.kind()));
        }
        assert_eq!(filled_cells(session.board()), 4);
    }
}

#[test]
fn completing_bottom_row_clears_exactly_one_line() {
    for seed in 0..PieceKind::LEN * 3 {
        let mut session = started([u8::try_from(seed).unwrap(); 16]);
        let piece = *session.falling_piece().unwrap();
        let landed = landing(session.board(), piece);
        let bottom = i8::try_from(ROWS - 1).unwrap();

        let piece_bottom: HashSet<_> = landed
            .cells()
            .iter()
            .filter(|c| c.y() == bottom)
            .map(|c| cell_index(c.x(), c.y()).0)
            .collect();
        for x in (0..COLS).filter(|x| !piece_bottom.contains(x)) {
            session.board_mut().set_block(x, ROWS - 1, Block::Piece(PieceKind::Z));
        }

        let score_before = session.stats().score();
        let level = session.stats().level();
        let rows_dropped = usize::try_from(landed.position().y() - piece.position().y()).unwrap();
        session.apply(Command::HardDrop);

        assert_eq!(session.stats().total_cleared_lines(), 1);
        assert_eq!(
            session.stats().score(),
            score_before + rows_dropped * 2 + 100 * level
        );
        assert!(session.board().rows()[0].iter().all(|b| b.is_empty()));
        // Only the piece's cells above the cleared row remain, shifted down.
        let remaining = 4 - piece_bottom.len();
        assert_eq!(filled_cells(session.board()), remaining);
        for cell in landed.cells().iter().filter(|c| c.y() < bottom) {
            let (x, y) = cell_index(cell.x(), cell.y() + 1);
            assert_eq!(session.board().block(x, y), Block::Piece(piece.kind()));
        }
    }
}

proptest! {
    #[test]
    fn bag_cycles_contain_every_kind_once(seed in any::<[u8; 16]>(), cycles in 1usize..20) {
        let mut buffer = PieceBuffer::with_seed(PieceSeed::from_bytes(seed));
        for _ in 0..cycles {
            let cycle: HashSet<_> = (0..PieceKind::LEN).map(|_| buffer.pop_next()).collect();
            prop_assert_eq!(cycle.len(), PieceKind::LEN);
        }
    }

    #[test]
    fn random_play_respects_invariants(
        seed in any::<[u8; 16]>(),
        commands in prop::collection::vec(command_strategy(), 1..400),
    ) {
        let mut session = started(seed);
        let mut last_score = 0;

        for command in commands {
            session.apply(command);
            let stats = session.stats().clone();

            prop_assert!(stats.score() >= last_score);
            last_score = stats.score();
            prop_assert_eq!(stats.level(), stats.total_cleared_lines() / 10 + 1);
            prop_assert_eq!(session.drop_interval(), drop_interval(stats.level()));

            let snapshot = session.snapshot();
            prop_assert_eq!(&snapshot, &session.snapshot());

            if session.state().is_idle() {
                prop_assert!(session.next_kind().is_none());
                prop_assert!(snapshot.preview().is_none());
                break;
            }

            let piece = session.falling_piece().unwrap();
            prop_assert!(!session.board().is_colliding(piece));
            prop_assert!(session.next_kind().is_some());
            // Locked cells: 4 per piece, 10 removed per cleared line.
            prop_assert_eq!(
                filled_cells(session.board()),
                4 * stats.completed_pieces() - COLS * stats.total_cleared_lines()
            );
        }
    }
}
