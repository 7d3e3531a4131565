use std::time::Duration;

use gtris_engine::{
    Board, Cell, Command, FallInterval, Game, GameConfig, KeyboardInput, Occupancy, Piece,
    PieceCatalog, PieceKind, PieceSeed, ScriptedInput,
};
use proptest::prelude::*;

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::SoftDrop),
        Just(Command::Rotate),
        Just(Command::Confirm),
    ]
}

fn occupancy_rows() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..=4, 1usize..=4)
        .prop_flat_map(|(width, height)| {
            prop::collection::vec(prop::collection::vec(any::<bool>(), width), height)
        })
        .prop_filter("at least one filled cell", |rows| {
            rows.iter().flatten().any(|&filled| filled)
        })
}

/// Board rows, each with at least one empty cell.
fn rows_without_full_line(
    width: usize,
    height: usize,
) -> impl Strategy<Value = Vec<Vec<bool>>> {
    prop::collection::vec(
        prop::collection::vec(any::<bool>(), width)
            .prop_filter("row must not be full", |row| row.iter().any(|&filled| !filled)),
        height,
    )
}

fn board_from_rows(rows: &[Vec<bool>]) -> Board {
    let mut board = Board::new(rows[0].len(), rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, &filled) in row.iter().enumerate() {
            if filled {
                board.set_cell(x, y, Cell::Filled(PieceKind::T));
            }
        }
    }
    board
}

fn board_rows(board: &Board) -> Vec<Vec<Cell>> {
    board.rows().map(<[Cell]>::to_vec).collect()
}

proptest! {
    #[test]
    fn spawn_is_legal_on_empty_board(width in 5usize..64, height in 2usize..64) {
        let board = Board::new(width, height);
        for &shape in PieceCatalog::standard().shapes() {
            prop_assert!(board.is_legal(Piece::spawn(shape, width)));
        }
    }

    #[test]
    fn four_rotations_are_identity(rows in occupancy_rows()) {
        let occupancy = Occupancy::from_rows(rows.as_slice()).unwrap();
        let once = occupancy.rotated();
        prop_assert_eq!(once.width(), occupancy.height());
        prop_assert_eq!(once.height(), occupancy.width());
        prop_assert_eq!(once.filled_count(), occupancy.filled_count());
        prop_assert_eq!(once.rotated().rotated().rotated(), occupancy);
    }

    #[test]
    fn rejected_commands_leave_piece_in_place(
        seed in any::<[u8; 16]>(),
        commands in prop::collection::vec(command(), 1..300),
    ) {
        let seed: PieceSeed = hex(&seed).parse().unwrap();
        let config = GameConfig {
            fall_interval: FallInterval::Ticks(u32::MAX),
            ..GameConfig::default()
        };
        let mut game = Game::new(
            config,
            PieceCatalog::standard(),
            seed,
            KeyboardInput::new(),
            ScriptedInput::default(),
        )
        .unwrap();

        for command in commands {
            if game.state().is_game_over() {
                break;
            }
            let before = *game.current_piece();
            let candidate = match command {
                Command::MoveLeft => before.left(),
                Command::MoveRight => before.right(),
                Command::SoftDrop => before.down(),
                Command::Rotate => before.rotated(),
                Command::Confirm => before,
            };
            let legal = game.board().is_legal(candidate);
            let locked = game.stats().completed_pieces();
            game.apply(command);

            if legal {
                prop_assert_eq!(game.current_piece(), &candidate);
            } else if command == Command::SoftDrop {
                prop_assert_eq!(game.stats().completed_pieces(), locked + 1);
            } else {
                prop_assert_eq!(game.current_piece(), &before);
            }
        }
    }

    #[test]
    fn clear_without_full_rows_is_noop(rows in rows_without_full_line(10, 24)) {
        let mut board = board_from_rows(&rows);
        let before = board.clone();
        prop_assert_eq!(board.clear_full_lines(), 0);
        prop_assert_eq!(board, before);
    }

    #[test]
    fn clearing_one_full_row_shifts_rows_above(
        rows in rows_without_full_line(10, 24),
        k in 0usize..24,
    ) {
        let mut rows = rows;
        rows[k] = vec![true; 10];
        let mut board = board_from_rows(&rows);
        let before = board_rows(&board);

        prop_assert_eq!(board.clear_full_lines(), 1);
        let after = board_rows(&board);
        prop_assert_eq!(after.len(), 24);
        prop_assert!(after[0].iter().all(|cell| cell.is_empty()));
        prop_assert_eq!(&after[1..=k], &before[..k]);
        prop_assert_eq!(&after[k + 1..], &before[k + 1..]);
        prop_assert!(after.iter().all(|row| row.len() == 10));
    }

    #[test]
    fn game_is_deterministic_for_a_seed(
        seed in any::<[u8; 16]>(),
        script in prop::collection::vec(prop::option::of(command()), 0..200),
    ) {
        let seed: PieceSeed = hex(&seed).parse().unwrap();
        let new_game = || {
            Game::new(
                GameConfig::default(),
                PieceCatalog::standard(),
                seed,
                KeyboardInput::new(),
                ScriptedInput::new(script.clone()),
            )
            .unwrap()
        };
        let mut a = new_game();
        let mut b = new_game();
        for _ in 0..script.len() {
            a.tick(Duration::ZERO);
            b.tick(Duration::ZERO);
        }
        prop_assert_eq!(a.board(), b.board());
        prop_assert_eq!(a.current_piece(), b.current_piece());
        prop_assert_eq!(a.score(), b.score());
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
