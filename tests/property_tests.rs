//! Property tests - invariants that must hold for any input sequence

use proptest::prelude::*;

use blockfall::core::catalog::get_shape;
use blockfall::core::rng::PieceQueue;
use blockfall::core::{line_clear_points, GameState, Grid};
use blockfall::types::{GameCommand, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const COMMANDS: [GameCommand; 12] = [
    GameCommand::MoveLeftPress,
    GameCommand::MoveLeftRelease,
    GameCommand::MoveRightPress,
    GameCommand::MoveRightRelease,
    GameCommand::SoftDropStart,
    GameCommand::SoftDropStop,
    GameCommand::RotateCw,
    GameCommand::RotateCcw,
    GameCommand::HardDrop,
    GameCommand::Hold,
    GameCommand::TogglePause,
    GameCommand::Restart,
];

#[derive(Debug, Clone, Copy)]
enum Step {
    Command(GameCommand),
    Tick(u32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0..COMMANDS.len()).prop_map(|i| Step::Command(COMMANDS[i])),
        2 => (0u32..250).prop_map(Step::Tick),
    ]
}

fn kind() -> impl Strategy<Value = PieceKind> {
    (0..PieceKind::ALL.len()).prop_map(|i| PieceKind::ALL[i])
}

fn rotation() -> impl Strategy<Value = Rotation> {
    (0usize..4).prop_map(|i| Rotation::from_index(i).unwrap_or(Rotation::North))
}

fn random_grid() -> impl Strategy<Value = Grid> {
    prop::collection::vec(
        prop::collection::vec(any::<bool>(), BOARD_WIDTH as usize),
        BOARD_HEIGHT as usize,
    )
    .prop_map(|rows| {
        let mut grid = Grid::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled {
                    grid.set(x as i8, y as i8, Some(PieceKind::O));
                }
            }
        }
        grid
    })
}

proptest! {
    #[test]
    fn active_piece_never_overlaps(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..200)) {
        let mut game = GameState::new(seed);
        for step in steps {
            match step {
                Step::Command(command) => { game.apply(command); }
                Step::Tick(ms) => game.tick(ms),
            }
            prop_assert!(!game.active().collides(game.grid()));
            prop_assert!(game.ghost_y() >= game.active().y);
            prop_assert_eq!(game.preview().len(), 5);
        }
    }

    #[test]
    fn score_only_grows_within_a_game(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..200)) {
        let mut game = GameState::new(seed);
        let mut last = (0, 0, 0);
        for step in steps {
            match step {
                Step::Command(GameCommand::Restart) => {}
                Step::Command(command) => { game.apply(command); }
                Step::Tick(ms) => game.tick(ms),
            }
            let now = (game.game_over_count(), game.score(), game.lines());
            if now.0 == last.0 {
                prop_assert!(now.1 >= last.1 && now.2 >= last.2);
            }
            last = now;
        }
    }

    #[test]
    fn same_seed_and_inputs_replay_identically(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..100)) {
        let run = || {
            let mut game = GameState::new(seed);
            for step in &steps {
                match *step {
                    Step::Command(command) => { game.apply(command); }
                    Step::Tick(ms) => game.tick(ms),
                }
            }
            game.snapshot()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn every_bag_is_a_permutation(seed in any::<u64>()) {
        let mut queue = PieceQueue::new(seed);
        for _ in 0..6 {
            let mut bag: Vec<_> = (0..7).map(|_| queue.draw().code()).collect();
            bag.sort_unstable();
            prop_assert_eq!(bag, vec![1, 2, 3, 4, 5, 6, 7]);
        }
    }

    #[test]
    fn collision_matches_cell_by_cell(grid in random_grid(), kind in kind(), rotation in rotation(), x in -4i8..12, y in -4i8..22) {
        let shape = get_shape(kind, rotation);
        let expected = shape.minos().any(|(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            if cx < 0 || cx >= BOARD_WIDTH as i8 || cy >= BOARD_HEIGHT as i8 {
                return true;
            }
            cy >= 0 && grid.is_occupied(cx, cy)
        });
        prop_assert_eq!(grid.collides(&shape, x, y), expected);
    }

    #[test]
    fn sweep_removes_full_rows_and_keeps_the_rest(grid in random_grid()) {
        let mut grid = grid;
        let full = (0..BOARD_HEIGHT as usize).filter(|&y| grid.is_row_full(y)).count();
        let before = grid.filled_count();

        let cleared = grid.sweep_full_rows();
        prop_assert_eq!(cleared, full);
        prop_assert_eq!(grid.filled_count(), before - cleared * BOARD_WIDTH as usize);
        prop_assert!((0..BOARD_HEIGHT as usize).all(|y| !grid.is_row_full(y)));
        // Cleared rows come back empty at the top.
        for y in 0..cleared {
            prop_assert!(grid.row(y).is_some_and(|row| row.iter().all(|cell| cell.is_none())));
        }
    }

    #[test]
    fn line_points_never_exceed_tetris(rows in 0usize..40) {
        let points = line_clear_points(rows);
        prop_assert!(points <= 800);
        prop_assert_eq!(points == 0, rows == 0);
    }
}
