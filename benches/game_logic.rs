use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{GameSnapshot, GameState, Grid};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{Direction, GameCommand, PieceKind, RotateDirection, BOARD_HEIGHT};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("sweep_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 16..BOARD_HEIGHT as i8 {
                grid.fill_row_except(y, PieceKind::I, &[]);
            }
            black_box(grid.sweep_full_rows());
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.spawn(black_box(PieceKind::T));
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let mut dir = Direction::Right;

    c.bench_function("move_horizontal", |b| {
        b.iter(|| {
            if !state.move_horizontal(dir) {
                dir = dir.opposite();
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.apply(GameCommand::SoftDropStart);
    state.apply(GameCommand::SoftDropStop);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate(black_box(RotateDirection::Cw));
        })
    });
}

fn bench_snapshot_and_render(c: &mut Criterion) {
    let state = GameState::new(12345);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_render_80x24", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate,
    bench_snapshot_and_render
);
criterion_main!(benches);
