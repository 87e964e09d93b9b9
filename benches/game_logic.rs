use block_stack::core::{GameState, Grid};
use block_stack::engine::{simulate, ActionExecutor, AiConfig, Evaluator, Lookahead, Planner};
use block_stack::types::{GameAction, Rotation, ShapeKind};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn mid_game_grid() -> Grid {
    Grid::from_rows(&[
        "#.........",
        "##...#...#",
        "###.###.##",
        "####.#####",
        "#########.",
    ])
}

fn bench_simulate(c: &mut Criterion) {
    let grid = mid_game_grid();

    c.bench_function("simulate_t_drop", |b| {
        b.iter(|| simulate(black_box(&grid), ShapeKind::T, Rotation::R, black_box(3)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::from_rows(&[
                "##########",
                "##########",
                "##########",
                "##########",
            ]);
            grid.clear_full_rows();
        })
    });
}

fn bench_plan_one_ply(c: &mut Criterion) {
    let grid = mid_game_grid();
    let planner = Planner::new(Evaluator::default(), Lookahead::One);

    c.bench_function("plan_one_ply", |b| {
        b.iter(|| planner.plan(black_box(&grid), ShapeKind::L, None))
    });
}

fn bench_plan_two_ply(c: &mut Criterion) {
    let grid = mid_game_grid();
    let planner = Planner::new(Evaluator::default(), Lookahead::Two);

    c.bench_function("plan_two_ply", |b| {
        b.iter(|| planner.plan(black_box(&grid), ShapeKind::L, Some(ShapeKind::S)))
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.apply_action(GameAction::CreateNewShape);
    let grid = mid_game_grid();
    let piece = state.active().unwrap();

    c.bench_function("try_move", |b| {
        b.iter(|| black_box(piece).shifted(1, 0).is_valid(&grid))
    });
}

fn bench_play_placement(c: &mut Criterion) {
    let config = AiConfig::default();

    c.bench_function("play_20_placements", |b| {
        b.iter(|| {
            let mut game = GameState::new(black_box(7));
            let mut executor = ActionExecutor::new(&config);
            for _ in 0..20 {
                executor.play_placement(&mut game);
            }
            game.score()
        })
    });
}

criterion_group!(
    benches,
    bench_simulate,
    bench_line_clear,
    bench_plan_one_ply,
    bench_plan_two_ply,
    bench_try_move,
    bench_play_placement
);
criterion_main!(benches);
