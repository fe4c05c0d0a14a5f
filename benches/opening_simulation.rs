use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prize_odds::rng::GameRng;
use prize_odds::simulation::deck::parse_deck_file;
use prize_odds::simulation::engine::{run_simulation, run_trials, SimulationConfig};

fn benchmark_single_chunk(c: &mut Criterion) {
    let deck = parse_deck_file("data.txt").expect("Failed to parse deck");

    c.bench_function("1000_trials_seed_12345", |b| {
        b.iter(|| {
            let mut rng = GameRng::new(Some(12345));
            run_trials(black_box(&deck), black_box(1_000), &mut rng)
        })
    });
}

fn benchmark_parallel_run(c: &mut Criterion) {
    let deck = parse_deck_file("data.txt").expect("Failed to parse deck");
    let config = SimulationConfig {
        trials: 100_000,
        seed: Some(42),
    };

    c.bench_function("100k_trials_parallel", |b| {
        b.iter(|| run_simulation(black_box(&deck), black_box(&config)))
    });
}

fn benchmark_deck_parsing(c: &mut Criterion) {
    c.bench_function("parse_deck_file", |b| {
        b.iter(|| parse_deck_file(black_box("data.txt")))
    });
}

criterion_group!(benches, benchmark_single_chunk, benchmark_parallel_run, benchmark_deck_parsing);
criterion_main!(benches);
