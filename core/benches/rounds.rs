use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use genius_core::*;
use std::hint::black_box;

fn generate_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for length in [3usize, 16, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &length| {
            let mut generator = RandomSequenceGenerator::new(0xDE70);
            b.iter(|| generator.generate(black_box(length), 9));
        });
    }
    group.finish();
}

fn play_full_game(c: &mut Criterion) {
    c.bench_function("twenty_rounds", |b| {
        b.iter(|| {
            let mut engine = GameEngine::with_seed(GameConfig::default(), 7).unwrap();
            let mut scheduler = ManualScheduler::new();
            engine.start_game(&mut scheduler);
            scheduler.run_until_idle(&mut engine);

            for _ in 0..20 {
                let sequence = engine.sequence().to_vec();
                for cell in sequence {
                    engine.handle_input(cell, &mut scheduler).unwrap();
                }
                scheduler.run_until_idle(&mut engine);
            }
            black_box(engine.snapshot())
        });
    });
}

criterion_group!(benches, generate_sequences, play_full_game);
criterion_main!(benches);
